//! Tests for the playback session: transport selection, tap classification
//! and seek dispatch

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::models::{MediaItem, Side, TransportKind};
    use crate::playback::*;

    fn item() -> MediaItem {
        MediaItem {
            id: "f1".to_string(),
            name: "Movie.mp4".to_string(),
            mime_type: Some("video/mp4".to_string()),
            size_bytes: Some(1024),
        }
    }

    fn embedded_session() -> PlaybackSession {
        PlaybackSession::new(item(), TransportKind::EmbeddedFrame)
    }

    fn direct_session() -> PlaybackSession {
        PlaybackSession::new(item(), TransportKind::DirectStream)
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    // --- transport selection ---

    #[test]
    fn test_initial_transport_defaults_to_embedded() {
        let session = PlaybackSession::new(item(), TransportKind::EmbeddedFrame);
        assert_eq!(session.transport, TransportKind::EmbeddedFrame);
    }

    #[test]
    fn test_initial_transport_honors_direct_stream_preference() {
        let session = PlaybackSession::new(item(), TransportKind::DirectStream);
        assert_eq!(session.transport, TransportKind::DirectStream);
    }

    #[test]
    fn test_download_preference_does_not_override_default() {
        let session = PlaybackSession::new(item(), TransportKind::FallbackDownload);
        assert_eq!(session.transport, TransportKind::EmbeddedFrame);
    }

    #[test]
    fn test_only_direct_stream_is_seek_capable() {
        assert!(!TransportKind::EmbeddedFrame.seek_capable());
        assert!(TransportKind::DirectStream.seek_capable());
        assert!(!TransportKind::FallbackDownload.seek_capable());

        assert!(direct_session().seek_capable());
        assert!(!embedded_session().seek_capable());
    }

    // --- gesture classification ---

    #[test]
    fn test_first_tap_is_ignored() {
        let mut session = direct_session();
        let t0 = Instant::now();
        assert_eq!(session.on_tap(Side::Left, t0), GestureResult::Ignored);
    }

    #[test]
    fn test_taps_250ms_apart_double_tap() {
        let mut session = direct_session();
        let t0 = Instant::now();
        session.on_tap(Side::Right, t0);
        assert_eq!(
            session.on_tap(Side::Right, t0 + ms(250)),
            GestureResult::DoubleTap(Side::Right)
        );
    }

    #[test]
    fn test_taps_350ms_apart_ignored_then_rearm() {
        let mut session = direct_session();
        let t0 = Instant::now();
        session.on_tap(Side::Left, t0);
        assert_eq!(session.on_tap(Side::Left, t0 + ms(350)), GestureResult::Ignored);
        // The late tap armed a fresh window
        assert_eq!(
            session.on_tap(Side::Left, t0 + ms(350) + ms(250)),
            GestureResult::DoubleTap(Side::Left)
        );
    }

    #[test]
    fn test_zero_delta_is_not_a_double_tap() {
        // Duplicate synthetic events can arrive with identical timestamps
        let mut session = direct_session();
        let t0 = Instant::now();
        session.on_tap(Side::Left, t0);
        assert_eq!(session.on_tap(Side::Left, t0), GestureResult::Ignored);
    }

    #[test]
    fn test_cross_side_pair_reports_second_side() {
        // Left then right inside the window classifies as a right double
        // tap; no same-side constraint is enforced
        let mut session = direct_session();
        let t0 = Instant::now();
        session.on_tap(Side::Left, t0);
        assert_eq!(
            session.on_tap(Side::Right, t0 + ms(200)),
            GestureResult::DoubleTap(Side::Right)
        );
    }

    #[test]
    fn test_window_boundary_is_exclusive() {
        let mut session = direct_session();
        let t0 = Instant::now();
        session.on_tap(Side::Right, t0);
        assert_eq!(session.on_tap(Side::Right, t0 + ms(300)), GestureResult::Ignored);
    }

    #[test]
    fn test_classifier_runs_on_non_seekable_transport() {
        let mut session = embedded_session();
        let t0 = Instant::now();
        session.on_tap(Side::Right, t0);
        assert_eq!(
            session.on_tap(Side::Right, t0 + ms(100)),
            GestureResult::DoubleTap(Side::Right)
        );
    }

    // --- seek dispatch ---

    fn cmd(origin: SeekOrigin, side: Side) -> SeekCommand {
        SeekCommand { origin, side }
    }

    #[test]
    fn test_left_seek_clamps_at_zero() {
        let mut session = direct_session();
        let playhead = Playhead { position: 5.0, duration: 20.0 };
        let target = session.dispatch(cmd(SeekOrigin::Gesture, Side::Left), Some(playhead), Instant::now());
        assert_eq!(target, Some(0.0));
    }

    #[test]
    fn test_right_seek_clamps_at_duration() {
        let mut session = direct_session();
        let playhead = Playhead { position: 18.0, duration: 20.0 };
        let target = session.dispatch(cmd(SeekOrigin::Button, Side::Right), Some(playhead), Instant::now());
        assert_eq!(target, Some(20.0));
    }

    #[test]
    fn test_unclamped_seek_moves_ten_seconds() {
        let mut session = direct_session();
        let playhead = Playhead { position: 30.0, duration: 120.0 };
        let t0 = Instant::now();
        assert_eq!(
            session.dispatch(cmd(SeekOrigin::Key, Side::Right), Some(playhead), t0),
            Some(40.0)
        );
        assert_eq!(
            session.dispatch(cmd(SeekOrigin::Key, Side::Left), Some(playhead), t0),
            Some(20.0)
        );
    }

    #[test]
    fn test_all_origins_share_the_same_delta() {
        let playhead = Playhead { position: 50.0, duration: 100.0 };
        for origin in [SeekOrigin::Gesture, SeekOrigin::Button, SeekOrigin::Key] {
            let mut session = direct_session();
            assert_eq!(
                session.dispatch(cmd(origin, Side::Right), Some(playhead), Instant::now()),
                Some(60.0)
            );
        }
    }

    #[test]
    fn test_embedded_dispatch_feedback_only() {
        let mut session = embedded_session();
        let t0 = Instant::now();
        let playhead = Playhead { position: 5.0, duration: 20.0 };
        let target = session.dispatch(cmd(SeekOrigin::Gesture, Side::Right), Some(playhead), t0);
        assert_eq!(target, None);
        let token = session.active_feedback(t0).expect("feedback token expected");
        assert_eq!(token.side, Side::Right);
    }

    #[test]
    fn test_direct_dispatch_without_playhead_feedback_only() {
        // The player has not reported a position yet (still connecting)
        let mut session = direct_session();
        let t0 = Instant::now();
        assert_eq!(session.dispatch(cmd(SeekOrigin::Key, Side::Left), None, t0), None);
        assert!(session.active_feedback(t0).is_some());
    }

    // --- feedback token lifetime ---

    #[test]
    fn test_feedback_visible_for_exactly_its_lifetime() {
        let mut session = direct_session();
        let t0 = Instant::now();
        session.dispatch(cmd(SeekOrigin::Button, Side::Left), None, t0);

        assert!(session.active_feedback(t0).is_some());
        assert!(session.active_feedback(t0 + ms(799)).is_some());
        assert!(session.active_feedback(t0 + ms(800)).is_none());
    }

    #[test]
    fn test_new_token_supersedes_unexpired_one() {
        let mut session = direct_session();
        let t0 = Instant::now();
        session.dispatch(cmd(SeekOrigin::Button, Side::Left), None, t0);
        session.dispatch(cmd(SeekOrigin::Button, Side::Right), None, t0 + ms(400));

        // At the first token's deadline the replacement is still visible
        let token = session
            .active_feedback(t0 + ms(800))
            .expect("replacement token should outlive the first deadline");
        assert_eq!(token.side, Side::Right);

        // An expiry sweep at the stale deadline must not erase it either
        session.clear_expired_feedback(t0 + ms(800));
        assert!(session.active_feedback(t0 + ms(1100)).is_some());
        assert!(session.active_feedback(t0 + ms(1200)).is_none());
    }

    #[test]
    fn test_expired_token_is_cleared() {
        let mut session = direct_session();
        let t0 = Instant::now();
        session.dispatch(cmd(SeekOrigin::Gesture, Side::Left), None, t0);
        session.clear_expired_feedback(t0 + ms(900));
        assert!(session.active_feedback(t0 + ms(900)).is_none());
    }

    // --- transport switching ---

    #[test]
    fn test_switch_resets_gesture_window() {
        let mut session = direct_session();
        let t0 = Instant::now();
        session.on_tap(Side::Left, t0);
        session.switch_transport(TransportKind::EmbeddedFrame);
        // A tap shortly after the switch must not pair with one from before
        assert_eq!(session.on_tap(Side::Left, t0 + ms(200)), GestureResult::Ignored);
        assert_eq!(session.transport, TransportKind::EmbeddedFrame);
    }

    #[test]
    fn test_switch_clears_pending_feedback() {
        let mut session = direct_session();
        let t0 = Instant::now();
        session.dispatch(cmd(SeekOrigin::Button, Side::Right), None, t0);
        session.switch_transport(TransportKind::FallbackDownload);
        assert!(session.active_feedback(t0 + ms(100)).is_none());
    }

    #[test]
    fn test_last_gesture_side_tracks_latest_tap() {
        let mut session = direct_session();
        let t0 = Instant::now();
        assert_eq!(session.last_gesture_side(), None);
        session.on_tap(Side::Left, t0);
        assert_eq!(session.last_gesture_side(), Some(Side::Left));
        session.on_tap(Side::Right, t0 + ms(50));
        assert_eq!(session.last_gesture_side(), Some(Side::Right));
        session.switch_transport(TransportKind::EmbeddedFrame);
        assert_eq!(session.last_gesture_side(), None);
    }

    #[test]
    fn test_switch_keeps_item() {
        let mut session = embedded_session();
        session.switch_transport(TransportKind::DirectStream);
        assert_eq!(session.item.id, "f1");
        assert!(session.seek_capable());
    }
}
