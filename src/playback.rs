//! Playback session state: transport selection, tap-gesture classification
//! and seek dispatch.
//!
//! All timing runs off caller-supplied instants so the rules here stay
//! deterministic under test. The session is single-owner state mutated only
//! from the UI thread; the view layer reads it and never writes.

use std::time::{Duration, Instant};

use crate::models::{MediaItem, Side, TransportKind};

/// Two taps closer together than this classify as a double tap
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);
/// How long a seek indicator stays on screen
pub const FEEDBACK_DURATION: Duration = Duration::from_millis(800);
/// Seconds skipped per seek command, in either direction
pub const SKIP_SECONDS: f64 = 10.0;

/// Outcome of feeding one tap to the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureResult {
    /// First tap of a potential pair (or a stray/synthetic duplicate)
    Ignored,
    /// Second tap landed inside the window; carries the second tap's side
    DoubleTap(Side),
}

/// Where a seek request came from. All origins share the same delta; the
/// origin only matters for the transition log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOrigin {
    Gesture,
    Button,
    Key,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekCommand {
    pub origin: SeekOrigin,
    pub side: Side,
}

/// Transient on-screen acknowledgment of a seek command. Produced whether or
/// not the transport could apply the seek, so the user always sees that the
/// input registered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackToken {
    pub side: Side,
    pub expires_at: Instant,
}

impl FeedbackToken {
    pub fn is_active(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Position/duration reported by the active player, when it has one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playhead {
    pub position: f64,
    pub duration: f64,
}

/// State for the currently selected item. At most one exists at a time;
/// navigating back drops it wholesale.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    pub item: MediaItem,
    pub transport: TransportKind,
    last_gesture_at: Option<Instant>,
    last_gesture_side: Option<Side>,
    feedback: Option<FeedbackToken>,
}

impl PlaybackSession {
    /// Start a session on the initial transport: the embedded preview by
    /// default (it copes with any file the provider can preview), unless the
    /// user has recorded a preference for direct streaming.
    pub fn new(item: MediaItem, preferred: TransportKind) -> Self {
        let transport = if preferred == TransportKind::DirectStream {
            TransportKind::DirectStream
        } else {
            TransportKind::EmbeddedFrame
        };
        Self {
            item,
            transport,
            last_gesture_at: None,
            last_gesture_side: None,
            feedback: None,
        }
    }

    pub fn seek_capable(&self) -> bool {
        self.transport.seek_capable()
    }

    /// Re-render the item on another transport. Pure state transition: the
    /// gesture window and any pending indicator are discarded so input from
    /// before the switch cannot pair with input after it.
    pub fn switch_transport(&mut self, requested: TransportKind) {
        self.transport = requested;
        self.last_gesture_at = None;
        self.last_gesture_side = None;
        self.feedback = None;
    }

    /// Classify one tap. A pair counts as a double tap only when the gap is
    /// strictly positive and under the window; a zero gap means a duplicate
    /// synthetic event and never fires. The reported side is the side of the
    /// second tap even when the first landed on the opposite half.
    pub fn on_tap(&mut self, side: Side, now: Instant) -> GestureResult {
        let result = match self.last_gesture_at {
            Some(last) if now > last && now - last < DOUBLE_TAP_WINDOW => {
                GestureResult::DoubleTap(side)
            }
            _ => GestureResult::Ignored,
        };
        self.last_gesture_at = Some(now);
        self.last_gesture_side = Some(side);
        result
    }

    /// Apply a seek command against the current transport.
    ///
    /// Returns the clamped target position when the transport supports
    /// seeking and the player reported a playhead; `None` otherwise. A
    /// feedback token is installed in every case, replacing any unexpired
    /// one - at most one indicator is ever visible.
    pub fn dispatch(&mut self, command: SeekCommand, playhead: Option<Playhead>, now: Instant) -> Option<f64> {
        self.feedback = Some(FeedbackToken {
            side: command.side,
            expires_at: now + FEEDBACK_DURATION,
        });

        if !self.transport.seek_capable() {
            return None;
        }
        let playhead = playhead?;
        let target = (playhead.position + command.side.delta_seconds()).clamp(0.0, playhead.duration);
        Some(target)
    }

    /// The pending indicator, if it is still within its lifetime. Only the
    /// current token's expiry is consulted; deadlines of replaced tokens
    /// are dead state.
    pub fn active_feedback(&self, now: Instant) -> Option<FeedbackToken> {
        self.feedback.filter(|token| token.is_active(now))
    }

    /// Drop the indicator once its lifetime has elapsed
    pub fn clear_expired_feedback(&mut self, now: Instant) {
        if let Some(token) = self.feedback {
            if !token.is_active(now) {
                self.feedback = None;
            }
        }
    }

    pub fn last_gesture_side(&self) -> Option<Side> {
        self.last_gesture_side
    }
}

#[cfg(test)]
#[path = "playback_tests.rs"]
mod tests;
