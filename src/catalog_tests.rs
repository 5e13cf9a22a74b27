//! Tests for catalog normalization

#[cfg(test)]
mod tests {
    use crate::api::RawFileRecord;
    use crate::catalog::*;

    fn record(id: &str, name: &str, mime: Option<&str>, size: Option<&str>) -> RawFileRecord {
        RawFileRecord {
            id: id.to_string(),
            name: name.to_string(),
            mime_type: mime.map(|m| m.to_string()),
            size: size.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_retains_video_mime() {
        let items = normalize(Some(vec![record("a", "clip.bin", Some("video/mp4"), None)]));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "a");
    }

    #[test]
    fn test_retains_extension_without_mime() {
        let items = normalize(Some(vec![record("a", "holiday.mkv", None, None)]));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert!(has_video_extension("MOVIE.MP4"));
        assert!(has_video_extension("Show.WebM"));
        assert!(has_video_extension("old.FLV"));
        assert!(!has_video_extension("notes.TXT"));
    }

    #[test]
    fn test_rejects_non_video() {
        let items = normalize(Some(vec![
            record("a", "doc.pdf", Some("application/pdf"), None),
            record("b", "readme.txt", None, None),
        ]));
        assert!(items.is_empty());
    }

    #[test]
    fn test_mime_wins_over_extension() {
        // Provider says video even though the name does not
        let items = normalize(Some(vec![record("a", "capture.bin", Some("video/x-matroska"), None)]));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_extension_must_be_final_component() {
        assert!(!has_video_extension("archive.mp4.zip"));
        assert!(has_video_extension("two.dots.mp4"));
        assert!(!has_video_extension("mp4"));
    }

    #[test]
    fn test_order_preserved() {
        let items = normalize(Some(vec![
            record("c", "c.mp4", None, None),
            record("a", "a.mp4", None, None),
            record("b", "b.mp4", None, None),
        ]));
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_duplicates_pass_through() {
        let items = normalize(Some(vec![
            record("a", "same.mp4", None, None),
            record("a", "same.mp4", None, None),
        ]));
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_absent_input_yields_empty_catalog() {
        assert!(normalize(None).is_empty());
        assert!(normalize(Some(Vec::new())).is_empty());
    }

    #[test]
    fn test_size_parses_decimal_string() {
        let items = normalize(Some(vec![
            record("a", "a.mp4", None, Some("734003200")),
            record("b", "b.mp4", None, Some("not a number")),
            record("c", "c.mp4", None, None),
        ]));
        assert_eq!(items[0].size_bytes, Some(734003200));
        assert_eq!(items[1].size_bytes, None);
        assert_eq!(items[2].size_bytes, None);
    }

    #[test]
    fn test_mixed_listing_end_to_end() {
        let items = normalize(Some(vec![
            record("a", "Movie.mp4", Some("video/mp4"), None),
            record("b", "doc.pdf", Some("application/pdf"), None),
        ]));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "a");
        assert_eq!(items[0].name, "Movie.mp4");
        assert_eq!(items[0].mime_type.as_deref(), Some("video/mp4"));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(734003200), "700.0 MB");
        assert_eq!(format_size(1610612736), "1.5 GB");
    }
}
