//! Catalog normalization: raw Drive file records -> playable items

use crate::api::RawFileRecord;
use crate::models::MediaItem;

/// File extensions accepted when the mime type is missing or non-video
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "webm", "flv"];

/// Filter and shape raw file records into the playable catalog.
///
/// Provider order is preserved and duplicate ids pass through unchanged.
/// An absent record list yields an empty catalog; "nothing shared" is not
/// an error here, the fetch layer reports failures separately.
pub fn normalize(records: Option<Vec<RawFileRecord>>) -> Vec<MediaItem> {
    let Some(records) = records else {
        return Vec::new();
    };

    records
        .into_iter()
        .filter(is_video)
        .map(|record| MediaItem {
            id: record.id,
            name: record.name,
            mime_type: record.mime_type,
            size_bytes: parse_size(record.size.as_deref()),
        })
        .collect()
}

/// A record is playable iff its mime type says video or its name carries
/// a known video extension (case-insensitive)
pub fn is_video(record: &RawFileRecord) -> bool {
    if let Some(ref mime) = record.mime_type {
        if mime.starts_with("video/") {
            return true;
        }
    }
    has_video_extension(&record.name)
}

pub fn has_video_extension(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) => VIDEO_EXTENSIONS
            .iter()
            .any(|candidate| ext.eq_ignore_ascii_case(candidate)),
        None => false,
    }
}

/// The Drive API reports `size` as a decimal string; unparseable values
/// degrade to unknown rather than dropping the record
fn parse_size(size: Option<&str>) -> Option<u64> {
    size.and_then(|s| s.trim().parse::<u64>().ok())
}

/// Human-readable size for grid cards
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
