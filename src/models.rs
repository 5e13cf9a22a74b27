//! Data models for DriveReel

use serde::{Deserialize, Serialize};

/// A playable video file from the shared folder
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub id: String,
    pub name: String,
    pub mime_type: Option<String>,
    pub size_bytes: Option<u64>,
}

/// Which half of the player surface an input landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Seek direction in seconds: left rewinds, right advances
    pub fn delta_seconds(self) -> f64 {
        match self {
            Side::Left => -crate::playback::SKIP_SECONDS,
            Side::Right => crate::playback::SKIP_SECONDS,
        }
    }
}

/// Rendering mode for the selected item (persisted as the user preference)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TransportKind {
    /// Drive's own preview page in the system browser. Broadest
    /// compatibility, but the player is opaque and cannot be seeked.
    #[default]
    EmbeddedFrame,
    /// Byte-range streaming into the in-process player. The only
    /// transport with programmatic seek.
    DirectStream,
    /// Forced download of the file to local disk.
    FallbackDownload,
}

impl TransportKind {
    pub const ALL: [TransportKind; 3] = [
        TransportKind::EmbeddedFrame,
        TransportKind::DirectStream,
        TransportKind::FallbackDownload,
    ];

    /// True iff seek commands can actually move playback on this transport
    pub fn seek_capable(self) -> bool {
        matches!(self, TransportKind::DirectStream)
    }

    pub fn label(self) -> &'static str {
        match self {
            TransportKind::EmbeddedFrame => "Drive Preview",
            TransportKind::DirectStream => "Direct Stream",
            TransportKind::FallbackDownload => "Download",
        }
    }
}
