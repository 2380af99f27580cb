//! Media attachments for location records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::location::LocationId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaId(pub Uuid);

/// Kind of media attached to a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "360")]
    Panorama,
    #[serde(rename = "3dgs")]
    Splat,
}

impl MediaKind {
    /// Infer the media kind from an upload's content type, falling back to
    /// filename markers for panorama and gaussian-splat captures.
    pub fn from_upload(content_type: &str, file_name: &str) -> Option<Self> {
        let content_type = content_type.to_ascii_lowercase();
        if content_type.starts_with("image/") {
            return Some(MediaKind::Image);
        }
        if content_type.starts_with("video/") {
            return Some(MediaKind::Video);
        }
        let name = file_name.to_ascii_lowercase();
        if name.contains("360") || name.contains("panorama") {
            return Some(MediaKind::Panorama);
        }
        if name.contains("3dgs") || name.contains("3d") {
            return Some(MediaKind::Splat);
        }
        None
    }

    /// Best-effort guess for an externally linked URL.
    pub fn from_link(url: &str) -> Self {
        if url.to_ascii_lowercase().contains("video") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

/// A file attached to an upload request, held in memory until it is pushed
/// to blob storage.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn is_image(&self) -> bool {
        self.content_type.to_ascii_lowercase().starts_with("image/")
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// File extension, used when deriving the blob storage path.
    pub fn extension(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(_, ext)| ext)
    }
}

/// Row in the `location_media` table: a secondary media entry keyed by
/// location id. A location keeps at most one inline `media_url`; further
/// media lives here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationMedia {
    pub id: MediaId,
    pub location_id: LocationId,
    pub file_url: String,
    pub media_type: Option<MediaKind>,
    pub created_at: DateTime<Utc>,
}

/// A media entry awaiting insertion; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLocationMedia {
    pub location_id: LocationId,
    pub file_url: String,
    pub media_type: Option<MediaKind>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_takes_precedence_over_filename() {
        assert_eq!(
            MediaKind::from_upload("image/jpeg", "site_360_tour.jpg"),
            Some(MediaKind::Image)
        );
    }

    #[test]
    fn filename_markers_detect_special_captures() {
        assert_eq!(
            MediaKind::from_upload("application/octet-stream", "lobby-panorama.bin"),
            Some(MediaKind::Panorama)
        );
        assert_eq!(
            MediaKind::from_upload("application/octet-stream", "scan.3dgs"),
            Some(MediaKind::Splat)
        );
        assert_eq!(MediaKind::from_upload("application/pdf", "report.pdf"), None);
    }

    #[test]
    fn serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&MediaKind::Panorama).unwrap(), "\"360\"");
        assert_eq!(serde_json::to_string(&MediaKind::Splat).unwrap(), "\"3dgs\"");
    }
}
