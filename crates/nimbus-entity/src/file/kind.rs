//! Effective file type classification.
//!
//! Stored file names carry an underscore-encoded type marker instead of a
//! dot extension, because name sanitization replaces `.` (see
//! [`crate::path::sanitize_file_name`]): a file uploaded as `photo.png`
//! is stored as `photo_png`. Classification is derived purely from that
//! suffix convention, never from stored metadata.

/// The effective type of a file, derived from its name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// A renderable image (`_png`, `_jpg`, `_jpeg`).
    Image,
    /// Plain text (`_txt`).
    Text,
    /// Anything else.
    Other,
}

impl FileKind {
    /// Classify a stored file name by its suffix marker.
    pub fn from_name(name: &str) -> Self {
        if name.ends_with("_png") || name.ends_with("_jpg") || name.ends_with("_jpeg") {
            Self::Image
        } else if name.ends_with("_txt") {
            Self::Text
        } else {
            Self::Other
        }
    }
}

/// The legacy MIME mapping for a stored file name.
///
/// This three-way mapping is deliberately lossy and is kept exactly as
/// shipped for compatibility: everything that is not `_png` falls back to
/// `image/jpeg`, including text and unknown types.
pub fn mime_type(name: &str) -> &'static str {
    if name.ends_with("_png") {
        return "image/png";
    }
    if name.ends_with("_jpg") || name.ends_with("_jpeg") {
        return "image/jpeg";
    }
    "image/jpeg"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(FileKind::from_name("photo_png"), FileKind::Image);
        assert_eq!(FileKind::from_name("photo_jpg"), FileKind::Image);
        assert_eq!(FileKind::from_name("photo_jpeg"), FileKind::Image);
        assert_eq!(FileKind::from_name("notes_txt"), FileKind::Text);
        assert_eq!(FileKind::from_name("archive_zip"), FileKind::Other);
        assert_eq!(FileKind::from_name("report_pdf"), FileKind::Other);
    }

    #[test]
    fn test_legacy_mime_table() {
        assert_eq!(mime_type("photo_png"), "image/png");
        assert_eq!(mime_type("photo_jpg"), "image/jpeg");
        assert_eq!(mime_type("photo_jpeg"), "image/jpeg");
        // The legacy fallback: everything else is jpeg, even text.
        assert_eq!(mime_type("notes_txt"), "image/jpeg");
        assert_eq!(mime_type("archive_zip"), "image/jpeg");
    }
}
