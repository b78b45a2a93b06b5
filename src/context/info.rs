use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::SystemTime;

/// Pixel dimensions of an image file. `0x0` when unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 && self.height == 0
    }

    /// Read dimensions from the image header without decoding pixels
    pub fn load(path: &Path) -> Self {
        match image::image_dimensions(path) {
            Ok((width, height)) => Self { width, height },
            Err(e) => {
                tracing::debug!("No image dimensions for {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Filesystem metadata used by `{file:...}` and `{size}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub exists: bool,
    /// Size in bytes (0 for directories and missing files)
    pub len: u64,
    pub is_readonly: bool,
    /// Local creation time, when the platform records one
    pub created_at: Option<NaiveDateTime>,
    pub modified_at: Option<NaiveDateTime>,
    pub accessed_at: Option<NaiveDateTime>,
}

impl FileInfo {
    /// Metadata of a path that does not exist
    pub fn missing() -> Self {
        Self::default()
    }

    /// A file with no timestamps that holds `len` bytes
    pub fn with_len(len: u64) -> Self {
        Self {
            exists: true,
            len,
            ..Self::default()
        }
    }

    /// Read metadata from disk. Missing or unreadable paths yield [`FileInfo::missing`].
    pub fn load(path: &Path) -> Self {
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::debug!("No metadata for {}: {}", path.display(), e);
                return Self::missing();
            }
        };

        Self {
            exists: true,
            len: if metadata.is_file() { metadata.len() } else { 0 },
            is_readonly: metadata.permissions().readonly(),
            created_at: metadata.created().ok().map(to_local),
            modified_at: metadata.modified().ok().map(to_local),
            accessed_at: metadata.accessed().ok().map(to_local),
        }
    }

    /// Creation time, falling back to the last write time on platforms
    /// that do not record creation
    pub fn created_or_modified(&self) -> Option<NaiveDateTime> {
        self.created_at.or(self.modified_at)
    }
}

fn to_local(time: SystemTime) -> NaiveDateTime {
    DateTime::<Local>::from(time).naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_info_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello world").unwrap();
        file.flush().unwrap();

        let info = FileInfo::load(file.path());
        assert!(info.exists);
        assert_eq!(info.len, 11);
        assert!(info.modified_at.is_some());
        assert!(info.created_or_modified().is_some());
    }

    #[test]
    fn test_file_times_are_local() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mtime = filetime::FileTime::from_unix_time(1_600_000_000, 0);
        filetime::set_file_times(file.path(), mtime, mtime).unwrap();

        let expected = to_local(std::time::UNIX_EPOCH + std::time::Duration::from_secs(1_600_000_000));
        let info = FileInfo::load(file.path());
        assert_eq!(info.modified_at, Some(expected));
        assert_eq!(info.accessed_at, Some(expected));
    }

    #[test]
    fn test_file_info_missing() {
        let dir = tempfile::tempdir().unwrap();
        let info = FileInfo::load(&dir.path().join("nope.txt"));
        assert_eq!(info, FileInfo::missing());
        assert!(!info.exists);
    }

    #[test]
    fn test_image_info_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.png");
        image::RgbImage::new(4, 3).save(&path).unwrap();

        assert_eq!(ImageInfo::load(&path), ImageInfo::new(4, 3));
    }

    #[test]
    fn test_image_info_not_an_image() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"plain text").unwrap();
        let info = ImageInfo::load(file.path());
        assert!(info.is_empty());
    }
}
