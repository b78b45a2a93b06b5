//! Evaluation Context
//!
//! The read-only, per-file view a template is rendered against.
//!
//! Naming fields are computed up front from the path. Filesystem metadata
//! and image dimensions are loaded on first use and memoized, so building a
//! context never touches the disk.

#![allow(dead_code)]

pub mod info;

pub use info::{FileInfo, ImageInfo};

use chrono::{Local, NaiveDateTime, NaiveTime};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Values a template can reference for one file
pub trait EvaluationContext {
    /// File name without extension
    fn name(&self) -> &str;
    /// Extension without the dot
    fn ext(&self) -> &str;
    /// File name with extension
    fn full_name(&self) -> &str;
    fn full_path(&self) -> &str;
    /// Name of the containing folder
    fn dir_name(&self) -> &str;
    /// 0-based position in the batch
    fn index(&self) -> usize;
    fn total_count(&self) -> usize;
    fn today(&self) -> NaiveDateTime;
    fn now(&self) -> NaiveDateTime;
    fn image(&self) -> ImageInfo;
    fn file(&self) -> &FileInfo;

    /// Byte length, 0 when the file does not exist
    fn size(&self) -> u64 {
        let file = self.file();
        if file.exists {
            file.len
        } else {
            0
        }
    }

    /// Position counted from the end of the batch
    fn reverse_index(&self) -> usize {
        self.total_count()
            .saturating_sub(1)
            .saturating_sub(self.index())
    }
}

/// Context for a file on disk
#[derive(Debug)]
pub struct FileContext {
    path: PathBuf,
    name: String,
    ext: String,
    full_name: String,
    full_path: String,
    dir_name: String,
    index: usize,
    total_count: usize,
    today: NaiveDateTime,
    now: NaiveDateTime,
    image: OnceLock<ImageInfo>,
    file: OnceLock<FileInfo>,
}

impl FileContext {
    /// Context for `path` at `index` of `total_count`, stamped with the current local time
    pub fn new(path: impl AsRef<Path>, index: usize, total_count: usize) -> Self {
        Self::with_clock(path, index, total_count, Local::now().naive_local())
    }

    /// Context with a fixed clock
    pub fn with_clock(
        path: impl AsRef<Path>,
        index: usize,
        total_count: usize,
        now: NaiveDateTime,
    ) -> Self {
        let path = path.as_ref().to_path_buf();
        let lossy = |s: Option<&std::ffi::OsStr>| {
            s.map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        };

        let name = lossy(path.file_stem());
        let ext = lossy(path.extension());
        let full_name = lossy(path.file_name());
        let dir_name = lossy(path.parent().and_then(|p| p.file_name()));
        let full_path = path.to_string_lossy().to_string();

        Self {
            path,
            name,
            ext,
            full_name,
            full_path,
            dir_name,
            index,
            total_count,
            today: now.date().and_time(NaiveTime::MIN),
            now,
            image: OnceLock::new(),
            file: OnceLock::new(),
        }
    }

    /// Seed file metadata, e.g. from a listing the caller already holds.
    /// A later seed replaces an earlier one.
    pub fn with_file_info(mut self, info: FileInfo) -> Self {
        self.file = OnceLock::from(info);
        self
    }

    /// Seed image dimensions. A later seed replaces an earlier one.
    pub fn with_image_info(mut self, info: ImageInfo) -> Self {
        self.image = OnceLock::from(info);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_file_loaded(&self) -> bool {
        self.file.get().is_some()
    }

    pub fn is_image_loaded(&self) -> bool {
        self.image.get().is_some()
    }
}

impl EvaluationContext for FileContext {
    fn name(&self) -> &str {
        &self.name
    }

    fn ext(&self) -> &str {
        &self.ext
    }

    fn full_name(&self) -> &str {
        &self.full_name
    }

    fn full_path(&self) -> &str {
        &self.full_path
    }

    fn dir_name(&self) -> &str {
        &self.dir_name
    }

    fn index(&self) -> usize {
        self.index
    }

    fn total_count(&self) -> usize {
        self.total_count
    }

    fn today(&self) -> NaiveDateTime {
        self.today
    }

    fn now(&self) -> NaiveDateTime {
        self.now
    }

    fn image(&self) -> ImageInfo {
        *self.image.get_or_init(|| {
            tracing::trace!("Probing image dimensions: {}", self.path.display());
            ImageInfo::load(&self.path)
        })
    }

    fn file(&self) -> &FileInfo {
        self.file.get_or_init(|| {
            tracing::trace!("Loading file metadata: {}", self.path.display());
            FileInfo::load(&self.path)
        })
    }
}
