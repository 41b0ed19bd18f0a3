//! Descriptor for a single displayable media item.

use std::path::{Path, PathBuf};

/// Metadata record identifying one displayable media item. Holds no decoded
/// pixel data; the renderer loads from `path` on demand.
///
/// Immutable once constructed by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDescriptor {
    /// Location of the image file.
    pub path: PathBuf,
    /// Display title, typically the file stem.
    pub title: Option<String>,
    /// Free-form description text.
    pub description: Option<String>,
    /// Capture time in string form (EXIF, or file mtime as a fallback).
    pub date: Option<String>,
    /// Set on the first item of each grouped source (here: each distinct
    /// parent directory).
    pub start_of_page: bool,
}

impl ItemDescriptor {
    /// Build a descriptor with the title defaulted from the file stem and no
    /// further metadata.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_owned);
        Self {
            path,
            title,
            description: None,
            date: None,
            start_of_page: false,
        }
    }

    pub fn with_date(mut self, date: Option<String>) -> Self {
        self.date = date;
        self
    }

    pub fn with_start_of_page(mut self, start: bool) -> Self {
        self.start_of_page = start;
        self
    }

    /// Parent directory, used to detect page (group) boundaries.
    #[must_use]
    pub fn page(&self) -> Option<&Path> {
        self.path.parent()
    }
}
