//! Directory scanning: discovers image files and produces the ordered item
//! sequence the history buffer is seeded from.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::Error;
use crate::item::ItemDescriptor;
use crate::meta;

/// Options controlling directory scanning.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional maximum recursion depth. `None` or `Some(0)` means unlimited.
    pub max_depth: Option<usize>,
    /// Optional override for allowed extensions (lowercase, without dot).
    pub exts: Option<Vec<String>>,
    /// Whether to read EXIF capture dates for each item.
    pub read_dates: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            max_depth: None,
            exts: None,
            read_dates: true,
        }
    }
}

/// Return `true` if `path` has an allowed image extension.
#[must_use]
pub fn is_supported_image(path: &Path, exts: Option<&[String]>) -> bool {
    const DEFAULT_EXTS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff"];
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            match exts {
                Some(exts) => exts.iter().any(|e| *e == ext),
                None => DEFAULT_EXTS.contains(&ext.as_str()),
            }
        })
}

/// Scan `root` for images and return descriptors in lexicographic path order.
/// The first item of each distinct parent directory carries the start-of-page
/// marker.
///
/// # Errors
/// Returns [`Error::BadDir`] if `root` is missing or not a directory.
pub fn scan_items(root: &Path, opts: &ScanOptions) -> Result<Vec<ItemDescriptor>, Error> {
    if !root.exists() || !root.is_dir() {
        return Err(Error::BadDir(root.to_string_lossy().into_owned()));
    }

    let mut paths = Vec::new();
    let mut wd = WalkDir::new(root).follow_links(true);
    if !opts.recursive {
        wd = wd.max_depth(1);
    } else if let Some(d) = opts.max_depth
        && d > 0
    {
        wd = wd.max_depth(d);
    }

    for entry in wd
        .into_iter()
        // Skip hidden dot-directories *below* the root only.
        .filter_entry(|e| !should_skip_dir(e))
        .flatten()
    {
        let path = entry.path();
        if path.is_file() && is_supported_image(path, opts.exts.as_deref()) {
            paths.push(path.to_path_buf());
        }
    }

    paths.sort();
    Ok(describe_all(paths, opts.read_dates))
}

/// Turn an ordered path list into descriptors, marking page boundaries.
#[must_use]
pub fn describe_all(paths: Vec<PathBuf>, read_dates: bool) -> Vec<ItemDescriptor> {
    let mut items = Vec::with_capacity(paths.len());
    let mut last_page: Option<PathBuf> = None;
    for path in paths {
        let page = path.parent().map(Path::to_path_buf);
        let start = page != last_page;
        last_page = page;
        let date = if read_dates {
            meta::capture_date(&path)
        } else {
            None
        };
        items.push(
            ItemDescriptor::new(path)
                .with_date(date)
                .with_start_of_page(start),
        );
    }
    items
}

fn should_skip_dir(entry: &DirEntry) -> bool {
    // Never skip the root; tempfile roots can be dot-dirs.
    if entry.depth() == 0 {
        return false;
    }
    if !entry.file_type().is_dir() {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .is_some_and(|n| n.starts_with('.'))
}
