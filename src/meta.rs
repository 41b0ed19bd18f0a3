//! A capture date for an item, read from EXIF with a file-mtime fallback.

use std::fs;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, Local};

/// Best-effort capture date in string form. Prefers EXIF `DateTimeOriginal`
/// (then plain `DateTime`); falls back to the file's modification time.
/// Returns `None` only when neither source is readable.
#[must_use]
pub fn capture_date(path: &Path) -> Option<String> {
    read_exif_datetime(path).or_else(|| mtime_string(path))
}

fn read_exif_datetime(path: &Path) -> Option<String> {
    let f = fs::File::open(path).ok()?;
    let mut buf = BufReader::new(f);
    let reader = exif::Reader::new().read_from_container(&mut buf).ok()?;
    use exif::{In, Tag};
    let field = reader
        .get_field(Tag::DateTimeOriginal, In::PRIMARY)
        .or_else(|| reader.get_field(Tag::DateTime, In::PRIMARY))?;
    Some(field.display_value().to_string())
}

fn mtime_string(path: &Path) -> Option<String> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    let local: DateTime<Local> = modified.into();
    Some(local.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Reads the EXIF orientation tag (1..=8), if present.
#[must_use]
pub fn read_orientation(path: &Path) -> Option<u16> {
    let f = fs::File::open(path).ok()?;
    let mut buf = BufReader::new(f);
    let reader = exif::Reader::new().read_from_container(&mut buf).ok()?;
    use exif::{In, Tag, Value};
    let field = reader.get_field(Tag::Orientation, In::PRIMARY)?;
    match &field.value {
        Value::Short(arr) if !arr.is_empty() => Some(arr[0]),
        Value::Long(arr) if !arr.is_empty() => Some(arr[0] as u16),
        _ => Some(1),
    }
}
