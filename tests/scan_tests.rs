use std::fs;
use std::path::Path;

use xo_show::error::Error;
use xo_show::history::HistoryBuffer;
use xo_show::scan::{scan_items, ScanOptions};

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"not real pixels").unwrap();
}

fn opts() -> ScanOptions {
    ScanOptions {
        read_dates: false,
        ..ScanOptions::default()
    }
}

#[test]
fn scan_orders_lexicographically_and_filters_extensions() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("b.jpg"));
    touch(&dir.path().join("a.png"));
    touch(&dir.path().join("c.txt"));
    touch(&dir.path().join("notes.md"));

    let items = scan_items(dir.path(), &opts()).unwrap();
    let names: Vec<_> = items
        .iter()
        .map(|i| i.path.file_name().unwrap().to_str().unwrap().to_owned())
        .collect();
    assert_eq!(names, vec!["a.png", "b.jpg"]);
}

#[test]
fn scan_recurses_and_marks_page_starts() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("album1/a.jpg"));
    touch(&dir.path().join("album1/b.jpg"));
    touch(&dir.path().join("album2/a.jpg"));

    let items = scan_items(dir.path(), &opts()).unwrap();
    assert_eq!(items.len(), 3);
    let starts: Vec<bool> = items.iter().map(|i| i.start_of_page).collect();
    assert_eq!(starts, vec![true, false, true]);
}

#[test]
fn scan_skips_hidden_directories_below_the_root() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("visible.jpg"));
    touch(&dir.path().join(".cache/thumb.jpg"));

    let items = scan_items(dir.path(), &opts()).unwrap();
    assert_eq!(items.len(), 1);
}

#[test]
fn non_recursive_scan_stays_at_the_top_level() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("top.jpg"));
    touch(&dir.path().join("deep/nested.jpg"));

    let shallow = ScanOptions {
        recursive: false,
        ..opts()
    };
    let items = scan_items(dir.path(), &shallow).unwrap();
    assert_eq!(items.len(), 1);
}

#[test]
fn missing_directory_is_a_bad_dir_error() {
    let err = scan_items(Path::new("/definitely/not/here"), &opts()).unwrap_err();
    assert!(matches!(err, Error::BadDir(_)));
}

#[test]
fn empty_directory_yields_empty_scan_at_buffer_construction() {
    let dir = tempfile::tempdir().unwrap();
    let items = scan_items(dir.path(), &opts()).unwrap();
    assert!(items.is_empty());
    assert!(matches!(
        HistoryBuffer::from_items(items, 120),
        Err(Error::EmptyScan)
    ));
}

#[test]
fn titles_come_from_file_stems() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("IMG_0042.jpg"));
    let items = scan_items(dir.path(), &opts()).unwrap();
    assert_eq!(items[0].title.as_deref(), Some("IMG_0042"));
}

#[test]
fn mtime_dates_are_read_when_enabled() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("a.jpg"));
    let with_dates = ScanOptions::default();
    let items = scan_items(dir.path(), &with_dates).unwrap();
    // The fixture has no EXIF, so the mtime fallback fills the date.
    assert!(items[0].date.is_some());
}
