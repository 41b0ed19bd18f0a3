//! Filesystem watcher for incremental discovery: new images appearing in the
//! library are appended to the history buffer at runtime.

use std::path::{Path, PathBuf};

use crossbeam_channel::Sender;
use notify::{
    event::{CreateKind, ModifyKind, RenameMode},
    Event, EventKind, RecommendedWatcher, RecursiveMode, Result as NotifyResult, Watcher,
};
use tracing::warn;

use crate::events::ItemAdded;
use crate::scan::is_supported_image;

/// Start watching `root` recursively. Only additions are forwarded; the
/// history buffer has no removal operation, and a deleted file simply fails
/// to load at display time (placeholder substitution covers it).
///
/// The returned watcher must be kept alive for events to flow.
pub fn start_watcher(
    root: &Path,
    exts: Option<Vec<String>>,
    tx: Sender<ItemAdded>,
) -> NotifyResult<RecommendedWatcher> {
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => handle_event(event, exts.as_deref(), &tx),
        Err(err) => warn!(error = %err, "watch error"),
    })?;
    watcher.watch(root, RecursiveMode::Recursive)?;
    Ok(watcher)
}

fn handle_event(event: Event, exts: Option<&[String]>, tx: &Sender<ItemAdded>) {
    match &event.kind {
        EventKind::Create(CreateKind::File)
        | EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
            for p in event.paths {
                if is_candidate(&p, exts) {
                    let _ = tx.send(ItemAdded(p));
                }
            }
        }
        _ => { /* removals, metadata and directory events are ignored */ }
    }
}

fn is_candidate(p: &PathBuf, exts: Option<&[String]>) -> bool {
    std::fs::metadata(p).map(|m| m.is_file()).unwrap_or(false)
        && is_supported_image(p, exts)
}
