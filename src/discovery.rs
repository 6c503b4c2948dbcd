//! Recursive discovery of the day's source CSV files.
//!
//! The upstream scrapers deposit their output anywhere under a shared root
//! (`generate_docs/github_trends/…`, `generate_docs/archive/…`, and so on),
//! so discovery walks the whole tree. A file is a candidate when its name
//! ends with `<date>.csv`; no source-kind filtering happens here.
//!
//! Entries are visited in sorted order per directory so that repeated runs
//! over the same tree always discover files in the same order, which keeps
//! report output byte-stable for identical inputs.

use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// Find all CSV files for `date` under `root`, recursively.
///
/// Returns an empty vector (not an error) when nothing matches; the caller
/// decides whether that ends the run. Unreadable directories are logged and
/// skipped.
#[instrument(level = "info", skip_all, fields(root = %root.display(), %date))]
pub fn discover(root: &Path, date: &str) -> Vec<PathBuf> {
    let suffix = format!("{date}.csv");
    let mut found = Vec::new();
    walk(root, &suffix, &mut found);
    debug!(count = found.len(), "CSV discovery finished");
    found
}

fn walk(dir: &Path, suffix: &str, found: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory");
            return;
        }
    };

    let mut entries: Vec<_> = entries.filter_map(Result::ok).collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, suffix, found);
        } else if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.ends_with(suffix) {
                found.push(path);
            }
        }
    }
}
