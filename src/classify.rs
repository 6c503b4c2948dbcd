//! CSV ingestion and classification into the three content categories.
//!
//! Each discovered file is read with the `csv` crate: the first row is the
//! header and is discarded, and every data row is flattened into a single
//! comma-joined text line and appended to the category chosen by the file's
//! name prefix (see [`SourceKind::from_file_name`]).
//!
//! Failure handling is deliberately lenient. A row the reader rejects
//! (field count differing from the header, invalid UTF-8) is skipped and
//! counted; a file that cannot be opened at all is skipped whole and logged.
//! Neither ever aborts the run.

use crate::error::PipelineError;
use crate::models::{ClassifiedCorpus, ClassifyStats, SourceKind};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// Read and classify all discovered files, in discovery order.
#[instrument(level = "info", skip_all, fields(file_count = paths.len()))]
pub fn classify_files(paths: &[PathBuf]) -> (ClassifiedCorpus, ClassifyStats) {
    let mut corpus = ClassifiedCorpus::default();
    let mut stats = ClassifyStats::default();

    for path in paths {
        let kind = kind_of(path);
        // Read the whole file up front so a file-level failure is one clean
        // skip; row-level errors are then purely parse errors.
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable CSV file");
                stats.files_skipped += 1;
                continue;
            }
        };
        let mut reader = csv::Reader::from_reader(data.as_slice());
        stats.files_read += 1;

        // records() already excludes the header row.
        for result in reader.records() {
            match result {
                Ok(record) => {
                    let line = record.iter().collect::<Vec<_>>().join(", ");
                    corpus.push(kind, line);
                    stats.rows_kept += 1;
                }
                Err(e) => {
                    let err = PipelineError::RowParse {
                        path: path.clone(),
                        source: e,
                    };
                    warn!(error = %err, "Skipping row");
                    stats.rows_skipped += 1;
                }
            }
        }
        debug!(path = %path.display(), kind = kind.label(), "Classified file");
    }

    (corpus, stats)
}

/// Source kind of a path, from its final filename component.
fn kind_of(path: &Path) -> SourceKind {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(SourceKind::from_file_name)
        .unwrap_or(SourceKind::News)
}
