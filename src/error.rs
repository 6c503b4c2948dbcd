//! Error taxonomy for the report pipeline.
//!
//! Errors fall into two propagation classes:
//! - Absorbed locally: [`PipelineError::RowParse`] is logged and counted in
//!   the classifier's skip statistics; it never aborts a run.
//! - Propagated: [`PipelineError::DiscoveryEmpty`] ends the run early with no
//!   output (mapped to a successful exit by `main`), while
//!   [`PipelineError::ServiceUnavailable`] and I/O failures are fatal.
//!
//! [`PipelineError::Render`] sits in between: it is raised by the HTML
//! rendering step but caught by the report saver, which downgrades it to a
//! warning because the markdown artifact has already been persisted.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the daily report pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No CSV file under the input root matched the run date.
    #[error("no CSV files matching *{date}.csv under {root}")]
    DiscoveryEmpty {
        /// Input root that was scanned.
        root: PathBuf,
        /// Run date in `YYYYMMDD` form.
        date: String,
    },

    /// A single CSV row could not be read (field-count mismatch or bad UTF-8).
    #[error("unreadable row in {path}: {source}")]
    RowParse {
        /// File the row came from.
        path: PathBuf,
        /// Underlying CSV reader error.
        #[source]
        source: csv::Error,
    },

    /// The summarization call failed or timed out after retries.
    #[error("summarization service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The HTML rendering step failed after the markdown was persisted.
    #[error("report rendering failed: {0}")]
    Render(String),

    /// Filesystem failure outside the render step (report dir, markdown write).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
