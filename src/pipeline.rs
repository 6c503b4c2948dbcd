//! End-to-end orchestration of one report run.
//!
//! Discovery → classification → prompt → summarization → persistence, for
//! a single date. The function is generic over [`Summarize`] so tests can
//! drive the whole pipeline with a canned response and no network.

use crate::api::Summarize;
use crate::error::PipelineError;
use crate::models::ReportArtifacts;
use crate::{classify, discovery, outputs, prompt};
use std::path::Path;
use tracing::{info, instrument};

/// Run the full pipeline for one date.
///
/// Returns [`PipelineError::DiscoveryEmpty`] when no input CSV matches the
/// date; no report artifact is created in that case. A summarization
/// failure propagates as [`PipelineError::ServiceUnavailable`] with nothing
/// written.
#[instrument(level = "info", skip(client), fields(input_dir = %input_dir.display(), %date))]
pub async fn run<S: Summarize>(
    input_dir: &Path,
    reports_dir: &Path,
    date: &str,
    category_char_cap: usize,
    client: &S,
) -> Result<ReportArtifacts, PipelineError> {
    let files = discovery::discover(input_dir, date);
    if files.is_empty() {
        return Err(PipelineError::DiscoveryEmpty {
            root: input_dir.to_path_buf(),
            date: date.to_string(),
        });
    }
    info!(count = files.len(), "Discovered input CSV files");

    let (corpus, stats) = classify::classify_files(&files);
    info!(
        news = corpus.news.len(),
        papers = corpus.papers.len(),
        code = corpus.code.len(),
        files_read = stats.files_read,
        files_skipped = stats.files_skipped,
        rows_skipped = stats.rows_skipped,
        "Classified input rows"
    );

    let request = prompt::build_prompt(&corpus, category_char_cap);

    info!("Requesting summarization");
    let body = client.summarize(&request).await?;

    outputs::save_report(reports_dir, date, &body).await
}
