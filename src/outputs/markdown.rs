//! Structured-markup report output.
//!
//! The model's response is already markdown (three Chinese-language tables);
//! it is persisted verbatim so downstream tooling can re-render it however
//! it likes. The write goes through a temp file and a rename so a run
//! aborted mid-write leaves either the previous report or nothing.

use crate::error::PipelineError;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Write `report_<date>.md` under `reports_dir`, atomically.
#[instrument(level = "info", skip(body), fields(reports_dir = %reports_dir.display(), %date))]
pub async fn write_report_markdown(
    reports_dir: &Path,
    date: &str,
    body: &str,
) -> Result<PathBuf, PipelineError> {
    let final_path = reports_dir.join(format!("report_{date}.md"));
    let tmp_path = reports_dir.join(format!(".report_{date}.md.tmp"));

    fs::write(&tmp_path, body).await?;
    if let Err(e) = fs::rename(&tmp_path, &final_path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(e.into());
    }

    info!(path = %final_path.display(), bytes = body.len(), "Wrote markdown report");
    Ok(final_path)
}
