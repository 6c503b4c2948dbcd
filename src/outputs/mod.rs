//! Report persistence: markdown and rendered HTML, keyed by run date.
//!
//! # Submodules
//!
//! - [`markdown`]: Writes the model's response verbatim as the structured-markup report
//! - [`html`]: Renders that markup to a standalone HTML document
//!
//! # Output Structure
//!
//! ```text
//! reports_dir/
//! ├── report_20250601.md
//! └── report_20250601.html
//! ```
//!
//! Both artifacts are written via a temp file and an atomic rename, so an
//! aborted run never leaves a partial report on disk. Re-running for the
//! same date overwrites both files.

pub mod html;
pub mod markdown;

use crate::error::PipelineError;
use crate::models::ReportArtifacts;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Persist both report artifacts for `date`.
///
/// The markdown write is load-bearing: its failure fails the run. The HTML
/// render runs second and is allowed to fail after the markdown exists; the
/// failure is downgraded to a warning and reported through a `None`
/// `html_path` in the returned artifacts.
#[instrument(level = "info", skip(body), fields(reports_dir = %reports_dir.display(), %date))]
pub async fn save_report(
    reports_dir: &Path,
    date: &str,
    body: &str,
) -> Result<ReportArtifacts, PipelineError> {
    tokio::fs::create_dir_all(reports_dir).await?;

    let markdown_path = markdown::write_report_markdown(reports_dir, date, body).await?;

    let html_path = match html::write_report_html(reports_dir, date, body).await {
        Ok(path) => Some(path),
        Err(e) => {
            warn!(
                error = %e,
                markdown_path = %markdown_path.display(),
                "HTML rendering failed; markdown report was still written"
            );
            None
        }
    };

    info!(
        markdown_path = %markdown_path.display(),
        html_written = html_path.is_some(),
        "Report persisted"
    );
    Ok(ReportArtifacts {
        markdown_path,
        html_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_report_writes_both_artifacts() {
        let dir = tempdir().unwrap();
        let artifacts = save_report(dir.path(), "20250601", "## 论文\n| ... |")
            .await
            .unwrap();

        let md = fs::read_to_string(&artifacts.markdown_path).unwrap();
        assert_eq!(md, "## 论文\n| ... |");
        assert_eq!(
            artifacts.markdown_path.file_name().unwrap(),
            "report_20250601.md"
        );

        let html_path = artifacts.html_path.expect("html artifact");
        assert_eq!(html_path.file_name().unwrap(), "report_20250601.html");
        let html = fs::read_to_string(&html_path).unwrap();
        assert!(html.contains("论文"));
    }

    #[tokio::test]
    async fn test_save_report_creates_reports_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("out").join("reports");
        let artifacts = save_report(&nested, "20250601", "body").await.unwrap();
        assert!(artifacts.markdown_path.exists());
    }

    #[tokio::test]
    async fn test_save_report_overwrites_on_rerun() {
        let dir = tempdir().unwrap();
        save_report(dir.path(), "20250601", "first").await.unwrap();
        let artifacts = save_report(dir.path(), "20250601", "second").await.unwrap();

        let md = fs::read_to_string(&artifacts.markdown_path).unwrap();
        assert_eq!(md, "second");
    }

    #[tokio::test]
    async fn test_identical_input_produces_identical_bytes() {
        let dir = tempdir().unwrap();
        let body = "## 新闻\n| a | b |\n\n## 论文\n| c | d |";

        let first = save_report(dir.path(), "20250601", body).await.unwrap();
        let md1 = fs::read(&first.markdown_path).unwrap();
        let html1 = fs::read(first.html_path.as_ref().unwrap()).unwrap();

        let second = save_report(dir.path(), "20250601", body).await.unwrap();
        let md2 = fs::read(&second.markdown_path).unwrap();
        let html2 = fs::read(second.html_path.as_ref().unwrap()).unwrap();

        assert_eq!(md1, md2);
        assert_eq!(html1, html2);
    }

    #[tokio::test]
    async fn test_html_failure_is_partial_success() {
        let dir = tempdir().unwrap();
        // Block the HTML write by occupying its path with a directory.
        fs::create_dir(dir.path().join("report_20250601.html")).unwrap();

        let artifacts = save_report(dir.path(), "20250601", "body").await.unwrap();
        assert!(artifacts.markdown_path.exists());
        assert!(artifacts.html_path.is_none());
    }
}
