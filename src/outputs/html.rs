//! Plain-rendered report output.
//!
//! Transforms the markdown report into a standalone HTML document with
//! `pulldown-cmark`. The model replies with pipe tables, so table support
//! is enabled explicitly. Any failure here maps to
//! [`PipelineError::Render`], which the report saver downgrades to a
//! warning because the markdown artifact already exists at that point.

use crate::error::PipelineError;
use pulldown_cmark::{Options, Parser, html};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Render markdown to an HTML fragment.
pub fn render_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(markdown, options);

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Write `report_<date>.html` under `reports_dir`, atomically.
#[instrument(level = "info", skip(body), fields(reports_dir = %reports_dir.display(), %date))]
pub async fn write_report_html(
    reports_dir: &Path,
    date: &str,
    body: &str,
) -> Result<PathBuf, PipelineError> {
    let rendered = render_html(body);

    let final_path = reports_dir.join(format!("report_{date}.html"));
    let tmp_path = reports_dir.join(format!(".report_{date}.html.tmp"));

    fs::write(&tmp_path, &rendered)
        .await
        .map_err(|e| PipelineError::Render(e.to_string()))?;
    if let Err(e) = fs::rename(&tmp_path, &final_path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(PipelineError::Render(e.to_string()));
    }

    info!(path = %final_path.display(), bytes = rendered.len(), "Wrote HTML report");
    Ok(final_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use tempfile::tempdir;

    #[test]
    fn test_render_headings_and_text() {
        let out = render_html("## 论文\n\n一段说明。");
        assert!(out.contains("<h2>论文</h2>"));
        assert!(out.contains("一段说明。"));
    }

    #[test]
    fn test_render_pipe_tables() {
        let md = "| 标题 | 链接 |\n| --- | --- |\n| Sample | http://example.com |\n";
        let out = render_html(md);
        assert!(out.contains("<table>"));
        assert!(out.contains("<td>Sample</td>"));
    }

    #[tokio::test]
    async fn test_write_report_html() {
        let dir = tempdir().unwrap();
        let path = write_report_html(dir.path(), "20250601", "## 论文")
            .await
            .unwrap();
        assert_eq!(path.file_name().unwrap(), "report_20250601.html");
        assert!(stdfs::read_to_string(&path).unwrap().contains("<h2>论文</h2>"));
    }

    #[tokio::test]
    async fn test_blocked_path_maps_to_render_error() {
        let dir = tempdir().unwrap();
        stdfs::create_dir(dir.path().join("report_20250601.html")).unwrap();
        let err = write_report_html(dir.path(), "20250601", "body")
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Render(_)));
    }
}
