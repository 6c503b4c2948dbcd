//! Data models for the daily report pipeline.
//!
//! This module defines the core data structures used throughout the application:
//! - [`SourceKind`]: The closed set of content categories a CSV file can belong to
//! - [`ClassifiedCorpus`]: The day's flattened content lines, split by category
//! - [`ClassifyStats`]: Per-run diagnostic counters from CSV ingestion
//! - [`ReportArtifacts`]: Paths of the files a run produced
//!
//! Source kind is a pure function of the CSV filename: the scrapers that
//! produce the files encode their category in the filename prefix, so no
//! row content ever influences classification.

use std::path::PathBuf;

/// Content category of a source CSV file, derived from its filename prefix.
///
/// The prefixes are checked case-sensitively and in order: `arxiv` → [`Paper`],
/// `github` → [`Code`], and everything else falls through to [`News`]. This
/// matches the naming convention of the upstream scrapers (`arxiv_ai_*.csv`,
/// `github_trends_*.csv`, and assorted news feeds).
///
/// [`Paper`]: SourceKind::Paper
/// [`Code`]: SourceKind::Code
/// [`News`]: SourceKind::News
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Tech-news feed items (the catch-all category).
    News,
    /// arXiv paper listings.
    Paper,
    /// GitHub trending repositories.
    Code,
}

impl SourceKind {
    /// Classify a file by its name. Pure: only the name matters.
    pub fn from_file_name(name: &str) -> Self {
        if name.starts_with("arxiv") {
            SourceKind::Paper
        } else if name.starts_with("github") {
            SourceKind::Code
        } else {
            SourceKind::News
        }
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::News => "news",
            SourceKind::Paper => "paper",
            SourceKind::Code => "code",
        }
    }
}

/// The day's content, flattened to text lines and split by category.
///
/// Each line is one CSV data row with its fields comma-joined. Order is
/// preserved: files in discovery order, rows in file order. No deduplication
/// is performed; two identically-named files in different subdirectories
/// both contribute their rows.
#[derive(Debug, Default)]
pub struct ClassifiedCorpus {
    /// Flattened news items.
    pub news: Vec<String>,
    /// Flattened arXiv paper entries.
    pub papers: Vec<String>,
    /// Flattened GitHub trending entries.
    pub code: Vec<String>,
}

impl ClassifiedCorpus {
    /// Append a flattened line to the sequence for `kind`.
    pub fn push(&mut self, kind: SourceKind, line: String) {
        match kind {
            SourceKind::News => self.news.push(line),
            SourceKind::Paper => self.papers.push(line),
            SourceKind::Code => self.code.push(line),
        }
    }

    /// Total number of lines across all three categories.
    pub fn len(&self) -> usize {
        self.news.len() + self.papers.len() + self.code.len()
    }

    /// True when no category holds any lines.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Diagnostic counters accumulated while reading the day's CSV files.
///
/// Row- and file-level failures are absorbed here rather than aborting
/// the run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ClassifyStats {
    /// Files successfully opened and read.
    pub files_read: usize,
    /// Files that could not be opened at all.
    pub files_skipped: usize,
    /// Data rows flattened into the corpus.
    pub rows_kept: usize,
    /// Rows dropped for field-count mismatch or decode failure.
    pub rows_skipped: usize,
}

/// Paths of the report files written by a run.
///
/// `html_path` is `None` when the HTML rendering step failed after the
/// markdown report was already persisted (partial success).
#[derive(Debug)]
pub struct ReportArtifacts {
    /// The structured-markup report, written verbatim from the model response.
    pub markdown_path: PathBuf,
    /// The rendered HTML report, if that step succeeded.
    pub html_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_arxiv_prefix() {
        assert_eq!(
            SourceKind::from_file_name("arxiv_ai_20250601.csv"),
            SourceKind::Paper
        );
        assert_eq!(SourceKind::from_file_name("arxiv.csv"), SourceKind::Paper);
    }

    #[test]
    fn test_source_kind_github_prefix() {
        assert_eq!(
            SourceKind::from_file_name("github_trends_20250601.csv"),
            SourceKind::Code
        );
    }

    #[test]
    fn test_source_kind_everything_else_is_news() {
        assert_eq!(
            SourceKind::from_file_name("misc_20250601.csv"),
            SourceKind::News
        );
        assert_eq!(
            SourceKind::from_file_name("qbitai_news_20250601.csv"),
            SourceKind::News
        );
        // Case-sensitive: capitalized prefixes do not match.
        assert_eq!(
            SourceKind::from_file_name("Arxiv_ai_20250601.csv"),
            SourceKind::News
        );
        assert_eq!(
            SourceKind::from_file_name("GitHub_trends_20250601.csv"),
            SourceKind::News
        );
    }

    #[test]
    fn test_corpus_push_routes_by_kind() {
        let mut corpus = ClassifiedCorpus::default();
        corpus.push(SourceKind::News, "a news line".to_string());
        corpus.push(SourceKind::Paper, "a paper line".to_string());
        corpus.push(SourceKind::Code, "a code line".to_string());
        corpus.push(SourceKind::Paper, "another paper line".to_string());

        assert_eq!(corpus.news, vec!["a news line"]);
        assert_eq!(corpus.papers, vec!["a paper line", "another paper line"]);
        assert_eq!(corpus.code, vec!["a code line"]);
        assert_eq!(corpus.len(), 4);
        assert!(!corpus.is_empty());
    }

    #[test]
    fn test_corpus_empty() {
        let corpus = ClassifiedCorpus::default();
        assert!(corpus.is_empty());
        assert_eq!(corpus.len(), 0);
    }

    #[test]
    fn test_source_kind_labels() {
        assert_eq!(SourceKind::News.label(), "news");
        assert_eq!(SourceKind::Paper.label(), "paper");
        assert_eq!(SourceKind::Code.label(), "code");
    }
}
