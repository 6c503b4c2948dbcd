//! Command-line interface definitions for the daily AI report generator.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Service credentials can be provided via environment variables.

use clap::Parser;

/// Command-line arguments for the daily report run.
///
/// One invocation processes one date end-to-end: it scans the input tree
/// for that day's per-source CSV files, asks the summarization service for
/// a curated digest, and writes the markdown and HTML reports.
///
/// # Examples
///
/// ```sh
/// # Summarize today's CSV drops
/// daily_ai_report -i ./generate_docs -r ./reports
///
/// # Re-generate a past day's report
/// daily_ai_report -i ./generate_docs -r ./reports --date 20250601
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Root directory scanned recursively for per-source CSV files
    #[arg(short, long, default_value = "./generate_docs")]
    pub input_dir: String,

    /// Output directory for the report files
    #[arg(short, long, default_value = "./reports")]
    pub reports_dir: String,

    /// Run date as YYYYMMDD (defaults to today)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Model identifier sent to the summarization service
    #[arg(short, long, env = "SUMMARY_MODEL", default_value = "gemini-2.0-flash")]
    pub model: String,

    /// API key for the summarization service
    #[arg(long, env = "SUMMARY_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the OpenAI-compatible API
    #[arg(
        long,
        env = "SUMMARY_API_BASE",
        default_value = "https://generativelanguage.googleapis.com/v1beta/openai"
    )]
    pub api_base: String,

    /// Character cap applied to each category's content lines in the prompt
    #[arg(long, default_value_t = crate::prompt::DEFAULT_CATEGORY_CHAR_CAP)]
    pub category_char_cap: usize,

    /// Whole-request timeout for the summarization call, in seconds
    #[arg(long, default_value_t = 120)]
    pub request_timeout_secs: u64,
}
