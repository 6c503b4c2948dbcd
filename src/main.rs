//! # Daily AI Report
//!
//! An aggregation and summarization pipeline that collects the day's
//! AI-related content CSVs (arXiv papers, tech news feeds, GitHub trending
//! repositories) from a shared directory tree, asks an LLM to curate them,
//! and writes a dated markdown report plus a rendered HTML companion.
//!
//! ## Features
//!
//! - Recursively discovers every `*<YYYYMMDD>.csv` under the input root
//! - Classifies rows by filename prefix: `arxiv*` → papers, `github*` →
//!   code, everything else → news
//! - Builds a bounded Chinese-language curation prompt (per-category
//!   character caps protect the service's input limit)
//! - Calls an OpenAI-compatible chat-completions endpoint with retries,
//!   backoff, and a request timeout
//! - Writes `report_<date>.md` and `report_<date>.html` atomically
//!
//! ## Usage
//!
//! ```sh
//! daily_ai_report -i ./generate_docs -r ./reports
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Discovery**: Find the day's per-source CSV files
//! 2. **Classification**: Flatten rows into three category sequences
//! 3. **Prompting**: Render the bounded summarization request
//! 4. **Summarization**: One text-in/text-out LLM call per run
//! 5. **Output**: Persist the markdown and HTML report artifacts

use clap::Parser;
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod classify;
mod cli;
mod discovery;
mod error;
mod models;
mod outputs;
mod pipeline;
mod prompt;
mod utils;

use api::{ChatClient, ChatClientConfig, RetrySummarize};
use cli::Cli;
use error::PipelineError;
use utils::{ensure_writable_dir, is_valid_date_stamp, today_stamp, truncate_for_log};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("daily_ai_report starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.input_dir, ?args.reports_dir, ?args.date, model = %args.model, "Parsed CLI arguments");

    let date = args.date.clone().unwrap_or_else(today_stamp);
    if !is_valid_date_stamp(&date) {
        error!(%date, "Run date must be a valid YYYYMMDD string");
        return Err(format!("invalid run date: {date}").into());
    }

    // Early check: ensure the reports dir is writable
    if let Err(e) = ensure_writable_dir(&args.reports_dir).await {
        error!(
            path = %args.reports_dir,
            error = %e,
            "Reports directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Summarization client ----
    let chat = ChatClient::new(ChatClientConfig {
        base_url: args.api_base.clone(),
        api_key: args.api_key.clone(),
        model: args.model.clone(),
        request_timeout: Duration::from_secs(args.request_timeout_secs),
    })?;
    let client = RetrySummarize::new(chat, 5, Duration::from_secs(1));

    // ---- Run the pipeline ----
    let outcome = pipeline::run(
        Path::new(&args.input_dir),
        Path::new(&args.reports_dir),
        &date,
        args.category_char_cap,
        &client,
    )
    .await;

    let elapsed = start_time.elapsed();
    match outcome {
        Ok(artifacts) => {
            info!(
                markdown_path = %artifacts.markdown_path.display(),
                html_written = artifacts.html_path.is_some(),
                ?elapsed,
                "Execution complete"
            );
            Ok(())
        }
        // No matching inputs is a successful no-op run, not a failure.
        Err(PipelineError::DiscoveryEmpty { root, date }) => {
            info!(
                root = %root.display(),
                %date,
                ?elapsed,
                "No CSV files matched the run date; nothing to do"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %truncate_for_log(&e.to_string(), 500), ?elapsed, "Run failed");
            Err(e.into())
        }
    }
}
