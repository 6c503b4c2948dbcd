//! Summarization service client with exponential backoff retry logic.
//!
//! The pipeline talks to an OpenAI-compatible chat-completions endpoint
//! through the narrow [`Summarize`] trait, which keeps the one genuinely
//! swappable dependency behind a seam the tests can fake.
//!
//! # Architecture
//!
//! - [`Summarize`]: Core trait defining the text-in/text-out call
//! - [`ChatClient`]: `reqwest`-based production implementation
//! - [`RetrySummarize`]: Decorator that adds retry logic to any `Summarize`
//!
//! # Retry Strategy
//!
//! - Maximum 5 retry attempts
//! - Exponential backoff starting at 1 second
//! - Maximum delay capped at 30 seconds
//! - Random jitter (0-250ms) added to prevent thundering herd
//!
//! Every failure mode of the call (auth, network, non-2xx status, quota,
//! malformed payload, client-side timeout) surfaces as
//! [`PipelineError::ServiceUnavailable`] once retries are exhausted; a
//! failed summarization means the whole run has no output.

use crate::error::PipelineError;
use crate::utils::truncate_for_log;
use rand::{Rng, rng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

/// Trait for the external text-generation call.
pub trait Summarize {
    /// Send the prompt to the service and return its text reply.
    async fn summarize(&self, prompt: &str) -> Result<String, PipelineError>;
}

/// Configuration for the production chat-completions client.
#[derive(Debug, Clone)]
pub struct ChatClientConfig {
    /// Base URL of the OpenAI-compatible API, without trailing slash.
    pub base_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Whole-request timeout; a timeout maps to `ServiceUnavailable`.
    pub request_timeout: StdDuration,
}

/// OpenAI-compatible chat-completions client.
pub struct ChatClient {
    http: reqwest::Client,
    config: ChatClientConfig,
}

impl ChatClient {
    /// Build a client with the timeout baked into the HTTP client.
    pub fn new(config: ChatClientConfig) -> Result<Self, PipelineError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PipelineError::ServiceUnavailable(e.to_string()))?;
        Ok(Self { http, config })
    }
}

impl fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClient")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .field("request_timeout", &self.config.request_timeout)
            .finish()
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

impl Summarize for ChatClient {
    #[instrument(level = "info", skip_all, fields(model = %self.config.model, prompt_chars = prompt.len()))]
    async fn summarize(&self, prompt: &str) -> Result<String, PipelineError> {
        let t0 = Instant::now();
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(elapsed_ms = t0.elapsed().as_millis() as u128, error = %e, "API call failed");
                PipelineError::ServiceUnavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(%status, error = %error_text, "API returned error status");
            return Err(PipelineError::ServiceUnavailable(format!(
                "status {status}: {error_text}"
            )));
        }

        let raw = response
            .text()
            .await
            .map_err(|e| PipelineError::ServiceUnavailable(e.to_string()))?;
        let parsed: ChatResponse = serde_json::from_str(&raw).map_err(|e| {
            warn!(
                response_preview = %truncate_for_log(&raw, 300),
                error = %e,
                "Service returned non-conforming payload"
            );
            PipelineError::ServiceUnavailable(format!("malformed response: {e}"))
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                PipelineError::ServiceUnavailable("response contained no choices".to_string())
            })?;

        info!(
            elapsed_ms = t0.elapsed().as_millis() as u128,
            response_chars = content.len(),
            "Summarization call succeeded"
        );
        Ok(content)
    }
}

/// Wrapper that adds exponential backoff retry logic to any [`Summarize`]
/// implementation.
///
/// The delay between retries follows:
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetrySummarize<T> {
    inner: T,
    max_retries: usize,
    base_delay: StdDuration,
    max_delay: StdDuration,
}

impl<T> RetrySummarize<T>
where
    T: Summarize,
{
    /// Wrap `inner` with up to `max_retries` retries.
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }
}

impl<T> fmt::Debug for RetrySummarize<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetrySummarize")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> Summarize for RetrySummarize<T>
where
    T: Summarize,
{
    #[instrument(level = "info", skip_all)]
    async fn summarize(&self, prompt: &str) -> Result<String, PipelineError> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            let attempt_t0 = Instant::now();
            match self.inner.summarize(prompt).await {
                Ok(resp) => {
                    return Ok(resp);
                }
                Err(e) => {
                    attempt += 1;
                    let attempt_dt = attempt_t0.elapsed();
                    let total_dt = total_t0.elapsed();

                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_attempt = attempt_dt.as_millis() as u128,
                            elapsed_ms_total = total_dt.as_millis() as u128,
                            error = %e,
                            "summarize() exhausted retries"
                        );
                        return Err(e);
                    }

                    // backoff calc
                    let mut delay = self.base_delay.saturating_mul(1 << (attempt - 1));
                    if delay > self.max_delay {
                        delay = self.max_delay;
                    }
                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = delay + StdDuration::from_millis(jitter_ms);

                    warn!(
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_attempt = attempt_dt.as_millis() as u128,
                        elapsed_ms_total = total_dt.as_millis() as u128,
                        ?delay,
                        error = %e,
                        "summarize() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Fails `failures` times, then succeeds.
    struct Flaky {
        failures: usize,
        calls: Mutex<usize>,
    }

    impl Summarize for Flaky {
        async fn summarize(&self, _prompt: &str) -> Result<String, PipelineError> {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            if *calls <= self.failures {
                Err(PipelineError::ServiceUnavailable("transient".to_string()))
            } else {
                Ok("summary".to_string())
            }
        }
    }

    #[tokio::test]
    async fn test_retry_recovers_from_transient_failures() {
        let flaky = Flaky {
            failures: 2,
            calls: Mutex::new(0),
        };
        let client = RetrySummarize::new(flaky, 5, StdDuration::from_millis(1));
        let out = client.summarize("prompt").await.unwrap();
        assert_eq!(out, "summary");
        assert_eq!(*client.inner.calls.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_max_attempts() {
        let flaky = Flaky {
            failures: usize::MAX,
            calls: Mutex::new(0),
        };
        let client = RetrySummarize::new(flaky, 2, StdDuration::from_millis(1));
        let err = client.summarize("prompt").await.unwrap_err();
        assert!(matches!(err, PipelineError::ServiceUnavailable(_)));
        // Initial attempt plus two retries.
        assert_eq!(*client.inner.calls.lock().unwrap(), 3);
    }

    #[test]
    fn test_chat_client_builds_with_timeout() {
        let client = ChatClient::new(ChatClientConfig {
            base_url: "https://api.example.com/v1".to_string(),
            api_key: "key".to_string(),
            model: "gemini-2.0-flash".to_string(),
            request_timeout: StdDuration::from_secs(120),
        });
        assert!(client.is_ok());
    }
}
