//! Concurrent external-link liveness checking.
//!
//! Every distinct `(url, source)` pair gets exactly one HEAD probe with a
//! short timeout and a bounded number of redirect hops. Probes run across
//! a fixed-ceiling worker pool; each failure is isolated, and the checker
//! returns only after every probe has completed or timed out. There are no
//! retries: the audit is a point-in-time check, not a monitor.

use std::error::Error as _;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::AuditConfig;
use crate::{AuditError, Result};

/// Why a probe failed. HTTP error codes are reported distinctly from
/// transport failures that never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
    /// The final response after redirects carried this status (>= 400).
    Status(u16),
    /// The request exceeded the configured timeout.
    Timeout,
    /// Redirect chain exceeded the hop limit.
    TooManyRedirects,
    /// Connection-level failure (refused, unreachable, DNS, TLS).
    Connection(String),
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Status(code) => write!(f, "HTTP {}", code),
            FailureReason::Timeout => write!(f, "Timed out"),
            FailureReason::TooManyRedirects => write!(f, "Too many redirects"),
            FailureReason::Connection(detail) => write!(f, "Connection error: {}", detail),
        }
    }
}

/// One failed probe: the URL, the page that links to it, and why.
#[derive(Debug, Clone, Serialize)]
pub struct ExternalFailure {
    pub url: String,
    pub source: String,
    #[serde(flatten)]
    pub reason: FailureReason,
}

/// Probes every pair and returns the failures. Order follows completion,
/// not submission; callers treat the result as an unordered set.
///
/// # Errors
///
/// Returns [`AuditError::Http`] only if the shared client cannot be
/// built; individual probe failures are data, not errors.
pub async fn check_external_links(
    pairs: Vec<(String, String)>,
    config: &AuditConfig,
) -> Result<Vec<ExternalFailure>> {
    if pairs.is_empty() {
        return Ok(Vec::new());
    }

    let client = Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout))
        .redirect(reqwest::redirect::Policy::limited(config.redirect_limit))
        .build()
        .map_err(AuditError::Http)?;

    info!("probing {} external links ({} workers)", pairs.len(), config.concurrency);

    let failures: Vec<ExternalFailure> = stream::iter(pairs)
        .map(|(url, source)| {
            let client = client.clone();
            async move { probe(&client, url, source).await }
        })
        .buffer_unordered(config.concurrency)
        .filter_map(|outcome| async move { outcome })
        .collect()
        .await;

    info!("external check complete: {} failures", failures.len());
    Ok(failures)
}

/// One probe. `None` means the link is alive.
async fn probe(client: &Client, url: String, source: String) -> Option<ExternalFailure> {
    debug!("HEAD {}", url);

    match client.head(&url).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            if status >= 400 {
                Some(ExternalFailure { url, source, reason: FailureReason::Status(status) })
            } else {
                None
            }
        }
        Err(e) => Some(ExternalFailure { url, source, reason: categorize(&e) }),
    }
}

fn categorize(error: &reqwest::Error) -> FailureReason {
    if error.is_timeout() {
        FailureReason::Timeout
    } else if error.is_redirect() {
        FailureReason::TooManyRedirects
    } else {
        // DNS, refused connections, and TLS handshake failures all surface
        // as connect/request errors; keep the source detail for the report.
        let detail = error
            .source()
            .map(|s| s.to_string())
            .unwrap_or_else(|| error.to_string());
        FailureReason::Connection(detail)
    }
}
