//! Audit configuration.
//!
//! This module defines [`AuditConfig`], the explicit configuration value
//! owned by a run. Ignore lists, probe settings, and deduction weights are
//! enumerated named fields rather than loose dictionaries, so every policy
//! knob is visible in one place.

use std::path::PathBuf;

use crate::issue::DeductionWeights;

/// Configuration for a site audit run.
///
/// # Example
///
/// ```rust
/// use sitegrade_core::AuditConfig;
///
/// let config = AuditConfig::builder("./public")
///     .base_url("https://example.com")
///     .concurrency(4)
///     .skip_external(true)
///     .build();
/// assert_eq!(config.home_page, "index.html");
/// ```
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Site root directory containing the `.html` tree.
    pub root: PathBuf,

    /// Site base URL override. When `None`, the base URL is auto-detected
    /// from the home page's canonical link or `og:url` tag; when detection
    /// also fails, base-URL-dependent checks are skipped.
    pub base_url: Option<String>,

    /// Relative path of the designated home page, exempt from orphan and
    /// breadcrumb checks.
    pub home_page: String,

    /// Directory names pruned entirely during discovery.
    pub ignored_directories: Vec<String>,

    /// Href prefixes that make a link ignorable (fragments, protocol links,
    /// the internal redirect namespace).
    pub ignored_href_prefixes: Vec<String>,

    /// Substrings marking platform-internal asset links as ignorable.
    pub ignored_href_substrings: Vec<String>,

    /// Filename substrings excluded from discovery and orphan analysis
    /// (verification files, error pages).
    pub ignored_filename_substrings: Vec<String>,

    /// Skip the external-link liveness phase entirely.
    pub skip_external: bool,

    /// Per-probe timeout in seconds for external link checks.
    pub timeout: u64,

    /// Concurrency ceiling for the external-link worker pool.
    pub concurrency: usize,

    /// Maximum redirect hops followed per external probe.
    pub redirect_limit: usize,

    /// User-Agent header sent with external probes.
    pub user_agent: String,

    /// Score deductions per issue kind.
    pub weights: DeductionWeights,
}

impl AuditConfig {
    /// Creates a new builder rooted at the given directory.
    pub fn builder(root: impl Into<PathBuf>) -> AuditConfigBuilder {
        AuditConfigBuilder::new(root)
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            base_url: None,
            home_page: "index.html".to_string(),
            ignored_directories: vec![
                ".git".to_string(),
                "node_modules".to_string(),
                ".vscode".to_string(),
                ".idea".to_string(),
            ],
            ignored_href_prefixes: vec![
                "#".to_string(),
                "javascript:".to_string(),
                "mailto:".to_string(),
                "tel:".to_string(),
                "/go/".to_string(),
            ],
            ignored_href_substrings: vec!["cdn-cgi".to_string()],
            ignored_filename_substrings: vec!["google".to_string(), "404.html".to_string()],
            skip_external: false,
            timeout: 5,
            concurrency: 10,
            redirect_limit: 5,
            user_agent: "Mozilla/5.0 (compatible; Sitegrade/1.0; +https://github.com/stormlightlabs/sitegrade)"
                .to_string(),
            weights: DeductionWeights::default(),
        }
    }
}

/// Builder for [`AuditConfig`].
///
/// Provides a fluent API over the configuration defaults.
pub struct AuditConfigBuilder {
    config: AuditConfig,
}

impl AuditConfigBuilder {
    /// Creates a builder with default settings and the given site root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { config: AuditConfig { root: root.into(), ..AuditConfig::default() } }
    }

    /// Sets the base URL, disabling auto-detection.
    pub fn base_url(mut self, value: impl Into<String>) -> Self {
        self.config.base_url = Some(value.into().trim_end_matches('/').to_string());
        self
    }

    /// Sets the home page relative path.
    pub fn home_page(mut self, value: impl Into<String>) -> Self {
        self.config.home_page = value.into();
        self
    }

    /// Skips the external-link liveness phase.
    pub fn skip_external(mut self, value: bool) -> Self {
        self.config.skip_external = value;
        self
    }

    /// Sets the per-probe timeout in seconds.
    pub fn timeout(mut self, value: u64) -> Self {
        self.config.timeout = value;
        self
    }

    /// Sets the external-probe concurrency ceiling.
    pub fn concurrency(mut self, value: usize) -> Self {
        self.config.concurrency = value.max(1);
        self
    }

    /// Sets the User-Agent sent with external probes.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.user_agent = value.into();
        self
    }

    /// Replaces the deduction weight table.
    pub fn weights(mut self, value: DeductionWeights) -> Self {
        self.config.weights = value;
        self
    }

    /// Finalizes the configuration.
    pub fn build(self) -> AuditConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ignore_lists() {
        let config = AuditConfig::default();
        assert!(config.ignored_directories.iter().any(|d| d == ".git"));
        assert!(config.ignored_href_prefixes.iter().any(|p| p == "mailto:"));
        assert!(config.ignored_filename_substrings.iter().any(|f| f == "404.html"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = AuditConfig::builder("/srv/site")
            .base_url("https://example.com/")
            .timeout(2)
            .concurrency(0)
            .build();

        assert_eq!(config.root, PathBuf::from("/srv/site"));
        // Trailing slash is stripped so prefix matching stays exact.
        assert_eq!(config.base_url.as_deref(), Some("https://example.com"));
        assert_eq!(config.timeout, 2);
        assert_eq!(config.concurrency, 1);
    }
}
