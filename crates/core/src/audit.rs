//! The audit run: phase sequencing and the final report.
//!
//! [`Audit`] owns all mutable run state (configuration, site facts, link
//! graph, counters, issue log) and drives the phases in order: auto
//! configuration, file discovery, the scanning pass, equity analysis,
//! external liveness checking, and scoring. All state is written during
//! the single scanning pass and only read afterwards; the external checker
//! is the one concurrent phase, and its results merge back into the issue
//! log single-threaded.

use std::fs;

use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use crate::config::AuditConfig;
use crate::external::check_external_links;
use crate::graph::{LinkGraph, RankedPage};
use crate::issue::{Issue, IssueKind, IssueLog, Stats};
use crate::page::discover_pages;
use crate::parse::Document;
use crate::scan::{ScanContext, scan_page};
use crate::score::final_score;
use crate::{AuditError, Result};

/// Facts auto-detected from the home page before scanning.
#[derive(Debug, Clone, Default)]
pub struct SiteMeta {
    /// The site's public base URL, from the canonical link or `og:url`.
    pub base_url: Option<String>,
    /// Site keywords from `meta[name=keywords]`.
    pub keywords: Vec<String>,
}

/// The complete result of one audit run.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// Base URL used for same-site link checks, if any.
    pub base_url: Option<String>,
    /// Run counters.
    pub stats: Stats,
    /// Every page with inbound links, ranked by in-degree descending.
    pub ranking: Vec<RankedPage>,
    /// Every finding, in discovery order.
    pub issues: Vec<Issue>,
    /// Final score in [0, 100].
    pub score: u32,
}

/// One site audit, run to completion.
///
/// # Example
///
/// ```rust,no_run
/// use sitegrade_core::{Audit, AuditConfig};
///
/// # async fn example() -> sitegrade_core::Result<()> {
/// let config = AuditConfig::builder("./public").build();
/// let report = Audit::new(config).run().await?;
/// println!("score: {}/100", report.score);
/// # Ok(())
/// # }
/// ```
pub struct Audit {
    config: AuditConfig,
}

impl Audit {
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    /// Runs every phase and produces the report.
    ///
    /// # Errors
    ///
    /// Fails only for unrecoverable conditions: a missing site root or an
    /// HTTP client that cannot be constructed. Everything else is recorded
    /// as an issue and the run continues.
    pub async fn run(self) -> Result<AuditReport> {
        if !self.config.root.is_dir() {
            return Err(AuditError::RootNotFound(self.config.root.clone()));
        }

        let mut log = IssueLog::new();
        let mut stats = Stats::default();
        let mut graph = LinkGraph::new();

        let site = detect_site_meta(&self.config, &mut log);
        let pages = discover_pages(&self.config)?;
        info!("scanning {} pages under {}", pages.len(), self.config.root.display());

        {
            let mut ctx = ScanContext {
                config: &self.config,
                base_url: site.base_url.as_deref(),
                keywords: &site.keywords,
                graph: &mut graph,
                stats: &mut stats,
                log: &mut log,
            };
            for page in &pages {
                scan_page(page, &mut ctx);
            }
        }

        for orphan in graph.orphans(&pages, &self.config) {
            log.record(
                IssueKind::OrphanPage,
                format!("Orphan page (no inbound links): {}", orphan.rel),
                &self.config.weights,
            );
            stats.orphan_pages += 1;
        }

        if !self.config.skip_external {
            // Sorted so probe submission order is reproducible across runs.
            let mut pairs: Vec<(String, String)> = graph.external_links().cloned().collect();
            pairs.sort();

            for failure in check_external_links(pairs, &self.config).await? {
                log.record(
                    IssueKind::BrokenExternalLink,
                    format!("{}: Broken external link ({}) -> {}", failure.source, failure.reason, failure.url),
                    &self.config.weights,
                );
            }
        } else {
            debug!("external link check skipped");
        }

        let score = final_score(&log);
        info!("audit complete: score {}/100, {} issues", score, log.len());

        Ok(AuditReport {
            base_url: site.base_url,
            stats,
            ranking: graph.ranking(),
            issues: log.into_issues(),
            score,
        })
    }
}

/// Reads the home page and pulls out the base URL and keywords. Both are
/// soft failures: absence reduces capability but never aborts the run.
fn detect_site_meta(config: &AuditConfig, log: &mut IssueLog) -> SiteMeta {
    let mut site = SiteMeta { base_url: config.base_url.clone(), ..SiteMeta::default() };

    let home_path = config.root.join(&config.home_page);
    let doc = match fs::read_to_string(&home_path) {
        Ok(html) => Document::parse(&html),
        Err(_) => {
            log.record(
                IssueKind::ConfigSoftFail,
                format!("{} not found; base URL and keyword checks disabled", config.home_page),
                &config.weights,
            );
            return site;
        }
    };

    if site.base_url.is_none() {
        site.base_url = doc
            .link_href("canonical")
            .or_else(|| doc.meta_content("og:url"))
            .map(|url| url.trim_end_matches('/').to_string())
            // A relative or malformed canonical value cannot anchor
            // same-site checks; treat it as undetected.
            .filter(|url| Url::parse(url).is_ok());

        match &site.base_url {
            Some(url) => info!("base URL detected: {}", url),
            None => log.record(
                IssueKind::ConfigSoftFail,
                "Base URL not detected (checked canonical and og:url); same-site URL checks disabled",
                &config.weights,
            ),
        }
    }

    site.keywords = doc
        .meta_content("keywords")
        .map(|raw| {
            raw.split(',')
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if site.keywords.is_empty() {
        log.record(
            IssueKind::ConfigSoftFail,
            "No meta keywords found; keyword presence check disabled",
            &config.weights,
        );
    } else {
        debug!("keywords detected: {}", site.keywords.join(", "));
    }

    site
}
