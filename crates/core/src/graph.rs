//! The aggregate link graph and equity analysis.
//!
//! [`LinkGraph`] is populated once during the scanning pass and only read
//! afterwards: the internal map records, per resolved target, every source
//! page that links to it (duplicates preserved, since each occurrence
//! counts toward equity), and the external set holds unique
//! `(url, source)` pairs for the liveness checker.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::config::AuditConfig;
use crate::page::{Page, is_ignored_filename};

/// Internal link map plus external link set for one run.
///
/// Internal targets keep first-insertion order so ranking ties resolve
/// deterministically across identical runs.
#[derive(Debug, Default)]
pub struct LinkGraph {
    order: Vec<String>,
    inbound: HashMap<String, Vec<String>>,
    external: HashSet<(String, String)>,
}

/// One entry of the inbound-link ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedPage {
    /// Root-relative path of the target page.
    pub path: String,
    /// Number of inbound internal links, duplicates included.
    pub inbound: usize,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one internal link occurrence from `source` to `target`.
    /// Only resolved targets reach this point, so every key corresponds to
    /// a file that exists on disk.
    pub fn record_internal(&mut self, target: &str, source: &str) {
        match self.inbound.get_mut(target) {
            Some(sources) => sources.push(source.to_string()),
            None => {
                self.order.push(target.to_string());
                self.inbound.insert(target.to_string(), vec![source.to_string()]);
            }
        }
    }

    /// Records an external link. Repeats of the same `(url, source)` pair
    /// collapse; returns whether the pair was newly added.
    pub fn record_external(&mut self, url: &str, source: &str) -> bool {
        self.external.insert((url.to_string(), source.to_string()))
    }

    /// Whether any scanned page links to `target`.
    pub fn has_inbound(&self, target: &str) -> bool {
        self.inbound.contains_key(target)
    }

    /// The source pages linking to `target`, in discovery order.
    pub fn sources(&self, target: &str) -> Option<&[String]> {
        self.inbound.get(target).map(Vec::as_slice)
    }

    /// Number of distinct internal targets.
    pub fn internal_targets(&self) -> usize {
        self.order.len()
    }

    /// The distinct `(url, source)` pairs collected for external probing.
    pub fn external_links(&self) -> impl Iterator<Item = &(String, String)> {
        self.external.iter()
    }

    pub fn external_len(&self) -> usize {
        self.external.len()
    }

    /// Pages ranked by inbound-link count, descending. The sort is stable,
    /// so ties keep first-insertion order.
    pub fn ranking(&self) -> Vec<RankedPage> {
        let mut ranked: Vec<RankedPage> = self
            .order
            .iter()
            .map(|target| RankedPage {
                path: target.clone(),
                inbound: self.inbound.get(target).map(Vec::len).unwrap_or(0),
            })
            .collect();
        ranked.sort_by(|a, b| b.inbound.cmp(&a.inbound));
        ranked
    }

    /// Pages with zero inbound links, excluding the home page and
    /// ignore-listed filenames.
    pub fn orphans<'a>(&self, pages: &'a [Page], config: &AuditConfig) -> Vec<&'a Page> {
        pages
            .iter()
            .filter(|page| page.rel != config.home_page)
            .filter(|page| !is_ignored_filename(&page.rel, config))
            .filter(|page| !self.has_inbound(&page.rel))
            .collect()
    }
}
