//! The page scanner: one pass over a page's anchors and head.
//!
//! For each anchor the scanner classifies the href, routes externals to
//! the probe set, resolves internals against the filesystem, and records
//! the outcome in the graph, stats, and issue log. Page-level semantic
//! checks (heading structure, structured data, breadcrumb, keyword
//! presence) ride along in the same pass. A page that cannot be read is
//! logged and skipped; it never aborts the run.

use std::fs;

use tracing::debug;

use crate::classify::{LinkKind, classify, format_issues};
use crate::config::AuditConfig;
use crate::graph::LinkGraph;
use crate::issue::{IssueKind, IssueLog, Stats};
use crate::page::{Page, rel_key};
use crate::parse::Document;
use crate::resolve::{Resolution, resolve};

/// Mutable run state the scanner writes into. The audit run owns all of
/// it; the scanner is the single writer during the scanning phase.
pub struct ScanContext<'a> {
    pub config: &'a AuditConfig,
    pub base_url: Option<&'a str>,
    pub keywords: &'a [String],
    pub graph: &'a mut LinkGraph,
    pub stats: &'a mut Stats,
    pub log: &'a mut IssueLog,
}

/// Scans one page: semantic checks, then every anchor.
pub fn scan_page(page: &Page, ctx: &mut ScanContext<'_>) {
    let html = match fs::read_to_string(&page.path) {
        Ok(html) => html,
        Err(e) => {
            ctx.log.record(
                IssueKind::UnreadablePage,
                format!("{}: Failed to read page: {}", page.rel, e),
                &ctx.config.weights,
            );
            return;
        }
    };

    let doc = Document::parse(&html);
    ctx.stats.pages_scanned += 1;
    debug!("scanning {}", page.rel);

    check_semantics(page, &doc, ctx);

    for anchor in doc.anchors() {
        let Some(href) = anchor.attr("href") else { continue };
        let href = href.trim();
        if href.is_empty() {
            continue;
        }
        scan_href(page, href, ctx);
    }
}

/// Page-level checks independent of the link graph.
fn check_semantics(page: &Page, doc: &Document, ctx: &mut ScanContext<'_>) {
    let weights = &ctx.config.weights;

    match doc.count("h1") {
        0 => ctx.log.record(IssueKind::MissingH1, format!("{}: Missing <h1> tag", page.rel), weights),
        1 => {}
        n => ctx.log.record(IssueKind::MultipleH1, format!("{}: {} <h1> tags found", page.rel, n), weights),
    }

    if !doc.has_json_ld() {
        ctx.log
            .record(IssueKind::MissingSchema, format!("{}: Missing JSON-LD structured data", page.rel), weights);
    }

    if !doc.has_breadcrumb() && page.rel != ctx.config.home_page {
        ctx.log
            .record(IssueKind::MissingBreadcrumb, format!("{}: Missing breadcrumb", page.rel), weights);
    }

    if !ctx.keywords.is_empty() {
        let text = doc.text_content().to_lowercase();
        if !ctx.keywords.iter().any(|k| text.contains(&k.to_lowercase())) {
            ctx.log.record(
                IssueKind::MissingKeywords,
                format!("{}: Page text mentions none of the site keywords", page.rel),
                weights,
            );
        }
    }
}

/// Classifies and records a single href occurrence.
fn scan_href(page: &Page, href: &str, ctx: &mut ScanContext<'_>) {
    match classify(href, ctx.base_url, ctx.config) {
        LinkKind::Ignored => {}
        LinkKind::External => {
            ctx.graph.record_external(href, &page.rel);
            ctx.stats.external_links += 1;
        }
        LinkKind::Internal => {
            ctx.stats.internal_links += 1;

            for kind in format_issues(href, ctx.base_url, ctx.config) {
                ctx.log.record(kind, format_message(kind, &page.rel, href), &ctx.config.weights);
            }

            match resolve(&page.path, href, &ctx.config.root, ctx.base_url) {
                Resolution::NoOp => {}
                Resolution::File(target) => {
                    let target_rel = rel_key(&target, &ctx.config.root);
                    ctx.graph.record_internal(&target_rel, &page.rel);
                }
                Resolution::Dead => {
                    ctx.log.record(
                        IssueKind::DeadInternalLink,
                        format!("{}: Dead internal link -> {}", page.rel, href),
                        &ctx.config.weights,
                    );
                    ctx.stats.dead_links += 1;
                }
            }
        }
    }
}

fn format_message(kind: IssueKind, rel: &str, href: &str) -> String {
    match kind {
        IssueKind::RelativeHref => format!("{}: Use root-relative path (start with /) instead of: {}", rel, href),
        IssueKind::FullUrlHref => format!("{}: Use local path instead of full URL: {}", rel, href),
        IssueKind::HtmlSuffixHref => format!("{}: Use clean URL (remove .html): {}", rel, href),
        _ => format!("{}: {}", rel, href),
    }
}
