//! Library API integration tests: full audit runs over temporary site trees.

use std::fs;
use std::path::Path;

use sitegrade_core::{Audit, AuditConfig, IssueKind};
use tempfile::TempDir;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// A complete page: h1, structured data, breadcrumb, on-topic text.
fn page_html(title: &str, extra: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
        <html><head>
            <title>{title}</title>
            <script type="application/ld+json">{{"@type": "WebPage"}}</script>
        </head><body>
            <nav aria-label="breadcrumb"><a href="/">Home</a></nav>
            <h1>{title}</h1>
            <p>Everything about the site audit.</p>
            {extra}
        </body></html>"#
    )
}

/// The home page, carrying the canonical base URL and site keywords.
fn home_html(base_url: &str, extra: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
        <html><head>
            <title>Home</title>
            <link rel="canonical" href="{base_url}">
            <meta name="keywords" content="audit, links">
            <script type="application/ld+json">{{"@type": "WebSite"}}</script>
        </head><body>
            <h1>Home</h1>
            <p>The site audit home page.</p>
            {extra}
        </body></html>"#
    )
}

fn config(root: &Path) -> AuditConfig {
    AuditConfig::builder(root).skip_external(true).build()
}

async fn run(config: AuditConfig) -> sitegrade_core::AuditReport {
    Audit::new(config).run().await.unwrap()
}

#[tokio::test]
async fn test_clean_url_warning_with_successful_resolution() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "index.html",
        &home_html("https://example.com", r#"<a href="/about.html">About</a>"#),
    );
    write(tmp.path(), "about.html", &page_html("About", r#"<a href="/">Back</a>"#));

    let report = run(config(tmp.path())).await;

    assert_eq!(report.stats.dead_links, 0);
    assert_eq!(report.base_url.as_deref(), Some("https://example.com"));

    let kinds: Vec<_> = report.issues.iter().map(|i| i.kind).collect();
    assert!(kinds.contains(&IssueKind::HtmlSuffixHref));
    assert!(!kinds.contains(&IssueKind::DeadInternalLink));
    assert!(report.ranking.iter().any(|r| r.path == "about.html" && r.inbound == 1));
}

#[tokio::test]
async fn test_dead_link_reported_exactly_once() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "index.html", &home_html("https://example.com", ""));
    write(tmp.path(), "page.html", &page_html("Page", r#"<a href="/missing">Missing</a>"#));

    let report = run(config(tmp.path())).await;

    assert_eq!(report.stats.dead_links, 1);
    let dead: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.kind == IssueKind::DeadInternalLink)
        .collect();
    assert_eq!(dead.len(), 1);
    assert!(dead[0].message.contains("/missing"));
}

#[tokio::test]
async fn test_directory_index_resolution() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "index.html", &home_html("https://example.com", r#"<a href="/blog">Blog</a>"#));
    write(tmp.path(), "blog.html", &page_html("Blog teaser", r#"<a href="/blog/">All posts</a>"#));
    write(tmp.path(), "blog/index.html", &page_html("Blog", r#"<a href="/blog.html">Teaser</a>"#));

    let report = run(config(tmp.path())).await;

    assert_eq!(report.stats.dead_links, 0);
    // Both the trailing-slash link and any direct form share one graph key.
    assert!(report.ranking.iter().any(|r| r.path == "blog/index.html" && r.inbound == 1));
}

#[tokio::test]
async fn test_orphan_listed_exactly_once() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "index.html", &home_html("https://example.com", r#"<a href="/about">About</a>"#));
    write(tmp.path(), "about.html", &page_html("About", ""));
    write(tmp.path(), "orphan.html", &page_html("Orphan", ""));
    for i in 0..5 {
        write(
            tmp.path(),
            &format!("extra{i}.html"),
            &page_html("Extra", r#"<a href="/about">About</a>"#),
        );
    }

    let report = run(config(tmp.path())).await;

    let orphan_mentions = report
        .issues
        .iter()
        .filter(|i| i.kind == IssueKind::OrphanPage && i.message.contains("orphan.html"))
        .count();
    assert_eq!(orphan_mentions, 1);
    // extra0..extra4 are orphans too; the counter covers all of them.
    assert_eq!(report.stats.orphan_pages, 6);
}

#[tokio::test]
async fn test_scan_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "index.html",
        &home_html(
            "https://example.com",
            r#"<a href="/about">About</a><a href="/missing">Gone</a><a href="https://offsite.example/x">Out</a>"#,
        ),
    );
    write(tmp.path(), "about.html", &page_html("About", r#"<a href="/">Home</a>"#));

    let first = run(config(tmp.path())).await;
    let second = run(config(tmp.path())).await;

    assert_eq!(first.ranking, second.ranking);
    assert_eq!(first.stats.external_links, second.stats.external_links);
    assert_eq!(first.issues.len(), second.issues.len());
    assert_eq!(first.score, second.score);
}

#[tokio::test]
async fn test_score_bounds() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "index.html", &home_html("https://example.com", ""));
    // Enough dead links to push past the floor.
    let links: String = (0..20).map(|i| format!(r#"<a href="/gone{i}">x</a>"#)).collect();
    write(tmp.path(), "page.html", &page_html("Page", &links));

    let report = run(config(tmp.path())).await;
    assert_eq!(report.score, 0);

    let tmp_clean = TempDir::new().unwrap();
    write(tmp_clean.path(), "index.html", &home_html("https://example.com", ""));
    let clean = run(config(tmp_clean.path())).await;
    assert!(clean.score <= 100);
}

#[tokio::test]
async fn test_broken_external_links_deducted_once_each() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "index.html",
        &home_html("https://example.com", &format!(r#"<a href="{}/dead-one">One</a>"#, server.uri())),
    );
    write(
        tmp.path(),
        "about.html",
        &page_html("About", &format!(r#"<a href="{}/dead-two">Two</a>"#, server.uri())),
    );

    let config = AuditConfig::builder(tmp.path()).timeout(2).build();
    let report = Audit::new(config).run().await.unwrap();

    // Two distinct (url, source) pairs on the same dead host: two failure
    // tuples, each deducted exactly once.
    let broken: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.kind == IssueKind::BrokenExternalLink)
        .collect();
    assert_eq!(broken.len(), 2);
    assert!(broken.iter().all(|i| i.message.contains("HTTP 404")));

    let weights = sitegrade_core::DeductionWeights::default();
    let total: u32 = broken.iter().map(|i| i.deduction).sum();
    assert_eq!(total, 2 * weights.broken_external_link);
}

#[tokio::test]
async fn test_same_site_absolute_url_resolves_internally() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "index.html",
        &home_html("https://example.com", r#"<a href="https://example.com/about">About</a>"#),
    );
    write(tmp.path(), "about.html", &page_html("About", ""));

    let report = run(config(tmp.path())).await;

    assert_eq!(report.stats.external_links, 0);
    assert_eq!(report.stats.dead_links, 0);
    let kinds: Vec<_> = report.issues.iter().map(|i| i.kind).collect();
    assert!(kinds.contains(&IssueKind::FullUrlHref));
    assert!(report.ranking.iter().any(|r| r.path == "about.html"));
}
