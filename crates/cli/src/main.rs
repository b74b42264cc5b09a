use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use sitegrade_core::{Audit, AuditConfig, AuditReport};

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Audit a static HTML site: link graph, dead links, orphan pages, and an
/// overall health score
#[derive(Parser, Debug)]
#[command(name = "sitegrade")]
#[command(author = "Sitegrade Contributors")]
#[command(version = VERSION)]
#[command(about = "Audit a static HTML site for link and SEO health", long_about = None)]
struct Args {
    /// Site root directory containing the .html tree
    #[arg(value_name = "ROOT", default_value = ".")]
    root: PathBuf,

    /// Site base URL (overrides auto-detection from the home page)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Relative path of the home page
    #[arg(long, default_value = "index.html", value_name = "PAGE")]
    home_page: String,

    /// Per-probe timeout in seconds for external link checks
    #[arg(long, default_value = "5", value_name = "SECS")]
    timeout: u64,

    /// Concurrency ceiling for external link probes
    #[arg(long, default_value = "10", value_name = "NUM")]
    concurrency: usize,

    /// Number of pages shown in the inbound-link ranking
    #[arg(long, default_value = "10", value_name = "NUM")]
    top: usize,

    /// Skip external link liveness checks
    #[arg(long)]
    skip_external: bool,

    /// Custom User-Agent for external probes
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Emit the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "sitegrade=debug,sitegrade_core=debug".into());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        echo::print_banner();
    }

    let mut builder = AuditConfig::builder(&args.root)
        .home_page(args.home_page)
        .timeout(args.timeout)
        .concurrency(args.concurrency)
        .skip_external(args.skip_external);
    if let Some(base_url) = args.base_url {
        builder = builder.base_url(base_url);
    }
    if let Some(user_agent) = args.user_agent {
        builder = builder.user_agent(user_agent);
    }

    let report = Audit::new(builder.build())
        .run()
        .await
        .with_context(|| format!("Failed to audit {}", args.root.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report).context("Failed to serialize report")?);
    } else {
        render(&report, args.top);
    }

    // Exit status reflects whether the run completed, never the score.
    Ok(())
}

fn render(report: &AuditReport, top: usize) {
    if !report.issues.is_empty() {
        echo::print_heading("Issues");
        for issue in &report.issues {
            echo::print_issue(issue);
        }
    }

    if !report.ranking.is_empty() {
        echo::print_heading(&format!("Top {} pages by inbound links", top.min(report.ranking.len())));
        for entry in report.ranking.iter().take(top) {
            println!("  {} {}", format!("{:>4}", entry.inbound).bright_white(), entry.path);
        }
    }

    echo::print_heading("Summary");
    echo::print_stat("Pages scanned", report.stats.pages_scanned);
    echo::print_stat("Internal links", report.stats.internal_links);
    echo::print_stat("External links", report.stats.external_links);
    echo::print_stat("Dead links", report.stats.dead_links);
    echo::print_stat("Orphan pages", report.stats.orphan_pages);
    if let Some(base_url) = &report.base_url {
        println!("  {} {}", "Base URL:".dimmed(), base_url.bright_white());
    }

    echo::print_score(report.score);
}
