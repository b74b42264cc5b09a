use owo_colors::OwoColorize;

use sitegrade_core::{Issue, Severity};

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Sitegrade".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Audit a static HTML site\n".dimmed());
}

/// Print a phase heading
pub fn print_heading(message: &str) {
    println!("\n{}", message.bold().bright_cyan());
}

/// Print one issue line with its severity tag and deduction
pub fn print_issue(issue: &Issue) {
    let tag = match issue.severity {
        Severity::Error => format!("[{}]", "ERROR".red()),
        Severity::Warning => format!("[{}]", "WARN".yellow()),
    };

    if issue.deduction > 0 {
        println!("{} {} {}", tag, issue.message, format!("(-{})", issue.deduction).dimmed());
    } else {
        println!("{} {}", tag, issue.message);
    }
}

/// Print a labeled counter line
pub fn print_stat(label: &str, value: usize) {
    println!("  {} {}", format!("{}:", label).dimmed(), value.to_string().bright_white());
}

/// Print the final score, color-coded by band
pub fn print_score(score: u32) {
    let rendered = format!("{}/100", score);
    let colored = if score >= 90 {
        rendered.bright_green().to_string()
    } else if score >= 70 {
        rendered.bright_yellow().to_string()
    } else {
        rendered.bright_red().to_string()
    };

    println!("\n{} {}", "Final score:".bold(), colored);
}
