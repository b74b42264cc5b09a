//! Href classification and format-convention checks.
//!
//! Classification decides how the scanner routes a link: ignorable,
//! external (probed for liveness), or internal (resolved against the
//! filesystem). Format checks are advisory and orthogonal to resolution; a
//! link can resolve fine and still be authored in the wrong form.

use crate::config::AuditConfig;
use crate::issue::IssueKind;

/// How the scanner should treat an href.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Fragment, protocol link, configured exclusion; skipped entirely.
    Ignored,
    /// Off-site URL, probed by the external checker.
    External,
    /// On-site link, resolved against the filesystem. Same-site absolute
    /// URLs land here too so the resolver can strip the base prefix.
    Internal,
}

/// Classifies a raw href as authored.
pub fn classify(href: &str, base_url: Option<&str>, config: &AuditConfig) -> LinkKind {
    let href = href.trim();

    if config.ignored_href_prefixes.iter().any(|p| href.starts_with(p.as_str()))
        || config.ignored_href_substrings.iter().any(|s| href.contains(s.as_str()))
    {
        return LinkKind::Ignored;
    }

    if href.starts_with("http://") || href.starts_with("https://") {
        if let Some(base) = base_url
            && href.starts_with(base)
        {
            return LinkKind::Internal;
        }
        return LinkKind::External;
    }

    LinkKind::Internal
}

/// Advisory format checks for an internal href. Each violation carries its
/// own deduction; none affect whether the link resolves.
pub fn format_issues(href: &str, base_url: Option<&str>, config: &AuditConfig) -> Vec<IssueKind> {
    let href = href.trim();
    let mut issues = Vec::new();

    if !href.starts_with('/')
        && !href.starts_with("http")
        && !config.ignored_href_prefixes.iter().any(|p| href.starts_with(p.as_str()))
    {
        issues.push(IssueKind::RelativeHref);
    }

    if let Some(base) = base_url
        && href.starts_with(base)
    {
        issues.push(IssueKind::FullUrlHref);
    }

    if href.split(['#', '?']).next().unwrap_or("").ends_with(".html") {
        issues.push(IssueKind::HtmlSuffixHref);
    }

    issues
}
