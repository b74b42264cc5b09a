//! Issues, severities, deduction policy, and run counters.
//!
//! Every finding an audit produces is an immutable [`Issue`] appended to
//! the [`IssueLog`]; issues are never removed or rewritten. The score
//! deduction applied per finding lives in [`DeductionWeights`], a struct of
//! named policy constants, so no magic numbers are scattered through the
//! scanning logic.

use serde::Serialize;

/// Severity of a logged issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Every category of finding the audit can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Internal href that resolves to nothing on disk.
    DeadInternalLink,
    /// External URL that answered >= 400 or failed to answer at all.
    BrokenExternalLink,
    /// Page without an `<h1>`.
    MissingH1,
    /// Page with more than one `<h1>`.
    MultipleH1,
    /// Page without a JSON-LD structured data block.
    MissingSchema,
    /// Page without a breadcrumb landmark (home page exempt).
    MissingBreadcrumb,
    /// Page whose text contains none of the site keywords.
    MissingKeywords,
    /// Page no other page links to.
    OrphanPage,
    /// Internal href that is neither root-relative nor ignorable.
    RelativeHref,
    /// Internal resource addressed by its full URL.
    FullUrlHref,
    /// Href ending in `.html` instead of a clean URL.
    HtmlSuffixHref,
    /// Page that could not be read or parsed.
    UnreadablePage,
    /// Auto-configuration fell back to reduced capability.
    ConfigSoftFail,
}

impl IssueKind {
    /// The severity this kind is always reported at.
    pub fn severity(self) -> Severity {
        match self {
            IssueKind::DeadInternalLink
            | IssueKind::BrokenExternalLink
            | IssueKind::MissingH1
            | IssueKind::UnreadablePage => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

/// Score deductions per issue kind.
///
/// Fixed policy constants: a dead internal link outweighs a style warning,
/// and purely informational findings deduct nothing. The table is a value
/// on [`crate::AuditConfig`], so callers may reweigh without touching audit
/// logic.
#[derive(Debug, Clone, Serialize)]
pub struct DeductionWeights {
    pub dead_internal_link: u32,
    pub broken_external_link: u32,
    pub missing_h1: u32,
    pub multiple_h1: u32,
    pub missing_schema: u32,
    pub missing_breadcrumb: u32,
    pub missing_keywords: u32,
    pub orphan_page: u32,
    pub relative_href: u32,
    pub full_url_href: u32,
    pub html_suffix_href: u32,
}

impl Default for DeductionWeights {
    fn default() -> Self {
        Self {
            dead_internal_link: 10,
            broken_external_link: 5,
            missing_h1: 5,
            multiple_h1: 2,
            missing_schema: 2,
            missing_breadcrumb: 0,
            missing_keywords: 2,
            orphan_page: 5,
            relative_href: 2,
            full_url_href: 2,
            html_suffix_href: 2,
        }
    }
}

impl DeductionWeights {
    /// Looks up the deduction for a kind. Kinds without a policy weight
    /// (unreadable pages, soft configuration failures) deduct nothing.
    pub fn for_kind(&self, kind: IssueKind) -> u32 {
        match kind {
            IssueKind::DeadInternalLink => self.dead_internal_link,
            IssueKind::BrokenExternalLink => self.broken_external_link,
            IssueKind::MissingH1 => self.missing_h1,
            IssueKind::MultipleH1 => self.multiple_h1,
            IssueKind::MissingSchema => self.missing_schema,
            IssueKind::MissingBreadcrumb => self.missing_breadcrumb,
            IssueKind::MissingKeywords => self.missing_keywords,
            IssueKind::OrphanPage => self.orphan_page,
            IssueKind::RelativeHref => self.relative_href,
            IssueKind::FullUrlHref => self.full_url_href,
            IssueKind::HtmlSuffixHref => self.html_suffix_href,
            IssueKind::UnreadablePage | IssueKind::ConfigSoftFail => 0,
        }
    }
}

/// One immutable audit finding.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub kind: IssueKind,
    pub message: String,
    pub deduction: u32,
}

/// Append-only log of findings, in discovery order.
#[derive(Debug, Default)]
pub struct IssueLog {
    issues: Vec<Issue>,
}

impl IssueLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finding, deriving severity and deduction from the kind.
    pub fn record(&mut self, kind: IssueKind, message: impl Into<String>, weights: &DeductionWeights) {
        self.issues.push(Issue {
            severity: kind.severity(),
            kind,
            message: message.into(),
            deduction: weights.for_kind(kind),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Sum of every recorded deduction.
    pub fn total_deduction(&self) -> u32 {
        self.issues.iter().map(|i| i.deduction).sum()
    }

    /// Consumes the log, yielding the findings in discovery order.
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

/// Running counters incremented as the audit observes events.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Stats {
    pub pages_scanned: usize,
    pub internal_links: usize,
    pub external_links: usize,
    pub dead_links: usize,
    pub orphan_pages: usize,
}
