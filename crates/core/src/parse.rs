//! HTML parsing behind a narrow capability interface.
//!
//! This module provides the [`Document`] and [`Element`] types the audit
//! needs from an HTML parser: anchor elements with their href values,
//! attribute lookup, tag queries, and text extraction. Any parser able to
//! satisfy this surface is pluggable; the implementation wraps `scraper`.
//!
//! # Example
//!
//! ```rust
//! use sitegrade_core::parse::Document;
//!
//! let html = r#"<a href="/about">About</a><a href="https://example.org">Out</a>"#;
//! let doc = Document::parse(html);
//! let anchors = doc.anchors();
//! let hrefs: Vec<_> = anchors.iter().filter_map(|a| a.attr("href")).collect();
//! assert_eq!(hrefs, vec!["/about", "https://example.org"]);
//! ```

use scraper::{Html, Selector};

use crate::{AuditError, Result};

/// A parsed HTML page.
///
/// Wraps the raw tag tree and exposes exactly the queries the audit
/// performs. Parsing itself never fails; `scraper` recovers from malformed
/// markup the way a browser does.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::HtmlParse`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| AuditError::HtmlParse(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Gets all anchor elements carrying an `href` attribute.
    pub fn anchors(&'_ self) -> Vec<Element<'_>> {
        self.select("a[href]").unwrap_or_default()
    }

    /// Gets a meta tag's content by `name` or `property` attribute.
    pub fn meta_content(&self, attr: &str) -> Option<String> {
        for pattern in ["name", "property"] {
            let selector = format!("meta[{}=\"{}\"]", pattern, attr);
            if let Ok(elements) = self.select(&selector)
                && let Some(el) = elements.first()
                && let Some(content) = el.attr("content")
            {
                return Some(content.to_string());
            }
        }

        None
    }

    /// Gets a `<link>` element's href by `rel` value.
    pub fn link_href(&self, rel: &str) -> Option<String> {
        let selector = format!("link[rel=\"{}\"]", rel);
        if let Ok(elements) = self.select(&selector)
            && let Some(el) = elements.first()
            && let Some(href) = el.attr("href")
        {
            return Some(href.to_string());
        }

        None
    }

    /// Counts elements matching a CSS selector.
    pub fn count(&self, selector: &str) -> usize {
        self.select(selector).map(|els| els.len()).unwrap_or(0)
    }

    /// Whether the page carries a JSON-LD structured data block that
    /// actually parses as JSON. A malformed block is invisible to
    /// consumers, so it counts as absent.
    pub fn has_json_ld(&self) -> bool {
        self.select("script[type=\"application/ld+json\"]")
            .map(|blocks| {
                blocks
                    .iter()
                    .any(|el| serde_json::from_str::<serde_json::Value>(el.text().trim()).is_ok())
            })
            .unwrap_or(false)
    }

    /// Whether the page carries a breadcrumb landmark, either via
    /// `aria-label` or a class name containing "breadcrumb".
    pub fn has_breadcrumb(&self) -> bool {
        self.count("[aria-label=\"breadcrumb\"]") > 0 || self.count("[class*=\"breadcrumb\"]") > 0
    }

    /// Gets the content of the `<title>` element if present.
    pub fn title(&self) -> Option<String> {
        self.select("title")
            .ok()?
            .first()
            .map(|el| el.text().trim().to_string())
    }

    /// Gets all text content of the document.
    pub fn text_content(&self) -> String {
        self.html.root_element().text().collect()
    }
}

/// A single element in the parsed page.
///
/// # Example
///
/// ```rust
/// use sitegrade_core::parse::Document;
///
/// let doc = Document::parse(r#"<a href="/pricing">Pricing</a>"#);
/// let anchors = doc.anchors();
/// assert_eq!(anchors[0].attr("href"), Some("/pricing"));
/// assert_eq!(anchors[0].text(), "Pricing");
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl Element<'_> {
    /// Gets the value of an attribute, `None` if absent.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Gets the text content of this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }
}
