//! Page identity and site file discovery.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::AuditConfig;
use crate::{AuditError, Result};

/// One discovered page of the site.
///
/// Created once per `.html` file during discovery and immutable for the
/// run. The root-relative path (with `/` separators) is the node key used
/// throughout the link graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Absolute filesystem path.
    pub path: PathBuf,
    /// Path relative to the site root, the graph node key.
    pub rel: String,
}

impl Page {
    pub fn new(path: PathBuf, root: &Path) -> Self {
        let rel = rel_key(&path, root);
        Self { path, rel }
    }
}

/// Converts an absolute file path into its root-relative graph key.
///
/// Keys always use `/` separators regardless of platform.
pub fn rel_key(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Walks the site root and returns every auditable page.
///
/// Ignored directories are pruned from the walk entirely; files that are
/// not `.html` or whose name contains an ignored substring are skipped.
/// Unreadable subtrees are logged and skipped, but a missing or unreadable
/// root aborts the run before any scanning begins.
///
/// # Errors
///
/// Returns [`AuditError::RootNotFound`] if the root does not exist or is
/// not a directory.
pub fn discover_pages(config: &AuditConfig) -> Result<Vec<Page>> {
    let root = config.root.as_path();
    if !root.is_dir() {
        return Err(AuditError::RootNotFound(root.to_path_buf()));
    }

    // Sorted traversal keeps discovery order, and with it ranking
    // tie-breaks, reproducible across filesystems.
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            !(e.file_type().is_dir()
                && config
                    .ignored_directories
                    .iter()
                    .any(|d| e.file_name().to_string_lossy() == *d))
        });

    let mut pages = Vec::new();
    let mut errors = 0usize;

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(e) => {
                warn!("file walk error: {}", e);
                errors += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !name.ends_with(".html") {
            continue;
        }
        if is_ignored_filename(&name, config) {
            debug!("skipping ignored file {}", entry.path().display());
            continue;
        }

        pages.push(Page::new(entry.path().to_path_buf(), root));
    }

    if errors > 0 {
        warn!("{} errors encountered during file discovery", errors);
    }

    debug!("discovered {} html files under {}", pages.len(), root.display());
    Ok(pages)
}

/// Whether a filename matches any configured ignore substring.
pub fn is_ignored_filename(name: &str, config: &AuditConfig) -> bool {
    config.ignored_filename_substrings.iter().any(|s| name.contains(s))
}
