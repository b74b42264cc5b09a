//! Error types for audit operations.
//!
//! This module defines the main error type [`AuditError`] which represents
//! all possible errors that can occur while discovering, scanning, and
//! probing a site.
//!
//! Most failures during a run are not errors in this sense: a dead link or
//! an unreadable page is recorded in the issue log and the run continues.
//! [`AuditError`] covers the unrecoverable cases, which can only occur
//! before scanning begins or while talking to the operating system.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for site audit operations.
///
/// # Example
///
/// ```rust
/// use sitegrade_core::{AuditConfig, AuditError};
///
/// let config = AuditConfig::builder("/nonexistent").build();
/// let audit = sitegrade_core::Audit::new(config);
/// # let rt = tokio::runtime::Runtime::new().unwrap();
/// match rt.block_on(audit.run()) {
///     Err(AuditError::RootNotFound(path)) => println!("bad root: {}", path.display()),
///     other => println!("{:?}", other.map(|r| r.score)),
/// }
/// ```
#[derive(Error, Debug)]
pub enum AuditError {
    /// The configured site root does not exist or is not a directory.
    ///
    /// This is the only fatal condition in normal operation; it aborts the
    /// run before any scanning begins.
    #[error("Site root not found or not a directory: {0}")]
    RootNotFound(PathBuf),

    /// File system I/O errors outside the per-page recovery path.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTML parsing errors, typically an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParse(String),

    /// HTTP client construction or request errors from reqwest.
    ///
    /// Per-probe failures are reported as issues, not as this error; this
    /// variant surfaces only when the client itself cannot be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for AuditError.
pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_not_found_display() {
        let err = AuditError::RootNotFound(PathBuf::from("/missing/site"));
        assert!(err.to_string().contains("/missing/site"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = AuditError::from(io);
        assert!(err.to_string().contains("denied"));
    }
}
