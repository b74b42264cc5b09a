//! Filesystem-aware href resolution.
//!
//! [`resolve`] turns an href string found on a page into either a concrete
//! target file or a dead end, encoding "clean URL" conventions as an
//! ordered fallback over the filesystem: an extensionless path may name an
//! exact file, a `.html` file, or a directory index. The fallback order is
//! load-bearing; an exact extensionless file must win over `path.html`.

use std::path::{Component, Path, PathBuf};

/// Outcome of resolving one href. Resolution is total: every href ends in
/// exactly one of these states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing left after stripping fragment and query; the link targets
    /// the current page and is ignorable, not dead.
    NoOp,
    /// The href names this file on disk (lexically normalized).
    File(PathBuf),
    /// No fallback matched an existing path.
    Dead,
}

/// Resolves `href`, as authored on `source_file`, against the site tree.
///
/// Steps, short-circuiting on first success:
/// 1. Strip any `#fragment` / `?query` suffix; empty remainder is a no-op.
/// 2. When the href starts with the site base URL, rewrite it to a
///    root-relative path.
/// 3. Root-relative hrefs resolve against `site_root`; everything else
///    resolves against the source file's directory.
/// 4. Try the candidate as an exact file, then with `.html` appended, then
///    as a directory containing `index.html`.
pub fn resolve(source_file: &Path, href: &str, site_root: &Path, base_url: Option<&str>) -> Resolution {
    let clean = href.split(['#', '?']).next().unwrap_or("");
    if clean.is_empty() {
        return Resolution::NoOp;
    }

    let mut clean = clean.to_string();
    if let Some(base) = base_url
        && clean.starts_with(base)
    {
        let remainder = clean[base.len()..].to_string();
        clean = if remainder.starts_with('/') { remainder } else { format!("/{}", remainder) };
    }

    // A trailing slash names a directory; the file fallbacks cannot apply.
    let wants_directory = clean.ends_with('/');

    let candidate = if let Some(rest) = clean.strip_prefix('/') {
        site_root.join(rest)
    } else {
        source_file.parent().unwrap_or(site_root).join(&clean)
    };
    let candidate = lexical_normalize(&candidate);

    if !wants_directory {
        if candidate.is_file() {
            return Resolution::File(candidate);
        }

        let with_html = with_html_suffix(&candidate);
        if with_html.is_file() {
            return Resolution::File(with_html);
        }
    }

    if candidate.is_dir() {
        let index = candidate.join("index.html");
        if index.is_file() {
            return Resolution::File(index);
        }
    }

    Resolution::Dead
}

/// Collapses `.` and `..` segments without touching the filesystem, so
/// `blog/../about.html` and `/about.html` share one canonical form.
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn with_html_suffix(path: &Path) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(".html");
    PathBuf::from(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "<html></html>").unwrap();
        path
    }

    #[test]
    fn test_fragment_only_is_noop() {
        let tmp = TempDir::new().unwrap();
        let source = write(tmp.path(), "index.html");
        assert_eq!(resolve(&source, "#features", tmp.path(), None), Resolution::NoOp);
        assert_eq!(resolve(&source, "?utm=x", tmp.path(), None), Resolution::NoOp);
    }

    #[test]
    fn test_exact_file_match() {
        let tmp = TempDir::new().unwrap();
        let source = write(tmp.path(), "index.html");
        let about = write(tmp.path(), "about.html");
        assert_eq!(resolve(&source, "/about.html", tmp.path(), None), Resolution::File(about));
    }

    #[test]
    fn test_html_suffix_fallback() {
        let tmp = TempDir::new().unwrap();
        let source = write(tmp.path(), "index.html");
        let about = write(tmp.path(), "about.html");
        assert_eq!(resolve(&source, "/about", tmp.path(), None), Resolution::File(about));
    }

    #[test]
    fn test_directory_index_fallback() {
        let tmp = TempDir::new().unwrap();
        let source = write(tmp.path(), "index.html");
        let index = write(tmp.path(), "blog/index.html");
        assert_eq!(resolve(&source, "/blog/", tmp.path(), None), Resolution::File(index.clone()));
        assert_eq!(resolve(&source, "/blog", tmp.path(), None), Resolution::File(index));
    }

    #[test]
    fn test_trailing_slash_prefers_directory_index() {
        let tmp = TempDir::new().unwrap();
        let source = write(tmp.path(), "blog.html");
        let index = write(tmp.path(), "blog/index.html");
        // "/blog/" names the directory even though blog.html exists.
        assert_eq!(resolve(&source, "/blog/", tmp.path(), None), Resolution::File(index));
    }

    #[test]
    fn test_exact_file_wins_over_html_suffix() {
        let tmp = TempDir::new().unwrap();
        let source = write(tmp.path(), "index.html");
        let bare = write(tmp.path(), "feed");
        write(tmp.path(), "feed.html");
        assert_eq!(resolve(&source, "/feed", tmp.path(), None), Resolution::File(bare));
    }

    #[test]
    fn test_relative_resolution_from_subdirectory() {
        let tmp = TempDir::new().unwrap();
        let source = write(tmp.path(), "blog/post.html");
        let other = write(tmp.path(), "blog/other.html");
        let about = write(tmp.path(), "about.html");

        assert_eq!(resolve(&source, "other", tmp.path(), None), Resolution::File(other));
        assert_eq!(resolve(&source, "../about.html", tmp.path(), None), Resolution::File(about.clone()));
        // Parent traversal normalizes to the same key a root-relative link gets.
        assert_eq!(resolve(&source, "/about.html", tmp.path(), None), Resolution::File(about));
    }

    #[test]
    fn test_unresolvable_is_dead() {
        let tmp = TempDir::new().unwrap();
        let source = write(tmp.path(), "index.html");
        assert_eq!(resolve(&source, "/missing", tmp.path(), None), Resolution::Dead);
        assert_eq!(resolve(&source, "nope.html", tmp.path(), None), Resolution::Dead);
    }

    #[test]
    fn test_base_url_rewrite() {
        let tmp = TempDir::new().unwrap();
        let source = write(tmp.path(), "index.html");
        let about = write(tmp.path(), "about.html");

        let base = Some("https://example.com");
        assert_eq!(
            resolve(&source, "https://example.com/about", tmp.path(), base),
            Resolution::File(about.clone())
        );
        // Base URL without a trailing path still yields a root-relative form.
        assert_eq!(resolve(&source, "https://example.comabout", tmp.path(), base), Resolution::File(about));
    }

    #[test]
    fn test_no_base_url_skips_rewrite() {
        let tmp = TempDir::new().unwrap();
        let source = write(tmp.path(), "index.html");
        write(tmp.path(), "about.html");
        assert_eq!(resolve(&source, "https://example.com/about", tmp.path(), None), Resolution::Dead);
    }

    #[test]
    fn test_lexical_normalize() {
        assert_eq!(lexical_normalize(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
        assert_eq!(lexical_normalize(Path::new("a/./b")), PathBuf::from("a/b"));
    }
}
