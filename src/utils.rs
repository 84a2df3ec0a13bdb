//! Small helpers shared by the scraper, the classifier and the server.
//!
//! - URL resolution and scheme checks
//! - String truncation for logging

use url::Url;

/// Resolve `href` against `base`, returning the absolute URL as a string.
///
/// Returns `None` when `href` cannot be joined (for example a malformed
/// authority like `http://[::1`).
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    base.join(href.trim()).ok().map(|u| u.to_string())
}

/// `true` if `link` starts with an `http://` or `https://` scheme.
pub fn is_http_link(link: &str) -> bool {
    link.starts_with("http://") || link.starts_with("https://")
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes (backing off to a char
/// boundary) with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_link() {
        let base = Url::parse("https://site.com/list").unwrap();
        assert_eq!(
            resolve_link(&base, "/news/x").as_deref(),
            Some("https://site.com/news/x")
        );
        assert_eq!(
            resolve_link(&base, "story").as_deref(),
            Some("https://site.com/story")
        );
    }

    #[test]
    fn test_resolve_keeps_absolute_link() {
        let base = Url::parse("https://site.com/list").unwrap();
        assert_eq!(
            resolve_link(&base, "http://other.org/a").as_deref(),
            Some("http://other.org/a")
        );
        assert_eq!(
            resolve_link(&base, "//cdn.site.com/b").as_deref(),
            Some("https://cdn.site.com/b")
        );
    }

    #[test]
    fn test_is_http_link() {
        assert!(is_http_link("https://site.com/a"));
        assert!(is_http_link("http://site.com/a"));
        assert!(!is_http_link("mailto:desk@site.com"));
        assert!(!is_http_link("javascript:void(0)"));
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        let s = "é".repeat(10);
        let result = truncate_for_log(&s, 3);
        assert!(result.starts_with("é…"));
    }
}
