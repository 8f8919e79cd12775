//! HTTP cache validation module
//!
//! Content-derived `ETag`s and `If-None-Match` evaluation for static assets.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Quoted `ETag` derived from the content bytes
pub fn etag_for(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// Whether an `If-None-Match` header value names `etag` (or is `*`)
pub fn is_not_modified(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|header| {
        header
            .split(',')
            .map(str::trim)
            .map(|tag| tag.strip_prefix("W/").unwrap_or(tag))
            .any(|tag| tag == etag || tag == "*")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etag_is_quoted_and_stable() {
        let etag = etag_for(b"body { color: red }");
        assert!(etag.starts_with('"') && etag.ends_with('"'));
        assert_eq!(etag, etag_for(b"body { color: red }"));
        assert_ne!(etag, etag_for(b"body { color: blue }"));
    }

    #[test]
    fn test_is_not_modified() {
        let etag = "\"a1b2\"";
        assert!(is_not_modified(Some("\"a1b2\""), etag));
        assert!(is_not_modified(Some("W/\"a1b2\""), etag));
        assert!(is_not_modified(Some("\"zz\", \"a1b2\""), etag));
        assert!(is_not_modified(Some("*"), etag));
        assert!(!is_not_modified(Some("\"zz\""), etag));
        assert!(!is_not_modified(None, etag));
    }
}
