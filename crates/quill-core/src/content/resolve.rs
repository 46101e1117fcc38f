//! Canonical storage-key resolution.
//!
//! Content references uploads through several URL shapes that all denote the
//! same stored object: the bare key, the application proxy route, the direct
//! bucket URL, and the localhost dev proxy. `resolve_key` normalizes any of
//! them to the canonical key. The recognizers run in a fixed order and the
//! first match wins; a URL none of them recognize is simply not an upload
//! reference (external hotlinks land here) and resolves to `None`.

use std::sync::OnceLock;

use regex::Regex;

use super::extract::strip_query;

/// Prefix every canonical storage key carries.
pub const KEY_PREFIX: &str = "uploads/";

/// Route marker of the application's file proxy. Matching is by substring,
/// so relative, absolute, and localhost dev variants all hit this branch.
pub const PROXY_MARKER: &str = "/api/v1/files/proxy/";

fn bucket_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^https://[^/.]+\.s3\.[^/]+\.amazonaws\.com/(.+)$").unwrap()
    })
}

/// The raw key portion of a direct bucket URL, query string untouched.
pub(crate) fn bucket_url_key(url: &str) -> Option<&str> {
    bucket_url_re()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Resolve an image URL to its canonical storage key.
///
/// Returns `None` when the URL matches no known shape; callers log and skip
/// such URLs rather than treating them as errors.
pub fn resolve_key(url: &str) -> Option<String> {
    // 1. Already a bare key.
    if url.starts_with(KEY_PREFIX) {
        return Some(url.to_string());
    }

    // 2. Proxy-route URL, any host (this also covers the localhost dev
    //    proxy, which carries the same route marker).
    if let Some(idx) = url.find(PROXY_MARKER) {
        let key = strip_query(&url[idx + PROXY_MARKER.len()..]);
        if key.is_empty() {
            return None;
        }
        return Some(key.to_string());
    }

    // 3. Direct bucket URL.
    if let Some(key) = bucket_url_key(url) {
        let key = strip_query(key);
        if key.is_empty() {
            return None;
        }
        return Some(key.to_string());
    }

    None
}
