//! Thumbnail derivation.
//!
//! The thumbnail is whatever the first image in the content points at,
//! rewritten to the application's proxy route when the reference is a bare
//! storage key or a direct bucket URL. It is recomputed on every save and is
//! never settable by hand. Unlike attachment linking, derivation keeps the
//! raw `src` verbatim, query string included.

use super::extract::first_image_src;
use super::resolve::{KEY_PREFIX, PROXY_MARKER, bucket_url_key};

/// Format a storage key as the application's proxy-route URL.
pub fn to_proxy_url(key: &str) -> String {
    format!("{PROXY_MARKER}{key}")
}

/// Derive the thumbnail for `content`, or `None` when it has no image.
pub fn derive_thumbnail(content: &str) -> Option<String> {
    let src = first_image_src(content)?;

    if src.starts_with(KEY_PREFIX) {
        return Some(to_proxy_url(&src));
    }
    if let Some(key) = bucket_url_key(&src) {
        return Some(to_proxy_url(key));
    }
    // Proxy URLs are already in the shape we serve; anything else (external
    // hotlink) is stored untouched.
    Some(src)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_image_means_no_thumbnail() {
        assert_eq!(derive_thumbnail(""), None);
        assert_eq!(derive_thumbnail("<p>words only</p>"), None);
    }

    #[test]
    fn bare_key_becomes_proxy_url() {
        let html = r#"<img src="uploads/image/2024/01/cat.png">"#;
        assert_eq!(
            derive_thumbnail(html).as_deref(),
            Some("/api/v1/files/proxy/uploads/image/2024/01/cat.png")
        );
    }

    #[test]
    fn bucket_url_becomes_proxy_url() {
        let html = r#"<img src="https://b.s3.us-east-1.amazonaws.com/uploads/a.png">"#;
        assert_eq!(
            derive_thumbnail(html).as_deref(),
            Some("/api/v1/files/proxy/uploads/a.png")
        );
    }

    #[test]
    fn query_string_is_kept_verbatim() {
        let html = r#"<img src="uploads/a.png?sig=abc">"#;
        assert_eq!(
            derive_thumbnail(html).as_deref(),
            Some("/api/v1/files/proxy/uploads/a.png?sig=abc")
        );
    }

    #[test]
    fn external_urls_pass_through() {
        let html = r#"<img src="https://example.com/cat.png">"#;
        assert_eq!(
            derive_thumbnail(html).as_deref(),
            Some("https://example.com/cat.png")
        );
    }

    #[test]
    fn first_image_wins() {
        let html = r#"<img src="uploads/first.png"><img src="uploads/second.png">"#;
        assert_eq!(
            derive_thumbnail(html).as_deref(),
            Some("/api/v1/files/proxy/uploads/first.png")
        );
    }
}
