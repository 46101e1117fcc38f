//! Image URL extraction from post HTML.
//!
//! A deliberately lightweight, non-validating scan: the contract is "find
//! the `src` of every `<img>` tag", not "understand the document". Malformed
//! HTML yields whatever the pattern happens to match, never an error.

use std::sync::OnceLock;

use regex::Regex;

fn img_src_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<img[^>]*\bsrc\s*=\s*["']([^"']+)["']"#).unwrap()
    })
}

/// Return the URL portion before any query string.
pub(crate) fn strip_query(url: &str) -> &str {
    match url.find('?') {
        Some(idx) => &url[..idx],
        None => url,
    }
}

/// All image URLs embedded in `content`, in document order, with query
/// strings stripped. Duplicates are preserved; de-duplication is the
/// caller's business. Empty content yields an empty vec.
pub fn extract_image_urls(content: &str) -> Vec<String> {
    if content.is_empty() {
        return Vec::new();
    }
    img_src_re()
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| strip_query(m.as_str()).to_string())
        .collect()
}

/// The raw `src` of the first image in `content`, query string and all.
/// Thumbnail derivation wants the verbatim value.
pub fn first_image_src(content: &str) -> Option<String> {
    img_src_re()
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_images_yields_empty() {
        assert!(extract_image_urls("").is_empty());
        assert!(extract_image_urls("<p>plain text</p>").is_empty());
        assert!(first_image_src("<p>plain text</p>").is_none());
    }

    #[test]
    fn finds_images_in_document_order() {
        let html = r#"<p>a</p><img src="uploads/a.png"><div><img alt="x" src="uploads/b.png"></div>"#;
        assert_eq!(
            extract_image_urls(html),
            vec!["uploads/a.png".to_string(), "uploads/b.png".to_string()]
        );
    }

    #[test]
    fn strips_query_strings() {
        let html = r#"<img src="uploads/a.png?sig=abc&x=1">"#;
        assert_eq!(extract_image_urls(html), vec!["uploads/a.png".to_string()]);
    }

    #[test]
    fn tag_matching_is_case_insensitive() {
        let html = r#"<IMG SRC="uploads/a.png">"#;
        assert_eq!(extract_image_urls(html), vec!["uploads/a.png".to_string()]);
    }

    #[test]
    fn attribute_order_is_irrelevant() {
        let html = r#"<img class="wide" data-id="7" src='uploads/a.png' loading="lazy">"#;
        assert_eq!(extract_image_urls(html), vec!["uploads/a.png".to_string()]);
    }

    #[test]
    fn duplicates_are_preserved() {
        let html = r#"<img src="uploads/a.png"><img src="uploads/a.png">"#;
        assert_eq!(extract_image_urls(html).len(), 2);
    }

    #[test]
    fn first_image_src_keeps_the_query_string() {
        let html = r#"<img src="uploads/a.png?sig=abc"><img src="uploads/b.png">"#;
        assert_eq!(
            first_image_src(html),
            Some("uploads/a.png?sig=abc".to_string())
        );
    }

    #[test]
    fn malformed_html_does_not_panic() {
        let html = r#"<img src="uploads/a.png <div><<<img src="#;
        let _ = extract_image_urls(html);
    }
}
