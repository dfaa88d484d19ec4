//! Joining page URLs with the references found on them.
//!
//! Resolution is textual: a relative reference is glued onto the page's base with exactly one
//! `/` between the parts. No dot-segment normalisation is attempted, so `../a.html` stays as
//! written. Every reference is classified against the domain prefix of the site being scanned.

use regex::Regex;
use std::sync::LazyLock;

const URL_PATH_SEPARATOR: char = '/';
const FRAGMENT_START: char = '#';

static ABSOLUTE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://.*$").expect("valid absolute reference regex"));

static DOMAIN_EXTRACTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?://.*?/).*$").expect("valid domain regex"));

/// A raw link or resource value resolved against the page it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsoluteRef {
    pub raw_input: String,
    pub resolved_uri: String,
    pub is_absolute_input: bool,
    pub is_site_reference: bool,
}

impl AbsoluteRef {
    /// Resolve `reference` against `base` and classify it against `domain`.
    pub fn resolve(base: &str, reference: &str, domain: &str) -> Self {
        let is_absolute_input = ABSOLUTE_REFERENCE.is_match(reference);
        let joined = if is_absolute_input {
            reference.to_string()
        } else {
            join_url(base, reference)
        };
        let resolved_uri = without_fragment(&joined).to_string();
        let is_site_reference = resolved_uri.starts_with(domain);

        Self {
            raw_input: reference.to_string(),
            resolved_uri,
            is_absolute_input,
            is_site_reference,
        }
    }

    /// Whether both references point at the same target, regardless of how they were written.
    pub fn same_target(&self, other: &AbsoluteRef) -> bool {
        self.resolved_uri == other.resolved_uri
            && self.is_absolute_input == other.is_absolute_input
            && self.is_site_reference == other.is_site_reference
    }

    pub fn site_reference_description(&self) -> &'static str {
        if self.is_site_reference {
            "Site-Reference"
        } else {
            "Internet-Reference"
        }
    }
}

/// Join two URL parts with exactly one path separator between them.
pub fn join_url(base: &str, reference: &str) -> String {
    let plain_base = base.trim_end_matches(URL_PATH_SEPARATOR);
    let plain_ref = reference
        .trim_start_matches(URL_PATH_SEPARATOR)
        .trim_end_matches(URL_PATH_SEPARATOR);
    format!("{plain_base}{URL_PATH_SEPARATOR}{plain_ref}")
}

/// Extract the `scheme://host/` prefix of an absolute http(s) URL.
///
/// Returns an empty string when the input is absent or not shaped like an absolute http(s)
/// URL with a path.
pub fn domain_of(url: Option<&str>) -> String {
    url.and_then(|url| DOMAIN_EXTRACTOR.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// The prefix of `uri` up to and including its last `/`.
pub fn reference_base(uri: &str) -> &str {
    match uri.rfind(URL_PATH_SEPARATOR) {
        Some(idx) => &uri[..=idx],
        None => "",
    }
}

pub fn without_fragment(url: &str) -> &str {
    match url.find(FRAGMENT_START) {
        Some(idx) => &url[..idx],
        None => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: &str = "http://x.com/";

    #[test]
    fn test_domain_of_http_url() {
        assert_eq!(
            domain_of(Some("http://sitename.com/section/page.html")),
            "http://sitename.com/"
        );
    }

    #[test]
    fn test_domain_of_https_url() {
        assert_eq!(
            domain_of(Some("https://sitename.com/section/page.html")),
            "https://sitename.com/"
        );
    }

    #[test]
    fn test_domain_of_keeps_port() {
        assert_eq!(
            domain_of(Some("http://localhost:8080/index.html")),
            "http://localhost:8080/"
        );
    }

    #[test]
    fn test_domain_of_unmatched_input() {
        assert_eq!(domain_of(None), "");
        assert_eq!(domain_of(Some("")), "");
        assert_eq!(domain_of(Some("ftp://sitename.com/file")), "");
        assert_eq!(domain_of(Some("http://sitename.com")), "");
        assert_eq!(domain_of(Some("about.html")), "");
    }

    #[test]
    fn test_join_url_single_separator() {
        assert_eq!(join_url("http://x.com/", "about.html"), "http://x.com/about.html");
        assert_eq!(join_url("http://x.com", "about.html"), "http://x.com/about.html");
        assert_eq!(join_url("http://x.com//", "/about.html"), "http://x.com/about.html");
        assert_eq!(join_url("http://x.com/", "docs/"), "http://x.com/docs");
        assert_eq!(join_url("http://x.com/", ""), "http://x.com/");
    }

    #[test]
    fn test_resolve_relative_reference() {
        let r = AbsoluteRef::resolve("http://x.com/", "about.html", DOMAIN);
        assert_eq!(r.resolved_uri, "http://x.com/about.html");
        assert!(!r.is_absolute_input);
        assert!(r.is_site_reference);
        assert_eq!(r.site_reference_description(), "Site-Reference");
    }

    #[test]
    fn test_resolve_absolute_reference_is_kept() {
        let r = AbsoluteRef::resolve("http://x.com/", "https://other.com/page.html", DOMAIN);
        assert_eq!(r.resolved_uri, "https://other.com/page.html");
        assert!(r.is_absolute_input);
        assert!(!r.is_site_reference);
        assert_eq!(r.site_reference_description(), "Internet-Reference");
    }

    #[test]
    fn test_resolve_absolute_site_reference() {
        let r = AbsoluteRef::resolve("http://x.com/shop/", "http://x.com/about.html", DOMAIN);
        assert!(r.is_absolute_input);
        assert!(r.is_site_reference);
    }

    #[test]
    fn test_resolve_strips_fragment() {
        let r = AbsoluteRef::resolve("http://x.com/", "page.html#section2", DOMAIN);
        assert_eq!(r.resolved_uri, "http://x.com/page.html");
        assert_eq!(r.raw_input, "page.html#section2");

        let bare = AbsoluteRef::resolve("http://x.com/", "#top", DOMAIN);
        assert_eq!(bare.resolved_uri, "http://x.com/");
    }

    #[test]
    fn test_classification_uses_scan_domain_not_page() {
        // The page lives on another host, but membership is judged against the scanned site.
        let r = AbsoluteRef::resolve("http://other.com/dir/", "page.html", DOMAIN);
        assert_eq!(r.resolved_uri, "http://other.com/dir/page.html");
        assert!(!r.is_site_reference);
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let a = AbsoluteRef::resolve("http://x.com/a/", "b.html", DOMAIN);
        let b = AbsoluteRef::resolve("http://x.com/a/", "b.html", DOMAIN);
        assert_eq!(a, b);
    }

    #[test]
    fn test_same_target_ignores_spelling() {
        let own = AbsoluteRef::resolve("http://x.com/", "", DOMAIN);
        let slash = AbsoluteRef::resolve("http://x.com/", "/", DOMAIN);
        let absolute = AbsoluteRef::resolve("http://x.com/", "http://x.com/", DOMAIN);
        assert!(own.same_target(&slash));
        assert!(!own.same_target(&absolute));
    }

    #[test]
    fn test_reference_base() {
        assert_eq!(reference_base("http://x.com/shop/garden.html"), "http://x.com/shop/");
        assert_eq!(reference_base("http://x.com/"), "http://x.com/");
        assert_eq!(reference_base("nothing"), "");
    }

    #[test]
    fn test_mailto_is_joined_as_site_reference() {
        let r = AbsoluteRef::resolve("http://x.com/", "mailto:someone@x.com", DOMAIN);
        assert_eq!(r.resolved_uri, "http://x.com/mailto:someone@x.com");
        // Textual joining keeps mailto references on-site; they later fail as non-pages.
        assert!(r.is_site_reference);
    }
}
