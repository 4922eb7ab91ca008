//! Attribute value rewrite strategies.
//!
//! Every strategy is a pure function of the raw attribute value and the base
//! path prefix (already stripped of its trailing slash). Nothing here touches
//! the output buffer; the state machine decides when a value is complete and
//! emits whatever the strategy returns.
//!
//! | Strategy   | Example (`prefix = "/p"`)                          |
//! |------------|----------------------------------------------------|
//! | `Keep`     | `/x` → `/x`                                        |
//! | `Url`      | `/x` → `/p/x`, `//cdn/x` → `//cdn/x`               |
//! | `UrlList`  | `/a.png 1x,/b.png 2x` → `/p/a.png 1x, /p/b.png 2x` |
//! | `CssUrl`   | `background:url(/x.png)` → `background:url(/p/x.png)` |

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::bytes::{Captures, Regex};

/// How the value of a URL-bearing attribute is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rewrite {
    /// Emit the value unchanged.
    #[default]
    Keep,
    /// A single URL (`href`, `src`, ...).
    Url,
    /// A comma separated candidate list (`srcset`).
    UrlList,
    /// Inline CSS containing `url(...)` references (`style`).
    CssUrl,
}

impl Rewrite {
    /// Apply this strategy to a complete attribute value.
    pub fn apply<'a>(self, value: &'a [u8], prefix: &[u8]) -> Cow<'a, [u8]> {
        match self {
            Self::Keep => Cow::Borrowed(value),
            Self::Url => prefix_url(value, prefix),
            Self::UrlList => Cow::Owned(prefix_url_list(value, prefix)),
            Self::CssUrl => prefix_css_urls(value, prefix),
        }
    }
}

/// Absolute path: first byte `/`, second byte anything but `/`.
#[inline]
fn is_absolute_path(value: &[u8]) -> bool {
    value.first() == Some(&b'/') && value.get(1) != Some(&b'/')
}

/// Prefix a single absolute-path URL.
pub fn prefix_url<'a>(value: &'a [u8], prefix: &[u8]) -> Cow<'a, [u8]> {
    if !is_absolute_path(value) {
        return Cow::Borrowed(value);
    }
    let mut out = Vec::with_capacity(prefix.len() + value.len());
    out.extend_from_slice(prefix);
    out.extend_from_slice(value);
    Cow::Owned(out)
}

/// Prefix every candidate of a `srcset` list.
///
/// Candidates are trimmed and rejoined with `", "`, so whitespace around the
/// commas is normalised even for candidates that are not rewritten.
pub fn prefix_url_list(value: &[u8], prefix: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len() + prefix.len() * 2);
    for (i, candidate) in value.split(|&b| b == b',').enumerate() {
        if i > 0 {
            out.extend_from_slice(b", ");
        }
        let candidate = candidate.trim_ascii();
        if candidate.first() == Some(&b'/') {
            out.extend_from_slice(prefix);
        }
        out.extend_from_slice(candidate);
    }
    out
}

/// `url(` + optional whitespace + `/`, capturing a following `/` so that
/// protocol-relative references can be skipped (the regex crate has no
/// lookahead).
static CSS_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)url\(\s*/(/?)").unwrap());

/// Prefix every absolute-path `url(...)` reference in inline CSS.
pub fn prefix_css_urls<'a>(value: &'a [u8], prefix: &[u8]) -> Cow<'a, [u8]> {
    CSS_URL.replace_all(value, |caps: &Captures<'_>| {
        let whole = &caps[0];
        if !caps[1].is_empty() {
            return whole.to_vec();
        }
        // whole = "url(" + whitespace + "/"
        let slash = whole.len() - 1;
        let mut out = Vec::with_capacity(whole.len() + prefix.len());
        out.extend_from_slice(&whole[..slash]);
        out.extend_from_slice(prefix);
        out.push(b'/');
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(rw: Rewrite, value: &str, prefix: &str) -> String {
        String::from_utf8(rw.apply(value.as_bytes(), prefix.as_bytes()).into_owned()).unwrap()
    }

    #[test]
    fn test_keep() {
        assert_eq!(apply(Rewrite::Keep, " /x , y", "/p"), " /x , y");
    }

    #[test]
    fn test_url_absolute_path() {
        assert_eq!(apply(Rewrite::Url, "/x", "/base"), "/base/x");
        assert_eq!(apply(Rewrite::Url, "/", "/base"), "/base/");
    }

    #[test]
    fn test_url_untouched() {
        assert_eq!(apply(Rewrite::Url, "//cdn.example.com/x.png", "/p"), "//cdn.example.com/x.png");
        assert_eq!(apply(Rewrite::Url, "x/y", "/p"), "x/y");
        assert_eq!(apply(Rewrite::Url, "https://a/b", "/p"), "https://a/b");
        assert_eq!(apply(Rewrite::Url, "", "/p"), "");
        assert_eq!(apply(Rewrite::Url, " /x", "/p"), " /x");
    }

    #[test]
    fn test_url_borrows_when_unchanged() {
        assert!(matches!(prefix_url(b"rel", b"/p"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_url_list() {
        assert_eq!(
            apply(Rewrite::UrlList, "/a.png 1x, /b.png 2x", "/p"),
            "/p/a.png 1x, /p/b.png 2x"
        );
    }

    #[test]
    fn test_url_list_normalises_whitespace() {
        assert_eq!(
            apply(Rewrite::UrlList, "  a.png 1x ,/b.png 2x,  http://c/d.png 3x ", "/p"),
            "a.png 1x, /p/b.png 2x, http://c/d.png 3x"
        );
    }

    #[test]
    fn test_url_list_prefixes_protocol_relative_candidates() {
        // only the leading slash is inspected for list candidates
        assert_eq!(apply(Rewrite::UrlList, "//cdn/a.png", "/p"), "/p//cdn/a.png");
    }

    #[test]
    fn test_css_url() {
        assert_eq!(
            apply(Rewrite::CssUrl, "background:url(/img/x.png)", "/p"),
            "background:url(/p/img/x.png)"
        );
        assert_eq!(
            apply(Rewrite::CssUrl, "background:url( \t/img/x.png)", "/p"),
            "background:url( \t/p/img/x.png)"
        );
    }

    #[test]
    fn test_css_url_protocol_relative_untouched() {
        assert_eq!(
            apply(Rewrite::CssUrl, "background:url(//cdn/x.png)", "/p"),
            "background:url(//cdn/x.png)"
        );
    }

    #[test]
    fn test_css_url_every_match() {
        assert_eq!(
            apply(
                Rewrite::CssUrl,
                "a:url(/1.png);b:url(//c/2.png);c:url(/3.png);d:url(rel.png)",
                "/p"
            ),
            "a:url(/p/1.png);b:url(//c/2.png);c:url(/p/3.png);d:url(rel.png)"
        );
    }

    #[test]
    fn test_css_url_quoted_is_not_matched() {
        assert_eq!(apply(Rewrite::CssUrl, "a:url('/x.png')", "/p"), "a:url('/x.png')");
    }
}
