//! Tag → attribute → [`Rewrite`] registry.
//!
//! Lookup is by exact (lower-case) tag name; tags without an entry fall back
//! to the wildcard table. Attributes missing from the selected table are kept
//! as they are. The wildcard is *not* consulted for tags that have their own
//! entry, so `<base style=...>` is left alone.

use super::rewrite::Rewrite;

/// Attribute table for one tag.
#[derive(Debug, PartialEq, Eq)]
pub struct AttrTable(&'static [(&'static str, Rewrite)]);

impl AttrTable {
    /// Strategy for a lower-case attribute name.
    pub fn rewrite_for(&self, attr: &[u8]) -> Rewrite {
        self.0
            .iter()
            .find(|(name, _)| name.as_bytes() == attr)
            .map_or(Rewrite::Keep, |(_, rw)| *rw)
    }
}

static BASE: AttrTable = AttrTable(&[("href", Rewrite::Url), ("target", Rewrite::Url)]);

static MEDIA: AttrTable = AttrTable(&[
    ("href", Rewrite::Url),
    ("src", Rewrite::Url),
    ("style", Rewrite::CssUrl),
]);

static SOURCE: AttrTable = AttrTable(&[("src", Rewrite::Url), ("srcset", Rewrite::UrlList)]);

static IMG: AttrTable = AttrTable(&[
    ("src", Rewrite::Url),
    ("srcset", Rewrite::UrlList),
    ("style", Rewrite::CssUrl),
]);

static SCRIPT: AttrTable = AttrTable(&[("src", Rewrite::Url)]);

/// Applied to every tag without a dedicated entry.
pub static WILDCARD: AttrTable = AttrTable(&[("style", Rewrite::CssUrl)]);

/// Dedicated table for a lower-case tag name, if any.
pub fn lookup(tag: &[u8]) -> Option<&'static AttrTable> {
    match tag {
        b"base" => Some(&BASE),
        b"link" | b"a" | b"iframe" | b"embed" | b"video" | b"audio" | b"track" => Some(&MEDIA),
        b"source" => Some(&SOURCE),
        b"img" => Some(&IMG),
        b"script" => Some(&SCRIPT),
        _ => None,
    }
}

/// Table in effect for a tag: its own entry, else the wildcard.
#[inline]
pub fn for_tag(tag: &[u8]) -> &'static AttrTable {
    lookup(tag).unwrap_or(&WILDCARD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_entries() {
        assert_eq!(for_tag(b"a").rewrite_for(b"href"), Rewrite::Url);
        assert_eq!(for_tag(b"video").rewrite_for(b"src"), Rewrite::Url);
        assert_eq!(for_tag(b"img").rewrite_for(b"srcset"), Rewrite::UrlList);
        assert_eq!(for_tag(b"source").rewrite_for(b"srcset"), Rewrite::UrlList);
        assert_eq!(for_tag(b"base").rewrite_for(b"target"), Rewrite::Url);
        assert_eq!(for_tag(b"script").rewrite_for(b"src"), Rewrite::Url);
    }

    #[test]
    fn test_wildcard_fallback() {
        assert_eq!(for_tag(b"div").rewrite_for(b"style"), Rewrite::CssUrl);
        assert_eq!(for_tag(b"div").rewrite_for(b"href"), Rewrite::Keep);
        assert!(lookup(b"div").is_none());
        assert_eq!(for_tag(b"div"), &WILDCARD);
    }

    #[test]
    fn test_dedicated_entry_shadows_wildcard() {
        assert_eq!(for_tag(b"base").rewrite_for(b"style"), Rewrite::Keep);
        assert_eq!(for_tag(b"source").rewrite_for(b"style"), Rewrite::Keep);
        assert_eq!(for_tag(b"script").rewrite_for(b"style"), Rewrite::Keep);
        assert_eq!(for_tag(b"img").rewrite_for(b"style"), Rewrite::CssUrl);
    }

    #[test]
    fn test_unlisted_attribute_is_kept() {
        assert_eq!(for_tag(b"a").rewrite_for(b"title"), Rewrite::Keep);
        assert_eq!(for_tag(b"img").rewrite_for(b"alt"), Rewrite::Keep);
    }

    #[test]
    fn test_lookup_is_exact() {
        // callers lower-case names before lookup
        assert!(lookup(b"IMG").is_none());
        assert!(lookup(b"imgs").is_none());
    }
}
