//! Request URL to repository path mapping.

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Bytes escaped when a repository path goes back into a URL path.
const PATH_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Map a request URL to a repository path under the mount `prefix`.
///
/// ```text
/// prefix "/docs"
/// /docs/guide/?tab=1   → "guide"
/// /docs                → ""
/// /docs//a/./b         → "a/b"
/// /docsearch, /other   → None
/// ```
///
/// Returns `None` for URLs outside the mount, undecodable URLs, and paths
/// with `..` segments.
pub fn repo_path(url: &str, prefix: &str) -> Option<String> {
    let decoded = percent_decode_str(url_path(url)).decode_utf8().ok()?;

    let rest = match decoded.strip_prefix(prefix) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return None,
    };

    let mut parts = Vec::new();
    for part in rest.split('/') {
        match part {
            "" | "." => {}
            ".." => return None,
            _ => parts.push(part),
        }
    }
    Some(parts.join("/"))
}

/// URL without query string or fragment.
pub fn url_path(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}

/// Where to send a directory request that lacks its trailing slash, so
/// relative links in the index page resolve inside the directory.
///
/// The location is rebuilt from `prefix` and the normalized `repo_path`, so it
/// always stays on this host.
pub fn directory_redirect(url: &str, prefix: &str, repo_path: &str) -> Option<String> {
    let path = url_path(url);
    if path.ends_with('/') {
        return None;
    }

    let query = &url[path.len()..];
    if repo_path.is_empty() {
        return Some(format!("{prefix}/{query}"));
    }
    let encoded = utf8_percent_encode(repo_path, PATH_ESCAPE);
    Some(format!("{prefix}/{encoded}/{query}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_path_root_mount() {
        assert_eq!(repo_path("/", ""), Some(String::new()));
        assert_eq!(repo_path("/a/b.html", ""), Some("a/b.html".into()));
        assert_eq!(repo_path("/a/b/?x=1#top", ""), Some("a/b".into()));
    }

    #[test]
    fn test_repo_path_prefixed_mount() {
        assert_eq!(repo_path("/docs", "/docs"), Some(String::new()));
        assert_eq!(repo_path("/docs/", "/docs"), Some(String::new()));
        assert_eq!(repo_path("/docs/guide/", "/docs"), Some("guide".into()));
        assert_eq!(repo_path("/docsearch", "/docs"), None);
        assert_eq!(repo_path("/", "/docs"), None);
        assert_eq!(repo_path("/other/docs", "/docs"), None);
    }

    #[test]
    fn test_repo_path_decoding() {
        assert_eq!(repo_path("/my%20file.html", ""), Some("my file.html".into()));
        assert_eq!(repo_path("/%64ocs/x", "/docs"), Some("x".into()));
        // encoded query marker is part of the path
        assert_eq!(repo_path("/a%3Fb", ""), Some("a?b".into()));
        assert_eq!(repo_path("/%FF", ""), None);
    }

    #[test]
    fn test_repo_path_rejects_traversal() {
        assert_eq!(repo_path("/../secret", ""), None);
        assert_eq!(repo_path("/docs/%2E%2E/secret", "/docs"), None);
        // dots inside names are fine
        assert_eq!(repo_path("/a..b/c", ""), Some("a..b/c".into()));
        assert_eq!(repo_path("/a//../b", ""), None);
    }

    #[test]
    fn test_repo_path_collapses_empty_segments() {
        assert_eq!(repo_path("/a//b", ""), Some("a/b".into()));
        assert_eq!(repo_path("//a/./b/", ""), Some("a/b".into()));
        assert_eq!(repo_path("/docs//a", "/docs"), Some("a".into()));
        assert_eq!(repo_path("/docs/x//y", "/docs"), Some("x/y".into()));
    }

    #[test]
    fn test_directory_redirect() {
        assert_eq!(directory_redirect("/docs", "/docs", ""), Some("/docs/".into()));
        assert_eq!(
            directory_redirect("/docs/guide?x=1", "/docs", "guide"),
            Some("/docs/guide/?x=1".into())
        );
        assert_eq!(directory_redirect("/docs/guide/", "/docs", "guide"), None);
        assert_eq!(directory_redirect("/docs/?x=1", "/docs", ""), None);
    }

    #[test]
    fn test_directory_redirect_stays_on_host() {
        assert_eq!(
            directory_redirect("//evil.example", "", "evil.example"),
            Some("/evil.example/".into())
        );
        assert_eq!(
            directory_redirect("/docs//a//b", "/docs", "a/b"),
            Some("/docs/a/b/".into())
        );
        assert_eq!(
            directory_redirect("/my%20dir", "", "my dir"),
            Some("/my%20dir/".into())
        );
    }
}
