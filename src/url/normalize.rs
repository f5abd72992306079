use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

/// Deduplication key for a crawled page
///
/// Holds the lowercased host followed by the lowercased path, without scheme,
/// port, query, fragment or trailing slashes. The root page of a host is the
/// bare host. The key is never parsed back into a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key and returns the owned string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalizes a URL into its deduplication key
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if it is not absolute or has no host
/// 2. Lowercase the host
/// 3. Lowercase the path and strip trailing slashes (the root path becomes empty)
/// 4. Drop scheme, port, query and fragment
///
/// # Examples
///
/// ```
/// use site_ripple::url::normalize_url;
///
/// let key = normalize_url("https://BLOG.boot.dev/Path/").unwrap();
/// assert_eq!(key.as_str(), "blog.boot.dev/path");
/// ```
pub fn normalize_url(url_str: &str) -> UrlResult<NormalizedUrl> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(format!("{}: {}", url_str, e)))?;
    normalize_parsed(&url)
}

/// Normalizes an already parsed URL
pub fn normalize_parsed(url: &Url) -> UrlResult<NormalizedUrl> {
    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| UrlError::MissingHost(url.to_string()))?
        .to_lowercase();

    let path = url.path().to_lowercase();
    let path = path.trim_end_matches('/');

    Ok(NormalizedUrl(format!("{}{}", host, path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_protocol() {
        assert_eq!(
            normalize_url("https://blog.boot.dev/path").unwrap().as_str(),
            "blog.boot.dev/path"
        );
        assert_eq!(
            normalize_url("http://blog.boot.dev/path").unwrap().as_str(),
            "blog.boot.dev/path"
        );
    }

    #[test]
    fn test_remove_trailing_slash() {
        let result = normalize_url("https://blog.boot.dev/path/").unwrap();
        assert_eq!(result.as_str(), "blog.boot.dev/path");
    }

    #[test]
    fn test_remove_repeated_trailing_slashes() {
        let result = normalize_url("https://blog.boot.dev/path///").unwrap();
        assert_eq!(result.as_str(), "blog.boot.dev/path");
    }

    #[test]
    fn test_lowercase_host_and_path() {
        let result = normalize_url("https://BLOG.boot.dev/Path/").unwrap();
        assert_eq!(result.as_str(), "blog.boot.dev/path");
    }

    #[test]
    fn test_root_path() {
        let bare = normalize_url("https://blog.boot.dev").unwrap();
        let slashed = normalize_url("https://blog.boot.dev/").unwrap();
        assert_eq!(bare, slashed);
        assert_eq!(bare.as_str(), "blog.boot.dev");
    }

    #[test]
    fn test_nested_path() {
        let result = normalize_url("https://blog.boot.dev/a/b/c/").unwrap();
        assert_eq!(result.as_str(), "blog.boot.dev/a/b/c");
    }

    #[test]
    fn test_query_and_fragment_collapse() {
        let plain = normalize_url("https://example.com/page").unwrap();
        assert_eq!(normalize_url("https://example.com/page?a=1").unwrap(), plain);
        assert_eq!(normalize_url("https://example.com/page#frag").unwrap(), plain);
        assert_eq!(
            normalize_url("https://example.com/page/?a=1#frag").unwrap(),
            plain
        );
    }

    #[test]
    fn test_port_dropped() {
        let result = normalize_url("http://127.0.0.1:4000/docs/").unwrap();
        assert_eq!(result.as_str(), "127.0.0.1/docs");
    }

    #[test]
    fn test_idempotent_through_url_form() {
        let once = normalize_url("https://Example.com/A/B/").unwrap();
        let twice = normalize_url(&format!("https://{}", once)).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_invalid_url() {
        let result = normalize_url("not-a-url");
        assert!(matches!(result, Err(UrlError::Parse(_))));
    }

    #[test]
    fn test_missing_host() {
        let result = normalize_url("mailto:someone@example.com");
        assert!(matches!(result, Err(UrlError::MissingHost(_))));
    }
}
