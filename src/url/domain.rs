use url::Url;

/// Extracts the host from a URL
///
/// The port is not part of the result, so `example.com:8080` and
/// `example.com` share a host.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_ripple::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if `candidate` lives on the same host as `base`
///
/// URLs without a host never match.
pub fn is_same_host(candidate: &Url, base: &Url) -> bool {
    match (extract_host(candidate), extract_host(base)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
