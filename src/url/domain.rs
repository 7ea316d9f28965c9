use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (which shouldn't happen for valid HTTP(S) URLs), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use opencrawl::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if `url` lives on `domain`
///
/// Hosts are compared exactly after lowercasing: `blog.example.com` is not the
/// same domain as `example.com`.
pub fn same_domain(url: &Url, domain: &str) -> bool {
    extract_domain(url).is_some_and(|d| d.eq_ignore_ascii_case(domain))
}
