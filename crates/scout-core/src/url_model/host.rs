//! Host extraction for same-site and blocklist checks.

/// Lowercase host of `url`, or `None` if it does not parse or has no host.
pub fn host_of(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    parsed.host_str().map(|h| h.to_ascii_lowercase())
}

/// True if `url`'s host equals `page_host` or is a subdomain of it.
///
/// Unparsable URLs are simply not same-site.
pub fn is_same_site(url: &str, page_host: &str) -> bool {
    let page_host = page_host.to_ascii_lowercase();
    match host_of(url) {
        Some(h) => h == page_host || h.ends_with(&format!(".{page_host}")),
        None => false,
    }
}
