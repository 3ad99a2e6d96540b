//! Candidate normalization: reject opaque schemes, resolve relative strings.

use url::Url;

use crate::error::Rejection;

/// Returns the scheme name if `raw` is a `blob:` or `data:` URI.
pub fn opaque_scheme(raw: &str) -> Option<&'static str> {
    let head = raw.trim_start().get(..5)?;
    if head.eq_ignore_ascii_case("blob:") {
        Some("blob")
    } else if head.eq_ignore_ascii_case("data:") {
        Some("data")
    } else {
        None
    }
}

fn has_http_scheme(raw: &str) -> bool {
    let lower = raw.get(..8).unwrap_or(raw).to_ascii_lowercase();
    lower.starts_with("http:") || lower.starts_with("https:")
}

/// Normalizes a raw string into an absolute URL.
///
/// `blob:`/`data:` are rejected outright. Strings without an `http(s):`
/// scheme are resolved relative to `base` (the document location).
/// Anything that still fails to parse is rejected.
pub fn normalize_candidate(raw: &str, base: &Url) -> Result<Url, Rejection> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Rejection::Empty);
    }
    if let Some(scheme) = opaque_scheme(raw) {
        return Err(Rejection::OpaqueScheme { scheme });
    }
    let parsed = if has_http_scheme(raw) {
        Url::parse(raw)
    } else {
        base.join(raw)
    };
    parsed.map_err(|_| Rejection::Unparsable(raw.to_string()))
}

/// Normalizes a user-entered page address: bare hosts get an `https://` prefix.
pub fn normalize_page_url(text: &str) -> String {
    let text = text.trim();
    if has_http_scheme(text) && text.contains("://") {
        text.to_string()
    } else {
        format!("https://{text}")
    }
}
