//! HLS playlist line harvester.

use url::Url;

/// Collects URI lines from an HLS playlist in original order.
///
/// Blank lines and `#` tag/comment lines are skipped. Lines that are not
/// already absolute `http(s)` URLs are resolved against `base`; a line that
/// cannot be resolved is dropped and harvesting continues. Variant tags such
/// as `#EXT-X-STREAM-INF` are not interpreted.
pub fn extract_hls_uris(text: &str, base: &str) -> Vec<String> {
    let base = Url::parse(base).ok();
    let mut out = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let lower = line.get(..8).unwrap_or(line).to_ascii_lowercase();
        if lower.starts_with("http:") || lower.starts_with("https:") {
            out.push(line.to_string());
            continue;
        }
        match base.as_ref().map(|b| b.join(line)) {
            Some(Ok(resolved)) => out.push(resolved.to_string()),
            _ => tracing::debug!(line, "skipping unresolvable playlist line"),
        }
    }

    out
}
