//! Blocklist file loading. Fails open: an unreadable file yields an empty list.

use std::path::Path;

use super::Blocklist;

/// Parse blocklist text: one domain per line, `#` comments and blank lines
/// skipped. Hosts-file lines (`0.0.0.0 tracker.example`) use the last field.
pub fn parse_domains(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_whitespace().last())
        .map(|d| d.to_ascii_lowercase())
        .collect()
}

/// Load the blocklist at `path`.
///
/// Any IO failure degrades to the empty list so a missing data file never
/// blocks the entire web.
pub fn load(path: &Path) -> Blocklist {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let bl = Blocklist::from_domains(parse_domains(&text));
            tracing::info!(path = %path.display(), domains = bl.len(), "loaded blocklist");
            bl
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "blocklist unavailable, blocking nothing: {}", e);
            Blocklist::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parse_skips_comments_and_blanks() {
        let text = "# header\n\nDoubleClick.net\n  ads.example.org  \n#tail\n";
        assert_eq!(parse_domains(text), vec!["doubleclick.net", "ads.example.org"]);
    }

    #[test]
    fn parse_hosts_style_lines() {
        let text = "0.0.0.0 tracker.example\n127.0.0.1\tpixel.example\n";
        assert_eq!(parse_domains(text), vec!["tracker.example", "pixel.example"]);
    }

    #[test]
    fn load_reads_file() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(b"ads.net\n# c\nexample.com\n").unwrap();
        f.flush().unwrap();
        let bl = load(f.path());
        assert_eq!(bl.len(), 2);
        assert!(bl.is_blocked("cdn.ads.net"));
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let bl = load(&dir.path().join("nope.txt"));
        assert!(bl.is_empty());
        assert!(!bl.is_blocked("ads.net"));
    }
}
