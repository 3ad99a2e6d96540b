//! Ad/tracker domain blocklist.
//!
//! Holds an immutable set of lowercase domains and answers host membership
//! queries: a host is blocked when it equals a listed domain or is a proper
//! subdomain of one (suffix match on a `.` boundary, never a substring match).

mod load;

pub use load::{load, parse_domains};

use std::collections::HashSet;

/// Immutable set of blocked domains.
#[derive(Debug, Clone, Default)]
pub struct Blocklist {
    domains: HashSet<String>,
}

impl Blocklist {
    /// Empty list: blocks nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from any iterator of domains; entries are trimmed and lowercased.
    pub fn from_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains = domains
            .into_iter()
            .map(|d| d.as_ref().trim().trim_end_matches('.').to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        Self { domains }
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// True if `host` equals a listed domain or is a subdomain of one.
    ///
    /// Empty hosts are never blocked. Comparison is case-insensitive and a
    /// trailing root dot is ignored.
    pub fn is_blocked(&self, host: &str) -> bool {
        if self.domains.is_empty() {
            return false;
        }
        let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
        if host.is_empty() {
            return false;
        }

        // Walk the label suffixes: a.b.example.com, b.example.com, example.com, com.
        let mut rest = host.as_str();
        loop {
            if self.domains.contains(rest) {
                return true;
            }
            match rest.find('.') {
                Some(i) => rest = &rest[i + 1..],
                None => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> Blocklist {
        Blocklist::from_domains(["example.com", "ads.net"])
    }

    #[test]
    fn exact_and_subdomain_match() {
        let bl = list();
        assert!(bl.is_blocked("example.com"));
        assert!(bl.is_blocked("x.example.com"));
        assert!(bl.is_blocked("deep.x.example.com"));
    }

    #[test]
    fn suffix_requires_dot_boundary() {
        let bl = list();
        assert!(!bl.is_blocked("notexample.com"));
        assert!(!bl.is_blocked("example.com.evil.org"));
        assert!(!bl.is_blocked("com"));
    }

    #[test]
    fn case_insensitive() {
        let bl = Blocklist::from_domains(["Example.COM"]);
        assert!(bl.is_blocked("EXAMPLE.com"));
        assert!(bl.is_blocked("Cdn.Example.Com."));
    }

    #[test]
    fn empty_host_and_empty_list() {
        assert!(!list().is_blocked(""));
        assert!(!Blocklist::empty().is_blocked("example.com"));
    }
}
