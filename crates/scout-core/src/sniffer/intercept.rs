//! Active interception hooks: fetch, XHR, media `src` assignment.
//!
//! Every hook is inert until the sniffer is installed. Manifest bodies are
//! awaited without a timeout; a body that never arrives only loses that one
//! manifest's nested URIs.

use std::fmt::Display;
use std::future::Future;

use super::Sniffer;
use crate::manifest::{extract_uris_by_regex, ManifestKind};

/// What the network layer reports about a completed response.
#[derive(Debug, Clone, Default)]
pub struct ResponseMeta {
    /// Final URL after redirects.
    pub url: String,
    pub content_type: Option<String>,
}

impl ResponseMeta {
    pub fn new(url: impl Into<String>, content_type: Option<&str>) -> Self {
        Self {
            url: url.into(),
            content_type: content_type.map(String::from),
        }
    }

    fn manifest_kind(&self) -> Option<ManifestKind> {
        self.content_type
            .as_deref()
            .and_then(ManifestKind::from_content_type)
    }
}

impl Sniffer {
    fn push_all(&self, urls: Vec<String>) -> usize {
        urls.iter().filter(|u| self.push(u)).count()
    }

    /// Outgoing fetch request.
    pub fn on_fetch(&self, request_url: &str) -> bool {
        self.is_installed() && self.push(request_url)
    }

    /// Fetch response resolved. `body` reads a clone of the response text and
    /// is only awaited when the content type announces a manifest.
    pub async fn on_fetch_response<F, E>(&self, response: &ResponseMeta, body: F) -> usize
    where
        F: Future<Output = Result<String, E>>,
        E: Display,
    {
        if !self.is_installed() {
            return 0;
        }
        let mut emitted = usize::from(self.push(&response.url));
        if let Some(kind) = response.manifest_kind() {
            match body.await {
                Ok(text) => emitted += self.push_all(kind.extract(&text, &response.url)),
                Err(e) => tracing::debug!(url = %response.url, "manifest body unavailable: {}", e),
            }
        }
        emitted
    }

    /// XHR `open(method, url)`.
    pub fn on_xhr_open(&self, url: &str) -> bool {
        self.is_installed() && self.push(url)
    }

    /// XHR `load`: manifests go through their parser, anything else gets a
    /// generic scan for embedded media URLs.
    pub fn on_xhr_load(&self, response: &ResponseMeta, body: &str) -> usize {
        if !self.is_installed() {
            return 0;
        }
        let urls = match response.manifest_kind() {
            Some(kind) => kind.extract(body, &response.url),
            None => extract_uris_by_regex(body),
        };
        self.push_all(urls)
    }

    /// Scripted assignment to a media element's `src` property.
    pub fn on_media_src_assigned(&self, value: &str) -> bool {
        self.is_installed() && self.push(value)
    }

    /// Generic `setAttribute(name, value)`; only `src` is of interest.
    pub fn on_set_attribute(&self, name: &str, value: &str) -> bool {
        self.is_installed() && name.eq_ignore_ascii_case("src") && self.push(value)
    }
}
