//! HAR 1.2 structures, limited to what replay needs.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct HarLog {
    pub log: HarRoot,
}

#[derive(Debug, Deserialize)]
pub struct HarRoot {
    #[serde(default)]
    pub pages: Vec<HarPage>,
    pub entries: Vec<HarEntry>,
}

#[derive(Debug, Deserialize)]
pub struct HarPage {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct HarEntry {
    pub request: HarRequest,
    pub response: HarResponse,
    /// Chromium extension: "document", "xhr", "fetch", "media", ...
    #[serde(default, rename = "_resourceType")]
    pub resource_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HarRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct HarResponse {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub headers: Vec<HarHeader>,
    #[serde(default)]
    pub content: HarContent,
}

#[derive(Debug, Default, Deserialize)]
pub struct HarContent {
    #[serde(default, rename = "mimeType")]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HarHeader {
    pub name: String,
    pub value: String,
}

impl HarEntry {
    /// Content type from the response headers, else the recorded mime type.
    pub fn content_type(&self) -> Option<&str> {
        self.response
            .headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case("Content-Type"))
            .map(|h| h.value.as_str())
            .or(self.response.content.mime_type.as_deref())
            .filter(|ct| !ct.is_empty())
    }

    /// Captured body text; base64 bodies count as unavailable.
    pub fn body_text(&self) -> Option<&str> {
        let content = &self.response.content;
        if content
            .encoding
            .as_deref()
            .is_some_and(|e| e.eq_ignore_ascii_case("base64"))
        {
            return None;
        }
        content.text.as_deref()
    }

    pub fn is_xhr(&self) -> bool {
        self.resource_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("xhr"))
    }

    pub fn is_html_document(&self) -> bool {
        self.response.status == 200
            && self
                .content_type()
                .is_some_and(|ct| ct.to_ascii_lowercase().contains("text/html"))
    }
}
