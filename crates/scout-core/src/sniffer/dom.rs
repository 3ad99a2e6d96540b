//! Passive document scan.
//!
//! Pulls raw candidate strings out of a parsed page in a fixed order: media
//! elements and their sources, hyperlinks, video meta tags, JSON-LD blocks,
//! video preload hints, then a raw regex sweep of the whole document text.
//! Strings are returned unnormalized; the sniffer resolves them against the
//! document's `<base href>` when one is present, and filters them.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

use super::structured;
use crate::manifest::sweep_document;

static MEDIA: LazyLock<Selector> = LazyLock::new(|| Selector::parse("video, audio").unwrap());
static SOURCE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("source").unwrap());
static BASE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("base[href]").unwrap());
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());
static META: LazyLock<Selector> = LazyLock::new(|| Selector::parse("meta").unwrap());
static LD_JSON: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());
static PRELOAD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"link[rel~="preload"][as="video"]"#).unwrap());

/// Attributes read from media and `<source>` elements. The `data-*` ones are
/// hints some player frameworks park the real stream URL in.
const SOURCE_ATTRS: [&str; 4] = ["src", "data-src", "data-hls", "data-m3u8"];

/// Meta `property`/`name` prefixes that announce a video stream.
const VIDEO_META_PREFIXES: [&str; 2] = ["og:video", "twitter:player:stream"];

/// Raw strings found in one document, plus its first `<base href>`.
#[derive(Debug, Default)]
pub struct DocumentScan {
    pub base_href: Option<String>,
    pub raw: Vec<String>,
}

impl DocumentScan {
    /// Resolution base for relative strings: `<base href>` resolved against
    /// the document location, or the location itself.
    pub fn base(&self, document_url: &Url) -> Url {
        self.base_href
            .as_deref()
            .and_then(|href| document_url.join(href.trim()).ok())
            .unwrap_or_else(|| document_url.clone())
    }
}

pub fn collect_candidates(html: &str, max_depth: usize) -> DocumentScan {
    let doc = Html::parse_document(html);
    let mut out = Vec::new();
    let base_href = doc
        .select(&BASE)
        .next()
        .and_then(|b| b.value().attr("href"))
        .map(String::from);

    for media in doc.select(&MEDIA) {
        push_attrs(&mut out, media);
        for source in media.select(&SOURCE) {
            push_attrs(&mut out, source);
        }
    }

    out.extend(
        doc.select(&ANCHOR)
            .filter_map(|a| a.value().attr("href"))
            .map(String::from),
    );

    for meta in doc.select(&META) {
        let el = meta.value();
        let name = el
            .attr("property")
            .or_else(|| el.attr("name"))
            .unwrap_or("")
            .to_ascii_lowercase();
        if VIDEO_META_PREFIXES.iter().any(|p| name.starts_with(p)) {
            if let Some(content) = el.attr("content") {
                out.push(content.to_string());
            }
        }
    }

    for script in doc.select(&LD_JSON) {
        let text: String = script.text().collect();
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => out.extend(structured::drill(&value, max_depth)),
            Err(e) => tracing::debug!("skipping malformed ld+json block: {}", e),
        }
    }

    out.extend(
        doc.select(&PRELOAD)
            .filter_map(|l| l.value().attr("href"))
            .map(String::from),
    );

    out.extend(sweep_document(html));
    DocumentScan {
        base_href,
        raw: out,
    }
}

fn push_attrs(out: &mut Vec<String>, el: ElementRef<'_>) {
    for attr in SOURCE_ATTRS {
        if let Some(v) = el.value().attr(attr) {
            out.push(v.to_string());
        }
    }
}
