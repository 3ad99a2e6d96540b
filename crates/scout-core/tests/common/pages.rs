//! Page fixtures shared by the integration tests.

use std::sync::Arc;

use scout_core::blocklist::Blocklist;
use scout_core::host::{HostSettings, PageHost, RecordingListener};
use scout_core::sniffer::SnifferMessage;
use tokio::sync::mpsc::UnboundedReceiver;

pub const PAGE_URL: &str = "https://x.com/watch/42";

/// A player page: scripted player config, JSON-LD, an ad slot and a stray link.
pub const PLAYER_PAGE: &str = r#"<!doctype html>
<html>
<head>
  <meta property="og:video" content="https://cdn.x.com/v42/720.mp4">
  <script type="application/ld+json">
    [{"@type":"VideoObject","contentUrl":"https://cdn.x.com/v42/master.m3u8",
      "potentialAction":{"target":{"url":"https://x.com/embed/42"}}}]
  </script>
</head>
<body>
  <div id="ad-slot"><video src="https://ads.net/creative/spot.mp4"></video></div>
  <video id="main" data-src="/v42/segment_0001.ts"></video>
  <a href="/v42/download.webm">download</a>
  <script>
    player.setup({ hls: "https://cdn.x.com/v42/hls/index.m3u8" });
  </script>
</body>
</html>"#;

pub fn host_with(
    domains: &[&str],
) -> (PageHost<RecordingListener>, UnboundedReceiver<SnifferMessage>) {
    PageHost::new(
        Arc::new(Blocklist::from_domains(domains)),
        HostSettings::default(),
        RecordingListener::default(),
    )
}
