//! HAR (HTTP Archive) replay: feed a recorded browsing session through the
//! discovery pipeline as if the page were live.

mod parse;
mod replay;

pub use parse::{HarContent, HarEntry, HarHeader, HarLog, HarPage, HarRequest, HarResponse, HarRoot};
pub use replay::{load_har, replay_har, replay_har_file, ReplaySummary};
