//! scout-core: find, filter and rank playable media sources on a web page.

pub mod config;
pub mod error;
pub mod logging;

pub mod aggregator;
pub mod blocklist;
pub mod classify;
pub mod har;
pub mod host;
pub mod manifest;
pub mod rank;
pub mod sniffer;
pub mod url_model;
