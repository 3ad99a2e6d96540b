//! URL modeling for candidates and pages.
//!
//! Normalizes raw strings pulled out of a page (attributes, script text,
//! intercepted request URLs) into absolute candidate URLs, and derives the
//! lowercase host used for same-site ranking and blocklist checks.

mod host;
mod normalize;

pub use host::{host_of, is_same_site};
pub use normalize::{normalize_candidate, normalize_page_url, opaque_scheme};
