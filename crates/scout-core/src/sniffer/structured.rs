//! Bounded walk over embedded structured data (JSON-LD blocks).

use serde_json::Value;

/// Property names whose string values are treated as candidate URLs.
pub const CANDIDATE_KEYS: [&str; 7] = [
    "contentUrl",
    "embedUrl",
    "url",
    "file",
    "src",
    "playbackUrl",
    "streamUrl",
];

/// Collect candidate strings from `value`, descending at most `max_depth`
/// levels of nesting so hostile documents cannot recurse without bound.
pub fn drill(value: &Value, max_depth: usize) -> Vec<String> {
    let mut out = Vec::new();
    walk(value, 0, max_depth, &mut out);
    out
}

fn walk(value: &Value, depth: usize, max_depth: usize, out: &mut Vec<String>) {
    if depth > max_depth {
        return;
    }
    match value {
        Value::Array(items) => {
            for item in items {
                walk(item, depth + 1, max_depth, out);
            }
        }
        Value::Object(map) => {
            for key in CANDIDATE_KEYS {
                if let Some(Value::String(s)) = map.get(key) {
                    if !s.is_empty() {
                        out.push(s.clone());
                    }
                }
            }
            for child in map.values() {
                if child.is_object() || child.is_array() {
                    walk(child, depth + 1, max_depth, out);
                }
            }
        }
        _ => {}
    }
}
