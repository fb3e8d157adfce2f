// Recovery of the JSON payload embedded in a free-text completion

use serde_json::{Map, Value};
use tracing::debug;

/// Pre-normalization payload: any JSON object, fields untrusted.
pub type RawAnalysis = Map<String, Value>;

/// Upper bound on spans tried before giving up.
const MAX_CANDIDATES: usize = 32;

/// Keys that mark an object as the analysis payload itself.
const ANALYSIS_KEYS: [&str; 2] = ["menuItems", "recommendation"];

/// Locate and decode the analysis object inside `text`.
///
/// Top-level balanced `{...}` spans are tried left to right; the first span
/// that decodes to a JSON object wins. Prose such as `use the {name} field`
/// ahead of the payload is skipped this way instead of being glued onto it,
/// and objects nested inside a rejected span are never candidates.
///
/// A `{` that is never closed does not end the search: scanning resumes at
/// the next brace. Spans found after an unclosed brace may be fragments of a
/// truncated payload, so they only win when they carry an analysis key.
/// Returns `None` when nothing qualifies.
pub fn extract_analysis(text: &str) -> Option<RawAnalysis> {
    let mut cursor = 0;
    let mut after_unclosed = false;
    for _ in 0..MAX_CANDIDATES {
        let start = cursor + text[cursor..].find('{')?;
        let Some(span) = balanced_object_at(text, start) else {
            after_unclosed = true;
            cursor = start + 1;
            continue;
        };
        if let Some(object) = decode_object(span) {
            if !after_unclosed || is_analysis(&object) {
                return Some(object);
            }
        }
        cursor = start + span.len();
    }
    None
}

fn is_analysis(object: &RawAnalysis) -> bool {
    ANALYSIS_KEYS.iter().any(|key| object.contains_key(*key))
}

fn decode_object(span: &str) -> Option<RawAnalysis> {
    match serde_json::from_str::<Value>(span) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            debug!("Candidate span is not valid JSON: {}", e);
            None
        }
    }
}

/// Span from the `{` at `start` through its matching `}`, skipping braces
/// inside JSON string literals.
fn balanced_object_at(text: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }
    None
}
