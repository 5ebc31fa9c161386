//! Schema-agnostic extraction over upstream JSON
//!
//! The Jiminny API returns summaries, action items and key points in
//! several shapes. Rather than deserializing into fixed types, these
//! helpers walk the `serde_json::Value` tree and probe a fixed, ordered
//! list of candidate keys at each level. The probing order is part of the
//! contract with the upstream and must not be reordered.

use serde_json::Value;

/// String keys probed by [`extract_text`], before the caller's fallback key.
const TEXT_KEYS: [&str; 5] = ["text", "summary", "content", "description", "transcription"];

/// Keys whose value, when a mapping, holds the list to extract.
const NESTED_LIST_KEYS: [&str; 4] = ["actionItems", "keyPoints", "key_points", "action_items"];

/// Keys whose value, when an array, is the list to extract.
const LIST_KEYS: [&str; 9] = [
    "content",
    "items",
    "data",
    "results",
    "action_items",
    "actionItems",
    "key_points",
    "keyPoints",
    "points",
];

/// Whether a JSON value counts as present
///
/// `null`, `false`, zero, empty strings, empty arrays and empty objects
/// are all treated as absent.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// First truthy value among `keys` in an object
pub fn first_truthy<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find(|v| is_truthy(v))
}

/// First non-empty string value among `keys` in an object
pub fn first_non_empty_str<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
}

/// Render a scalar JSON value as display text
///
/// Strings are returned without quotes; numbers and booleans use their
/// JSON form; `null` and containers render as empty.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Extract a human-readable text string from an API response
///
/// Bare strings are returned verbatim. In an object the keys `text`,
/// `summary`, `content`, `description`, `transcription` and then
/// `fallback_key` are probed for a non-blank string, returned trimmed;
/// failing that the search recurses into `data`, else `results`. Arrays
/// join the non-empty texts of their items with newlines.
///
/// # Examples
///
/// ```
/// use jiminny_mcp::extract::extract_text;
/// use serde_json::json;
///
/// assert_eq!(extract_text(&json!({"summary": "  done  "}), "summary"), "done");
/// assert_eq!(extract_text(&json!({"data": [{"text": "a"}, {"text": "b"}]}), "text"), "a\nb");
/// ```
pub fn extract_text(value: &Value, fallback_key: &str) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            let probe = |key: &str| {
                map.get(key)
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
            };
            if let Some(s) = TEXT_KEYS
                .iter()
                .find_map(|key| probe(*key))
                .or_else(|| probe(fallback_key))
            {
                return s.to_string();
            }
            if let Some(data) = map.get("data") {
                return extract_text(data, fallback_key);
            }
            if let Some(results) = map.get("results") {
                return extract_text(results, fallback_key);
            }
            String::new()
        }
        Value::Array(items) => items
            .iter()
            .map(|item| extract_text(item, fallback_key))
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

/// Extract a flat list of text items from an API response
///
/// Arrays keep their non-blank strings (trimmed) and the extracted text
/// of their objects. Objects first look for a nested mapping under
/// `actionItems`, `keyPoints`, `key_points`, `action_items`; then for an
/// array under the common list keys; finally the object's text is split
/// into lines with leading bullet markers removed.
///
/// # Examples
///
/// ```
/// use jiminny_mcp::extract::extract_list_items;
/// use serde_json::json;
///
/// let items = extract_list_items(&json!({"actionItems": {"content": ["x", "y"]}}));
/// assert_eq!(items, vec!["x", "y"]);
/// ```
pub fn extract_list_items(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::Object(_) => Some(extract_text(item, "text")).filter(|t| !t.is_empty()),
                _ => None,
            })
            .collect(),
        Value::Object(map) => {
            for key in NESTED_LIST_KEYS {
                if let Some(nested @ Value::Object(_)) = map.get(key) {
                    return extract_list_items(nested);
                }
            }
            for key in LIST_KEYS {
                if let Some(list @ Value::Array(_)) = map.get(key) {
                    return extract_list_items(list);
                }
            }
            let text = extract_text(value, "text");
            text.split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(strip_bullet)
                .collect()
        }
        _ => Vec::new(),
    }
}

fn strip_bullet(line: &str) -> String {
    line.trim_start_matches(['-', ' '])
        .trim_start_matches(['*', ' '])
        .to_string()
}
