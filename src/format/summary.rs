//! Three-section summary report
//!
//! Each section is looked up independently, so one failing endpoint only
//! degrades its own section.

use serde_json::Value;

use super::truncate;
use crate::extract::{extract_list_items, extract_text, is_truthy};

/// Outcome of one section lookup
#[derive(Debug, Clone, PartialEq)]
pub enum SectionOutcome {
    /// The endpoint answered `200` with this body
    Found(Value),
    /// Every prefix answered with a non-200 status
    Unavailable,
    /// The lookup itself failed (transport error, malformed JSON)
    Failed,
}

impl SectionOutcome {
    /// Body worth extracting from; an empty `200` body counts as unavailable
    fn body(&self) -> Option<&Value> {
        match self {
            SectionOutcome::Found(value) if is_truthy(value) => Some(value),
            _ => None,
        }
    }

    fn is_failed(&self) -> bool {
        matches!(self, SectionOutcome::Failed)
    }
}

const SUMMARY_UNAVAILABLE: &str =
    "_Summary not available via API. Use jiminny_get_transcript and ask for a summary in chat._";
const KEY_POINTS_UNAVAILABLE: &str =
    "_Key points not available via API. Use jiminny_get_transcript and ask for key points in chat._";

/// Assemble the `# Conversation Summary` document
///
/// # Examples
///
/// ```
/// use jiminny_mcp::format::{render_summary_report, SectionOutcome};
/// use serde_json::json;
///
/// let report = render_summary_report(
///     &SectionOutcome::Found(json!({"summary": "Went well"})),
///     &SectionOutcome::Failed,
///     &SectionOutcome::Found(json!({"keyPoints": {"content": ["Budget"]}})),
///     25_000,
/// );
/// assert!(report.contains("## Summary\nWent well"));
/// assert!(report.contains("_Action items not available._"));
/// assert!(report.contains("- Budget"));
/// ```
pub fn render_summary_report(
    summary: &SectionOutcome,
    action_items: &SectionOutcome,
    key_points: &SectionOutcome,
    limit: usize,
) -> String {
    let mut lines = vec!["# Conversation Summary".to_string(), String::new()];

    lines.push("## Summary".to_string());
    match summary.body() {
        Some(body) => {
            let text = extract_text(body, "summary");
            if text.is_empty() {
                lines.push("_No summary available._".to_string());
            } else {
                lines.push(text);
            }
        }
        None => lines.push(SUMMARY_UNAVAILABLE.to_string()),
    }
    lines.push(String::new());

    lines.push("## Action Items".to_string());
    match action_items.body() {
        Some(body) => push_items(&mut lines, body, "_No action items found._"),
        None => lines.push("_Action items not available._".to_string()),
    }
    lines.push(String::new());

    lines.push("## Key Points".to_string());
    match key_points.body() {
        Some(body) => push_items(&mut lines, body, "_No key points found._"),
        None if key_points.is_failed() => {
            lines.push("_Key points not available via API._".to_string())
        }
        None => lines.push(KEY_POINTS_UNAVAILABLE.to_string()),
    }

    truncate(&lines.join("\n"), limit)
}

fn push_items(lines: &mut Vec<String>, body: &Value, empty: &str) {
    let items = extract_list_items(body);
    if items.is_empty() {
        lines.push(empty.to_string());
    } else {
        lines.extend(items.into_iter().map(|item| format!("- {}", item)));
    }
}
