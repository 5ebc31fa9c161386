//! Conversation list rendering

use serde_json::Value;

use super::truncate;
use crate::extract::{is_truthy, scalar_text};

/// Format one page of the `page/on-demand` response as markdown
///
/// Expects `results` (conversation records) and `pagination`
/// (`total`, `current`, `next`). Optional fields are emitted only when
/// present and non-empty. A missing `total` falls back to the number of
/// results on the page; a missing `current` to `1`.
pub fn format_conversation_list(data: &Value, limit: usize) -> String {
    let results: &[Value] = data
        .get("results")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let pagination = data.get("pagination").filter(|p| p.is_object());
    let field = |key: &str| pagination.and_then(|p| p.get(key)).filter(|v| !v.is_null());

    let total = field("total")
        .map(scalar_text)
        .unwrap_or_else(|| results.len().to_string());
    let current = field("current")
        .map(scalar_text)
        .unwrap_or_else(|| "1".to_string());

    let mut lines = vec![
        format!("# Jiminny Conversations (page {}, {} total)", current, total),
        String::new(),
    ];

    if results.is_empty() {
        lines.push("No conversations found.".to_string());
        return lines.join("\n");
    }

    for record in results {
        render_record(record, &mut lines);
    }

    if let Some(next) = field("next").filter(|v| is_truthy(v)) {
        lines.push(format!(
            "_More results available, request page {}._",
            scalar_text(next)
        ));
    }

    truncate(&lines.join("\n"), limit)
}

fn render_record(record: &Value, lines: &mut Vec<String>) {
    let text = |key: &str| record.get(key).map(scalar_text).unwrap_or_default();
    let nested_name = |key: &str| {
        record
            .get(key)
            .filter(|v| v.is_object())
            .and_then(|v| v.get("name"))
            .map(scalar_text)
            .unwrap_or_default()
    };
    let flag = |key: &str| {
        if record.get(key).is_some_and(is_truthy) {
            "Yes"
        } else {
            "No"
        }
    };

    let title = Some(text("title"))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Untitled".to_string());
    let start: String = text("actualStartTime").chars().take(10).collect();

    lines.push(format!("## {}", title));
    lines.push(format!("- **ID**: `{}`", text("id")));

    let optional = [
        ("Date", start),
        ("Duration", text("durationForHumans")),
        ("Host", nested_name("organizer")),
        ("Contact", nested_name("prospect")),
        ("Category", nested_name("category")),
        ("Provider", text("provider")),
    ];
    for (label, value) in optional {
        if !value.is_empty() {
            lines.push(format!("- **{}**: {}", label, value));
        }
    }

    lines.push(format!(
        "- **Transcript**: {} | **Summary**: {}",
        flag("hasTranscription"),
        flag("isSummarized")
    ));

    let status = text("status");
    if !status.is_empty() {
        lines.push(format!("- **Status**: {}", status));
    }
    lines.push(String::new());
}
