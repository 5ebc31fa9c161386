//! Transcript rendering
//!
//! The transcription endpoint answers in several shapes: a bare segment
//! array, an object wrapping the segments, an object holding the whole
//! transcript as one string, or something else entirely. Resolution:
//!
//! 1. a non-empty array is the segment list;
//! 2. in an object, the first truthy of `segments`, `entries`, `data`,
//!    `results` (it must be an array to be used as segments);
//! 3. with no candidate, the first string under `transcript`, `text`,
//!    `content`, `transcription` is emitted verbatim;
//! 4. anything else is dumped raw.

use std::collections::HashMap;

use serde_json::Value;

use super::{format_seconds, truncate};
use crate::api::ParticipantNames;
use crate::extract::{first_non_empty_str, first_truthy, scalar_text};

const SEGMENT_KEYS: [&str; 4] = ["segments", "entries", "data", "results"];
const WHOLE_TEXT_KEYS: [&str; 4] = ["transcript", "text", "content", "transcription"];
const SEGMENT_TEXT_KEYS: [&str; 3] = ["transcript", "text", "content"];
const SEGMENT_SPEAKER_KEYS: [&str; 2] = ["participantId", "speaker"];
const SEGMENT_START_KEYS: [&str; 3] = ["startsAt", "startTime", "start"];

enum Source<'a> {
    Segments(&'a [Value]),
    Text(&'a str),
    Raw,
}

fn resolve(data: &Value) -> Source<'_> {
    match data {
        Value::Array(items) if !items.is_empty() => Source::Segments(items),
        Value::Object(_) => match first_truthy(data, &SEGMENT_KEYS) {
            Some(Value::Array(items)) => Source::Segments(items),
            Some(_) => Source::Raw,
            None => WHOLE_TEXT_KEYS
                .iter()
                .find_map(|key| data.get(*key).and_then(Value::as_str))
                .map(Source::Text)
                .unwrap_or(Source::Raw),
        },
        _ => Source::Raw,
    }
}

/// Segment list of a transcription payload, if it has one
///
/// Callers use this to decide whether participant names are worth
/// resolving before rendering.
pub fn transcript_segments(data: &Value) -> Option<&[Value]> {
    match resolve(data) {
        Source::Segments(items) => Some(items),
        _ => None,
    }
}

/// Render a transcription payload as markdown
///
/// Segment speakers are labelled with `names` when resolved, otherwise
/// with `Speaker N` in order of first appearance. Consecutive segments
/// from the same label share one `**Speaker** [M:SS]:` header.
pub fn format_transcript(data: &Value, names: &ParticipantNames, limit: usize) -> String {
    let document = match resolve(data) {
        Source::Segments(segments) => render_segments(segments, names),
        Source::Text(text) => format!("# Transcript\n\n{}", text),
        Source::Raw => {
            let raw = match data {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            format!("# Transcript\n\n{}", raw)
        }
    };
    truncate(&document, limit)
}

/// Assigns `Speaker N` labels to unresolved participant ids
#[derive(Debug, Default)]
struct SpeakerLabels {
    labels: HashMap<String, String>,
}

impl SpeakerLabels {
    fn label(&mut self, id: &str) -> String {
        let next = self.labels.len() + 1;
        self.labels
            .entry(id.to_string())
            .or_insert_with(|| format!("Speaker {}", next))
            .clone()
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}

fn start_offset(segment: &Value) -> Option<f64> {
    match first_truthy(segment, &SEGMENT_START_KEYS)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn render_segments(segments: &[Value], names: &ParticipantNames) -> String {
    let mut auto = SpeakerLabels::default();
    let mut lines = vec!["# Transcript".to_string(), String::new()];
    let mut previous: Option<String> = None;

    for segment in segments.iter().filter(|s| s.is_object()) {
        let text = match first_non_empty_str(segment, &SEGMENT_TEXT_KEYS) {
            Some(text) if !text.trim().is_empty() => text,
            _ => continue,
        };

        let id = first_truthy(segment, &SEGMENT_SPEAKER_KEYS)
            .map(scalar_text)
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| "unknown".to_string());
        let speaker = match names.get(&id) {
            Some(name) => name.to_string(),
            None => auto.label(&id),
        };

        let timestamp = start_offset(segment)
            .filter(|s| *s != 0.0)
            .map(format_seconds)
            .unwrap_or_default();

        if previous.as_deref() == Some(speaker.as_str()) {
            lines.push(text.to_string());
        } else {
            lines.push(format!("\n**{}** [{}]:\n{}", speaker, timestamp, text));
            previous = Some(speaker);
        }
    }

    if !names.is_empty() {
        let joined = names.names().collect::<Vec<_>>().join(", ");
        lines.insert(2, format!("_Participants: {}_\n", joined));
    } else if auto.len() > 0 {
        lines.insert(
            2,
            format!(
                "_Note: {} speakers detected (names could not be resolved)_\n",
                auto.len()
            ),
        );
    }

    lines.join("\n")
}
