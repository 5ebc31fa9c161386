//! Markdown rendering of Jiminny API responses
//!
//! - `conversations`: one page of the on-demand conversation list
//! - `transcript`: transcription payloads of unknown shape
//! - `summary`: the three-section summary report
//!
//! Every renderer caps its output with [`truncate`].

pub mod conversations;
pub mod summary;
pub mod transcript;

pub use conversations::format_conversation_list;
pub use summary::{render_summary_report, SectionOutcome};
pub use transcript::format_transcript;

/// Marker appended to any document cut at the character limit
pub const TRUNCATION_SUFFIX: &str = "\n\n... [truncated: response exceeded character limit]";

/// Cap `text` at `limit` characters
///
/// Counts Unicode scalar values, not bytes, so a cut never lands inside a
/// multi-byte character. Truncated output always ends with
/// [`TRUNCATION_SUFFIX`].
///
/// # Examples
///
/// ```
/// use jiminny_mcp::format::{truncate, TRUNCATION_SUFFIX};
///
/// assert_eq!(truncate("short", 10), "short");
/// let cut = truncate("abcdef", 3);
/// assert_eq!(cut, format!("abc{}", TRUNCATION_SUFFIX));
/// ```
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        None => text.to_string(),
        Some((byte_idx, _)) => {
            let mut out = String::with_capacity(byte_idx + TRUNCATION_SUFFIX.len());
            out.push_str(&text[..byte_idx]);
            out.push_str(TRUNCATION_SUFFIX);
            out
        }
    }
}

/// Format an offset in seconds as `M:SS`
///
/// Fractions are dropped; negative or non-finite offsets render as `0:00`.
pub fn format_seconds(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
