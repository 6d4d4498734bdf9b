//! Turns raw API payloads into the records written to the logs.

use crate::model::{ApodRecord, RawApod};
use chrono::{DateTime, Local};

const LOGGED_AT_FORMAT: &str = "Day: %m-%d-%Y | Time: %H:%M:%S";

pub fn normalize(raw: &RawApod, captured_at: DateTime<Local>) -> ApodRecord {
    ApodRecord::new(
        raw.date.trim(),
        raw.title.trim(),
        raw.url.trim(),
        first_two_sentences(&raw.explanation),
        logged_at_stamp(captured_at),
    )
}

pub fn logged_at_stamp(captured_at: DateTime<Local>) -> String {
    captured_at.format(LOGGED_AT_FORMAT).to_string()
}

/// Keeps at most the first two period-terminated sentences.
///
/// Text without any period is returned trimmed as-is.
pub fn first_two_sentences(text: &str) -> String {
    let segments: Vec<&str> = text.split('.').collect();
    // The last segment is whatever follows the final period, so it is never terminated.
    let terminated = &segments[..segments.len().saturating_sub(1)];

    if terminated.is_empty() {
        return text.trim().to_string();
    }

    let mut out = String::new();
    for (i, segment) in terminated.iter().take(2).enumerate() {
        if i == 0 {
            out.push_str(segment.trim_start());
        } else {
            out.push_str(segment.trim_end());
        }
        out.push('.');
    }
    out
}
