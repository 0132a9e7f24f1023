// Shared formatting for the TUI
//
// Number formatting plus the log row rendering helpers: one-line previews
// for the list, pretty JSON for the detail modal, and keyword highlighting.

use chrono::{Local, TimeZone};
use ratatui::style::Style;
use ratatui::text::Span;
use regex::Regex;
use serde_json::Value;

use crate::api::models::LogRow;
use crate::util::truncate_utf8_safe;

/// Row fields that are rendered specially and skipped in the field dump
const TIME_FIELDS: &[&str] = &["_time_second_", "_time_nanosecond_"];
const BODY_FIELDS: &[&str] = &["_raw_log_", "body", "message", "msg"];

/// List previews are capped; the detail modal shows the full row
const BODY_PREVIEW_BYTES: usize = 2048;

/// Format a large number with commas for readability
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (count, ch) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, ch);
    }

    result
}

/// Extract the row timestamp as "HH:MM:SS", if present
pub fn row_timestamp(row: &LogRow) -> Option<String> {
    let secs = TIME_FIELDS.iter().find_map(|field| row.get(field)).and_then(|v| v.as_i64())?;
    let ts = Local.timestamp_opt(secs, 0).single()?;
    Some(ts.format("%H:%M:%S").to_string())
}

/// Extract the row severity level, if the row has one
pub fn row_level(row: &LogRow) -> Option<&str> {
    row.get("level").or_else(|| row.get("severity")).and_then(|v| v.as_str())
}

/// Extract the row body: prefers a raw log field, falls back to compact JSON
/// of the remaining fields.
pub fn row_body(row: &LogRow) -> String {
    for field in BODY_FIELDS {
        if let Some(body) = row.get(field).and_then(|v| v.as_str()) {
            return truncate_utf8_safe(body, BODY_PREVIEW_BYTES).to_string();
        }
    }

    let body = match row {
        Value::Object(map) => {
            let rest: Vec<String> = map
                .iter()
                .filter(|(k, _)| !TIME_FIELDS.contains(&k.as_str()) && k.as_str() != "level")
                .map(|(k, v)| format!("{}={}", k, compact_value(v)))
                .collect();
            rest.join(" ")
        }
        other => other.to_string(),
    };
    truncate_utf8_safe(&body, BODY_PREVIEW_BYTES).to_string()
}

fn compact_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Pretty-print a row for the detail modal
pub fn row_detail(row: &LogRow) -> String {
    serde_json::to_string_pretty(row).unwrap_or_else(|_| row.to_string())
}

/// Compile the keyword into a case-insensitive highlight regex.
///
/// The keyword is escaped first; it is a literal filter string, not a
/// user-supplied pattern.
pub fn keyword_regex(keyword: &str) -> Option<Regex> {
    if keyword.trim().is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(keyword.trim()))).ok()
}

/// Split a line into spans with keyword matches styled separately
pub fn highlight_spans<'a>(
    text: &'a str,
    pattern: Option<&Regex>,
    base: Style,
    highlight: Style,
) -> Vec<Span<'a>> {
    let Some(re) = pattern else {
        return vec![Span::styled(text, base)];
    };

    let mut spans = Vec::new();
    let mut cursor = 0;
    for m in re.find_iter(text) {
        if m.start() > cursor {
            spans.push(Span::styled(&text[cursor..m.start()], base));
        }
        spans.push(Span::styled(&text[m.start()..m.end()], highlight));
        cursor = m.end();
    }
    if cursor < text.len() {
        spans.push(Span::styled(&text[cursor..], base));
    }
    if spans.is_empty() {
        spans.push(Span::styled(text, base));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(42), "42");
    }

    #[test]
    fn test_row_body_prefers_raw_log() {
        let row = json!({"_raw_log_": "GET /healthz 200", "level": "info"});
        assert_eq!(row_body(&row), "GET /healthz 200");
    }

    #[test]
    fn test_row_body_falls_back_to_fields() {
        let row = json!({"_time_second_": 1_700_000_000, "level": "warn", "pod": "api-0", "latency": 12});
        let body = row_body(&row);
        assert!(body.contains("pod=api-0"));
        assert!(body.contains("latency=12"));
        assert!(!body.contains("_time_second_"));
        assert!(!body.contains("level"));
    }

    #[test]
    fn test_row_body_preview_is_capped() {
        let row = json!({"_raw_log_": "x".repeat(10_000)});
        assert_eq!(row_body(&row).len(), 2048);
    }

    #[test]
    fn test_row_level_and_timestamp() {
        let row = json!({"_time_second_": 1_700_000_000, "level": "error"});
        assert_eq!(row_level(&row), Some("error"));
        assert!(row_timestamp(&row).is_some());
        assert!(row_timestamp(&json!({"level": "info"})).is_none());
    }

    #[test]
    fn test_keyword_regex_escapes_literals() {
        let re = keyword_regex("status=500 (retry)").unwrap();
        assert!(re.is_match("POST /x status=500 (retry) trace=ab"));
        assert!(!re.is_match("status=5000"));
        assert!(keyword_regex("   ").is_none());
    }

    #[test]
    fn test_highlight_spans_case_insensitive() {
        let re = keyword_regex("timeout").unwrap();
        let base = Style::default();
        let hl = Style::default().fg(ratatui::style::Color::Yellow);
        let spans = highlight_spans("Timeout after timeout", Some(&re), base, hl);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].content.as_ref(), "Timeout");
        assert_eq!(spans[0].style, hl);
        assert_eq!(spans[1].content.as_ref(), " after ");
        assert_eq!(spans[2].content.as_ref(), "timeout");
    }
}
