//! Shared utility functions

use unicode_width::UnicodeWidthChar;

/// Safely truncate a string to at most `max_bytes` while respecting UTF-8 boundaries.
///
/// If the string is already shorter than `max_bytes`, returns it unchanged.
/// Otherwise, finds the last valid UTF-8 character boundary at or before `max_bytes`
/// and returns a slice up to that point.
pub fn truncate_utf8_safe(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Truncate a string to fit within `max_cols` terminal columns.
///
/// Byte truncation is wrong for display purposes: CJK characters and many
/// emoji occupy two columns. Walks characters accumulating display width
/// and appends an ellipsis when content was cut.
pub fn truncate_display(s: &str, max_cols: usize) -> String {
    let mut width = 0usize;
    let mut out = String::new();

    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_cols.saturating_sub(1) {
            out.push('…');
            return out;
        }
        width += w;
        out.push(ch);
    }

    out
}

/// Percent-encode a string for use as a URL query value.
///
/// Minimal RFC 3986 escaping: unreserved characters pass through, everything
/// else is `%XX`-encoded byte-wise. Enough for share links; not a general
/// URL library.
pub fn query_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_than_max() {
        assert_eq!(truncate_utf8_safe("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_at_ascii_boundary() {
        assert_eq!(truncate_utf8_safe("hello world", 5), "hello");
    }

    #[test]
    fn test_truncate_at_utf8_boundary() {
        // Each character is 3 bytes, so truncating at 4 keeps only the first
        let s = "日本語";
        assert_eq!(truncate_utf8_safe(s, 4), "日");
        assert_eq!(truncate_utf8_safe(s, 6), "日本");
    }

    #[test]
    fn test_truncate_empty_string() {
        assert_eq!(truncate_utf8_safe("", 5), "");
    }

    #[test]
    fn test_truncate_to_zero() {
        assert_eq!(truncate_utf8_safe("hello", 0), "");
    }

    #[test]
    fn test_display_truncation_ascii() {
        assert_eq!(truncate_display("hello world", 6), "hello…");
        assert_eq!(truncate_display("hi", 6), "hi");
    }

    #[test]
    fn test_display_truncation_wide_chars() {
        // "日" is two columns wide; 5 columns fit two of them plus the ellipsis
        let truncated = truncate_display("日本語ログ", 5);
        assert_eq!(truncated, "日本…");
    }

    #[test]
    fn test_query_escape_passthrough() {
        assert_eq!(query_escape("error-level_5.0~x"), "error-level_5.0~x");
    }

    #[test]
    fn test_query_escape_specials() {
        assert_eq!(query_escape("status=500 path"), "status%3D500%20path");
        assert_eq!(query_escape("日"), "%E6%97%A5");
    }
}
