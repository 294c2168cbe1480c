//! String utilities for the domain layer.

/// Truncate a string to at most `max_chars` Unicode code points.
///
/// When truncation is needed the result keeps the first `max_chars - 3`
/// code points and ends in `...`, so it is exactly `max_chars` code points
/// long. Length is measured in code points rather than bytes, so multi-byte
/// characters are never split.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let head: String = s.chars().take(keep).collect();
    format!("{head}...")
}

/// Short single-line preview of a message body for log output.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat = s.replace('\n', " ");
    truncate_chars(flat.trim(), max_chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_is_unchanged() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_chars("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_exact_limit_is_unchanged() {
        let s = "a".repeat(60);
        assert_eq!(truncate_chars(&s, 60), s);
    }

    #[test]
    fn test_truncate_over_limit_is_exactly_limit() {
        let s = "b".repeat(61);
        let out = truncate_chars(&s, 60);
        assert_eq!(out.chars().count(), 60);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_truncate_counts_code_points_not_bytes() {
        // 7 code points, 21 bytes
        assert_eq!(truncate_chars("日本語テスト文", 7), "日本語テスト文");
        assert_eq!(truncate_chars("日本語テスト文字列", 7), "日本語テ...");
    }

    #[test]
    fn test_truncate_emoji() {
        let s = "👋🌍🎉🚀✨";
        let out = truncate_chars(s, 4);
        assert_eq!(out, "👋...");
        assert_eq!(out.chars().count(), 4);
    }

    #[test]
    fn test_preview_flattens_newlines() {
        assert_eq!(preview("line one\nline two", 100), "line one line two");
        assert_eq!(preview("  abcdefghij  ", 6), "abc...");
    }
}
