//! Width-aware text helpers.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates `text` to `max_width` columns, ending with an ellipsis when cut.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".repeat(max_width);
    }

    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        truncated.push(ch);
        width += ch_width;
    }
    truncated.push('…');
    truncated
}

/// Keeps the end of `text`, so the text being typed stays visible.
pub fn truncate_start_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".repeat(max_width);
    }

    let mut kept = Vec::new();
    let mut width = 0;
    for ch in text.chars().rev() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        kept.push(ch);
        width += ch_width;
    }
    let mut truncated = String::from("…");
    truncated.extend(kept.into_iter().rev());
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate_with_ellipsis("GPT-4o", 10), "GPT-4o");
        assert_eq!(truncate_start_with_ellipsis("gpt", 10), "gpt");
    }

    #[test]
    fn test_truncate_end() {
        assert_eq!(
            truncate_with_ellipsis("DeepSeek: R1 0528 (free)", 10),
            "DeepSeek:…"
        );
        assert_eq!(truncate_with_ellipsis("abc", 1), "…");
        assert_eq!(truncate_with_ellipsis("abc", 0), "");
    }

    #[test]
    fn test_truncate_start() {
        assert_eq!(truncate_start_with_ellipsis("anthropic/claude", 7), "…claude");
    }
}
