//! Width-aware text helpers for Hangul/Latin mixed copy

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Terminal columns occupied by `text`
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Greedy word wrap to `width` columns.
///
/// Words wider than a full line are broken at character boundaries.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = display_width(word);

        if current_width > 0 && current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
            continue;
        }

        if current_width > 0 {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        for c in word.chars() {
            let w = c.width().unwrap_or(0);
            if current_width + w > width && current_width > 0 {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(c);
            current_width += w;
        }
    }

    if current_width > 0 {
        lines.push(current);
    }
    lines
}

/// Pad `text` with spaces on the right to exactly `width` columns.
/// Text that is already wider is returned unchanged.
pub fn pad_right(text: &str, width: usize) -> String {
    let w = display_width(text);
    if w >= width {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(width - w))
}

/// Letter-spaced variant, e.g. `S C R O L L`
pub fn spaced(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for (i, c) in text.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_width_hangul() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("코쿤"), 4);
    }

    #[test]
    fn test_wrap_words() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("코쿤에서 당신의 한계를", 9), vec!["코쿤에서", "당신의", "한계를"]);
        assert!(wrap("   ", 10).is_empty());
    }

    #[test]
    fn test_wrap_breaks_long_words() {
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        // a double-width char never straddles the edge
        assert_eq!(wrap("가나다", 3), vec!["가", "나", "다"]);
    }

    #[test]
    fn test_pad_right() {
        assert_eq!(pad_right("코", 4), "코  ");
        assert_eq!(pad_right("long", 2), "long");
    }

    #[test]
    fn test_spaced() {
        assert_eq!(spaced("SCROLL"), "S C R O L L");
        assert_eq!(spaced(""), "");
    }
}
