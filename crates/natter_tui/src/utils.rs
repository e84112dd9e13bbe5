//! Text and scroll helpers for the TUI.

use unicode_width::UnicodeWidthStr;

/// Greedy word wrap to `width` columns. Embedded newlines start a fresh
/// line; a word wider than the full width is split hard so nothing is lost.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut out = Vec::new();
    for raw_line in text.split('\n') {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let needed = if current.is_empty() {
                word.width()
            } else {
                current.width() + 1 + word.width()
            };
            if needed <= width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                continue;
            }
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            if word.width() <= width {
                current.push_str(word);
            } else {
                current = split_hard(word, width, &mut out);
            }
        }
        out.push(current);
    }
    out
}

/// Break an over-wide word into full-width chunks, returning the remainder.
fn split_hard(word: &str, width: usize, out: &mut Vec<String>) -> String {
    let mut chunk = String::new();
    for c in word.chars() {
        if chunk.width() + unicode_width::UnicodeWidthChar::width(c).unwrap_or(0) > width {
            out.push(std::mem::take(&mut chunk));
        }
        chunk.push(c);
    }
    chunk
}

/// Truncate to `max_width` columns, ending in "…" when something was cut.
pub fn truncate_ellipsis(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    for c in s.chars() {
        let next = out.width() + unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if next > max_width.saturating_sub(1) {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}

/// Visible slice of a line list: `scroll` lines up from the bottom, clamped
/// so the window never runs past either end. Returns `(start, end)`.
pub fn scroll_window(total: usize, height: usize, scroll: usize) -> (usize, usize) {
    if total <= height {
        return (0, total);
    }
    let max_scroll = total - height;
    let scroll = scroll.min(max_scroll);
    let end = total - scroll;
    (end - height, end)
}

/// Composer height in content lines: grows with newlines, capped at `max`.
pub fn input_height(content: &str, max: u16) -> u16 {
    let lines = content.split('\n').count() as u16;
    lines.clamp(1, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_short_text_single_line() {
        assert_eq!(wrap_lines("hello world", 40), vec!["hello world"]);
    }

    #[test]
    fn wrap_breaks_at_word_boundaries() {
        let lines = wrap_lines("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn wrap_respects_embedded_newlines() {
        let lines = wrap_lines("first\nsecond", 40);
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn wrap_splits_overlong_words() {
        let lines = wrap_lines("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_empty_text_yields_one_empty_line() {
        assert_eq!(wrap_lines("", 10), vec![""]);
    }

    #[test]
    fn wrap_zero_width_passes_through() {
        assert_eq!(wrap_lines("anything", 0), vec!["anything"]);
    }

    #[test]
    fn wrap_counts_wide_chars_by_columns() {
        // each CJK char is two columns, so only two fit in five columns
        let lines = wrap_lines("你好 世界", 5);
        assert_eq!(lines, vec!["你好", "世界"]);
    }

    #[test]
    fn truncate_leaves_short_strings_alone() {
        assert_eq!(truncate_ellipsis("Chat 1", 10), "Chat 1");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        let out = truncate_ellipsis("a rather long title", 8);
        assert!(out.ends_with('…'));
        assert!(out.width() <= 8);
    }

    #[test]
    fn scroll_window_fits_entirely() {
        assert_eq!(scroll_window(5, 10, 0), (0, 5));
        assert_eq!(scroll_window(5, 10, 99), (0, 5));
    }

    #[test]
    fn scroll_window_pinned_to_bottom() {
        assert_eq!(scroll_window(20, 5, 0), (15, 20));
    }

    #[test]
    fn scroll_window_scrolled_up() {
        assert_eq!(scroll_window(20, 5, 3), (12, 17));
    }

    #[test]
    fn scroll_window_clamps_at_the_top() {
        assert_eq!(scroll_window(20, 5, 100), (0, 5));
    }

    #[test]
    fn input_height_grows_with_newlines_up_to_cap() {
        assert_eq!(input_height("hi", 5), 1);
        assert_eq!(input_height("a\nb\nc", 5), 3);
        assert_eq!(input_height("a\nb\nc\nd\ne\nf\ng", 5), 5);
    }
}
