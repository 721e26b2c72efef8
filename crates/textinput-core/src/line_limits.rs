//! Line limit configuration for fields backed by the native control.
//!
//! The native control is always a multi-line editor, so a single-line field
//! has to strip line breaks out of whatever the control reports.

use crate::range::TextRange;

/// Whether a field accepts line breaks.
///
/// # Example
///
/// ```
/// use textinput_core::LineLimits;
///
/// let search_box = LineLimits::SingleLine;
/// assert!(search_box.is_single_line());
/// assert_eq!(LineLimits::default(), LineLimits::MultiLine);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineLimits {
    /// No line breaks; Enter does not insert a newline.
    SingleLine,
    /// Line breaks allowed.
    #[default]
    MultiLine,
}

impl LineLimits {
    #[inline]
    pub fn is_single_line(&self) -> bool {
        matches!(self, Self::SingleLine)
    }

    #[inline]
    pub fn is_multi_line(&self) -> bool {
        matches!(self, Self::MultiLine)
    }
}

fn is_line_break(ch: char) -> bool {
    ch == '\n'
}

/// Removes `\n` line breaks from `text`, shifting each selection endpoint left by
/// the number of bytes removed before it.
///
/// Returns `None` when the text has no line breaks.
///
/// # Example
///
/// ```
/// use textinput_core::{filter_single_line, TextRange};
///
/// let (text, selection) = filter_single_line("a\nb", TextRange::new(0, 3)).unwrap();
/// assert_eq!(text, "ab");
/// assert_eq!(selection, TextRange::new(0, 2));
/// ```
pub fn filter_single_line(text: &str, selection: TextRange) -> Option<(String, TextRange)> {
    if !text.contains(is_line_break) {
        return None;
    }
    let selection = selection.clamp_to(text);
    let removed_before = |offset: usize| text[..offset].matches(is_line_break).count();
    let filtered: String = text.chars().filter(|ch| !is_line_break(*ch)).collect();
    let selection = TextRange::new(
        selection.start - removed_before(selection.start),
        selection.end - removed_before(selection.end),
    );
    Some((filtered, selection))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_text_is_not_filtered() {
        assert_eq!(filter_single_line("plain", TextRange::cursor(2)), None);
    }

    #[test]
    fn caret_after_newline_moves_back() {
        let (text, selection) = filter_single_line("ab\n", TextRange::cursor(3)).unwrap();
        assert_eq!(text, "ab");
        assert_eq!(selection, TextRange::cursor(2));
    }

    #[test]
    fn reversed_selection_shifts_by_newlines_only() {
        let (text, selection) =
            filter_single_line("one\r\ntwo", TextRange::new(8, 1)).unwrap();
        assert_eq!(text, "one\rtwo");
        assert_eq!(selection, TextRange::new(7, 1));
    }

    #[test]
    fn lone_carriage_return_is_kept() {
        assert_eq!(filter_single_line("a\rb", TextRange::cursor(3)), None);
    }

    #[test]
    fn multibyte_text_keeps_byte_offsets() {
        let (text, selection) = filter_single_line("é\n€", TextRange::cursor(6)).unwrap();
        assert_eq!(text, "é€");
        assert_eq!(selection, TextRange::cursor(5));
    }
}
