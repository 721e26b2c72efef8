//! Selection ranges in storage bytes and in native units.

use crate::codec::{to_native_units, to_storage_bytes};

/// Represents a range in application text, used for cursor position and selection.
///
/// When `start == end`, this represents a cursor position (collapsed selection).
/// When `start != end`, this represents a text selection.
///
/// # Invariants
///
/// - Indices are in UTF-8 byte offsets (matching Rust's `String`)
/// - `start` can be greater than `end` for reverse selections; the direction
///   is kept as given and never sorted
/// - Use `min()` and `max()` for ordered access
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub struct TextRange {
    /// Anchor of the selection (can be > end for reverse selection)
    pub start: usize,
    /// Active end of the selection, where the caret is drawn
    pub end: usize,
}

impl TextRange {
    /// Creates a new text range.
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Creates a collapsed range (cursor) at the given position.
    pub const fn cursor(position: usize) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Creates a range from 0 to 0 (cursor at start).
    pub const fn zero() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Creates a range selecting all text of the given length.
    pub const fn all(length: usize) -> Self {
        Self {
            start: 0,
            end: length,
        }
    }

    /// Returns true if this range is collapsed (cursor, not selection).
    pub const fn collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if the anchor sits after the caret.
    pub const fn reversed(&self) -> bool {
        self.start > self.end
    }

    /// Returns the length of the selection in bytes.
    pub fn length(&self) -> usize {
        self.end.abs_diff(self.start)
    }

    /// Returns the minimum (leftmost) index.
    pub fn min(&self) -> usize {
        self.start.min(self.end)
    }

    /// Returns the maximum (rightmost) index.
    pub fn max(&self) -> usize {
        self.start.max(self.end)
    }

    /// Returns true if both ranges cover the same span, ignoring direction.
    pub fn same_span(&self, other: &TextRange) -> bool {
        self.min() == other.min() && self.max() == other.max()
    }

    /// Clamps both endpoints into `text`, rounding down to char boundaries.
    pub fn clamp_to(&self, text: &str) -> Self {
        Self {
            start: crate::codec::clamp_to_char_boundary(text, self.start),
            end: crate::codec::clamp_to_char_boundary(text, self.end),
        }
    }

    /// Converts both endpoints to native units, keeping direction.
    pub fn to_native(&self, text: &str) -> NativeRange {
        NativeRange {
            start: to_native_units(text, self.start),
            end: to_native_units(text, self.end),
        }
    }
}

/// A selection in native UTF-16 code units, as reported by the OS control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub struct NativeRange {
    pub start: usize,
    pub end: usize,
}

impl NativeRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn min(&self) -> usize {
        self.start.min(self.end)
    }

    pub fn max(&self) -> usize {
        self.start.max(self.end)
    }

    pub fn length(&self) -> usize {
        self.end.abs_diff(self.start)
    }

    /// Converts both endpoints back to storage bytes of `text`, keeping direction.
    pub fn to_storage(&self, text: &str) -> TextRange {
        TextRange {
            start: to_storage_bytes(text, self.start),
            end: to_storage_bytes(text, self.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_is_collapsed() {
        let cursor = TextRange::cursor(5);
        assert!(cursor.collapsed());
        assert_eq!(cursor.length(), 0);
        assert_eq!(cursor.start, 5);
        assert_eq!(cursor.end, 5);
    }

    #[test]
    fn reverse_selection_length() {
        let reverse = TextRange::new(7, 2);
        assert!(reverse.reversed());
        assert_eq!(reverse.length(), 5);
        assert_eq!(reverse.min(), 2);
        assert_eq!(reverse.max(), 7);
    }

    #[test]
    fn reverse_selection_survives_native_conversion() {
        let text = "a😀bc";
        let range = TextRange::new(6, 1);
        let native = range.to_native(text);
        assert_eq!(native, NativeRange::new(4, 1));
        assert_eq!(native.to_storage(text), range);
    }

    #[test]
    fn same_span_ignores_direction() {
        assert!(TextRange::new(1, 4).same_span(&TextRange::new(4, 1)));
        assert!(!TextRange::new(1, 4).same_span(&TextRange::new(1, 3)));
    }

    #[test]
    fn clamp_to_rounds_into_text() {
        let text = "a€";
        assert_eq!(TextRange::new(2, 9).clamp_to(text), TextRange::new(1, 4));
    }
}
