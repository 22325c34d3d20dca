//! Highlighted character ranges.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A half-open `[from, until)` char range of source text to highlight.
///
/// Offsets count Unicode scalar values. Layers that address text in UTF-16
/// code units (DOM ranges) should convert with [`Span::to_utf16`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Char offset where the highlight starts.
    pub from: usize,
    /// Char offset one past the end of the highlight.
    pub until: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(from: usize, until: usize) -> Self {
        Span { from, until }
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.until.saturating_sub(self.from)
    }

    /// Whether the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The substring of `text` this span covers.
    ///
    /// Offsets past the end of `text` are clamped.
    pub fn slice<'t>(&self, text: &'t str) -> &'t str {
        let start = byte_offset(text, self.from);
        let end = byte_offset(text, self.until).max(start);
        &text[start..end]
    }

    /// The same range expressed in UTF-16 code units of `text`.
    ///
    /// Offsets past the end of `text` are clamped.
    pub fn to_utf16(&self, text: &str) -> Span {
        let mut from = None;
        let mut until = None;
        let mut units = 0;
        for (idx, ch) in text.chars().enumerate() {
            if idx == self.from {
                from = Some(units);
            }
            if idx == self.until {
                until = Some(units);
                break;
            }
            units += ch.len_utf16();
        }
        let from = from.unwrap_or(units);
        Span::new(from, until.unwrap_or(units).max(from))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.from, self.until)
    }
}

/// Byte index of the char at `char_offset`, or `text.len()` past the end.
fn byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map_or(text.len(), |(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len() {
        let span = Span::new(22, 29);
        assert_eq!(span.len(), 7);
        assert!(!span.is_empty());
        assert!(Span::new(3, 3).is_empty());
    }

    #[test]
    fn test_span_slice() {
        let text = "This string ends with foo bar.";
        assert_eq!(Span::new(22, 29).slice(text), "foo bar");
        assert_eq!(Span::new(5, 25).slice(text), "string ends with foo");
    }

    #[test]
    fn test_span_slice_uses_char_offsets() {
        let text = "café au lait";
        assert_eq!(Span::new(0, 4).slice(text), "café");
        assert_eq!(Span::new(5, 7).slice(text), "au");
        assert_eq!(Span::new(8, 40).slice(text), "lait");
    }

    #[test]
    fn test_span_to_utf16() {
        let text = "😀 foo";
        let span = Span::new(2, 5);
        assert_eq!(span.slice(text), "foo");
        assert_eq!(span.to_utf16(text), Span::new(3, 6));

        assert_eq!(Span::new(0, 1).to_utf16(text), Span::new(0, 2));
        assert_eq!(Span::new(22, 29).to_utf16("This string ends with foo bar."), Span::new(22, 29));
        assert_eq!(Span::new(4, 40).to_utf16(text), Span::new(5, 6));
    }

    #[test]
    fn test_span_json() {
        let json = serde_json::to_string(&Span::new(5, 25)).unwrap();
        assert_eq!(json, r#"{"from":5,"until":25}"#);
    }
}
