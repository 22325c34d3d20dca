//! Token types for text analysis.
//!
//! A [`Token`] is a maximal run of non-separator characters together with
//! its position in the source text. Offsets are counted in Unicode scalar
//! values (chars), not bytes, so they can be handed directly to a layer that
//! addresses text by character.
//!
//! # Examples
//!
//! ```
//! use sqlight::analysis::token::Token;
//!
//! let token = Token::new("world", 6);
//! assert_eq!(token.word, "world");
//! assert_eq!(token.from, 6);
//! assert_eq!(token.until, 11);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single word of source text and its half-open `[from, until)` char range.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Char offset of the first character of the word.
    pub from: usize,

    /// Char offset one past the last character of the word.
    pub until: usize,

    /// The exact source substring `text[from..until]`.
    pub word: String,
}

/// Type alias for a stream of tokens.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;

impl Token {
    /// Create a token starting at `from`; `until` is derived from the word length.
    pub fn new<S: Into<String>>(word: S, from: usize) -> Self {
        let word = word.into();
        let until = from + word.chars().count();
        Token { from, until, word }
    }

    /// Create a token with explicit offsets.
    pub fn with_offsets<S: Into<String>>(word: S, from: usize, until: usize) -> Self {
        Token {
            from,
            until,
            word: word.into(),
        }
    }

    /// Number of characters covered by this token.
    pub fn len(&self) -> usize {
        self.until - self.from
    }

    /// Whether the token covers no characters.
    pub fn is_empty(&self) -> bool {
        self.until == self.from
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}..{}", self.word, self.from, self.until)
    }
}
