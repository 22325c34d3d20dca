//! Separator tokenizer implementation.
//!
//! Splits text on a fixed set of non-word characters. A maximal run of
//! characters outside the set becomes one token.

use ahash::AHashSet;

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Characters that never belong to a word.
pub const DEFAULT_SEPARATORS: &str = " ,./?<>[]{};:\"!@#%^&*()-+=";

/// A tokenizer that splits text on a configurable set of separator characters.
#[derive(Clone, Debug)]
pub struct SeparatorTokenizer {
    separators: AHashSet<char>,
}

impl Default for SeparatorTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SeparatorTokenizer {
    /// Create a tokenizer using [`DEFAULT_SEPARATORS`].
    pub fn new() -> Self {
        Self::with_separators(DEFAULT_SEPARATORS.chars())
    }

    /// Create a tokenizer splitting on the given characters.
    pub fn with_separators<I: IntoIterator<Item = char>>(separators: I) -> Self {
        SeparatorTokenizer {
            separators: separators.into_iter().collect(),
        }
    }

    /// Whether `ch` separates words.
    pub fn is_separator(&self, ch: char) -> bool {
        self.separators.contains(&ch)
    }

    /// Split `text` into tokens in a single left-to-right pass.
    pub fn split(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        // (char offset, byte offset) of the word being read
        let mut start: Option<(usize, usize)> = None;
        let mut char_count = 0;

        for (byte_idx, ch) in text.char_indices() {
            if self.is_separator(ch) {
                if let Some((from, byte_from)) = start.take() {
                    tokens.push(Token::with_offsets(
                        &text[byte_from..byte_idx],
                        from,
                        char_count,
                    ));
                }
            } else if start.is_none() {
                start = Some((char_count, byte_idx));
            }
            char_count += 1;
        }

        if let Some((from, byte_from)) = start {
            tokens.push(Token::with_offsets(&text[byte_from..], from, char_count));
        }

        tokens
    }
}

impl Tokenizer for SeparatorTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        Ok(Box::new(self.split(text).into_iter()))
    }

    fn name(&self) -> &'static str {
        "separator"
    }
}
