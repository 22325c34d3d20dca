//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of the highlighting pipeline: they break a
//! block of page text into word tokens that the matcher walks over.
//!
//! # Examples
//!
//! ```
//! use sqlight::analysis::tokenizer::Tokenizer;
//! use sqlight::analysis::tokenizer::separator::SeparatorTokenizer;
//!
//! let tokenizer = SeparatorTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello, world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so a tokenizer can be shared by scans
/// running on several text blocks at once.
///
/// # Examples
///
/// Implementing a custom tokenizer:
///
/// ```
/// use sqlight::analysis::token::{Token, TokenStream};
/// use sqlight::analysis::tokenizer::Tokenizer;
/// use sqlight::error::Result;
///
/// struct WholeTextTokenizer;
///
/// impl Tokenizer for WholeTextTokenizer {
///     fn tokenize(&self, text: &str) -> Result<TokenStream> {
///         let tokens = if text.is_empty() {
///             Vec::new()
///         } else {
///             vec![Token::new(text, 0)]
///         };
///         Ok(Box::new(tokens.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "whole"
///     }
/// }
/// ```
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens, left to right.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod separator;

pub use separator::SeparatorTokenizer;
