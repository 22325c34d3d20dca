//! # sqlight
//!
//! Highlights the regions of page text that match a small boolean query
//! language: terms, quoted phrases, `*` wildcards, `OR`, implicit `AND` and
//! parenthetical grouping.
//!
//! ```
//! use sqlight::prelude::*;
//!
//! let expr = parse("string**foo").unwrap();
//! let spans = find_matching_spans("This string ends with foo bar.", &expr).unwrap();
//! assert_eq!(spans, vec![Span::new(5, 25)]);
//! ```
//!
//! ## Pipeline
//!
//! - [`analysis`] splits text into tokens with char offsets
//! - [`query`] parses query strings and measures matches at a token
//! - [`highlight`] merges matches into spans and renders markup

pub mod analysis;
pub mod cli;
pub mod error;
pub mod highlight;
pub mod query;

use crate::analysis::token::Token;
use crate::analysis::tokenizer::SeparatorTokenizer;
use crate::error::Result;
use crate::highlight::{Highlighter, Span};
use crate::query::QueryExpr;

pub mod prelude {
    pub use crate::analysis::{StopWords, Token, Tokenizer};
    pub use crate::error::{Result, SqlightError};
    pub use crate::highlight::{HighlightConfig, Highlighter, Span};
    pub use crate::query::{QueryExpr, QueryParser, match_length, parse};
    pub use crate::{find_matching_spans, tokenize};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Split `text` into word tokens using the default separators.
pub fn tokenize(text: &str) -> Vec<Token> {
    SeparatorTokenizer::new().split(text)
}

/// Find the spans of `text` matched by `expr` with the default configuration.
pub fn find_matching_spans(text: &str, expr: &QueryExpr) -> Result<Vec<Span>> {
    Highlighter::default().find_matching_spans(text, expr)
}
