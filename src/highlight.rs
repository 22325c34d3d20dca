//! Highlighting of query matches in page text.
//!
//! The [`Highlighter`] tokenizes a text block, evaluates the query at every
//! token and merges overlapping hits into contiguous [`Span`]s.

pub mod config;
pub mod highlighter;
pub mod span;

pub use config::HighlightConfig;
pub use highlighter::Highlighter;
pub use span::Span;
