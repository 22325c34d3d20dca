//! Text analysis for sqlight.
//!
//! This module splits page text into word tokens carrying their original
//! character offsets, and holds the stop word set consulted by the matcher.

pub mod stop;
pub mod token;
pub mod tokenizer;

// Re-export commonly used types
pub use stop::*;
pub use token::*;
pub use tokenizer::*;
