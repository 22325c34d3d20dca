//! Stop word handling.
//!
//! A lone stop word is never highlighted on its own; it only lights up as
//! part of a longer phrase. Comparison is case-insensitive.
//!
//! # Examples
//!
//! ```
//! use sqlight::analysis::stop::StopWords;
//!
//! let stop_words = StopWords::new();
//! assert!(stop_words.contains("The"));
//! assert!(!stop_words.contains("court"));
//! ```

use std::sync::LazyLock;

use ahash::AHashSet;

/// Default English stop words list.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "an", "are", "as", "at", "be", "by", "for", "how", "in", "is", "it", "of", "on", "or",
    "that", "the", "to", "was", "what", "when", "where", "who", "with",
];

static DEFAULT_STOP_WORD_SET: LazyLock<StopWords> =
    LazyLock::new(|| StopWords::with_words(DEFAULT_STOP_WORDS.iter().copied()));

/// A case-insensitive set of stop words.
#[derive(Clone, Debug)]
pub struct StopWords {
    words: AHashSet<String>,
}

impl StopWords {
    /// Create a set holding [`DEFAULT_STOP_WORDS`].
    pub fn new() -> Self {
        DEFAULT_STOP_WORD_SET.clone()
    }

    /// Shared instance of the default set.
    pub fn default_set() -> &'static StopWords {
        &DEFAULT_STOP_WORD_SET
    }

    /// Create a set from custom words.
    pub fn with_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        StopWords {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Whether `word` is a stop word, ignoring case.
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        self.words.contains(&word.to_lowercase())
    }

    /// Number of distinct stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
