//! Configuration for highlighting.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::stop::DEFAULT_STOP_WORDS;
use crate::analysis::tokenizer::separator::DEFAULT_SEPARATORS;
use crate::error::{Result, SqlightError};

/// Configuration for text highlighting.
///
/// Missing fields fall back to their defaults when deserializing, so a
/// config file only needs to name what it changes:
///
/// ```
/// use sqlight::highlight::HighlightConfig;
///
/// let config: HighlightConfig = serde_json::from_str(r#"{"color": "88ccff"}"#).unwrap();
/// assert_eq!(config.color, "88ccff");
/// assert_eq!(config.tag, "span");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Characters that separate words in page text.
    pub separators: String,
    /// Words never highlighted on their own.
    pub stop_words: Vec<String>,
    /// HTML tag wrapping highlighted text.
    pub tag: String,
    /// Base CSS class of the wrapping tag.
    pub css_class: String,
    /// Background colour as 3 or 6 hex digits, without `#`.
    pub color: String,
    /// Texts longer than this many characters are cut before scanning.
    pub max_analyzed_chars: usize,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        HighlightConfig {
            separators: DEFAULT_SEPARATORS.to_string(),
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            tag: "span".to_string(),
            css_class: "sqlight".to_string(),
            color: "ffff00".to_string(),
            max_analyzed_chars: 1_000_000,
        }
    }
}

impl HighlightConfig {
    /// Create a new highlight configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: HighlightConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the separator characters.
    pub fn separators<S: Into<String>>(mut self, separators: S) -> Self {
        self.separators = separators.into();
        self
    }

    /// Set the stop words.
    pub fn stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Set the HTML tag for highlighting.
    pub fn tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set the CSS class for highlight tags.
    pub fn css_class<S: Into<String>>(mut self, css_class: S) -> Self {
        self.css_class = css_class.into();
        self
    }

    /// Set the background colour.
    pub fn color<S: Into<String>>(mut self, color: S) -> Self {
        self.color = color.into();
        self
    }

    /// Set the maximum number of characters scanned per text.
    pub fn max_analyzed_chars(mut self, max_analyzed_chars: usize) -> Self {
        self.max_analyzed_chars = max_analyzed_chars;
        self
    }

    /// Check the configuration for values the highlighter cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.tag.is_empty() || !self.tag.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SqlightError::config(format!(
                "invalid highlight tag {:?}",
                self.tag
            )));
        }
        if !matches!(self.color.len(), 3 | 6) || !self.color.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(SqlightError::config(format!(
                "color must be 3 or 6 hex digits, got {:?}",
                self.color
            )));
        }
        if self.css_class.chars().any(|c| c.is_whitespace() || c == '"') {
            return Err(SqlightError::config(format!(
                "invalid css class {:?}",
                self.css_class
            )));
        }
        Ok(())
    }

    /// Build the opening HTML tag.
    pub fn opening_tag(&self) -> String {
        format!(
            "<{tag} class=\"{class} {class}-{color}\" style=\"background: #{color}\">",
            tag = self.tag,
            class = self.css_class,
            color = self.color,
        )
    }

    /// Build the closing HTML tag.
    pub fn closing_tag(&self) -> String {
        format!("</{}>", self.tag)
    }
}
