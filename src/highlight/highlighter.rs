//! Span aggregation over tokenized text.

use log::{debug, warn};
use rayon::prelude::*;

use crate::analysis::stop::StopWords;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::{SeparatorTokenizer, Tokenizer};
use crate::error::Result;
use crate::highlight::config::HighlightConfig;
use crate::highlight::span::Span;
use crate::query::expr::QueryExpr;
use crate::query::matcher::QueryMatcher;
use crate::query::parser::QueryParser;

/// Finds and marks up the regions of text matching a query.
pub struct Highlighter {
    /// Configuration for highlighting.
    config: HighlightConfig,
    /// Tokenizer splitting text into words.
    tokenizer: Box<dyn Tokenizer>,
    /// Words never highlighted alone.
    stop_words: StopWords,
}

impl std::fmt::Debug for Highlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Highlighter")
            .field("config", &self.config)
            .field("tokenizer", &self.tokenizer.name())
            .finish()
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Highlighter {
            config: HighlightConfig::default(),
            tokenizer: Box::new(SeparatorTokenizer::new()),
            stop_words: StopWords::new(),
        }
    }
}

impl Highlighter {
    /// Create a highlighter from a configuration.
    pub fn new(config: HighlightConfig) -> Result<Self> {
        let tokenizer = SeparatorTokenizer::with_separators(config.separators.chars());
        Self::with_tokenizer(config, Box::new(tokenizer))
    }

    /// Create a highlighter with a custom tokenizer.
    ///
    /// The separators of `config` are ignored.
    pub fn with_tokenizer(config: HighlightConfig, tokenizer: Box<dyn Tokenizer>) -> Result<Self> {
        config.validate()?;
        let stop_words = StopWords::with_words(&config.stop_words);
        Ok(Highlighter {
            config,
            tokenizer,
            stop_words,
        })
    }

    /// The highlight configuration.
    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// The stop words in use.
    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Tokenize `text` with the configured tokenizer.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        Ok(self.tokenizer.tokenize(self.clip(text))?.collect())
    }

    /// Find the spans of `text` matched by `expr`, left to right.
    ///
    /// A span stays open while any match started inside it still covers the
    /// current token, so overlapping and chained matches merge into one run.
    pub fn find_matching_spans(&self, text: &str, expr: &QueryExpr) -> Result<Vec<Span>> {
        let tokens = self.tokenize(text)?;
        let matcher = QueryMatcher::with_stop_words(expr, &self.stop_words);
        let spans = scan(&tokens, &matcher);
        debug!(
            "{} spans over {} tokens for {}",
            spans.len(),
            tokens.len(),
            expr
        );
        Ok(spans)
    }

    /// Parse `query` and find its spans in `text`.
    ///
    /// A query that does not parse highlights nothing.
    pub fn highlight(&self, query: &str, text: &str) -> Result<Vec<Span>> {
        match QueryParser::new().parse(query) {
            Ok(expr) => self.find_matching_spans(text, &expr),
            Err(e) if e.is_parse_error() => {
                warn!("could not parse query {query:?}: {e}");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Find spans in many text blocks in parallel, one result per block.
    pub fn highlight_blocks<S>(&self, expr: &QueryExpr, blocks: &[S]) -> Result<Vec<Vec<Span>>>
    where
        S: AsRef<str> + Sync,
    {
        blocks
            .par_iter()
            .map(|block| self.find_matching_spans(block.as_ref(), expr))
            .collect()
    }

    /// Wrap each span of `text` in the configured markup.
    ///
    /// The text is HTML-escaped; `spans` must be ordered and non-overlapping,
    /// as returned by [`Highlighter::find_matching_spans`].
    pub fn mark_up(&self, text: &str, spans: &[Span]) -> String {
        let opening_tag = self.config.opening_tag();
        let closing_tag = self.config.closing_tag();
        let mut out = String::with_capacity(text.len() + spans.len() * opening_tag.len());
        let mut spans = spans.iter().filter(|s| !s.is_empty()).peekable();
        let mut open = false;

        for (idx, ch) in text.chars().enumerate() {
            if !open && spans.peek().is_some_and(|s| s.from == idx) {
                out.push_str(&opening_tag);
                open = true;
            }
            push_escaped(&mut out, ch);
            if open && spans.peek().is_some_and(|s| s.until == idx + 1) {
                out.push_str(&closing_tag);
                spans.next();
                open = false;
            }
        }
        if open {
            out.push_str(&closing_tag);
        }

        out
    }

    fn clip<'t>(&self, text: &'t str) -> &'t str {
        match text.char_indices().nth(self.config.max_analyzed_chars) {
            Some((idx, _)) => &text[..idx],
            None => text,
        }
    }
}

/// Single pass over the tokens merging overlapping matches into spans.
fn scan(tokens: &[Token], matcher: &QueryMatcher<'_>) -> Vec<Span> {
    let mut spans = Vec::new();
    // remaining token counts of matches still covering the current token
    let mut active: Vec<usize> = Vec::new();
    let mut glowing = false;
    // first token of the current run
    let mut segment_start: Option<usize> = None;

    for i in 0..tokens.len() {
        active.retain_mut(|remaining| {
            *remaining -= 1;
            *remaining > 0
        });

        if active.is_empty() && glowing {
            if let Some(start) = segment_start.take() {
                spans.push(Span::new(tokens[start].from, tokens[i - 1].until));
            }
            glowing = false;
        }

        let hit = matcher.match_length(tokens, i);
        if hit > 0 {
            if !glowing {
                segment_start = None;
            }
            glowing = true;
            active.push(hit);
        }

        if segment_start.is_none() {
            segment_start = Some(i);
        }
    }

    if glowing && let (Some(start), Some(last)) = (segment_start, tokens.last()) {
        spans.push(Span::new(tokens[start].from, last.until));
    }

    spans
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(ch),
    }
}
