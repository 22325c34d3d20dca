//! Match evaluation of an expression tree over a token window.
//!
//! The evaluator answers "how many consecutive tokens starting here does
//! this expression cover", not "is this expression true". `And` and `Or`
//! both return the longest match among their children, which lets the
//! highlighter light up every part of a query that occurs in the text.

use crate::analysis::stop::StopWords;
use crate::analysis::token::Token;
use crate::query::expr::{QueryExpr, WILDCARD};

/// Evaluates one expression tree against token arrays.
#[derive(Debug, Clone, Copy)]
pub struct QueryMatcher<'a> {
    expr: &'a QueryExpr,
    stop_words: &'a StopWords,
}

impl<'a> QueryMatcher<'a> {
    /// Create a matcher using the default stop words.
    pub fn new(expr: &'a QueryExpr) -> Self {
        Self::with_stop_words(expr, StopWords::default_set())
    }

    /// Create a matcher with a custom stop word set.
    pub fn with_stop_words(expr: &'a QueryExpr, stop_words: &'a StopWords) -> Self {
        QueryMatcher { expr, stop_words }
    }

    /// The expression being matched.
    pub fn expr(&self) -> &'a QueryExpr {
        self.expr
    }

    /// Number of tokens from `start` covered by the expression, or 0.
    pub fn match_length(&self, tokens: &[Token], start: usize) -> usize {
        self.eval(self.expr, tokens, start)
    }

    fn eval(&self, expr: &QueryExpr, tokens: &[Token], start: usize) -> usize {
        match expr {
            QueryExpr::Text { terms } => self.eval_text(terms, tokens, start),
            QueryExpr::And { exprs } | QueryExpr::Or { exprs } => exprs
                .iter()
                .map(|child| self.eval(child, tokens, start))
                .max()
                .unwrap_or(0),
        }
    }

    fn eval_text(&self, terms: &[String], tokens: &[Token], start: usize) -> usize {
        let n = terms.len();
        let Some(window) = tokens.get(start..start.saturating_add(n)) else {
            return 0;
        };

        let matched = window
            .iter()
            .zip(terms)
            .all(|(token, term)| term == WILDCARD || eq_ignore_case(&token.word, term));
        if !matched {
            return 0;
        }

        // a lone stop word is never highlighted
        if n == 1 && self.stop_words.contains(&terms[0]) {
            return 0;
        }

        n
    }
}

/// Match length of `expr` at `start` using the default stop words.
pub fn match_length(expr: &QueryExpr, tokens: &[Token], start: usize) -> usize {
    QueryMatcher::new(expr).match_length(tokens, start)
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b
        || a
            .chars()
            .flat_map(char::to_lowercase)
            .eq(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::analysis::tokenizer::SeparatorTokenizer;
    use crate::query::parser::parse;

    fn tokens(text: &str) -> Vec<Token> {
        SeparatorTokenizer::new().split(text)
    }

    #[test]
    fn test_single_term() {
        let expr = QueryExpr::text(["Court"]);
        let tokens = tokens("the court ruled");
        assert_eq!(match_length(&expr, &tokens, 0), 0);
        assert_eq!(match_length(&expr, &tokens, 1), 1);
        assert_eq!(match_length(&expr, &tokens, 2), 0);
    }

    #[test]
    fn test_phrase_requires_order() {
        let expr = QueryExpr::text(["foo", "bar"]);
        let tokens = tokens("bar foo bar");
        assert_eq!(match_length(&expr, &tokens, 0), 0);
        assert_eq!(match_length(&expr, &tokens, 1), 2);
    }

    #[test]
    fn test_phrase_past_end_of_tokens() {
        let expr = QueryExpr::text(["foo", "bar"]);
        let tokens = tokens("x foo");
        assert_eq!(match_length(&expr, &tokens, 1), 0);
        assert_eq!(match_length(&expr, &tokens, 2), 0);
        assert_eq!(match_length(&expr, &tokens, 10), 0);
    }

    #[test]
    fn test_wildcard_matches_any_token() {
        let expr = QueryExpr::text(["string", "*", "*", "foo"]);
        let tokens = tokens("This string ends with foo bar.");
        assert_eq!(match_length(&expr, &tokens, 1), 4);
        assert_eq!(match_length(&expr, &tokens, 0), 0);

        let star = QueryExpr::text(["*"]);
        assert_eq!(match_length(&star, &tokens, 3), 1);
    }

    #[test]
    fn test_lone_stop_word_is_suppressed() {
        let tokens = tokens("The Who was here");
        for word in ["the", "THE", "who", "was"] {
            let expr = QueryExpr::text([word]);
            for start in 0..tokens.len() {
                assert_eq!(match_length(&expr, &tokens, start), 0, "{word} at {start}");
            }
        }

        let phrase = QueryExpr::text(["the", "who"]);
        assert_eq!(match_length(&phrase, &tokens, 0), 2);
    }

    #[test]
    fn test_custom_stop_words() {
        let stop_words = StopWords::with_words(["ruled"]);
        let tokens = tokens("the court ruled");

        let the = QueryExpr::text(["the"]);
        let matcher = QueryMatcher::with_stop_words(&the, &stop_words);
        assert_eq!(matcher.match_length(&tokens, 0), 1);

        let ruled = QueryExpr::text(["ruled"]);
        let matcher = QueryMatcher::with_stop_words(&ruled, &stop_words);
        assert_eq!(matcher.match_length(&tokens, 2), 0);
    }

    #[test]
    fn test_and_and_or_return_longest_child() {
        let tokens = tokens("summary judgment was granted");
        let and = parse("summary \"summary judgment\" granted").unwrap();
        assert_eq!(match_length(&and, &tokens, 0), 2);
        assert_eq!(match_length(&and, &tokens, 3), 1);
        assert_eq!(match_length(&and, &tokens, 2), 0);

        let or = parse("\"summary judgment\" OR summary").unwrap();
        assert_eq!(match_length(&or, &tokens, 0), 2);
        assert_eq!(match_length(&or, &tokens, 1), 0);
    }

    #[test]
    fn test_and_does_not_require_every_child() {
        let tokens = tokens("foo bar");
        let expr = parse("foo missing").unwrap();
        assert_eq!(match_length(&expr, &tokens, 0), 1);
    }

    #[test]
    fn test_case_insensitive_unicode() {
        let tokens = tokens("ÉCOLE normale");
        let expr = QueryExpr::text(["école"]);
        assert_eq!(match_length(&expr, &tokens, 0), 1);
    }
}
