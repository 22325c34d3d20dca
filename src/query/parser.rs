//! Query parser for converting query strings into expression trees.
//!
//! Supported syntax:
//! - Terms: `court`
//! - Phrases: `"summary judgment"`
//! - Hyphenated phrases: `bread-and-butter`
//! - Wildcards: `string * foo`, `string**foo`
//! - Alternatives: `"foo bar" OR baz`
//! - Grouping: `(foo OR bar) baz`
//!
//! Juxtaposed terms form an `And` node; `OR` binds looser than juxtaposition.

use std::iter::Peekable;
use std::str::Chars;

use log::debug;

use crate::error::{Result, SqlightError};
use crate::query::expr::{QueryExpr, WILDCARD};

/// Keyword separating alternatives. Case-sensitive.
const OR_KEYWORD: &str = "OR";

/// Deepest parenthesis nesting accepted in a query.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Parser for the highlight query language.
#[derive(Debug, Clone, Default)]
pub struct QueryParser;

impl QueryParser {
    /// Create a new query parser.
    pub fn new() -> Self {
        QueryParser
    }

    /// Parse a query string into a [`QueryExpr`].
    ///
    /// An empty or whitespace-only query, or one that contains no terms at
    /// all, is rejected.
    pub fn parse(&self, query_str: &str) -> Result<QueryExpr> {
        let mut parser = QueryStringParser::new(query_str);
        let expr = parser.parse()?;
        debug!("parsed query {query_str:?} as {expr}");
        Ok(expr)
    }
}

/// Parse a query string with the default parser.
pub fn parse(query_str: &str) -> Result<QueryExpr> {
    QueryParser::new().parse(query_str)
}

/// Internal parser state over one query string.
struct QueryStringParser<'a> {
    chars: Peekable<Chars<'a>>,
    /// Char offset of the next character.
    position: usize,
    /// Number of currently open groups.
    depth: usize,
}

impl<'a> QueryStringParser<'a> {
    fn new(query_str: &'a str) -> Self {
        QueryStringParser {
            chars: query_str.chars().peekable(),
            position: 0,
            depth: 0,
        }
    }

    fn parse(&mut self) -> Result<QueryExpr> {
        let expr = self.parse_or_expression()?;

        self.skip_whitespace();
        if self.peek() == Some(')') {
            return Err(SqlightError::parse(
                "unbalanced closing parenthesis",
                self.position,
            ));
        }

        expr.ok_or_else(|| SqlightError::parse("query contains no terms", self.position))
    }

    /// `Or := And (WS "OR" WS And)*`
    fn parse_or_expression(&mut self) -> Result<Option<QueryExpr>> {
        let mut operands = Vec::new();

        loop {
            let operand = self.parse_and_expression()?;

            if self.at_or_keyword() {
                let Some(operand) = operand else {
                    return Err(SqlightError::parse(
                        "OR must follow an expression",
                        self.position,
                    ));
                };
                operands.push(operand);
                self.consume_or_keyword();
                continue;
            }

            match operand {
                Some(operand) => operands.push(operand),
                None if !operands.is_empty() => {
                    return Err(SqlightError::parse(
                        "OR must be followed by an expression",
                        self.position,
                    ));
                }
                None => {}
            }
            break;
        }

        Ok(combine(operands, QueryExpr::or))
    }

    /// `And := WS? Term (WS Term)* WS?`
    fn parse_and_expression(&mut self) -> Result<Option<QueryExpr>> {
        let mut operands = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                None | Some(')') => break,
                Some(_) if self.at_or_keyword() => break,
                Some('(') => operands.push(self.parse_group()?),
                Some('"') => operands.push(self.parse_phrase()?),
                Some(_) => {
                    let word = self.consume_bare_word();
                    operands.extend(split_word(&word).into_iter().map(QueryExpr::text));
                }
            }
        }

        Ok(combine(operands, QueryExpr::and))
    }

    /// `"(" Or ")"`; yields the inner expression unwrapped.
    fn parse_group(&mut self) -> Result<QueryExpr> {
        let open = self.position;
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(SqlightError::parse("query nested too deeply", open));
        }
        self.bump();

        self.depth += 1;
        let inner = self.parse_or_expression();
        self.depth -= 1;
        let inner = inner?;

        self.skip_whitespace();
        if self.peek() != Some(')') {
            return Err(SqlightError::parse("unbalanced opening parenthesis", open));
        }
        self.bump();

        inner.ok_or_else(|| SqlightError::parse("empty group", open))
    }

    fn parse_phrase(&mut self) -> Result<QueryExpr> {
        let open = self.position;
        self.bump();

        let mut phrase = String::new();
        loop {
            match self.bump() {
                Some('"') => break,
                Some(ch) => phrase.push(ch),
                None => return Err(SqlightError::parse("unterminated phrase", open)),
            }
        }

        let terms: Vec<String> = phrase
            .split_whitespace()
            .flat_map(split_word)
            .flatten()
            .collect();

        if terms.is_empty() {
            return Err(SqlightError::parse("empty phrase", open));
        }

        Ok(QueryExpr::Text { terms })
    }

    fn consume_bare_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || matches!(ch, '(' | ')' | '"') {
                break;
            }
            word.push(ch);
            self.bump();
        }
        word
    }

    /// Whether the upcoming bare word is exactly the `OR` keyword.
    fn at_or_keyword(&self) -> bool {
        let mut ahead = self.chars.clone();
        OR_KEYWORD.chars().all(|expected| ahead.next() == Some(expected))
            && ahead
                .next()
                .is_none_or(|ch| ch.is_whitespace() || matches!(ch, '(' | ')' | '"'))
    }

    fn consume_or_keyword(&mut self) {
        for _ in OR_KEYWORD.chars() {
            self.bump();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next();
        if ch.is_some() {
            self.position += 1;
        }
        ch
    }
}

/// Collapse a single operand to itself; wrap two or more.
fn combine(
    mut operands: Vec<QueryExpr>,
    wrap: fn(Vec<QueryExpr>) -> QueryExpr,
) -> Option<QueryExpr> {
    match operands.len() {
        0 => None,
        1 => operands.pop(),
        _ => Some(wrap(operands)),
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '\''
}

/// Split a bare word into phrases of terms.
///
/// Punctuation other than `-` and `*` ends a phrase (`F.2d` gives `F` and
/// `2d`). Hyphens join sub-words into one phrase and every `*` is a wildcard
/// term of the phrase it sits in. Pieces without terms are dropped.
fn split_word(word: &str) -> Vec<Vec<String>> {
    let mut phrases = Vec::new();
    let mut terms: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in word.chars() {
        if is_word_char(ch) {
            current.push(ch);
            continue;
        }

        push_term(&mut terms, &mut current);
        match ch {
            '-' => {}
            '*' => terms.push(WILDCARD.to_string()),
            _ => {
                if !terms.is_empty() {
                    phrases.push(std::mem::take(&mut terms));
                }
            }
        }
    }

    push_term(&mut terms, &mut current);
    if !terms.is_empty() {
        phrases.push(terms);
    }

    phrases
}

fn push_term(terms: &mut Vec<String>, current: &mut String) {
    let term = current.trim_matches('\'');
    if !term.is_empty() {
        terms.push(term.to_string());
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(terms: &[&str]) -> QueryExpr {
        QueryExpr::text(terms.iter().copied())
    }

    fn parse_ok(query: &str) -> QueryExpr {
        parse(query).unwrap()
    }

    fn parse_err_at(query: &str) -> usize {
        match parse(query) {
            Err(SqlightError::Parse { position, .. }) => position,
            other => panic!("expected parse error for {query:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_single_word() {
        assert_eq!(parse_ok("foo"), text(&["foo"]));
    }

    #[test]
    fn test_parse_multiple_words() {
        assert_eq!(
            parse_ok("foo bar baz"),
            QueryExpr::and(vec![text(&["foo"]), text(&["bar"]), text(&["baz"])])
        );
    }

    #[test]
    fn test_parse_quoted_sequence() {
        assert_eq!(parse_ok("\"foo bar baz\""), text(&["foo", "bar", "baz"]));
    }

    #[test]
    fn test_parse_adjacent_quoted_sequences() {
        assert_eq!(
            parse_ok("\"foo bar\" \"fizz buzz\""),
            QueryExpr::and(vec![text(&["foo", "bar"]), text(&["fizz", "buzz"])])
        );
    }

    #[test]
    fn test_parse_or() {
        assert_eq!(
            parse_ok("\"foo bar\" OR \"fizz buzz\""),
            QueryExpr::or(vec![text(&["foo", "bar"]), text(&["fizz", "buzz"])])
        );
    }

    #[test]
    fn test_parse_parens() {
        assert_eq!(
            parse_ok("(\"foo bar\" OR \"fizz buzz\")"),
            QueryExpr::or(vec![text(&["foo", "bar"]), text(&["fizz", "buzz"])])
        );
    }

    #[test]
    fn test_parse_leading_and_trailing_whitespace() {
        assert_eq!(
            parse_ok("    foo bar    "),
            QueryExpr::and(vec![text(&["foo"]), text(&["bar"])])
        );
    }

    #[test]
    fn test_parse_hyphenated_word() {
        assert_eq!(parse_ok("bread-and-butter"), text(&["bread", "and", "butter"]));
    }

    #[test]
    fn test_parse_strips_attached_punctuation() {
        assert_eq!(
            parse_ok("vi v. $emacs"),
            QueryExpr::and(vec![text(&["vi"]), text(&["v"]), text(&["emacs"])])
        );
    }

    #[test]
    fn test_parse_pasted_citation() {
        let expr =
            parse_ok("  Jackson v. Star Sprinkler Corp., 575 F.2d 1223 (8th Cir. 1978).");
        let expected = QueryExpr::and(vec![
            text(&["Jackson"]),
            text(&["v"]),
            text(&["Star"]),
            text(&["Sprinkler"]),
            text(&["Corp"]),
            text(&["575"]),
            text(&["F"]),
            text(&["2d"]),
            text(&["1223"]),
            QueryExpr::and(vec![text(&["8th"]), text(&["Cir"]), text(&["1978"])]),
        ]);
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_parse_wildcards() {
        assert_eq!(parse_ok("*"), text(&["*"]));
        assert_eq!(parse_ok("string**foo"), text(&["string", "*", "*", "foo"]));
        assert_eq!(
            parse_ok("string * foo"),
            QueryExpr::and(vec![text(&["string"]), text(&["*"]), text(&["foo"])])
        );
        assert_eq!(parse_ok("\"string * foo\""), text(&["string", "*", "foo"]));
    }

    #[test]
    fn test_parse_or_precedence() {
        assert_eq!(
            parse_ok("a b OR c"),
            QueryExpr::or(vec![
                QueryExpr::and(vec![text(&["a"]), text(&["b"])]),
                text(&["c"]),
            ])
        );
        assert_eq!(
            parse_ok("a (b OR c)"),
            QueryExpr::and(vec![
                text(&["a"]),
                QueryExpr::or(vec![text(&["b"]), text(&["c"])]),
            ])
        );
        assert_eq!(
            parse_ok("a OR b OR c"),
            QueryExpr::or(vec![text(&["a"]), text(&["b"]), text(&["c"])])
        );
    }

    #[test]
    fn test_parse_or_keyword_is_case_sensitive() {
        assert_eq!(
            parse_ok("foo or bar"),
            QueryExpr::and(vec![text(&["foo"]), text(&["or"]), text(&["bar"])])
        );
        assert_eq!(parse_ok("ORegon"), text(&["ORegon"]));
        assert_eq!(parse_ok("\"OR\""), text(&["OR"]));
    }

    #[test]
    fn test_parse_quoted_or_is_a_term() {
        assert_eq!(parse_ok("\"foo OR bar\""), text(&["foo", "OR", "bar"]));
    }

    #[test]
    fn test_parse_or_next_to_parens() {
        assert_eq!(
            parse_ok("(a)OR(b)"),
            QueryExpr::or(vec![text(&["a"]), text(&["b"])])
        );
    }

    #[test]
    fn test_parse_nested_single_group_collapses() {
        assert_eq!(parse_ok("((foo))"), text(&["foo"]));
    }

    #[test]
    fn test_parse_apostrophes() {
        assert_eq!(parse_ok("don't"), text(&["don't"]));
        assert_eq!(parse_ok("'quoted'"), text(&["quoted"]));
    }

    #[test]
    fn test_parse_trailing_hyphen() {
        assert_eq!(parse_ok("foo-"), text(&["foo"]));
        assert_eq!(parse_ok("-foo-bar"), text(&["foo", "bar"]));
    }

    #[test]
    fn test_parse_empty_query() {
        assert_eq!(parse_err_at(""), 0);
        assert_eq!(parse_err_at("    "), 4);
        assert_eq!(parse_err_at(". , !"), 5);
    }

    #[test]
    fn test_parse_unbalanced_parens() {
        assert_eq!(parse_err_at("(foo bar"), 0);
        assert_eq!(parse_err_at("foo (bar (baz)"), 4);
        assert_eq!(parse_err_at("foo) bar"), 3);
        assert_eq!(parse_err_at(")"), 0);
    }

    #[test]
    fn test_parse_empty_group() {
        assert_eq!(parse_err_at("foo ()"), 4);
        assert_eq!(parse_err_at("( . )"), 0);
    }

    #[test]
    fn test_parse_nesting_limit() {
        let nested = |depth: usize| {
            format!("{}foo{}", "(".repeat(depth), ")".repeat(depth))
        };
        assert_eq!(parse_ok(&nested(MAX_NESTING_DEPTH)), text(&["foo"]));

        assert_eq!(parse_err_at(&nested(MAX_NESTING_DEPTH + 1)), MAX_NESTING_DEPTH);
        assert_eq!(parse_err_at(&nested(20_000)), MAX_NESTING_DEPTH);
        assert_eq!(parse_err_at(&"(".repeat(20_000)), MAX_NESTING_DEPTH);
    }

    #[test]
    fn test_parse_unterminated_phrase() {
        assert_eq!(parse_err_at("foo \"bar baz"), 4);
    }

    #[test]
    fn test_parse_empty_phrase() {
        assert_eq!(parse_err_at("foo \"  \""), 4);
    }

    #[test]
    fn test_parse_misplaced_or() {
        assert!(parse("OR foo").is_err());
        assert!(parse("foo OR").is_err());
        assert!(parse("foo OR OR bar").is_err());
        assert!(parse("(foo OR)").is_err());
        assert!(parse("OR").is_err());
    }

    #[test]
    fn test_display_reparses_to_same_tree() {
        for query in [
            "foo",
            "foo bar baz",
            "\"foo bar\" OR \"fizz buzz\"",
            "a (b OR c) d",
            "(a OR b) OR c",
            "string**foo",
            "Jackson v. Star Sprinkler Corp., 575 F.2d 1223 (8th Cir. 1978).",
            "\"foo OR bar\" baz",
        ] {
            let expr = parse_ok(query);
            assert_eq!(parse_ok(&expr.to_string()), expr, "query {query:?}");
        }
    }
}
