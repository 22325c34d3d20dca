//! Query language: expression tree, parser and match evaluation.

pub mod expr;
pub mod matcher;
pub mod parser;

pub use self::expr::{QueryExpr, WILDCARD};
pub use self::matcher::{QueryMatcher, match_length};
pub use self::parser::{QueryParser, parse};
