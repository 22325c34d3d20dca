//! Query expression tree.
//!
//! A parsed query is a small immutable tree: `Text` leaves match a run of
//! consecutive tokens, `And`/`Or` nodes group sub-expressions. Each node owns
//! its children, so a tree can be shared read-only across threads.
//!
//! Trees serialize to a tagged JSON form:
//!
//! ```
//! use sqlight::query::QueryExpr;
//!
//! let expr = QueryExpr::or(vec![
//!     QueryExpr::text(["foo", "bar"]),
//!     QueryExpr::text(["baz"]),
//! ]);
//! let json = serde_json::to_string(&expr).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"type":"OR","exprs":[{"type":"TEXT","terms":["foo","bar"]},{"type":"TEXT","terms":["baz"]}]}"#
//! );
//! assert_eq!(QueryExpr::from_json(&json).unwrap(), expr);
//! ```

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, SqlightError};

/// Term that matches any single token.
pub const WILDCARD: &str = "*";

/// A node of a parsed query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum QueryExpr {
    /// Matches exactly `terms.len()` consecutive tokens, in order.
    Text {
        /// Literal words or [`WILDCARD`]. Never empty.
        terms: Vec<String>,
    },
    /// Juxtaposed sub-expressions.
    And {
        /// Never empty.
        exprs: Vec<QueryExpr>,
    },
    /// `OR`-joined sub-expressions.
    Or {
        /// Never empty.
        exprs: Vec<QueryExpr>,
    },
}

impl QueryExpr {
    /// Create a `Text` leaf.
    pub fn text<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        QueryExpr::Text {
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an `And` node.
    pub fn and(exprs: Vec<QueryExpr>) -> Self {
        QueryExpr::And { exprs }
    }

    /// Create an `Or` node.
    pub fn or(exprs: Vec<QueryExpr>) -> Self {
        QueryExpr::Or { exprs }
    }

    /// The JSON tag of this node.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryExpr::Text { .. } => "TEXT",
            QueryExpr::And { .. } => "AND",
            QueryExpr::Or { .. } => "OR",
        }
    }

    /// All literal (non-wildcard) terms, depth first.
    pub fn terms(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_terms(&mut out);
        out
    }

    fn collect_terms<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            QueryExpr::Text { terms } => out.extend(
                terms
                    .iter()
                    .map(String::as_str)
                    .filter(|t| *t != WILDCARD),
            ),
            QueryExpr::And { exprs } | QueryExpr::Or { exprs } => {
                for expr in exprs {
                    expr.collect_terms(out);
                }
            }
        }
    }

    /// Longest token run any leaf of this tree can match.
    pub fn max_match_len(&self) -> usize {
        match self {
            QueryExpr::Text { terms } => terms.len(),
            QueryExpr::And { exprs } | QueryExpr::Or { exprs } => exprs
                .iter()
                .map(QueryExpr::max_match_len)
                .max()
                .unwrap_or(0),
        }
    }

    /// Rebuild a tree from its tagged JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Rebuild a tree from a tagged JSON value.
    ///
    /// Fails with [`SqlightError::UnknownNodeKind`] on an unrecognized `type`
    /// tag and with [`SqlightError::InvalidExpression`] when a node is
    /// malformed or empty.
    pub fn from_value(value: &Value) -> Result<Self> {
        let node = value
            .as_object()
            .ok_or_else(|| SqlightError::invalid_expression("node is not a JSON object"))?;
        let kind = node
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| SqlightError::invalid_expression("node has no type tag"))?;

        match kind {
            "TEXT" => {
                let terms = node
                    .get("terms")
                    .and_then(Value::as_array)
                    .ok_or_else(|| SqlightError::invalid_expression("TEXT node has no terms"))?
                    .iter()
                    .map(|term| {
                        term.as_str().map(str::to_string).ok_or_else(|| {
                            SqlightError::invalid_expression("TEXT term is not a string")
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                if terms.is_empty() {
                    return Err(SqlightError::invalid_expression("TEXT node has no terms"));
                }
                Ok(QueryExpr::Text { terms })
            }
            "AND" | "OR" => {
                let exprs = node
                    .get("exprs")
                    .and_then(Value::as_array)
                    .ok_or_else(|| {
                        SqlightError::invalid_expression(format!("{kind} node has no exprs"))
                    })?
                    .iter()
                    .map(QueryExpr::from_value)
                    .collect::<Result<Vec<_>>>()?;
                if exprs.is_empty() {
                    return Err(SqlightError::invalid_expression(format!(
                        "{kind} node has no exprs"
                    )));
                }
                if kind == "AND" {
                    Ok(QueryExpr::And { exprs })
                } else {
                    Ok(QueryExpr::Or { exprs })
                }
            }
            other => Err(SqlightError::unknown_node_kind(other)),
        }
    }

    fn fmt_grouped(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({self})")
    }
}

/// Renders the tree back into query syntax.
impl fmt::Display for QueryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryExpr::Text { terms } => {
                if terms.len() == 1 && terms[0] != "OR" {
                    write!(f, "{}", terms[0])
                } else {
                    write!(f, "\"{}\"", terms.join(" "))
                }
            }
            QueryExpr::And { exprs } => {
                for (i, expr) in exprs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    match expr {
                        QueryExpr::Text { .. } => write!(f, "{expr}")?,
                        _ => expr.fmt_grouped(f)?,
                    }
                }
                Ok(())
            }
            QueryExpr::Or { exprs } => {
                for (i, expr) in exprs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" OR ")?;
                    }
                    match expr {
                        QueryExpr::Or { .. } => expr.fmt_grouped(f)?,
                        _ => write!(f, "{expr}")?,
                    }
                }
                Ok(())
            }
        }
    }
}
