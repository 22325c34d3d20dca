//! Output formatting for CLI commands.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::cli::args::SqlightArgs;
use crate::error::Result;
use crate::highlight::span::Span;
use crate::query::expr::QueryExpr;

/// Result structure for query parsing.
#[derive(Debug, Serialize)]
pub struct ParseResult {
    pub query: String,
    pub rendered: String,
    pub tree: QueryExpr,
}

/// Spans found in one text block.
#[derive(Debug, Serialize, Deserialize)]
pub struct BlockHighlight {
    pub source: String,
    pub line: usize,
    pub text: String,
    pub spans: Vec<Span>,
}

/// Output a serializable result as JSON.
pub fn output_json<T: Serialize>(out: &mut dyn Write, result: &T, args: &SqlightArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    writeln!(out, "{json}")?;
    Ok(())
}

/// Output a parsed query in human format.
pub fn output_parse_human(out: &mut dyn Write, result: &ParseResult) -> Result<()> {
    writeln!(out, "{}", result.rendered)?;
    write_tree(out, &result.tree, 0)
}

fn write_tree(out: &mut dyn Write, expr: &QueryExpr, depth: usize) -> Result<()> {
    let indent = "  ".repeat(depth);
    match expr {
        QueryExpr::Text { terms } => writeln!(out, "{indent}TEXT {}", terms.join(" "))?,
        QueryExpr::And { exprs } | QueryExpr::Or { exprs } => {
            writeln!(out, "{indent}{}", expr.kind())?;
            for child in exprs {
                write_tree(out, child, depth + 1)?;
            }
        }
    }
    Ok(())
}

/// Output the spans of one block in human format.
pub fn output_block_human(out: &mut dyn Write, block: &BlockHighlight) -> Result<()> {
    write!(out, "{}:{}:", block.source, block.line)?;
    for span in &block.spans {
        write!(out, " [{span}] {:?}", span.slice(&block.text))?;
    }
    writeln!(out)?;
    Ok(())
}

/// Output tokens in human format.
pub fn output_tokens_human(out: &mut dyn Write, tokens: &[Token]) -> Result<()> {
    for token in tokens {
        writeln!(out, "{}..{}\t{}", token.from, token.until, token.word)?;
    }
    Ok(())
}
