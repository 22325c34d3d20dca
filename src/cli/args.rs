//! Command line argument parsing for the sqlight CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// sqlight - highlight boolean query matches in text
#[derive(Parser, Debug, Clone)]
#[command(name = "sqlight")]
#[command(about = "Highlight the parts of a text that match a boolean query")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SqlightArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Highlight configuration file (JSON)
    #[arg(short, long, env = "SQLIGHT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SqlightArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Parse a query and print its expression tree
    Parse(ParseArgs),

    /// Highlight query matches in text, one text block per line
    Highlight(HighlightArgs),

    /// Split text into word tokens
    Tokenize(TokenizeArgs),
}

/// Arguments for parsing a query
#[derive(Parser, Debug, Clone)]
pub struct ParseArgs {
    /// Query string
    pub query: String,
}

/// Arguments for highlighting text
#[derive(Parser, Debug, Clone)]
pub struct HighlightArgs {
    /// Query string
    pub query: String,

    /// Files to scan (reads standard input when omitted)
    pub files: Vec<PathBuf>,
}

/// Arguments for tokenizing text
#[derive(Parser, Debug, Clone)]
pub struct TokenizeArgs {
    /// Text to tokenize (reads standard input when omitted)
    pub text: Option<String>,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
    /// HTML with highlighted spans wrapped in markup
    Html,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        let args = SqlightArgs::try_parse_from(["sqlight", "parse", "foo"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = SqlightArgs::try_parse_from(["sqlight", "-vv", "parse", "foo"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = SqlightArgs::try_parse_from(["sqlight", "--quiet", "-vvv", "parse", "foo"])
            .unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            SqlightArgs::try_parse_from(["sqlight", "--format", "json", "parse", "foo"]).unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);

        let args = SqlightArgs::try_parse_from(["sqlight", "-f", "html", "highlight", "foo"])
            .unwrap();
        assert_eq!(args.output_format, OutputFormat::Html);
    }

    #[test]
    fn test_highlight_args() {
        let args = SqlightArgs::try_parse_from([
            "sqlight",
            "--config",
            "colors.json",
            "highlight",
            "\"foo bar\" OR baz",
            "a.txt",
            "b.txt",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("colors.json")));
        match args.command {
            Command::Highlight(highlight) => {
                assert_eq!(highlight.query, "\"foo bar\" OR baz");
                assert_eq!(
                    highlight.files,
                    vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]
                );
            }
            other => panic!("expected highlight command, got {other:?}"),
        }
    }

    #[test]
    fn test_tokenize_text_is_optional() {
        let args = SqlightArgs::try_parse_from(["sqlight", "tokenize"]).unwrap();
        assert!(matches!(args.command, Command::Tokenize(TokenizeArgs { text: None })));
    }

    #[test]
    fn test_missing_query_is_rejected() {
        assert!(SqlightArgs::try_parse_from(["sqlight", "highlight"]).is_err());
    }
}
