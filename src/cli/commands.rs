//! Command implementations for the sqlight CLI.

use std::fs;
use std::io::{self, BufRead, Write};

use log::{info, warn};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::highlight::{HighlightConfig, Highlighter, Span};
use crate::query::{QueryExpr, QueryParser};

/// Execute a CLI command against standard input and output.
pub fn execute_command(args: SqlightArgs) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_command(&args, &mut stdin.lock(), &mut stdout.lock())
}

/// Execute a CLI command with explicit input and output streams.
pub fn run_command(args: &SqlightArgs, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<()> {
    match &args.command {
        Command::Parse(parse_args) => parse_query(parse_args, args, out),
        Command::Highlight(highlight_args) => {
            let highlighter = load_highlighter(args)?;
            highlight_text(highlight_args, &highlighter, args, input, out)
        }
        Command::Tokenize(tokenize_args) => {
            let highlighter = load_highlighter(args)?;
            tokenize_text(tokenize_args, &highlighter, args, input, out)
        }
    }
}

fn load_highlighter(args: &SqlightArgs) -> Result<Highlighter> {
    let config = match &args.config {
        Some(path) => {
            info!("loading highlight config from {}", path.display());
            HighlightConfig::from_file(path)?
        }
        None => HighlightConfig::default(),
    };
    Highlighter::new(config)
}

/// Parse a query and print its tree.
fn parse_query(args: &ParseArgs, cli_args: &SqlightArgs, out: &mut dyn Write) -> Result<()> {
    let tree = QueryParser::new().parse(&args.query)?;
    let result = ParseResult {
        query: args.query.clone(),
        rendered: tree.to_string(),
        tree,
    };

    match cli_args.output_format {
        OutputFormat::Json => output_json(out, &result, cli_args),
        OutputFormat::Human | OutputFormat::Html => output_parse_human(out, &result),
    }
}

/// Highlight every line of the input files (or stdin).
fn highlight_text(
    args: &HighlightArgs,
    highlighter: &Highlighter,
    cli_args: &SqlightArgs,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    let expr = match QueryParser::new().parse(&args.query) {
        Ok(expr) => Some(expr),
        Err(e) if e.is_parse_error() => {
            warn!("could not parse query {:?}: {e}", args.query);
            None
        }
        Err(e) => return Err(e),
    };

    let sources = if args.files.is_empty() {
        let mut content = String::new();
        input.read_to_string(&mut content)?;
        vec![("<stdin>".to_string(), content)]
    } else {
        args.files
            .iter()
            .map(|path| Ok((path.display().to_string(), fs::read_to_string(path)?)))
            .collect::<Result<Vec<_>>>()?
    };

    let mut records = Vec::new();
    let mut total_spans = 0;
    for (source, content) in &sources {
        let lines: Vec<&str> = content.lines().collect();
        let found = find_spans(highlighter, expr.as_ref(), &lines)?;

        for (idx, (line, spans)) in lines.iter().zip(found).enumerate() {
            total_spans += spans.len();
            if cli_args.output_format == OutputFormat::Html {
                writeln!(out, "{}", highlighter.mark_up(line, &spans))?;
                continue;
            }
            if spans.is_empty() {
                continue;
            }

            let block = BlockHighlight {
                source: source.clone(),
                line: idx + 1,
                text: line.to_string(),
                spans,
            };
            match cli_args.output_format {
                OutputFormat::Human => output_block_human(out, &block)?,
                _ => records.push(block),
            }
        }
    }

    if cli_args.output_format == OutputFormat::Json {
        output_json(out, &records, cli_args)?;
    }

    info!(
        "{total_spans} spans highlighted across {} sources",
        sources.len()
    );
    Ok(())
}

fn find_spans(
    highlighter: &Highlighter,
    expr: Option<&QueryExpr>,
    lines: &[&str],
) -> Result<Vec<Vec<Span>>> {
    match expr {
        Some(expr) => highlighter.highlight_blocks(expr, lines),
        None => Ok(vec![Vec::new(); lines.len()]),
    }
}

/// Print the tokens of the given text (or stdin).
fn tokenize_text(
    args: &TokenizeArgs,
    highlighter: &Highlighter,
    cli_args: &SqlightArgs,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    let text = match &args.text {
        Some(text) => text.clone(),
        None => {
            let mut content = String::new();
            input.read_to_string(&mut content)?;
            content.trim_end_matches(['\n', '\r']).to_string()
        }
    };

    let tokens = highlighter.tokenize(&text)?;
    match cli_args.output_format {
        OutputFormat::Json => output_json(out, &tokens, cli_args),
        OutputFormat::Human | OutputFormat::Html => output_tokens_human(out, &tokens),
    }
}
