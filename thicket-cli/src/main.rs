//! Thicket CLI
//!
//! Parse a markup document and inspect it from the terminal: the tree, its
//! token stream, its JSON projection, re-serialized markup, query hits and
//! the repairs the tree builder made.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use thicket_common::warning::{clear_warnings, set_warnings_enabled};
use thicket_core::dom::{NodeRef, format_tree};
use thicket_core::html::tokenize;
use thicket_core::query::Query;
use thicket_core::{BuildIssue, DomTree, parse_with_issues};

/// Thicket: parse markup and run path queries against it
#[derive(Parser, Debug)]
#[command(name = "thicket")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the document tree
    thicket page.html

    # Parse inline markup
    thicket --html '<ul><li>a</li><li>b</li></ul>'

    # Run queries
    thicket page.html -q '//a[@href]' -q '#main'

    # Dump the tree as JSON
    thicket page.html --json
"#)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Path to a markup file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse a markup string directly instead of a file
    #[arg(long, value_name = "MARKUP", conflicts_with = "path")]
    html: Option<String>,

    /// Run a path query and print the hits (repeatable)
    #[arg(short = 'q', long = "query", value_name = "PATTERN")]
    queries: Vec<String>,

    /// Print the tree as pretty JSON
    #[arg(long)]
    json: bool,

    /// Print the tree re-serialized as markup
    #[arg(long)]
    markup: bool,

    /// Print the token stream
    #[arg(long)]
    tokens: bool,

    /// Print what the tree builder repaired or dropped
    #[arg(long)]
    issues: bool,

    /// Do not print parser warnings
    #[arg(long)]
    quiet: bool,
}

impl Cli {
    /// True when no output section was asked for, so the tree is shown.
    fn wants_default_view(&self) -> bool {
        !(self.json || self.markup || self.tokens || self.issues || !self.queries.is_empty())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.quiet {
        set_warnings_enabled(false);
    }
    clear_warnings();

    let source = load_source(&cli)?;

    if cli.tokens {
        print_tokens(&source)?;
    }

    let (tree, issues) = parse_with_issues(&source).context("failed to parse input")?;

    if cli.wants_default_view() {
        section("Document Tree");
        print!("{}", format_tree(tree.root_ref()));
    }
    if cli.json {
        let json =
            serde_json::to_string_pretty(&tree.project()).context("failed to serialize tree")?;
        println!("{json}");
    }
    if cli.markup {
        println!("{}", tree.to_markup());
    }
    for pattern in &cli.queries {
        print_query(&tree, pattern);
    }
    if cli.issues {
        print_issues(&issues);
    }

    Ok(())
}

/// Read the markup from `--html` or from the file argument.
fn load_source(cli: &Cli) -> Result<String> {
    if let Some(ref markup) = cli.html {
        return Ok(markup.clone());
    }
    let Some(ref path) = cli.path else {
        bail!("no input: pass a FILE or --html '<markup>' (see --help)");
    };
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn section(title: &str) {
    println!("{}", format!("=== {title} ===").bold());
}

fn print_tokens(source: &str) -> Result<()> {
    let tokens = tokenize(source).context("failed to tokenize input")?;
    section("Tokens");
    for (index, token) in tokens.iter().enumerate() {
        println!("{:>4}  {token}", index.dimmed());
    }
    Ok(())
}

fn print_query(tree: &DomTree, pattern: &str) {
    let hits = Query::parse(pattern).evaluate(tree.root_ref());
    let noun = if hits.len() == 1 { "match" } else { "matches" };
    section(&format!("Query {pattern}"));
    println!("{} {noun}", hits.len().cyan());
    for hit in hits {
        println!("  {}", describe(hit));
    }
}

/// One-line summary: the node's outline line, then its text for elements.
fn describe(node: NodeRef<'_>) -> String {
    let outline = format_tree(node);
    let head = outline.lines().next().unwrap_or_default().trim().to_string();
    if !node.is_element() {
        return head;
    }
    let text = node.text();
    if text.is_empty() {
        head
    } else {
        format!("{head} {}", format!("{text:?}").green())
    }
}

fn print_issues(issues: &[BuildIssue]) {
    section("Parse Issues");
    if issues.is_empty() {
        println!("  none");
    }
    for issue in issues {
        println!("  - {issue}");
    }
}
