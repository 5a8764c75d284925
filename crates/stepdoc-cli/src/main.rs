//! stepdoc CLI - Convert step instruction text into a document tree
//!
//! Usage:
//!   stepdoc [OPTIONS] <COMMAND> <FILE>
//!
//! Commands:
//!   parse     Display document structure (text or JSON)
//!   render    Render the document as HTML
//!   stats     Show document statistics

mod error;
mod html;
mod json;
mod step;

use std::process;

use clap::{Args, Parser, Subcommand};
use stepdoc_core::{plain_text, segment, Block, Document, Span};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::step::Input;

#[derive(Debug, Parser)]
#[command(name = "stepdoc", version)]
#[command(about = "Convert step instruction text into a document tree")]
struct Cli {
    /// Log filter (e.g. `debug`, `stepdoc_core=trace`)
    #[arg(long, global = true, env = "STEPDOC_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse and display document structure
    Parse(ParseArgs),
    /// Render the document as an HTML fragment
    Render(InputArgs),
    /// Show document statistics
    Stats(InputArgs),
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Instruction text or step JSON file (`-` reads stdin)
    file: String,

    /// Decode the input as step JSON regardless of its extension
    #[arg(long)]
    step: bool,
}

#[derive(Debug, Args)]
struct ParseArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Show every span of every block
    #[arg(short, long)]
    verbose: bool,

    /// Output in JSON format
    #[arg(short, long, conflicts_with = "verbose")]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    if let Err(e) = run(cli.command) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Parse(args) => {
            let input = Input::load(&args.input.file, args.input.step)?;
            cmd_parse(&input, &args)
        }
        Command::Render(args) => {
            let input = Input::load(&args.file, args.step)?;
            cmd_render(&input);
            Ok(())
        }
        Command::Stats(args) => {
            let input = Input::load(&args.file, args.step)?;
            cmd_stats(&input);
            Ok(())
        }
    }
}

// =============================================================================
// Parse Command
// =============================================================================

fn cmd_parse(input: &Input, args: &ParseArgs) -> Result<(), CliError> {
    let doc = segment(input.instructions());
    info!(blocks = doc.len(), "parsed {}", args.input.file);

    if args.json {
        let json_doc = json::convert_document(&doc, input.step());
        println!("{}", serde_json::to_string_pretty(&json_doc)?);
    } else if args.verbose {
        print_document_verbose(&doc);
    } else {
        print_document_summary(&doc);
    }

    Ok(())
}

// =============================================================================
// Render Command
// =============================================================================

fn cmd_render(input: &Input) {
    let mut out = String::new();

    match input.step() {
        Some(step) => {
            let doc = step.body().map(segment);
            debug!(has_instructions = doc.is_some(), "rendering step body");
            html::render_step(step, doc.as_ref(), &mut out);
        }
        None => html::render_document(&segment(input.instructions()), &mut out),
    }

    print!("{}", out);
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(input: &Input) {
    let text = input.instructions();
    let doc = segment(text);
    let stats = DocumentStats::from_document(&doc, text);

    println!("Document Statistics");
    println!("-------------------");
    println!("Content:");
    println!("  Total blocks:   {}", stats.total_blocks);
    println!("  Headings:       {}", stats.headings);
    println!("  Paragraphs:     {}", stats.paragraphs);
    println!("  Lists:          {} ({} items)", stats.lists, stats.list_items);
    println!("  Tables:         {} ({} body rows)", stats.tables, stats.table_rows);
    println!("  Code blocks:    {}", stats.code_blocks);
    println!("  Rules:          {}", stats.rules);
    println!();
    println!("Size:");
    println!("  Characters:     {}", stats.chars);
    println!("  Words (est.):   {}", stats.words);
    println!("  Lines:          {}", stats.lines);

    if let Some(step) = input.step() {
        println!();
        println!("Step:");
        println!("  Tier:           {}", step.tier.as_deref().unwrap_or("-"));
        println!("  Points:         {}", step.points.unwrap_or(0));
        println!("  Objectives:     {}", step.objectives.len());
        println!("  Deliverables:   {}", step.deliverables.len());
        println!("  Hints:          {}", step.hints.len());
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct DocumentStats {
    total_blocks: usize,
    headings: usize,
    paragraphs: usize,
    lists: usize,
    list_items: usize,
    tables: usize,
    table_rows: usize,
    code_blocks: usize,
    rules: usize,
    chars: usize,
    words: usize,
    lines: usize,
}

impl DocumentStats {
    fn from_document(doc: &Document, input: &str) -> Self {
        let mut stats = Self {
            total_blocks: doc.len(),
            chars: input.chars().count(),
            words: input.split_whitespace().count(),
            lines: input.lines().count(),
            ..Self::default()
        };

        for block in doc {
            match block {
                Block::Heading(_) => stats.headings += 1,
                Block::Paragraph(_) => stats.paragraphs += 1,
                Block::List(l) => {
                    stats.lists += 1;
                    stats.list_items += l.items.len();
                }
                Block::Table(t) => {
                    stats.tables += 1;
                    stats.table_rows += t.rows.len();
                }
                Block::CodeBlock(_) => stats.code_blocks += 1,
                Block::Rule => stats.rules += 1,
            }
        }

        stats
    }
}

// =============================================================================
// Text Output
// =============================================================================

fn print_document_summary(doc: &Document) {
    println!("Blocks: {}", doc.len());
    for (i, block) in doc.iter().enumerate() {
        println!("  [{}] {}", i + 1, describe_block(block));
    }
}

fn print_document_verbose(doc: &Document) {
    println!("=== Document Tree ===");

    for (i, block) in doc.iter().enumerate() {
        println!();
        println!("[{}] {}", i + 1, describe_block(block));
        print_block_verbose(block, 1);
    }
}

fn describe_block(block: &Block) -> String {
    match block {
        Block::Heading(h) => format!("Heading (level {}): {}", h.level, plain_text(&h.content)),
        Block::Paragraph(p) => format!("Paragraph ({} spans)", p.content.len()),
        Block::List(l) => {
            let kind = if l.ordered { "ordered" } else { "unordered" };
            format!("List ({}, {} items)", kind, l.items.len())
        }
        Block::Table(t) => format!(
            "Table ({} columns, {} rows)",
            t.header.len(),
            t.rows.len()
        ),
        Block::CodeBlock(c) => format!("CodeBlock ({} lines)", c.text.lines().count()),
        Block::Rule => "Rule".to_string(),
    }
}

fn print_block_verbose(block: &Block, indent: usize) {
    let prefix = "  ".repeat(indent);

    match block {
        Block::Heading(h) => {
            println!("{}Content: {}", prefix, format_spans(&h.content));
        }
        Block::Paragraph(p) => {
            println!("{}Content: {}", prefix, format_spans(&p.content));
        }
        Block::List(l) => {
            for (i, item) in l.items.iter().enumerate() {
                println!("{}Item {}: {}", prefix, i + 1, format_spans(item));
            }
        }
        Block::Table(t) => {
            let header: Vec<String> = t.header.iter().map(|c| format_spans(c)).collect();
            println!("{}Header: {}", prefix, header.join(" | "));
            for (i, row) in t.rows.iter().enumerate() {
                let cells: Vec<String> = row.iter().map(|c| format_spans(c)).collect();
                println!("{}Row {}: {}", prefix, i + 1, cells.join(" | "));
            }
        }
        Block::CodeBlock(c) => {
            let preview: String = c.text.chars().take(60).collect();
            let ellipsis = if c.text.chars().count() > 60 { "..." } else { "" };
            println!(
                "{}Content: {}{}",
                prefix,
                preview.replace('\n', "\\n"),
                ellipsis
            );
        }
        Block::Rule => {}
    }
}

/// Spans tagged by kind, e.g. `text("a ") bold("b")`.
fn format_spans(spans: &[Span]) -> String {
    let parts: Vec<String> = spans
        .iter()
        .map(|span| match span {
            Span::Text(s) => format!("text({:?})", s),
            Span::Code(s) => format!("code({:?})", s),
            Span::Bold(s) => format!("bold({:?})", s),
            Span::Italic(s) => format!("italic({:?})", s),
            Span::Link { text, url } => format!("link({:?} -> {:?})", text, url),
        })
        .collect();
    parts.join(" ")
}
