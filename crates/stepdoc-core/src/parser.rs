//! Single-pass block segmenter.
//!
//! Lines are classified in a fixed order (fence, code capture, table row,
//! rule, heading, list items, blank, paragraph) and the first rule that
//! matches handles the line. Multi-line constructs live in accumulators on
//! [`Segmenter`] and are flushed into blocks when a line ends them.

use std::borrow::Cow;

use tracing::{debug, trace};

use crate::ast::{Block, CodeBlock, Document, Heading, List, Paragraph, Span, Table};
use crate::inline::inline;
use crate::lexer::{Lexer, Line};

const FENCE: &str = "```";

/// Convert instruction text into a document tree.
///
/// Never fails: a line that matches no construct becomes a paragraph and an
/// unclosed fence runs to the end of the input.
///
/// # Example
///
/// ```rust
/// use stepdoc_core::{segment, Block};
///
/// let doc = segment("# Setup\n\n- install\n- configure\n");
/// assert_eq!(doc.len(), 2);
/// assert!(matches!(&doc.blocks[1], Block::List(l) if l.items.len() == 2));
/// ```
pub fn segment(text: &str) -> Document<'_> {
    let mut lexer = Lexer::new(text);
    let mut segmenter = Segmenter::new();

    for line in lexer.by_ref() {
        segmenter.push_line(line);
    }

    let doc = segmenter.finish();
    debug!(
        lines = lexer.lines_read(),
        blocks = doc.len(),
        "segmented document"
    );
    doc
}

/// Kind of list currently being collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

/// Accumulator state for one segmentation pass.
#[derive(Debug)]
struct Segmenter<'a> {
    blocks: Vec<Block<'a>>,
    /// Kind and items of the open list, if any.
    list: Option<(ListKind, Vec<Vec<Span<'a>>>)>,
    /// Trimmed rows of the open table.
    table: Vec<&'a str>,
    /// Captured lines while inside a fence.
    code: Option<Vec<&'a str>>,
}

impl<'a> Segmenter<'a> {
    fn new() -> Self {
        Self {
            blocks: Vec::with_capacity(16),
            list: None,
            table: Vec::new(),
            code: None,
        }
    }

    fn push_line(&mut self, line: Line<'a>) {
        let trimmed = line.trimmed();

        if trimmed.starts_with(FENCE) {
            self.toggle_fence(line.number);
            return;
        }

        if let Some(code) = self.code.as_mut() {
            code.push(line.raw);
            return;
        }

        if is_table_row(trimmed) {
            self.flush_list();
            if !is_separator_row(trimmed) {
                self.table.push(trimmed);
            }
            return;
        }
        self.flush_table();

        if is_rule(trimmed) {
            self.flush_list();
            self.blocks.push(Block::Rule);
            return;
        }

        if let Some((level, rest)) = heading(line.text) {
            self.flush_list();
            self.blocks.push(Block::Heading(Heading {
                level,
                content: inline(rest),
            }));
            return;
        }

        if let Some(rest) = unordered_item(line.text) {
            self.push_item(ListKind::Unordered, rest);
            return;
        }

        if let Some(rest) = ordered_item(line.text) {
            self.push_item(ListKind::Ordered, rest);
            return;
        }

        self.flush_list();
        if line.is_blank() {
            return;
        }

        self.blocks.push(Block::Paragraph(Paragraph {
            content: inline(line.text),
        }));
    }

    fn toggle_fence(&mut self, number: usize) {
        match self.code.take() {
            Some(lines) => {
                trace!(line = number, captured = lines.len(), "fence closed");
                self.push_code(lines);
            }
            None => {
                self.flush_list();
                self.flush_table();
                trace!(line = number, "fence opened");
                self.code = Some(Vec::new());
            }
        }
    }

    fn push_item(&mut self, kind: ListKind, text: &'a str) {
        if !matches!(&self.list, Some((open, _)) if *open == kind) {
            self.flush_list();
            self.list = Some((kind, Vec::new()));
        }
        if let Some((_, items)) = self.list.as_mut() {
            items.push(inline(text));
        }
    }

    fn push_code(&mut self, lines: Vec<&'a str>) {
        let text = match lines.as_slice() {
            [] => Cow::Borrowed(""),
            [only] => Cow::Borrowed(*only),
            _ => Cow::Owned(lines.join("\n")),
        };
        self.blocks.push(Block::CodeBlock(CodeBlock { text }));
    }

    fn flush_list(&mut self) {
        let Some((kind, items)) = self.list.take() else {
            return;
        };
        if items.is_empty() {
            return;
        }
        let ordered = kind == ListKind::Ordered;
        trace!(items = items.len(), ordered, "list flushed");
        self.blocks.push(Block::List(List { ordered, items }));
    }

    fn flush_table(&mut self) {
        if self.table.is_empty() {
            return;
        }
        let mut rows = std::mem::take(&mut self.table).into_iter().map(table_cells);
        let header = rows.next().unwrap_or_default();
        let rows: Vec<_> = rows.collect();
        trace!(rows = rows.len(), "table flushed");
        self.blocks.push(Block::Table(Table { header, rows }));
    }

    fn finish(mut self) -> Document<'a> {
        self.flush_list();
        if let Some(lines) = self.code.take() {
            debug!(captured = lines.len(), "unterminated fence closed at end of input");
            self.push_code(lines);
        }
        self.flush_table();

        Document {
            blocks: self.blocks,
        }
    }
}

/// Trimmed line bounded by `|` on both ends.
#[inline]
fn is_table_row(trimmed: &str) -> bool {
    trimmed.len() >= 2 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

/// Header/body separator such as `|---|:---:|`.
#[inline]
fn is_separator_row(trimmed: &str) -> bool {
    let inner = &trimmed[1..trimmed.len() - 1];
    !inner.is_empty()
        && inner
            .chars()
            .all(|c| c == '-' || c == ':' || c == '|' || c.is_whitespace())
}

/// Cells between the outer pipes, trimmed and inline-formatted.
fn table_cells(row: &str) -> Vec<Vec<Span<'_>>> {
    let mut cells: Vec<&str> = row.split('|').skip(1).collect();
    cells.pop();
    cells.into_iter().map(|cell| inline(cell.trim())).collect()
}

/// Three or more `-`, or three or more `*`, and nothing else.
#[inline]
fn is_rule(trimmed: &str) -> bool {
    let bytes = trimmed.as_bytes();
    match bytes.first() {
        Some(&(marker @ (b'-' | b'*'))) => {
            bytes.len() >= 3 && bytes.iter().all(|&b| b == marker)
        }
        _ => false,
    }
}

/// `#` to `######` followed by whitespace. Returns the level and the text
/// after the whitespace run.
fn heading(text: &str) -> Option<(u8, &str)> {
    let level = text.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = strip_whitespace(&text[level..])?;
    Some((level as u8, rest))
}

/// `- item` or `* item`, optionally indented.
fn unordered_item(text: &str) -> Option<&str> {
    let rest = text.trim_start();
    let rest = rest
        .strip_prefix('-')
        .or_else(|| rest.strip_prefix('*'))?;
    strip_whitespace(rest)
}

/// `1. item`, optionally indented.
fn ordered_item(text: &str) -> Option<&str> {
    let rest = text.trim_start();
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = rest[digits..].strip_prefix('.')?;
    strip_whitespace(rest)
}

/// Strip a leading run of at least one whitespace character.
#[inline]
fn strip_whitespace(text: &str) -> Option<&str> {
    let rest = text.trim_start();
    if rest.len() == text.len() {
        None
    } else {
        Some(rest)
    }
}
