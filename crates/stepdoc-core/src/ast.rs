//! Document tree types produced by the segmenter.
//!
//! The tree is deliberately flat: blocks hold spans, spans are leaves.
//!
//! - **Zero-copy**: Uses `Cow<'a, str>` to borrow from input when possible
//! - **Owned on rewrite**: Text touched by em-dash substitution or joined
//!   from several lines is owned

use std::borrow::Cow;

/// Borrowed or owned string type for zero-copy parsing.
pub type CowStr<'a> = Cow<'a, str>;

/// A converted document.
///
/// Produced fresh by every [`segment`](crate::segment) call. Blocks appear in
/// source line order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document<'a> {
    /// Content blocks in document order.
    pub blocks: Vec<Block<'a>>,
}

impl<'a> Document<'a> {
    /// Number of top-level blocks.
    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no blocks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate over the blocks.
    pub fn iter(&self) -> std::slice::Iter<'_, Block<'a>> {
        self.blocks.iter()
    }

    /// Detach the document from the input it borrows from.
    pub fn into_owned(self) -> Document<'static> {
        Document {
            blocks: self.blocks.into_iter().map(Block::into_owned).collect(),
        }
    }
}

impl<'d, 'a> IntoIterator for &'d Document<'a> {
    type Item = &'d Block<'a>;
    type IntoIter = std::slice::Iter<'d, Block<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// Block-level nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    /// Section heading (levels 1-6).
    Heading(Heading<'a>),
    /// A single source line of text.
    Paragraph(Paragraph<'a>),
    /// Ordered or unordered list.
    List(List<'a>),
    /// Header row plus body rows.
    Table(Table<'a>),
    /// Fenced code, kept verbatim.
    CodeBlock(CodeBlock<'a>),
    /// Horizontal divider.
    Rule,
}

impl<'a> Block<'a> {
    /// Stable lowercase tag for this block type.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Heading(_) => "heading",
            Block::Paragraph(_) => "paragraph",
            Block::List(_) => "list",
            Block::Table(_) => "table",
            Block::CodeBlock(_) => "code_block",
            Block::Rule => "rule",
        }
    }

    /// Detach the block from the input it borrows from.
    pub fn into_owned(self) -> Block<'static> {
        match self {
            Block::Heading(h) => Block::Heading(Heading {
                level: h.level,
                content: owned_spans(h.content),
            }),
            Block::Paragraph(p) => Block::Paragraph(Paragraph {
                content: owned_spans(p.content),
            }),
            Block::List(l) => Block::List(List {
                ordered: l.ordered,
                items: l.items.into_iter().map(owned_spans).collect(),
            }),
            Block::Table(t) => Block::Table(Table {
                header: t.header.into_iter().map(owned_spans).collect(),
                rows: t
                    .rows
                    .into_iter()
                    .map(|row| row.into_iter().map(owned_spans).collect())
                    .collect(),
            }),
            Block::CodeBlock(c) => Block::CodeBlock(CodeBlock {
                text: Cow::Owned(c.text.into_owned()),
            }),
            Block::Rule => Block::Rule,
        }
    }
}

/// Section heading with level and inline content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading<'a> {
    /// Heading level (1-6).
    pub level: u8,
    /// Inline content.
    pub content: Vec<Span<'a>>,
}

/// Paragraph built from exactly one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph<'a> {
    pub content: Vec<Span<'a>>,
}

/// A flat list. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List<'a> {
    /// Numbered (`1.`) rather than bulleted (`-`/`*`).
    pub ordered: bool,
    /// One inline sequence per item.
    pub items: Vec<Vec<Span<'a>>>,
}

/// Data table. The first accumulated row is the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<'a> {
    /// Header cells.
    pub header: Vec<Vec<Span<'a>>>,
    /// Body rows, each a list of cells. May be empty.
    pub rows: Vec<Vec<Vec<Span<'a>>>>,
}

/// Fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock<'a> {
    /// Captured lines joined with `\n`. Never inline-formatted.
    pub text: CowStr<'a>,
}

/// Inline-level leaf nodes. Payloads never carry their delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span<'a> {
    /// Plain text.
    Text(CowStr<'a>),
    /// Inline code (`` `code` ``).
    Code(CowStr<'a>),
    /// Strong text (`**bold**` or `__bold__`).
    Bold(CowStr<'a>),
    /// Emphasized text (`*italic*`).
    Italic(CowStr<'a>),
    /// Hyperlink (`[text](url)`).
    Link { text: CowStr<'a>, url: CowStr<'a> },
}

impl<'a> Span<'a> {
    /// The displayed text of this span. For links this is the label.
    pub fn text(&self) -> &str {
        match self {
            Span::Text(s) | Span::Code(s) | Span::Bold(s) | Span::Italic(s) => s.as_ref(),
            Span::Link { text, .. } => text.as_ref(),
        }
    }

    /// Check if this is a plain `Text` span.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Span::Text(_))
    }

    /// Detach the span from the input it borrows from.
    pub fn into_owned(self) -> Span<'static> {
        fn own(s: CowStr<'_>) -> CowStr<'static> {
            Cow::Owned(s.into_owned())
        }

        match self {
            Span::Text(s) => Span::Text(own(s)),
            Span::Code(s) => Span::Code(own(s)),
            Span::Bold(s) => Span::Bold(own(s)),
            Span::Italic(s) => Span::Italic(own(s)),
            Span::Link { text, url } => Span::Link {
                text: own(text),
                url: own(url),
            },
        }
    }
}

/// Concatenate the displayed text of every span, without delimiters.
pub fn plain_text(spans: &[Span<'_>]) -> String {
    let mut out = String::with_capacity(spans.iter().map(|s| s.text().len()).sum());
    for span in spans {
        out.push_str(span.text());
    }
    out
}

#[inline]
fn owned_spans(spans: Vec<Span<'_>>) -> Vec<Span<'static>> {
    spans.into_iter().map(Span::into_owned).collect()
}
