//! # stepdoc core
//!
//! Converts the small markdown-like dialect used for step instructions into
//! a flat document tree.
//!
//! Two stages run in a single pass:
//!
//! - [`segment`] splits the text into lines and groups them into blocks
//!   (headings, paragraphs, lists, tables, code blocks, rules)
//! - [`inline`] turns one line of text into spans (text, code, bold,
//!   italic, links)
//!
//! ## Quick Start
//!
//! ```rust
//! use stepdoc_core::{segment, Block, Span};
//!
//! let input = "# Connect\n\nUse **ssh** -- see [docs](https://example.com).";
//! let doc = segment(input);
//!
//! assert_eq!(doc.len(), 2);
//! if let Block::Paragraph(p) = &doc.blocks[1] {
//!     assert_eq!(p.content[1], Span::Bold("ssh".into()));
//! }
//! ```
//!
//! ## Degrading Input
//!
//! Neither stage ever fails. Lines that match no construct become
//! paragraphs, unterminated inline delimiters stay in the text and an
//! unclosed code fence runs to the end of the input.
//!
//! ```rust
//! use stepdoc_core::{segment, Block};
//!
//! let doc = segment("```\nstill code");
//! assert!(matches!(&doc.blocks[0], Block::CodeBlock(c) if c.text == "still code"));
//! ```

pub mod ast;
pub mod inline;
pub mod lexer;
pub mod parser;

pub use ast::{plain_text, Block, Document, Span};
pub use inline::inline;
pub use parser::segment;
