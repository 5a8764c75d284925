//! JSON mirror of the document tree.
//!
//! The core types stay free of serde; these borrowed views are built on
//! demand and serialized with internally tagged `"type"` fields.

use serde::Serialize;
use stepdoc_core::{Block, Document, Span};

use crate::step::StepContent;

#[derive(Debug, Serialize)]
pub struct JsonDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    step: Option<JsonStep<'a>>,
    blocks: Vec<JsonBlock<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonStep<'a> {
    tier: Option<&'a str>,
    estimated_time: Option<&'a str>,
    points: Option<u32>,
    objectives: &'a [String],
    deliverables: &'a [String],
    hints: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum JsonBlock<'a> {
    Heading {
        level: u8,
        content: Vec<JsonSpan<'a>>,
    },
    Paragraph {
        content: Vec<JsonSpan<'a>>,
    },
    List {
        ordered: bool,
        items: Vec<Vec<JsonSpan<'a>>>,
    },
    Table {
        header: Vec<Vec<JsonSpan<'a>>>,
        rows: Vec<Vec<Vec<JsonSpan<'a>>>>,
    },
    CodeBlock {
        text: &'a str,
    },
    Rule,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum JsonSpan<'a> {
    Text { content: &'a str },
    Code { content: &'a str },
    Bold { content: &'a str },
    Italic { content: &'a str },
    Link { text: &'a str, url: &'a str },
}

/// Build the serializable view of `doc`, with the step fields when present.
pub fn convert_document<'a>(doc: &'a Document, step: Option<&'a StepContent>) -> JsonDocument<'a> {
    JsonDocument {
        step: step.map(|s| JsonStep {
            tier: s.tier.as_deref(),
            estimated_time: s.estimated_time.as_deref(),
            points: s.points,
            objectives: &s.objectives,
            deliverables: &s.deliverables,
            hints: &s.hints,
        }),
        blocks: doc.iter().map(convert_block).collect(),
    }
}

fn convert_block<'a>(block: &'a Block) -> JsonBlock<'a> {
    match block {
        Block::Heading(h) => JsonBlock::Heading {
            level: h.level,
            content: convert_spans(&h.content),
        },
        Block::Paragraph(p) => JsonBlock::Paragraph {
            content: convert_spans(&p.content),
        },
        Block::List(l) => JsonBlock::List {
            ordered: l.ordered,
            items: l.items.iter().map(|item| convert_spans(item)).collect(),
        },
        Block::Table(t) => JsonBlock::Table {
            header: t.header.iter().map(|cell| convert_spans(cell)).collect(),
            rows: t
                .rows
                .iter()
                .map(|row| row.iter().map(|cell| convert_spans(cell)).collect())
                .collect(),
        },
        Block::CodeBlock(c) => JsonBlock::CodeBlock { text: &c.text },
        Block::Rule => JsonBlock::Rule,
    }
}

fn convert_spans<'a>(spans: &'a [Span]) -> Vec<JsonSpan<'a>> {
    spans.iter().map(convert_span).collect()
}

fn convert_span<'a>(span: &'a Span) -> JsonSpan<'a> {
    match span {
        Span::Text(s) => JsonSpan::Text { content: s },
        Span::Code(s) => JsonSpan::Code { content: s },
        Span::Bold(s) => JsonSpan::Bold { content: s },
        Span::Italic(s) => JsonSpan::Italic { content: s },
        Span::Link { text, url } => JsonSpan::Link { text, url },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stepdoc_core::segment;

    #[test]
    fn test_tagged_output() {
        let doc = segment("# Hi\n- **a**\n---\n```\nx\n```");
        let value = serde_json::to_value(convert_document(&doc, None)).unwrap();

        assert_eq!(
            value,
            json!({
                "blocks": [
                    {"type": "heading", "level": 1, "content": [{"type": "text", "content": "Hi"}]},
                    {"type": "list", "ordered": false, "items": [[{"type": "bold", "content": "a"}]]},
                    {"type": "rule"},
                    {"type": "code_block", "text": "x"}
                ]
            })
        );
    }

    #[test]
    fn test_table_and_link_output() {
        let doc = segment("|[a](b)|\n|---|\n|c|");
        let value = serde_json::to_value(convert_document(&doc, None)).unwrap();

        assert_eq!(
            value["blocks"][0],
            json!({
                "type": "table",
                "header": [[{"type": "link", "text": "a", "url": "b"}]],
                "rows": [[[{"type": "text", "content": "c"}]]]
            })
        );
    }

    #[test]
    fn test_step_fields_included() {
        let step = StepContent {
            tier: Some("Advanced".into()),
            points: Some(8),
            hints: vec!["look at the slow log".into()],
            ..StepContent::default()
        };
        let doc = segment("");
        let value = serde_json::to_value(convert_document(&doc, Some(&step))).unwrap();

        assert_eq!(value["step"]["tier"], "Advanced");
        assert_eq!(value["step"]["points"], 8);
        assert_eq!(value["step"]["hints"][0], "look at the slow log");
        assert_eq!(value["blocks"], json!([]));
    }
}
