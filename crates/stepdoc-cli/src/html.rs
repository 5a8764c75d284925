//! HTML materialization of a document tree.
//!
//! Every piece of text goes through `html_escape`; only structural tags are
//! produced here.

use html_escape::{encode_double_quoted_attribute, encode_text};
use stepdoc_core::ast::Table;
use stepdoc_core::{Block, Document, Span};

use crate::step::StepContent;

/// Shown when there is nothing to render.
pub const FALLBACK_MESSAGE: &str = "Step content could not be loaded. Please check back later.";

/// Render a document as an HTML fragment.
pub fn render_document(doc: &Document, out: &mut String) {
    if doc.is_empty() {
        out.push_str("<p>");
        out.push_str(FALLBACK_MESSAGE);
        out.push_str("</p>\n");
        return;
    }

    render_blocks(doc, out);
}

/// Render a full step body: meta boxes, objectives, instructions,
/// deliverables and hints.
///
/// `doc` is the parsed `instructions`, `None` when the step has none. An
/// instruction text without blocks leaves `div.step-content` empty.
pub fn render_step(step: &StepContent, doc: Option<&Document>, out: &mut String) {
    let points = step.points.unwrap_or(0).to_string();

    out.push_str("<div class=\"step-meta\">\n");
    render_meta_box("Tier", step.tier.as_deref().unwrap_or(""), out);
    render_meta_box("Est. Time", step.estimated_time.as_deref().unwrap_or(""), out);
    render_meta_box("Points", &points, out);
    out.push_str("</div>\n");

    render_section("Objectives", "objectives-list", &step.objectives, out);

    if let Some(doc) = doc {
        out.push_str("<div class=\"step-content\">\n");
        render_blocks(doc, out);
        out.push_str("</div>\n");
    }

    render_section("Deliverables", "deliverables-list", &step.deliverables, out);
    render_section("Hints", "hints-list", &step.hints, out);
}

fn render_blocks(doc: &Document, out: &mut String) {
    for block in doc {
        render_block(block, out);
    }
}

fn render_meta_box(label: &str, value: &str, out: &mut String) {
    out.push_str("<div class=\"step-meta-item\"><div class=\"meta-label\">");
    out.push_str(&encode_text(label));
    out.push_str("</div><div class=\"meta-value\">");
    out.push_str(&encode_text(value));
    out.push_str("</div></div>\n");
}

/// Heading plus plain-text list. Skipped when `entries` is empty.
fn render_section(title: &str, class: &str, entries: &[String], out: &mut String) {
    if entries.is_empty() {
        return;
    }

    out.push_str("<div class=\"section-heading\">");
    out.push_str(&encode_text(title));
    out.push_str("</div>\n<ul class=\"");
    out.push_str(&encode_double_quoted_attribute(class));
    out.push_str("\">\n");
    for entry in entries {
        out.push_str("<li>");
        out.push_str(&encode_text(entry));
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n");
}

fn render_block(block: &Block, out: &mut String) {
    match block {
        Block::Heading(h) => {
            let tag = format!("h{}", h.level.clamp(1, 6));
            wrap(&tag, &h.content, out);
            out.push('\n');
        }
        Block::Paragraph(p) => {
            wrap("p", &p.content, out);
            out.push('\n');
        }
        Block::List(l) => {
            let tag = if l.ordered { "ol" } else { "ul" };
            out.push_str(&format!("<{tag}>\n"));
            for item in &l.items {
                wrap("li", item, out);
                out.push('\n');
            }
            out.push_str(&format!("</{tag}>\n"));
        }
        Block::Table(t) => render_table(t, out),
        Block::CodeBlock(c) => {
            out.push_str("<pre><code>");
            out.push_str(&encode_text(&c.text));
            out.push_str("</code></pre>\n");
        }
        Block::Rule => out.push_str("<hr>\n"),
    }
}

fn render_table(table: &Table, out: &mut String) {
    out.push_str("<table>\n<thead>\n<tr>");
    for cell in &table.header {
        wrap("th", cell, out);
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            wrap("td", cell, out);
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}

fn wrap(tag: &str, spans: &[Span], out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    render_spans(spans, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn render_spans(spans: &[Span], out: &mut String) {
    for span in spans {
        match span {
            Span::Text(s) => out.push_str(&encode_text(s)),
            Span::Code(s) => push_tagged("code", s, out),
            Span::Bold(s) => push_tagged("strong", s, out),
            Span::Italic(s) => push_tagged("em", s, out),
            Span::Link { text, url } => {
                out.push_str("<a href=\"");
                out.push_str(&encode_double_quoted_attribute(url));
                out.push_str("\" target=\"_blank\" rel=\"noopener\">");
                out.push_str(&encode_text(text));
                out.push_str("</a>");
            }
        }
    }
}

fn push_tagged(tag: &str, text: &str, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(&encode_text(text));
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
