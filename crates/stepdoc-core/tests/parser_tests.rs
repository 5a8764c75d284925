//! Integration tests for the block segmenter

use pretty_assertions::assert_eq;
use std::borrow::Cow;
use stepdoc_core::ast::{CodeBlock, Heading, List, Paragraph, Table};
use stepdoc_core::{segment, Block, Span};

fn text(s: &str) -> Span<'_> {
    Span::Text(Cow::Borrowed(s))
}

fn cell(s: &str) -> Vec<Span<'_>> {
    vec![text(s)]
}

fn para(s: &str) -> Block<'_> {
    Block::Paragraph(Paragraph {
        content: vec![text(s)],
    })
}

// ============================================================================
// Heading Tests
// ============================================================================

#[test]
fn test_single_heading() {
    let doc = segment("# Title");
    assert_eq!(
        doc.blocks,
        vec![Block::Heading(Heading {
            level: 1,
            content: vec![text("Title")],
        })]
    );
}

#[test]
fn test_heading_levels() {
    let input = "# H1\n## H2\n### H3\n#### H4\n##### H5\n###### H6";
    let doc = segment(input);

    assert_eq!(doc.len(), 6);
    for (i, block) in doc.iter().enumerate() {
        if let Block::Heading(h) = block {
            assert_eq!(h.level, (i + 1) as u8);
        } else {
            panic!("Expected heading, got {:?}", block);
        }
    }
}

#[test]
fn test_heading_with_inline_content() {
    let doc = segment("## Step **two**");
    if let Block::Heading(h) = &doc.blocks[0] {
        assert_eq!(h.level, 2);
        assert_eq!(h.content, vec![text("Step "), Span::Bold("two".into())]);
    } else {
        panic!("Expected heading");
    }
}

#[test]
fn test_heading_without_space_is_paragraph() {
    let doc = segment("#NoSpace");
    assert_eq!(doc.blocks, vec![para("#NoSpace")]);
}

#[test]
fn test_heading_level_too_high_is_paragraph() {
    let doc = segment("####### Seven hashes");
    assert_eq!(doc.blocks, vec![para("####### Seven hashes")]);
}

// ============================================================================
// Paragraph Tests
// ============================================================================

#[test]
fn test_paragraph_lines_are_not_merged() {
    let doc = segment("Line one\nLine two\nLine three");
    assert_eq!(
        doc.blocks,
        vec![para("Line one"), para("Line two"), para("Line three")]
    );
}

#[test]
fn test_blank_lines_produce_no_blocks() {
    let doc = segment("First.\n\n   \n\nSecond.");
    assert_eq!(doc.blocks, vec![para("First."), para("Second.")]);
}

#[test]
fn test_paragraph_keeps_leading_whitespace() {
    let doc = segment("   indented text");
    assert_eq!(doc.blocks, vec![para("   indented text")]);
}

#[test]
fn test_empty_input() {
    assert!(segment("").is_empty());
    assert!(segment("\n\n\n").is_empty());
}

// ============================================================================
// List Tests
// ============================================================================

#[test]
fn test_unordered_list_flushed_by_blank_line() {
    let doc = segment("- a\n- b\n");
    assert_eq!(
        doc.blocks,
        vec![Block::List(List {
            ordered: false,
            items: vec![cell("a"), cell("b")],
        })]
    );
}

#[test]
fn test_star_and_dash_share_one_list() {
    let doc = segment("- a\n* b\n  - c");
    if let Block::List(l) = &doc.blocks[0] {
        assert!(!l.ordered);
        assert_eq!(l.items, vec![cell("a"), cell("b"), cell("c")]);
    } else {
        panic!("Expected list");
    }
    assert_eq!(doc.len(), 1);
}

#[test]
fn test_ordered_list() {
    let doc = segment("1. First\n2. Second\n10. Tenth");
    assert_eq!(
        doc.blocks,
        vec![Block::List(List {
            ordered: true,
            items: vec![cell("First"), cell("Second"), cell("Tenth")],
        })]
    );
}

#[test]
fn test_switching_list_kind_starts_new_list() {
    let doc = segment("- bullet\n1. number\n- bullet again");
    let kinds: Vec<bool> = doc
        .iter()
        .map(|b| match b {
            Block::List(l) => l.ordered,
            other => panic!("Expected list, got {:?}", other),
        })
        .collect();
    assert_eq!(kinds, vec![false, true, false]);
}

#[test]
fn test_paragraph_ends_list() {
    let doc = segment("- one\nafter");
    assert_eq!(doc.len(), 2);
    assert!(matches!(&doc.blocks[0], Block::List(l) if l.items.len() == 1));
    assert_eq!(doc.blocks[1], para("after"));
}

#[test]
fn test_list_items_are_inline_formatted() {
    let doc = segment("- run `make`");
    if let Block::List(l) = &doc.blocks[0] {
        assert_eq!(l.items[0], vec![text("run "), Span::Code("make".into())]);
    } else {
        panic!("Expected list");
    }
}

#[test]
fn test_marker_without_space_is_paragraph() {
    let doc = segment("-dash\n1.one");
    assert_eq!(doc.blocks, vec![para("-dash"), para("1.one")]);
}

// ============================================================================
// Code Block Tests
// ============================================================================

#[test]
fn test_code_block_is_not_formatted() {
    let doc = segment("```\ncode line **not bold**\n```");
    assert_eq!(
        doc.blocks,
        vec![Block::CodeBlock(CodeBlock {
            text: "code line **not bold**".into(),
        })]
    );
}

#[test]
fn test_code_block_preserves_lines_and_whitespace() {
    let input = "```sql\nSELECT *\n  FROM t;\n\n# not a heading\n```";
    let doc = segment(input);
    assert_eq!(doc.len(), 1);
    if let Block::CodeBlock(c) = &doc.blocks[0] {
        assert_eq!(c.text, "SELECT *\n  FROM t;\n\n# not a heading");
    } else {
        panic!("Expected code block");
    }
}

#[test]
fn test_empty_code_block() {
    let doc = segment("```\n```");
    assert_eq!(
        doc.blocks,
        vec![Block::CodeBlock(CodeBlock { text: "".into() })]
    );
}

#[test]
fn test_unterminated_fence_captures_rest() {
    let doc = segment("Intro\n```\nline one\n- not a list\n| not | a table |");
    assert_eq!(doc.len(), 2);
    if let Block::CodeBlock(c) = &doc.blocks[1] {
        assert_eq!(c.text, "line one\n- not a list\n| not | a table |");
    } else {
        panic!("Expected code block");
    }
}

#[test]
fn test_fence_flushes_open_list() {
    let doc = segment("- item\n```\nx\n```");
    assert!(matches!(&doc.blocks[0], Block::List(_)));
    assert!(matches!(&doc.blocks[1], Block::CodeBlock(c) if c.text == "x"));
}

#[test]
fn test_fence_flushes_open_table() {
    let doc = segment("|a|\n```\nx\n```");
    let kinds: Vec<_> = doc.iter().map(Block::kind_name).collect();
    assert_eq!(kinds, vec!["table", "code_block"]);
}

#[test]
fn test_code_block_keeps_crlf_verbatim() {
    let doc = segment("```\r\na\r\nb\r\n```\r\n");
    assert_eq!(
        doc.blocks,
        vec![Block::CodeBlock(CodeBlock {
            text: "a\r\nb\r".into(),
        })]
    );
}

#[test]
fn test_indented_fence() {
    let doc = segment("  ```bash\n  echo hi\n  ```");
    assert_eq!(
        doc.blocks,
        vec![Block::CodeBlock(CodeBlock {
            text: "  echo hi".into(),
        })]
    );
}

// ============================================================================
// Table Tests
// ============================================================================

#[test]
fn test_table_with_separator() {
    let doc = segment("|H1|H2|\n|---|---|\n|a|b|");
    assert_eq!(
        doc.blocks,
        vec![Block::Table(Table {
            header: vec![cell("H1"), cell("H2")],
            rows: vec![vec![cell("a"), cell("b")]],
        })]
    );
}

#[test]
fn test_table_cells_are_trimmed_and_formatted() {
    let doc = segment("| Name | Role |\n| :--- | ---: |\n| **db1** | primary |");
    if let Block::Table(t) = &doc.blocks[0] {
        assert_eq!(t.header, vec![cell("Name"), cell("Role")]);
        assert_eq!(
            t.rows[0],
            vec![vec![Span::Bold("db1".into())], cell("primary")]
        );
    } else {
        panic!("Expected table");
    }
}

#[test]
fn test_single_row_table() {
    let doc = segment("| lonely |");
    assert_eq!(
        doc.blocks,
        vec![Block::Table(Table {
            header: vec![cell("lonely")],
            rows: vec![],
        })]
    );
}

#[test]
fn test_table_without_separator_uses_first_row_as_header() {
    let doc = segment("|a|b|\n|c|d|");
    if let Block::Table(t) = &doc.blocks[0] {
        assert_eq!(t.header, vec![cell("a"), cell("b")]);
        assert_eq!(t.rows, vec![vec![cell("c"), cell("d")]]);
    } else {
        panic!("Expected table");
    }
}

#[test]
fn test_lone_separator_row_is_discarded() {
    let doc = segment("|---|---|\ntext");
    assert_eq!(doc.blocks, vec![para("text")]);
}

#[test]
fn test_non_row_line_closes_table() {
    let doc = segment("|a|\n\n|b|");
    assert_eq!(doc.len(), 2);
    assert!(doc.iter().all(|b| matches!(b, Block::Table(_))));
}

#[test]
fn test_table_row_flushes_list() {
    let doc = segment("- item\n|a|b|");
    assert!(matches!(&doc.blocks[0], Block::List(_)));
    assert!(matches!(&doc.blocks[1], Block::Table(_)));
}

#[test]
fn test_table_then_paragraph() {
    let doc = segment("|a|\nafter");
    assert!(matches!(&doc.blocks[0], Block::Table(_)));
    assert_eq!(doc.blocks[1], para("after"));
}

#[test]
fn test_unclosed_table_flushed_at_end() {
    let doc = segment("# T\n|x|y|\n|1|2|\n");
    assert_eq!(doc.len(), 2);
    assert!(matches!(&doc.blocks[1], Block::Table(t) if t.rows.len() == 1));
}

// ============================================================================
// Rule Tests
// ============================================================================

#[test]
fn test_rules() {
    let doc = segment("above\n---\n*****\nbelow");
    assert_eq!(
        doc.blocks,
        vec![para("above"), Block::Rule, Block::Rule, para("below")]
    );
}

#[test]
fn test_rule_ends_list() {
    let doc = segment("- a\n---");
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.blocks[1], Block::Rule);
}

#[test]
fn test_mixed_rule_markers_are_not_rules() {
    let doc = segment("-*-");
    assert_eq!(doc.blocks, vec![para("-*-")]);
}

// ============================================================================
// Whole Document Tests
// ============================================================================

#[test]
fn test_block_order_follows_source() {
    let input = "\
# Replication

Set up a replica -- carefully.

1. Stop writes
2. Take a snapshot

```
CHANGE MASTER TO ...
```

| Host | Role |
|------|------|
| db1  | primary |

---
Done.";
    let doc = segment(input);
    let kinds: Vec<&str> = doc.iter().map(Block::kind_name).collect();
    assert_eq!(
        kinds,
        vec!["heading", "paragraph", "list", "code_block", "table", "rule", "paragraph"]
    );
}

#[test]
fn test_crlf_input() {
    let doc = segment("# Title\r\n- a\r\n- b\r\n");
    assert_eq!(doc.len(), 2);
    assert!(matches!(&doc.blocks[1], Block::List(l) if l.items == vec![cell("a"), cell("b")]));
}

#[test]
fn test_into_owned_outlives_input() {
    let owned = {
        let input = String::from("# Title\n- item");
        segment(&input).into_owned()
    };
    assert_eq!(owned.len(), 2);
}
