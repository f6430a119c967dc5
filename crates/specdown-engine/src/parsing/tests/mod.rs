//! Snapshot tests for the parsing module.
//!
//! Trees are rendered with the outline renderer and compared against inline
//! `insta` snapshots; every parse is also run through the invariant checks.

use crate::includes::{CodeInclusion, Expansion, LogicalPath};
use crate::parsing::{parse_document, snapshot};
use crate::render::{OutlineRenderer, render};

fn outline(expansion: &Expansion) -> String {
    let tree = parse_document(expansion);
    snapshot::invariants(&tree);
    render(&tree, &mut OutlineRenderer::new())
}

fn outline_of(text: &str) -> String {
    outline(&Expansion::plain(text))
}

/// An expansion whose `{code}` markers stand for a Go code inclusion.
fn with_code(text: &str, content: &str) -> Expansion {
    let mut expansion = Expansion::default();
    let placeholder = expansion.push_code(CodeInclusion {
        language: Some("go".to_string()),
        content: content.to_string(),
        source: LogicalPath::parse("test.go").unwrap(),
    });
    expansion.text = text.replace("{code}", &placeholder);
    expansion
}

#[test]
fn code_block_in_nested_list() {
    let md = "1. Alpha\n  1. Beta\n  ```go\n  123456789\n  ```\n2. Gamma\n  * Delta\n    * Epsilon\n\t\t* Iota\n\t\t```go\n\t\t123456789\n\t\t```\n3. Zeta\n";
    insta::assert_snapshot!(outline_of(md), @r#"
    Document
      List(ordered)
        Item
          Paragraph "Alpha"
          List(ordered)
            Item
              Paragraph "Beta"
              Code(go)
                | 123456789
        Item
          Paragraph "Gamma"
          List(bullet)
            Item
              Paragraph "Delta"
              List(bullet)
                Item
                  Paragraph "Epsilon"
                  List(bullet)
                    Item
                      Paragraph "Iota"
                      Code(go)
                        | 123456789
        Item
          Paragraph "Zeta"
    "#);
}

#[test]
fn included_code_in_nested_list() {
    let md = "1. Alpha\n\t1. Beta\n\t{code}\n2. Gamma\n\t* Delta\n\t\t* Iota\n\t\t{code}\n3. Zeta\n";
    insta::assert_snapshot!(outline(&with_code(md, "123456789")), @r#"
    Document
      List(ordered)
        Item
          Paragraph "Alpha"
          List(ordered)
            Item
              Paragraph "Beta"
              Code(go)
                | 123456789
        Item
          Paragraph "Gamma"
          List(bullet)
            Item
              Paragraph "Delta"
              List(bullet)
                Item
                  Paragraph "Iota"
                  Code(go)
                    | 123456789
        Item
          Paragraph "Zeta"
    "#);
}

#[test]
fn included_code_splits_a_paragraph() {
    let md = "before {code} after\n";
    insta::assert_snapshot!(outline(&with_code(md, "x := 1\n\ny := 2")), @r#"
    Document
      Paragraph "before"
      Code(go)
        | x := 1
        |
        | y := 2
      Paragraph "after"
    "#);
}

#[test]
fn placeholder_inside_a_fence_is_inlined() {
    let md = "```\n{code}\n```\n";
    insta::assert_snapshot!(outline(&with_code(md, "a\nb")), @r#"
    Document
      Code
        | a
        | b
    "#);
}

#[test]
fn deep_indentation_does_not_turn_included_code_into_indented_code() {
    let md = "text\n\n        {code}\n";
    insta::assert_snapshot!(outline(&with_code(md, "z")), @r#"
    Document
      Paragraph "text"
      Code(go)
        | z
    "#);
}

#[test]
fn tabs_and_spaces_mix() {
    let md = "-\tTab item\n\t-   deeper\n\n\t\t\tcode\n";
    insta::assert_snapshot!(outline_of(md), @r#"
    Document
      List(bullet)
        Item
          Paragraph "Tab item"
          List(bullet)
            Item
              Paragraph "deeper"
              Code
                | code
    "#);
}

#[test]
fn deep_nesting_is_unbounded() {
    let md: String = (0..64)
        .map(|level| format!("{}- {level}\n", "  ".repeat(level)))
        .collect();
    let tree = parse_document(&Expansion::plain(md));
    snapshot::invariants(&tree);

    let mut depth = 0;
    let mut node = &tree.blocks()[0];
    while let Some(item) = node.children().first() {
        match item.children().get(1) {
            Some(list) => {
                depth += 1;
                node = list;
            }
            None => break,
        }
    }
    assert_eq!(depth, 63);
}

/// Empty document produces no blocks.
#[test]
fn empty_document() {
    assert!(parse_document(&Expansion::plain("")).is_empty());
}

/// Blank lines don't produce blocks.
#[test]
fn blank_lines_only() {
    assert!(parse_document(&Expansion::plain("\n\n\n")).is_empty());
}
