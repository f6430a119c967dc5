use crate::parsing::blocks::{BlockNode, DocumentTree};

/// Characters that delimit code-block placeholders in expanded text.
const PLACEHOLDER_CHARS: [char; 2] = ['\u{E000}', '\u{E001}'];

/// Validates parser output invariants.
///
/// Asserts that:
/// - The root is the only `Document` node
/// - Lists are non-empty and hold only list items
/// - List items never appear outside a list
/// - Paragraphs are non-empty and trimmed
/// - No placeholder survives into the tree
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(tree: &DocumentTree) {
    assert!(
        matches!(tree.root(), BlockNode::Document { .. }),
        "root is not a document: {:?}",
        tree.root()
    );
    for block in tree.blocks() {
        check_node(block, false);
    }
}

fn check_node(node: &BlockNode, in_list: bool) {
    match node {
        BlockNode::Document { .. } => panic!("nested document node: {node:?}"),
        BlockNode::List { items, .. } => {
            assert!(!items.is_empty(), "empty list");
            for item in items {
                assert!(
                    matches!(item, BlockNode::ListItem { .. }),
                    "list child is not an item: {item:?}"
                );
                check_node(item, true);
            }
        }
        BlockNode::ListItem { children } => {
            assert!(in_list, "list item outside a list: {node:?}");
            for child in children {
                check_node(child, false);
            }
        }
        BlockNode::CodeBlock { content, .. } => {
            assert!(
                !content.contains(PLACEHOLDER_CHARS),
                "unresolved placeholder in code block: {content:?}"
            );
        }
        BlockNode::Paragraph { text } => {
            assert!(!text.is_empty(), "empty paragraph");
            assert_eq!(text.trim(), text, "untrimmed paragraph");
            assert!(
                !text.contains(PLACEHOLDER_CHARS),
                "unresolved placeholder in paragraph: {text:?}"
            );
        }
    }
}
