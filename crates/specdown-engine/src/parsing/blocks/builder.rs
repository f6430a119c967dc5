use crate::includes::{Expansion, Segment};
use crate::parsing::lines::strip_columns;

use super::{
    classify::{LineClass, MarkdownLineClassifier},
    containers::ContainerStack,
    kinds::{CodeFence, IndentedCode, ListMarker, Paragraph},
    types::{BlockNode, ContainerFrame, DocumentTree},
};

#[derive(Debug)]
enum LeafState {
    None,
    Paragraph {
        text: String,
    },
    Fence {
        ticks: usize,
        /// Indentation stripped from each content line.
        column: usize,
        language: Option<String>,
        lines: Vec<String>,
    },
    Indented {
        column: usize,
        lines: Vec<String>,
        /// Blank lines seen since the last code line; kept only if more code follows.
        pending_blanks: usize,
    },
}

/// Builds the block tree line by line over an explicit container stack.
pub struct BlockBuilder<'e> {
    expansion: &'e Expansion,
    containers: ContainerStack,
    leaf: LeafState,
    blank_run: usize,
}

impl<'e> BlockBuilder<'e> {
    /// `expansion` resolves the code-block placeholders left by the
    /// preprocessor.
    pub fn new(expansion: &'e Expansion) -> Self {
        Self {
            expansion,
            containers: ContainerStack::default(),
            leaf: LeafState::None,
            blank_run: 0,
        }
    }

    pub fn push(&mut self, c: &LineClass<'_>) {
        // Precedence: an open fence sees every line first.
        if self.in_fence() {
            self.consume_fence_line(c);
            return;
        }

        if c.is_blank {
            self.push_blank();
            return;
        }

        let after_blank = std::mem::take(&mut self.blank_run) > 0;
        if self.continue_indented_code(c) {
            return;
        }
        self.push_content(c, after_blank);
    }

    pub fn finish(mut self) -> DocumentTree {
        // EOF flush
        self.flush_leaf();
        DocumentTree::new(self.containers.finish())
    }

    fn in_fence(&self) -> bool {
        matches!(self.leaf, LeafState::Fence { .. })
    }

    /// Feeds a line to the open fence. The fence ends at its closing line,
    /// or, inside a list item, at a line that dedents out of the item.
    fn consume_fence_line(&mut self, c: &LineClass<'_>) {
        let LeafState::Fence { ticks, column, .. } = self.leaf else {
            return;
        };
        if CodeFence::closes(ticks, c.content) {
            self.flush_leaf();
            return;
        }
        if !c.is_blank && c.indent < column && self.leaves_item(c.indent) {
            self.flush_leaf();
            self.push_content(c, false);
            return;
        }

        let line = self
            .expansion
            .inline_placeholders(&strip_columns(c.text, column));
        if let LeafState::Fence { lines, .. } = &mut self.leaf {
            lines.push(line);
        }
    }

    /// Whether a line at `indent` falls outside the innermost list item.
    fn leaves_item(&self, indent: usize) -> bool {
        matches!(
            self.containers.top(),
            ContainerFrame::Item { marker_column, .. } if indent <= *marker_column
        )
    }

    fn push_blank(&mut self) {
        self.blank_run += 1;
        if let LeafState::Indented { pending_blanks, .. } = &mut self.leaf {
            *pending_blanks += 1;
        } else {
            self.flush_leaf();
        }

        if self.blank_run >= 2 && self.containers.has_lists() {
            self.flush_leaf();
            self.containers.close_lists();
        }
    }

    /// Appends `c` to an open indented code block if it is deep enough;
    /// otherwise closes the block.
    fn continue_indented_code(&mut self, c: &LineClass<'_>) -> bool {
        let column = match self.leaf {
            LeafState::Indented { column, .. } => column,
            _ => return false,
        };
        if c.indent < column {
            self.flush_leaf();
            return false;
        }

        let line = self
            .expansion
            .inline_placeholders(&strip_columns(c.text, column));
        if let LeafState::Indented {
            lines,
            pending_blanks,
            ..
        } = &mut self.leaf
        {
            for _ in 0..std::mem::take(pending_blanks) {
                lines.push(String::new());
            }
            lines.push(line);
        }
        true
    }

    fn push_content(&mut self, c: &LineClass<'_>, after_blank: bool) {
        // Lazy continuation: only a block opener interrupts a paragraph.
        if matches!(self.leaf, LeafState::Paragraph { .. })
            && c.marker.is_none()
            && c.fence_sig.is_none()
        {
            self.append_text(c.content);
            return;
        }
        self.flush_leaf();

        if let Some(marker) = &c.marker {
            self.open_item(marker);
            if !marker.rest.is_empty() {
                let rest = MarkdownLineClassifier.classify_at(marker.rest, marker.content_column);
                self.push_content(&rest, false);
            }
            return;
        }

        self.close_unaccepting(c.indent, after_blank);

        if let Some(sig) = &c.fence_sig {
            self.leaf = LeafState::Fence {
                ticks: sig.ticks,
                column: c.indent,
                language: sig.language(),
                lines: vec![],
            };
            return;
        }

        let code_column = IndentedCode::column(self.containers.content_column());
        if c.indent >= code_column && !self.starts_with_resolved_code(c.content) {
            let line = strip_columns(c.text, code_column);
            self.leaf = LeafState::Indented {
                column: code_column,
                lines: vec![self.expansion.inline_placeholders(&line)],
                pending_blanks: 0,
            };
            return;
        }

        self.append_text(c.content);
    }

    /// Closes containers until one whose list sits at the marker's column
    /// (sibling item) or an item the marker nests inside.
    fn open_item(&mut self, marker: &ListMarker<'_>) {
        loop {
            match self.containers.top().clone() {
                ContainerFrame::Item { marker_column, .. } if marker.column > marker_column => {
                    break self.open_list(marker);
                }
                ContainerFrame::List { ordered, column }
                    if column == marker.column && ordered == marker.ordered =>
                {
                    break self.containers.open(item_frame(marker));
                }
                ContainerFrame::Document => break self.open_list(marker),
                ContainerFrame::Item { .. } | ContainerFrame::List { .. } => {
                    self.containers.close_top();
                }
            }
        }
    }

    fn open_list(&mut self, marker: &ListMarker<'_>) {
        self.containers.open(ContainerFrame::List {
            ordered: marker.ordered,
            column: marker.column,
        });
        self.containers.open(item_frame(marker));
    }

    /// Closes items that do not own a non-marker line at `indent`.
    ///
    /// An item owns lines indented past its marker. The innermost item also
    /// owns a line at exactly its marker column when the line follows it
    /// directly and the enclosing item would otherwise claim it.
    fn close_unaccepting(&mut self, indent: usize, after_blank: bool) {
        let mut innermost = true;
        loop {
            match self.containers.top().clone() {
                ContainerFrame::Item { marker_column, .. } => {
                    if indent > marker_column {
                        return;
                    }
                    let hanging = innermost
                        && !after_blank
                        && indent == marker_column
                        && self
                            .containers
                            .parent_item_marker()
                            .is_some_and(|parent| parent < indent);
                    if hanging {
                        return;
                    }
                }
                ContainerFrame::List { .. } => {}
                ContainerFrame::Document => return,
            }
            self.containers.close_top();
            innermost = false;
        }
    }

    /// Adds paragraph text; resolved code blocks split the paragraph and
    /// land in the current container at their position.
    fn append_text(&mut self, content: &str) {
        let expansion = self.expansion;
        for segment in expansion.segments(content) {
            match segment {
                Segment::Text(text) => {
                    if text.trim().is_empty() {
                        continue;
                    }
                    match &mut self.leaf {
                        LeafState::Paragraph { text: buf } => Paragraph::append(buf, &text),
                        _ => {
                            let mut buf = String::new();
                            Paragraph::append(&mut buf, &text);
                            self.leaf = LeafState::Paragraph { text: buf };
                        }
                    }
                }
                Segment::Code(code) => {
                    self.flush_leaf();
                    self.containers.push_block(BlockNode::CodeBlock {
                        language: code.language.clone(),
                        content: code.content.clone(),
                    });
                }
            }
        }
    }

    fn starts_with_resolved_code(&self, content: &str) -> bool {
        matches!(
            self.expansion.segments(content).first(),
            Some(Segment::Code(_))
        )
    }

    fn flush_leaf(&mut self) {
        match std::mem::replace(&mut self.leaf, LeafState::None) {
            LeafState::None => {}
            LeafState::Paragraph { text } => {
                if !text.is_empty() {
                    self.containers.push_block(BlockNode::Paragraph { text });
                }
            }
            // Unterminated fences run to the end of input.
            LeafState::Fence {
                language, lines, ..
            } => self.containers.push_block(BlockNode::CodeBlock {
                language,
                content: lines.join("\n"),
            }),
            LeafState::Indented { lines, .. } => self.containers.push_block(BlockNode::CodeBlock {
                language: None,
                content: lines.join("\n"),
            }),
        }
    }
}

fn item_frame(marker: &ListMarker<'_>) -> ContainerFrame {
    ContainerFrame::Item {
        marker_column: marker.column,
        content_column: marker.content_column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_document;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Vec<BlockNode> {
        parse_document(&Expansion::plain(text)).blocks().to_vec()
    }

    fn list(ordered: bool, items: Vec<Vec<BlockNode>>) -> BlockNode {
        BlockNode::List {
            ordered,
            items: items
                .into_iter()
                .map(|children| BlockNode::ListItem { children })
                .collect(),
        }
    }

    fn p(text: &str) -> BlockNode {
        BlockNode::paragraph(text)
    }

    #[test]
    fn paragraphs_join_lines_and_split_on_blanks() {
        assert_eq!(
            parse("one\n  two\n\nthree\n"),
            vec![p("one two"), p("three")]
        );
    }

    #[test]
    fn three_level_nesting() {
        let text = "- a\n  - b\n    1. c\n    2. d\n  - e\n- f\n";
        assert_eq!(
            parse(text),
            vec![list(
                false,
                vec![
                    vec![
                        p("a"),
                        list(
                            false,
                            vec![
                                vec![p("b"), list(true, vec![vec![p("c")], vec![p("d")]])],
                                vec![p("e")],
                            ]
                        ),
                    ],
                    vec![p("f")],
                ]
            )]
        );
    }

    #[test]
    fn fenced_code_attaches_to_deepest_item() {
        let text = "1. a\n   - b\n     - c\n       ```rust\n       let x = 1;\n         nested();\n       ```\n2. d\n";
        assert_eq!(
            parse(text),
            vec![list(
                true,
                vec![
                    vec![
                        p("a"),
                        list(
                            false,
                            vec![vec![
                                p("b"),
                                list(
                                    false,
                                    vec![vec![
                                        p("c"),
                                        BlockNode::code(Some("rust"), "let x = 1;\n  nested();"),
                                    ]]
                                ),
                            ]]
                        ),
                    ],
                    vec![p("d")],
                ]
            )]
        );
    }

    #[test]
    fn indented_code_is_relative_to_item_content() {
        let text = "- a\n  - b\n\n        code\n\n          more\n\n\n  after\n";
        assert_eq!(
            parse(text),
            vec![
                list(
                    false,
                    vec![vec![
                        p("a"),
                        list(
                            false,
                            vec![vec![p("b"), BlockNode::code(None, "code\n\n  more")]]
                        ),
                    ]]
                ),
                p("after"),
            ]
        );
    }

    #[test]
    fn indented_code_at_root() {
        assert_eq!(
            parse("text\n\n    fn main() {}\n\tlet y;\n\nend\n"),
            vec![
                p("text"),
                BlockNode::code(None, "fn main() {}\nlet y;"),
                p("end")
            ]
        );
    }

    #[test]
    fn indented_lines_continue_an_open_paragraph() {
        assert_eq!(parse("text\n    more text\n"), vec![p("text more text")]);
    }

    #[test]
    fn one_blank_line_keeps_the_list_open() {
        assert_eq!(
            parse("- a\n\n- b\n\n  still b\n"),
            vec![list(false, vec![vec![p("a")], vec![p("b"), p("still b")]])]
        );
    }

    #[test]
    fn two_blank_lines_end_every_list() {
        assert_eq!(
            parse("- a\n  - b\n\n\n  - c\n"),
            vec![
                list(false, vec![vec![p("a"), list(false, vec![vec![p("b")]])]]),
                list(false, vec![vec![p("c")]]),
            ]
        );
    }

    #[test]
    fn dedented_text_after_a_blank_leaves_the_list() {
        assert_eq!(
            parse("- a\n\nafter\n"),
            vec![list(false, vec![vec![p("a")]]), p("after")]
        );
    }

    #[test]
    fn lazy_continuation_stays_in_the_item() {
        assert_eq!(
            parse("- a\nb\n"),
            vec![list(false, vec![vec![p("a b")]])]
        );
    }

    #[test]
    fn changing_list_kind_starts_a_new_list() {
        assert_eq!(
            parse("- a\n1. b\n"),
            vec![
                list(false, vec![vec![p("a")]]),
                list(true, vec![vec![p("b")]])
            ]
        );
    }

    #[test]
    fn near_markers_are_paragraph_text() {
        assert_eq!(
            parse("- item\n  1.5 million\n  -dash\n"),
            vec![list(false, vec![vec![p("item 1.5 million -dash")]])]
        );
    }

    #[test]
    fn markers_interrupt_paragraphs() {
        assert_eq!(
            parse("intro\n- a\n"),
            vec![p("intro"), list(false, vec![vec![p("a")]])]
        );
    }

    #[test]
    fn fence_close_wins_inside_a_fence() {
        let text = "```\n- not a list\n1. nor this\n\n\n```\n- list\n";
        assert_eq!(
            parse(text),
            vec![
                BlockNode::code(None, "- not a list\n1. nor this\n\n"),
                list(false, vec![vec![p("list")]]),
            ]
        );
    }

    #[test]
    fn fence_on_the_marker_line() {
        assert_eq!(
            parse("- ```go\n  x := 1\n  ```\n- next\n"),
            vec![list(
                false,
                vec![vec![BlockNode::code(Some("go"), "x := 1")], vec![p("next")]]
            )]
        );
    }

    #[test]
    fn fence_directly_under_a_nested_item_belongs_to_it() {
        let text = "1. Alpha\n  1. Beta\n  ```go\n  123456789\n  ```\n2. Gamma\n";
        assert_eq!(
            parse(text),
            vec![list(
                true,
                vec![
                    vec![
                        p("Alpha"),
                        list(
                            true,
                            vec![vec![p("Beta"), BlockNode::code(Some("go"), "123456789")]]
                        ),
                    ],
                    vec![p("Gamma")],
                ]
            )]
        );
    }

    #[test]
    fn fence_in_an_item_ends_when_the_list_continues() {
        assert_eq!(
            parse("- a\n  ```\n  code\n- b\n- c\n"),
            vec![list(
                false,
                vec![
                    vec![p("a"), BlockNode::code(None, "code")],
                    vec![p("b")],
                    vec![p("c")],
                ]
            )]
        );
    }

    #[test]
    fn fence_in_an_item_ends_at_dedented_text() {
        assert_eq!(
            parse("1. a\n   ```sh\n   ls\n\n     -l\nafter\n"),
            vec![
                list(
                    true,
                    vec![vec![p("a"), BlockNode::code(Some("sh"), "ls\n\n  -l")]]
                ),
                p("after"),
            ]
        );
    }

    #[test]
    fn fence_at_the_marker_column_keeps_its_content() {
        assert_eq!(
            parse("1. a\n  - b\n  ```\n  x\n  - y\n  ```\n"),
            vec![list(
                true,
                vec![vec![
                    p("a"),
                    list(false, vec![vec![p("b"), BlockNode::code(None, "x\n- y")]]),
                ]]
            )]
        );
    }

    #[test]
    fn private_use_text_passes_through_paragraphs() {
        assert_eq!(
            parse("icon \u{E000}0\u{E001} here\n"),
            vec![p("icon \u{E000}0\u{E001} here")]
        );
    }

    #[test]
    fn unterminated_fence_runs_to_the_end() {
        assert_eq!(
            parse("```sh\necho hi\n"),
            vec![BlockNode::code(Some("sh"), "echo hi")]
        );
    }

    #[test]
    fn nested_marker_on_the_same_line() {
        assert_eq!(
            parse("- - deep\n"),
            vec![list(false, vec![vec![list(false, vec![vec![p("deep")]])]])]
        );
    }

    #[test]
    fn empty_items() {
        assert_eq!(
            parse("-\n-\n"),
            vec![list(false, vec![vec![], vec![]])]
        );
    }

    #[test]
    fn empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n\n").is_empty());
    }
}
