use super::Renderer;
use crate::parsing::blocks::BlockNode;

const INDENT: &str = "  ";

/// Renders the block tree as an indented outline, one node per line.
///
/// ```text
/// Document
///   List(ordered)
///     Item
///       Paragraph "Beta"
///       Code(go)
///         | 123456789
/// ```
#[derive(Debug, Default)]
pub struct OutlineRenderer {
    out: String,
    depth: usize,
}

impl OutlineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn nested(&mut self, label: &str, children: &[BlockNode]) {
        self.line(label);
        self.depth += 1;
        self.render_children(children);
        self.depth -= 1;
    }
}

impl Renderer for OutlineRenderer {
    fn render_document(&mut self, children: &[BlockNode]) {
        self.nested("Document", children);
    }

    fn render_list(&mut self, ordered: bool, items: &[BlockNode]) {
        let label = if ordered {
            "List(ordered)"
        } else {
            "List(bullet)"
        };
        self.nested(label, items);
    }

    fn render_list_item(&mut self, children: &[BlockNode]) {
        self.nested("Item", children);
    }

    fn render_code_block(&mut self, language: Option<&str>, content: &str) {
        match language {
            Some(lang) => self.line(&format!("Code({lang})")),
            None => self.line("Code"),
        }
        self.depth += 1;
        for line in content.lines() {
            if line.is_empty() {
                self.line("|");
            } else {
                self.line(&format!("| {line}"));
            }
        }
        self.depth -= 1;
    }

    fn render_paragraph(&mut self, text: &str) {
        self.line(&format!("Paragraph {text:?}"));
    }

    fn finish(&mut self) -> String {
        self.depth = 0;
        std::mem::take(&mut self.out)
    }
}
