use html_escape::{encode_double_quoted_attribute, encode_text};

use super::Renderer;
use crate::parsing::blocks::BlockNode;

/// Renders the block tree as an HTML fragment.
///
/// Paragraphs in a list item that holds at most one paragraph are written
/// without `<p>` tags.
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    out: String,
    /// One entry per open list item: whether it is tight.
    tight: Vec<bool>,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn in_tight_item(&self) -> bool {
        self.tight.last().copied().unwrap_or(false)
    }
}

impl Renderer for HtmlRenderer {
    fn render_document(&mut self, children: &[BlockNode]) {
        self.render_children(children);
    }

    fn render_list(&mut self, ordered: bool, items: &[BlockNode]) {
        let tag = if ordered { "ol" } else { "ul" };
        self.out.push_str(&format!("<{tag}>\n"));
        self.render_children(items);
        self.out.push_str(&format!("</{tag}>\n"));
    }

    fn render_list_item(&mut self, children: &[BlockNode]) {
        let paragraphs = children
            .iter()
            .filter(|c| matches!(c, BlockNode::Paragraph { .. }))
            .count();
        self.tight.push(paragraphs <= 1);
        self.out.push_str("<li>");
        self.render_children(children);
        self.out.push_str("</li>\n");
        self.tight.pop();
    }

    fn render_code_block(&mut self, language: Option<&str>, content: &str) {
        match language {
            Some(lang) => self.out.push_str(&format!(
                "<pre><code class=\"language-{}\">",
                encode_double_quoted_attribute(lang)
            )),
            None => self.out.push_str("<pre><code>"),
        }
        self.out.push_str(&encode_text(content));
        if !content.is_empty() && !content.ends_with('\n') {
            self.out.push('\n');
        }
        self.out.push_str("</code></pre>\n");
    }

    fn render_paragraph(&mut self, text: &str) {
        if self.in_tight_item() {
            self.out.push_str(&format!("{}\n", encode_text(text)));
        } else {
            self.out.push_str(&format!("<p>{}</p>\n", encode_text(text)));
        }
    }

    fn finish(&mut self) -> String {
        self.tight.clear();
        std::mem::take(&mut self.out)
    }
}
