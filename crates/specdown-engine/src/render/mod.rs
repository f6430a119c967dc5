//! # Rendering
//!
//! A [`Renderer`] receives the block tree one node at a time in pre-order.
//! Implementations only decide what each node looks like; the provided
//! [`Renderer::render_node`] and [`Renderer::render_children`] do the walk.
//!
//! - **`html`**: `HtmlRenderer`, the default output format
//! - **`outline`**: `OutlineRenderer`, an indented tree for debugging and snapshots

pub mod html;
pub mod outline;

pub use html::HtmlRenderer;
pub use outline::OutlineRenderer;

use crate::parsing::blocks::{BlockNode, DocumentTree};

/// Turns a block tree into text.
///
/// Object safe, so callers can choose a format at runtime.
pub trait Renderer {
    fn render_document(&mut self, children: &[BlockNode]);

    fn render_list(&mut self, ordered: bool, items: &[BlockNode]);

    fn render_list_item(&mut self, children: &[BlockNode]);

    fn render_code_block(&mut self, language: Option<&str>, content: &str);

    /// `text` is the paragraph's space-joined lines.
    fn render_paragraph(&mut self, text: &str);

    /// Returns everything rendered so far and resets the output.
    fn finish(&mut self) -> String;

    fn render_node(&mut self, node: &BlockNode) {
        match node {
            BlockNode::Document { children } => self.render_document(children),
            BlockNode::List { ordered, items } => self.render_list(*ordered, items),
            BlockNode::ListItem { children } => self.render_list_item(children),
            BlockNode::CodeBlock { language, content } => {
                self.render_code_block(language.as_deref(), content)
            }
            BlockNode::Paragraph { text } => self.render_paragraph(text),
        }
    }

    fn render_children(&mut self, children: &[BlockNode]) {
        for child in children {
            self.render_node(child);
        }
    }
}

/// Renders `tree` with `renderer` and returns the output.
pub fn render(tree: &DocumentTree, renderer: &mut dyn Renderer) -> String {
    renderer.render_node(tree.root());
    renderer.finish()
}
