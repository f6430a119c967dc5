/// A frame in the container stack representing a nesting level.
///
/// Containers wrap leaf blocks (paragraphs, code blocks) and can nest arbitrarily.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerFrame {
    /// The document root; always at the bottom of the stack.
    Document,
    /// A list whose markers sit at `column`.
    List { ordered: bool, column: usize },
    /// A list item.
    Item {
        /// Column of the item's marker.
        marker_column: usize,
        /// Column where the item's content starts; nested code
        /// indentation is measured from here.
        content_column: usize,
    },
}

/// A block-level node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockNode {
    Document {
        children: Vec<BlockNode>,
    },
    /// Every item is a [`BlockNode::ListItem`].
    List {
        ordered: bool,
        items: Vec<BlockNode>,
    },
    ListItem {
        children: Vec<BlockNode>,
    },
    CodeBlock {
        language: Option<String>,
        /// Verbatim, with container indentation removed.
        content: String,
    },
    Paragraph {
        /// Space-joined lines, for the downstream inline stage.
        text: String,
    },
}

impl BlockNode {
    pub fn paragraph(text: impl Into<String>) -> Self {
        BlockNode::Paragraph { text: text.into() }
    }

    pub fn code(language: Option<&str>, content: impl Into<String>) -> Self {
        BlockNode::CodeBlock {
            language: language.map(str::to_string),
            content: content.into(),
        }
    }

    /// Child nodes of containers; empty for leaves.
    pub fn children(&self) -> &[BlockNode] {
        match self {
            BlockNode::Document { children } | BlockNode::ListItem { children } => children,
            BlockNode::List { items, .. } => items,
            BlockNode::CodeBlock { .. } | BlockNode::Paragraph { .. } => &[],
        }
    }
}

/// The result of block parsing: a root [`BlockNode::Document`].
///
/// Immutable once built; handed as a whole to a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTree {
    root: BlockNode,
}

impl DocumentTree {
    pub fn new(children: Vec<BlockNode>) -> Self {
        Self {
            root: BlockNode::Document { children },
        }
    }

    pub fn root(&self) -> &BlockNode {
        &self.root
    }

    /// Top-level blocks.
    pub fn blocks(&self) -> &[BlockNode] {
        self.root.children()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks().is_empty()
    }
}
