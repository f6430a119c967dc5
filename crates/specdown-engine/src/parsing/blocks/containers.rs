use super::types::{BlockNode, ContainerFrame};

#[derive(Debug)]
struct Frame {
    container: ContainerFrame,
    children: Vec<BlockNode>,
}

impl Frame {
    fn new(container: ContainerFrame) -> Self {
        Self {
            container,
            children: vec![],
        }
    }

    fn into_node(self) -> BlockNode {
        match self.container {
            ContainerFrame::Document => BlockNode::Document {
                children: self.children,
            },
            ContainerFrame::List { ordered, .. } => BlockNode::List {
                ordered,
                items: self.children,
            },
            ContainerFrame::Item { .. } => BlockNode::ListItem {
                children: self.children,
            },
        }
    }
}

/// The open containers, document at the bottom.
///
/// Nesting lives on this heap-allocated stack rather than the call stack,
/// so depth is bounded by memory alone. A closed frame becomes a node
/// appended to the frame below it.
#[derive(Debug)]
pub struct ContainerStack(Vec<Frame>);

impl Default for ContainerStack {
    fn default() -> Self {
        Self(vec![Frame::new(ContainerFrame::Document)])
    }
}

impl ContainerStack {
    pub fn top(&self) -> &ContainerFrame {
        &self.top_frame().container
    }

    /// Marker column of the item enclosing the innermost item, if any.
    pub fn parent_item_marker(&self) -> Option<usize> {
        self.0
            .iter()
            .rev()
            .filter_map(|f| match f.container {
                ContainerFrame::Item { marker_column, .. } => Some(marker_column),
                _ => None,
            })
            .nth(1)
    }

    /// Content column of the innermost container (0 at the document root).
    pub fn content_column(&self) -> usize {
        self.0
            .iter()
            .rev()
            .find_map(|f| match f.container {
                ContainerFrame::Item { content_column, .. } => Some(content_column),
                _ => None,
            })
            .unwrap_or(0)
    }

    pub fn has_lists(&self) -> bool {
        self.0.len() > 1
    }

    pub fn open(&mut self, container: ContainerFrame) {
        self.0.push(Frame::new(container));
    }

    /// Appends a finished leaf block to the innermost container.
    pub fn push_block(&mut self, node: BlockNode) {
        self.top_frame_mut().children.push(node);
    }

    /// Closes the innermost container. The document is never closed here.
    pub fn close_top(&mut self) {
        if self.0.len() > 1
            && let Some(frame) = self.0.pop()
        {
            let node = frame.into_node();
            self.top_frame_mut().children.push(node);
        }
    }

    /// Closes every open list, returning to the document root.
    pub fn close_lists(&mut self) {
        while self.has_lists() {
            self.close_top();
        }
    }

    /// Closes everything and returns the document's children.
    pub fn finish(mut self) -> Vec<BlockNode> {
        self.close_lists();
        self.0
            .pop()
            .map(|frame| frame.children)
            .unwrap_or_default()
    }

    fn top_frame(&self) -> &Frame {
        // The document frame is never popped before `finish`.
        &self.0[self.0.len() - 1]
    }

    fn top_frame_mut(&mut self) -> &mut Frame {
        let last = self.0.len() - 1;
        &mut self.0[last]
    }
}
