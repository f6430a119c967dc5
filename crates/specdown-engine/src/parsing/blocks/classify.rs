use crate::parsing::lines::{LineRef, leading_indent};

use super::kinds::{CodeFence, FenceSig, ListMarker, ListMarkers};

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently
/// without reference to surrounding context.
#[derive(Debug, Clone)]
pub struct LineClass<'a> {
    /// The full line, without its terminator.
    pub text: &'a str,
    /// Whether the line is blank (whitespace only).
    pub is_blank: bool,
    /// Column of the first non-whitespace character (tabs expanded).
    pub indent: usize,
    /// The line after its leading whitespace.
    pub content: &'a str,
    /// A list marker opening the content, if the marker grammar matches exactly.
    pub marker: Option<ListMarker<'a>>,
    /// If the content looks like a fence opener/closer.
    pub fence_sig: Option<FenceSig<'a>>,
}

/// Classifies individual lines for the block parsing phase.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies a line into a [`LineClass`] containing local facts.
    pub fn classify<'a>(&self, lr: &LineRef<'a>) -> LineClass<'a> {
        self.classify_at(lr.text, 0)
    }

    /// Classifies text starting at `column`, such as the content that
    /// follows a list marker on the same line.
    pub fn classify_at<'a>(&self, text: &'a str, column: usize) -> LineClass<'a> {
        let (indent, idx) = leading_indent(text, column);
        let content = text[idx..].trim_end_matches(['\r', '\n']);
        let is_blank = content.trim().is_empty();

        LineClass {
            text,
            is_blank,
            indent,
            content,
            marker: if is_blank {
                None
            } else {
                ListMarkers::parse(content, indent)
            },
            fence_sig: CodeFence::sig(content),
        }
    }
}
