use std::borrow::Cow;

use crate::error::Diagnostic;

use super::LogicalPath;

const PLACEHOLDER_OPEN: char = '\u{E000}';
const PLACEHOLDER_CLOSE: char = '\u{E001}';
const OPEN_LEN: usize = PLACEHOLDER_OPEN.len_utf8();

/// A literal-code inclusion resolved by the preprocessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeInclusion {
    /// Language hint taken from the target's file extension.
    pub language: Option<String>,
    pub content: String,
    pub source: LogicalPath,
}

/// The output of the inclusion pass.
///
/// Literal-code inclusions are stored in `code_blocks` and referenced from
/// `text` by placeholder tokens, so the block parser receives them as
/// finished code blocks rather than re-reading their lines.
#[derive(Debug, Default)]
pub struct Expansion {
    pub text: String,
    pub code_blocks: Vec<CodeInclusion>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Expansion {
    /// Wraps text that needs no expansion.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            text: escape_literal(&text).into_owned(),
            ..Self::default()
        }
    }

    /// Records a code inclusion and returns the placeholder standing in for it.
    pub(crate) fn push_code(&mut self, code: CodeInclusion) -> String {
        let index = self.code_blocks.len();
        self.code_blocks.push(code);
        format!("{PLACEHOLDER_OPEN}{index}{PLACEHOLDER_CLOSE}")
    }

    /// Splits a line into text and resolved code-block segments.
    ///
    /// Adjacent text is returned as one segment. Escaped placeholder
    /// characters come back as the single character the source held, and
    /// tokens that do not name a recorded code block stay text.
    pub fn segments<'a>(&'a self, line: &'a str) -> Vec<Segment<'a>> {
        let mut out = Vec::new();
        let mut text = TextRun::default();
        let mut rest = line;

        while let Some(open) = rest.find(PLACEHOLDER_OPEN) {
            let after = &rest[open + OPEN_LEN..];
            if after.starts_with(PLACEHOLDER_OPEN) {
                text.push(&rest[..open + OPEN_LEN]);
                rest = &after[OPEN_LEN..];
            } else if let Some((code, len)) = self.resolve_token(after) {
                text.push(&rest[..open]);
                if let Some(run) = text.take() {
                    out.push(Segment::Text(run));
                }
                out.push(Segment::Code(code));
                rest = &after[len..];
            } else {
                text.push(&rest[..open + OPEN_LEN]);
                rest = after;
            }
        }

        text.push(rest);
        if let Some(run) = text.take() {
            out.push(Segment::Text(run));
        }
        out
    }

    /// Replaces placeholders in `line` with the raw content they stand for.
    pub fn inline_placeholders(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        for segment in self.segments(line) {
            match segment {
                Segment::Text(text) => out.push_str(&text),
                Segment::Code(code) => out.push_str(&code.content),
            }
        }
        out
    }

    /// The code block named by the token body at the start of `after`, and
    /// the token's remaining byte length.
    fn resolve_token(&self, after: &str) -> Option<(&CodeInclusion, usize)> {
        let close = after.find(PLACEHOLDER_CLOSE)?;
        let index = after[..close].parse::<usize>().ok()?;
        let code = self.code_blocks.get(index)?;
        Some((code, close + PLACEHOLDER_CLOSE.len_utf8()))
    }
}

/// Doubles every placeholder-open character in source text so that it can
/// never be mistaken for a placeholder.
pub(crate) fn escape_literal(text: &str) -> Cow<'_, str> {
    if text.contains(PLACEHOLDER_OPEN) {
        Cow::Owned(text.replace(
            PLACEHOLDER_OPEN,
            &format!("{PLACEHOLDER_OPEN}{PLACEHOLDER_OPEN}"),
        ))
    } else {
        Cow::Borrowed(text)
    }
}

/// Consecutive text pieces, borrowed while there is only one.
#[derive(Default)]
struct TextRun<'a>(Option<Cow<'a, str>>);

impl<'a> TextRun<'a> {
    fn push(&mut self, piece: &'a str) {
        if piece.is_empty() {
            return;
        }
        self.0 = Some(match self.0.take() {
            None => Cow::Borrowed(piece),
            Some(run) => Cow::Owned(run.into_owned() + piece),
        });
    }

    fn take(&mut self) -> Option<Cow<'a, str>> {
        self.0.take()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(Cow<'a, str>),
    Code(&'a CodeInclusion),
}
