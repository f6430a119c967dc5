use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::IncludeError;

use super::{ROOT_MARKER, Selector};

/// `<` marks literal code display, `{{target}}` the inclusion, and the
/// selector may sit inside the braces or directly after them. A selector
/// body ends at the first unescaped `]`.
static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<code><)?\{\{(?P<target>[^\s{}\[\]]+)(?:\[(?P<inner>(?:[^\]\\\n]|\\.)*)\])?\}\}(?:\[(?P<outer>(?:[^\]\\\n]|\\.)*)\])?(?P<close>>)?",
    )
    .expect("directive pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchoring {
    /// `/path`: resolved from the store root.
    Root,
    /// `path`: resolved from the including file's directory.
    Relative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// `{{path}}`: substituted and expanded recursively.
    Inline,
    /// `<{{path}}>`: substituted verbatim as a code block.
    Code,
}

/// One inclusion directive found in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'t> {
    /// Byte range of the whole directive in the scanned text.
    pub span: Range<usize>,
    pub target: &'t str,
    pub anchoring: Anchoring,
    pub mode: DisplayMode,
    /// Raw selector body, without brackets.
    pub selector: Option<&'t str>,
}

impl Directive<'_> {
    /// Parses the selector body, if any.
    pub fn selector(&self) -> Result<Option<Selector>, IncludeError> {
        self.selector.map(Selector::parse).transpose()
    }
}

/// Finds every directive in `text`, left to right.
pub fn scan(text: &str) -> impl Iterator<Item = Directive<'_>> + '_ {
    DIRECTIVE.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let target = caps.name("target")?.as_str();
        let mode = if caps.name("code").is_some() {
            DisplayMode::Code
        } else {
            DisplayMode::Inline
        };

        // A trailing `>` only belongs to the code form.
        let mut end = whole.end();
        if mode == DisplayMode::Inline && caps.name("close").is_some() {
            end -= 1;
        }

        let selector = match (caps.name("inner"), caps.name("outer")) {
            (Some(inner), _) => Some(inner.as_str()),
            (None, Some(outer)) => Some(outer.as_str()),
            (None, None) => None,
        };

        Some(Directive {
            span: whole.start()..end,
            target,
            anchoring: if target.starts_with(ROOT_MARKER) {
                Anchoring::Root
            } else {
                Anchoring::Relative
            },
            mode,
            selector,
        })
    })
}
