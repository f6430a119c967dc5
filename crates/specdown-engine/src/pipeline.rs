//! The two passes wired together: expand, parse, render.

use serde::{Deserialize, Serialize};

use crate::error::{Diagnostic, IncludeError};
use crate::includes::{DEFAULT_MAX_DEPTH, Expansion, LogicalPath, Preprocessor};
use crate::parsing::{blocks::DocumentTree, parse_document};
use crate::render::{Renderer, render};
use crate::store::FileStore;
use crate::title_block::{self, TitleBlock};

/// Optional syntax, all off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extensions {
    /// Expand `{{file}}` and `<{{file}}` directives.
    pub include: bool,
    /// Decode a leading `%` title block.
    pub title_block: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub extensions: Extensions,
    /// Limit on nested inline inclusions.
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            extensions: Extensions::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A rendered document.
#[derive(Debug)]
pub struct Output {
    pub body: String,
    pub title: Option<TitleBlock>,
    /// Inclusion failures, in document order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs documents from one store through both passes.
///
/// Holds no per-document state, so one pipeline can process any number of
/// documents.
pub struct Pipeline<'s, S: FileStore + ?Sized> {
    store: &'s S,
    options: Options,
}

impl<'s, S: FileStore + ?Sized> Pipeline<'s, S> {
    pub fn new(store: &'s S, options: Options) -> Self {
        Self { store, options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Pass 1. With inclusion disabled the root is read as is.
    pub fn expand(&self, root: &LogicalPath) -> Result<Expansion, IncludeError> {
        if self.options.extensions.include {
            Preprocessor::new(self.store, self.options.max_depth).preprocess(root)
        } else {
            self.store.read_file(root).map(Expansion::plain)
        }
    }

    /// Pass 2.
    pub fn parse(&self, expansion: &Expansion) -> DocumentTree {
        parse_document(expansion)
    }

    /// Expands, parses and renders the document at `root`.
    pub fn run(
        &self,
        root: &LogicalPath,
        renderer: &mut dyn Renderer,
    ) -> Result<Output, IncludeError> {
        let mut expansion = self.expand(root)?;
        log::debug!(
            "expanded {root}: {} bytes, {} code inclusions, {} diagnostics",
            expansion.text.len(),
            expansion.code_blocks.len(),
            expansion.diagnostics.len()
        );

        let title = if self.options.extensions.title_block {
            let (title, body) = title_block::extract(&expansion.text);
            let body = body.to_string();
            expansion.text = body;
            title
        } else {
            None
        };

        let tree = self.parse(&expansion);
        let body = render(&tree, renderer);

        Ok(Output {
            body,
            title,
            diagnostics: expansion.diagnostics,
        })
    }
}
