use crate::error::{Diagnostic, IncludeError};
use crate::store::FileStore;

use super::directive::{self, Directive, DisplayMode};
use super::expansion::{CodeInclusion, Expansion, escape_literal};
use super::path::{LogicalPath, resolve};
use super::selector::select;

/// Default limit on nested inline inclusions.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Pass 1: expands inclusion directives, recursively, against a store.
pub struct Preprocessor<'s, S: FileStore + ?Sized> {
    store: &'s S,
    max_depth: usize,
}

impl<'s, S: FileStore + ?Sized> Preprocessor<'s, S> {
    pub fn new(store: &'s S, max_depth: usize) -> Self {
        Self { store, max_depth }
    }

    /// Expands the document at `root`.
    ///
    /// Only a failure to read `root` itself is returned as an error. Failing
    /// directives are replaced by nothing and reported in
    /// [`Expansion::diagnostics`].
    pub fn preprocess(&self, root: &LogicalPath) -> Result<Expansion, IncludeError> {
        let text = self.store.read_file(root)?;
        let mut expansion = Expansion::default();
        let mut chain = vec![root.clone()];
        expansion.text = self.expand(&text, root, &mut chain, &mut expansion);
        Ok(expansion)
    }

    /// Expands `text` read from `base`; `chain` holds every file being
    /// expanded, `base` last.
    fn expand(
        &self,
        text: &str,
        base: &LogicalPath,
        chain: &mut Vec<LogicalPath>,
        expansion: &mut Expansion,
    ) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for directive in directive::scan(text) {
            out.push_str(&escape_literal(&text[last..directive.span.start]));
            last = directive.span.end;

            match self.include(&directive, base, chain, expansion) {
                Ok(substitution) => out.push_str(&substitution),
                Err(error) => {
                    let diagnostic = Diagnostic {
                        file: base.clone(),
                        directive: text[directive.span.clone()].to_string(),
                        error,
                    };
                    log::warn!("{diagnostic}");
                    expansion.diagnostics.push(diagnostic);
                }
            }
        }

        out.push_str(&escape_literal(&text[last..]));
        out
    }

    fn include(
        &self,
        directive: &Directive<'_>,
        base: &LogicalPath,
        chain: &mut Vec<LogicalPath>,
        expansion: &mut Expansion,
    ) -> Result<String, IncludeError> {
        let target = resolve(base, directive.target)?;
        let selector = directive.selector()?;

        match directive.mode {
            DisplayMode::Code => {
                let content = self.store.read_file(&target)?;
                let selected = select(&target, &content, selector.as_ref())?;
                log::debug!("{base}: code block from {target}");
                Ok(expansion.push_code(CodeInclusion {
                    language: target.extension().map(str::to_string),
                    content: strip_final_newline(selected),
                    source: target,
                }))
            }
            DisplayMode::Inline => {
                if chain.contains(&target) {
                    let mut cycle = chain.clone();
                    cycle.push(target);
                    return Err(IncludeError::CyclicInclusion { chain: cycle });
                }
                if chain.len() > self.max_depth {
                    return Err(IncludeError::DepthExceeded {
                        path: target,
                        limit: self.max_depth,
                    });
                }

                let content = self.store.read_file(&target)?;
                let selected = select(&target, &content, selector.as_ref())?;
                log::debug!("{base}: including {target}");

                chain.push(target.clone());
                let expanded = self.expand(&selected, &target, chain, expansion);
                chain.pop();
                Ok(expanded)
            }
        }
    }
}

fn strip_final_newline(mut content: String) -> String {
    if content.ends_with('\n') {
        content.pop();
        if content.ends_with('\r') {
            content.pop();
        }
    }
    content
}
