pub mod blocks;
pub mod lines;
pub mod snapshot;

#[cfg(test)]
mod tests;

use crate::includes::Expansion;

use blocks::{BlockBuilder, DocumentTree, MarkdownLineClassifier};
use lines::lines_with_numbers;

/// Parses expanded text into a block tree.
///
/// Placeholders recorded in `expansion` become code blocks at their position.
pub fn parse_document(expansion: &Expansion) -> DocumentTree {
    let classifier = MarkdownLineClassifier;
    let mut builder = BlockBuilder::new(expansion);

    for lr in lines_with_numbers(&expansion.text) {
        let lc = classifier.classify(&lr);
        builder.push(&lc);
    }

    builder.finish()
}
