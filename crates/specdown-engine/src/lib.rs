pub mod error;
pub mod includes;
pub mod parsing;
pub mod pipeline;
pub mod render;
pub mod store;
pub mod title_block;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use error::{Diagnostic, IncludeError};
pub use includes::{Expansion, LogicalPath};
pub use parsing::{
    blocks::{BlockNode, DocumentTree},
    parse_document,
};
pub use pipeline::{Extensions, Options, Output, Pipeline};
pub use render::{HtmlRenderer, OutlineRenderer, Renderer, render};
pub use store::{DirStore, FileStore, MemoryStore};
pub use title_block::TitleBlock;
