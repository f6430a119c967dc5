//! # Block Parsing
//!
//! Two-phase block parsing over an explicit container stack.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): Each line is classified into a `LineClass`
//!    containing local facts (indentation column, list marker, fence detection, blank status)
//!
//! 2. **Block Construction** (`builder`): A `BlockBuilder` keeps a stack of open
//!    containers (document, lists, items) plus at most one open leaf, and closes
//!    frames into `BlockNode`s as indentation moves outward
//!
//! ## Modules
//!
//! - **`types`**: Core types (`BlockNode`, `ContainerFrame`, `DocumentTree`)
//! - **`kinds`**: Block-specific recognizers (CodeFence, IndentedCode, ListMarkers, Paragraph)
//! - **`classify`**: `MarkdownLineClassifier` produces `LineClass` for each line
//! - **`containers`**: `ContainerStack` holding the open frames
//! - **`builder`**: `BlockBuilder` state machine for block construction
//!
//! ## Key Invariants
//!
//! - Nesting depth is unbounded; no recursion tracks container depth
//! - Fenced code blocks are raw zones: no block recognition inside
//! - A code block belongs to the innermost item whose content column it reaches

pub mod builder;
pub mod classify;
pub mod containers;
pub mod kinds;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{LineClass, MarkdownLineClassifier};
pub use containers::ContainerStack;
pub use types::{BlockNode, ContainerFrame, DocumentTree};
