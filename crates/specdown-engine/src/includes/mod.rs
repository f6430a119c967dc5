//! # Inclusion (Pass 1)
//!
//! Resolves `{{path}}` and `<{{path}}>` directives against a [`FileStore`].
//!
//! ## Modules
//!
//! - **`path`**: `LogicalPath` and the resolver for root-anchored and
//!   sibling-relative targets
//! - **`selector`**: line-range and marker-pair extraction
//! - **`directive`**: finds directives in text
//! - **`expansion`**: the pass output, with placeholders for code inclusions
//! - **`preprocess`**: the recursive `Preprocessor` with cycle tracking
//!
//! ## Key Invariants
//!
//! - Relative targets resolve against the including file, not the root document
//! - A path already being expanded is never expanded again (no cycles)
//! - Code inclusions are never expanded
//!
//! [`FileStore`]: crate::store::FileStore

pub mod directive;
pub mod expansion;
pub mod path;
pub mod preprocess;
pub mod selector;

pub use directive::{Anchoring, Directive, DisplayMode};
pub use expansion::{CodeInclusion, Expansion, Segment};
pub use path::{LogicalPath, ROOT_MARKER, resolve};
pub use preprocess::{DEFAULT_MAX_DEPTH, Preprocessor};
pub use selector::{Selector, select};
