//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! Snapshots are taken with the outline renderer (`crate::render::OutlineRenderer`),
//! which prints the tree one node per line. The `invariants` module checks the
//! structural guarantees every parse must hold regardless of input.

pub mod invariants;

pub use invariants::check as invariants;
