use std::path::PathBuf;

use crate::includes::LogicalPath;

/// Failures raised while resolving an inclusion directive.
///
/// Apart from a failure to read the root document, none of these abort a
/// pipeline run: the preprocessor turns them into [`Diagnostic`]s.
#[derive(Debug, thiserror::Error)]
pub enum IncludeError {
    #[error("File not found: {0}")]
    NotFound(LogicalPath),
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },
    #[error("Line range {start}:{end} is out of bounds for {path} ({lines} lines)")]
    RangeOutOfBounds {
        path: LogicalPath,
        start: usize,
        end: usize,
        lines: usize,
    },
    #[error("Marker /{pattern}/ not found in {path}")]
    MarkerNotFound { path: LogicalPath, pattern: String },
    #[error("Cyclic inclusion: {}", format_chain(.chain))]
    CyclicInclusion { chain: Vec<LogicalPath> },
    #[error("Inclusion depth limit of {limit} exceeded at {path}")]
    DepthExceeded { path: LogicalPath, limit: usize },
    #[error("Invalid selector '[{selector}]': {reason}")]
    InvalidSelector { selector: String, reason: String },
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn format_chain(chain: &[LogicalPath]) -> String {
    chain
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// A non-fatal inclusion failure, reported alongside the expanded output.
#[derive(Debug)]
pub struct Diagnostic {
    /// The file containing the failing directive.
    pub file: LogicalPath,
    /// The directive text as written.
    pub directive: String,
    pub error: IncludeError,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: {}", self.file, self.directive, self.error)
    }
}
