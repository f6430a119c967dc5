use std::fmt;

use relative_path::{Component, RelativePath, RelativePathBuf};

use crate::error::IncludeError;

/// Prefix that anchors an inclusion target at the store root.
pub const ROOT_MARKER: char = '/';

/// A normalized file location inside the virtual file hierarchy.
///
/// Always root-relative, never empty, and free of `.`/`..` segments.
/// Displays with a leading `/`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogicalPath(RelativePathBuf);

impl LogicalPath {
    /// Parses a path relative to the store root. A leading `/` is optional.
    pub fn parse(raw: &str) -> Result<Self, IncludeError> {
        let rooted = raw.strip_prefix(ROOT_MARKER).unwrap_or(raw);
        check_shape(raw)?;
        normalize(raw, RelativePath::new(rooted))
    }

    pub fn as_relative_path(&self) -> &RelativePath {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The directory containing this file (empty for files at the root).
    pub fn directory(&self) -> &RelativePath {
        self.0.parent().unwrap_or_else(|| RelativePath::new(""))
    }

    /// File-name extension, used as the language hint for code inclusions.
    pub fn extension(&self) -> Option<&str> {
        self.0.extension().filter(|ext| !ext.is_empty())
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ROOT_MARKER}{}", self.0)
    }
}

/// Resolves an inclusion target written inside `base`.
///
/// Root-anchored targets (`/G.md`) start from the store root; anything else
/// starts from the directory of `base`, never from the root document.
pub fn resolve(base: &LogicalPath, raw: &str) -> Result<LogicalPath, IncludeError> {
    if raw.starts_with(ROOT_MARKER) {
        return LogicalPath::parse(raw);
    }
    check_shape(raw)?;
    normalize(raw, &base.directory().join(raw))
}

fn check_shape(raw: &str) -> Result<(), IncludeError> {
    if raw.trim().is_empty() {
        return Err(invalid(raw, "empty path"));
    }
    if raw.ends_with(ROOT_MARKER) {
        return Err(invalid(raw, "names a directory"));
    }
    if raw.contains('\\') {
        return Err(invalid(raw, "backslash separators are not supported"));
    }
    Ok(())
}

fn normalize(raw: &str, path: &RelativePath) -> Result<LogicalPath, IncludeError> {
    let mut segments: Vec<&str> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if segments.pop().is_none() {
                    return Err(invalid(raw, "escapes the store root"));
                }
            }
            Component::Normal(name) => segments.push(name),
        }
    }
    if segments.is_empty() {
        return Err(invalid(raw, "does not name a file"));
    }
    Ok(LogicalPath(RelativePathBuf::from(segments.join("/"))))
}

fn invalid(raw: &str, reason: &'static str) -> IncludeError {
    IncludeError::InvalidPath {
        path: raw.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn path(s: &str) -> LogicalPath {
        LogicalPath::parse(s).unwrap()
    }

    #[rstest]
    #[case("A.md", "/A.md")]
    #[case("/A.md", "/A.md")]
    #[case("X/./B.md", "/X/B.md")]
    #[case("X/Y/../B.md", "/X/B.md")]
    fn parse_normalizes(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(path(raw).to_string(), expected);
    }

    #[rstest]
    #[case("/A.md", "C.md", "/C.md")]
    #[case("/X/B.md", "C.md", "/X/C.md")]
    #[case("/X/B.md", "../D.md", "/D.md")]
    #[case("/X/B.md", "/G.md", "/G.md")]
    #[case("/X/Y/B.md", "../../G.md", "/G.md")]
    #[case("/X/B.md", "./sub/../E.md", "/X/E.md")]
    #[case("/X/B.md", "/Y/../Z/F.md", "/Z/F.md")]
    fn resolve_against_including_directory(
        #[case] base: &str,
        #[case] raw: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(resolve(&path(base), raw).unwrap().to_string(), expected);
    }

    #[rstest]
    #[case("/A.md", "../A.md")]
    #[case("/X/B.md", "../../A.md")]
    #[case("/X/B.md", "/../A.md")]
    #[case("/X/B.md", "")]
    #[case("/X/B.md", "dir/")]
    #[case("/X/B.md", "..")]
    #[case("/X/B.md", "a\\b.md")]
    fn resolve_rejects_invalid_targets(#[case] base: &str, #[case] raw: &str) {
        let err = resolve(&path(base), raw).unwrap_err();
        assert!(
            matches!(err, IncludeError::InvalidPath { .. }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn extension_and_directory() {
        let p = path("/code/main.go");
        assert_eq!(p.extension(), Some("go"));
        assert_eq!(p.directory().as_str(), "code");
        assert_eq!(path("Makefile").extension(), None);
        assert_eq!(path("Makefile").directory().as_str(), "");
    }
}
