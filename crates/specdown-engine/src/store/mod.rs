//! The virtual file store: the only I/O boundary the pipeline touches.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::IncludeError;
use crate::includes::LogicalPath;

/// Read-only access to files by logical path.
///
/// Implementations must tolerate concurrent reads from independent pipeline
/// runs. The pipeline never assumes a repeated read is cheap.
pub trait FileStore: Send + Sync {
    /// Returns the content of `path`, or [`IncludeError::NotFound`].
    fn read_file(&self, path: &LogicalPath) -> Result<String, IncludeError>;
}

/// A store held entirely in memory; the usual choice for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    files: BTreeMap<LogicalPath, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from `(path, content)` pairs; paths may start with `/`.
    pub fn from_files<'a, I>(files: I) -> Result<Self, IncludeError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut store = Self::new();
        for (path, content) in files {
            store.insert(path, content)?;
        }
        Ok(store)
    }

    pub fn insert(&mut self, path: &str, content: impl Into<String>) -> Result<(), IncludeError> {
        self.files.insert(LogicalPath::parse(path)?, content.into());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileStore for MemoryStore {
    fn read_file(&self, path: &LogicalPath) -> Result<String, IncludeError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| IncludeError::NotFound(path.clone()))
    }
}

/// A store backed by a directory on disk.
///
/// Logical paths cannot contain `..`, so reads never leave `root`.
/// Content that is not valid UTF-8 is decoded lossily.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, IncludeError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(IncludeError::Io {
                source: io::Error::new(io::ErrorKind::NotFound, "store root is not a directory"),
                path: root,
            });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileStore for DirStore {
    fn read_file(&self, path: &LogicalPath) -> Result<String, IncludeError> {
        let absolute_path = path.as_relative_path().to_path(&self.root);
        match fs::read(&absolute_path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(IncludeError::NotFound(path.clone()))
            }
            Err(source) => Err(IncludeError::Io {
                path: absolute_path,
                source,
            }),
        }
    }
}
