// src/registry/mod.rs

//! Persistent registry of figure directories ("roots").
//!
//! The registry is a newline-delimited plain-text file, one absolute
//! directory path per line. The format is load-bearing: the watch daemon
//! re-reads it on every rebuild, and external edits to it are how roots are
//! ever removed. Writes rewrite the whole file as a single buffer; there is
//! no locking, and concurrent CLI invocations race last-write-wins.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::errors::{FigwatchError, Result};
use crate::fs::{FileSystem, RealFileSystem};

/// Ordered, de-duplicated set of watched directories backed by a text file.
#[derive(Debug, Clone)]
pub struct RootRegistry {
    path: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl RootRegistry {
    /// Registry over the real filesystem.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_fs(path, Arc::new(RealFileSystem))
    }

    /// Registry over an arbitrary [`FileSystem`], for tests.
    pub fn with_fs(path: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            path: path.into(),
            fs,
        }
    }

    /// Path of the backing roots file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All registered roots, in file order.
    ///
    /// A missing backing file reads as an empty registry; first-run
    /// initialization normally creates it before the daemon starts.
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        Ok(self.lines()?.into_iter().map(PathBuf::from).collect())
    }

    /// Register a directory, rewriting the backing file.
    ///
    /// Exact-match duplicates are a no-op. Returns whether the file was
    /// rewritten.
    pub fn add(&self, root: &Path) -> Result<bool> {
        let entry = root
            .to_str()
            .ok_or_else(|| {
                FigwatchError::Config(format!("root path is not valid UTF-8: {:?}", root))
            })?
            .to_string();

        let mut roots = self.lines()?;
        if roots.contains(&entry) {
            debug!(root = %entry, "root already registered");
            return Ok(false);
        }

        roots.push(entry);
        self.fs
            .write(&self.path, roots.join("\n").as_bytes())
            .map_err(FigwatchError::Other)?;
        Ok(true)
    }

    fn lines(&self) -> Result<Vec<String>> {
        if !self.fs.exists(&self.path) {
            return Ok(Vec::new());
        }
        let contents = self
            .fs
            .read_to_string(&self.path)
            .map_err(FigwatchError::Other)?;
        Ok(contents
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}
