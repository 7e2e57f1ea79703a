// src/watch/mod.rs

//! File watching and the recompile loop.
//!
//! This module is responsible for:
//! - Turning filesystem close-after-write notifications into
//!   [`ChangeEvent`]s, through one of two interchangeable backends.
//! - Driving the build → run → teardown cycle that keeps the watch set in
//!   sync with the roots registry ([`coordinator`]).
//!
//! It does **not** know how figures are exported; it only hands qualifying
//! events to an [`crate::export::Exporter`].

use std::path::{Path, PathBuf};

pub mod backend;
pub mod coordinator;
pub mod notify_backend;
pub mod poll_backend;

pub use backend::WatchBackend;
pub use coordinator::WatchCoordinator;
pub use notify_backend::NotifyBackend;
pub use poll_backend::PollBackend;

/// A single close-after-write notification.
///
/// Only this event kind is ever surfaced; raw write events are not used as
/// recompilation triggers so partial writes are never acted on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Directory the change happened in.
    pub dir: PathBuf,
    /// File name within `dir`.
    pub name: String,
}

impl ChangeEvent {
    /// Split a full changed path into directory + name.
    ///
    /// Paths without a parseable file name (e.g. `/`) yield `None`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_string();
        let dir = path.parent()?.to_path_buf();
        Some(Self { dir, name })
    }

    /// Full path of the changed file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }
}
