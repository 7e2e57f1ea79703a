// src/watch/backend.rs

//! Pluggable watch backend abstraction.
//!
//! The coordinator talks to a `WatchBackend` instead of a concrete watcher.
//! Two production implementations exist, selected once at startup by
//! platform capability:
//!
//! - [`super::NotifyBackend`] registers per-directory watches through the
//!   `notify` crate and filters for close-after-write events (Linux).
//! - [`super::PollBackend`] delegates to a long-lived external `fswatch`
//!   process and reads changed paths line by line (everywhere else).
//!
//! Tests provide their own `WatchBackend` that replays scripted events.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use crate::errors::Result;
use crate::watch::ChangeEvent;

/// Trait abstracting where change events come from.
pub trait WatchBackend: Send {
    /// Build the subscription set for the given directories.
    ///
    /// The roots file itself is always covered as well, so edits to it can
    /// be detected as reconfiguration requests. A single unreachable
    /// directory must be logged and skipped, not abort the whole build.
    fn subscribe(&mut self, dirs: &[PathBuf]) -> Result<()>;

    /// Best-effort removal of a single directory watch during teardown.
    ///
    /// Failures are logged by the implementation; they are never fatal.
    fn unsubscribe(&mut self, dir: &Path);

    /// Block until the next close-after-write event.
    ///
    /// `None` means the event stream has ended and the watch loop should
    /// exit.
    fn next_event(&mut self)
        -> Pin<Box<dyn Future<Output = Option<ChangeEvent>> + Send + '_>>;
}
