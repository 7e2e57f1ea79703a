// src/watch/coordinator.rs

//! The watch-and-recompile loop.
//!
//! The set of watched roots is itself mutable application state living in a
//! plain file, so the loop must react to edits of its own configuration
//! while running. It cycles through three phases:
//!
//! ```text
//! BUILDING_WATCHES -> RUNNING -> (roots-file event) TEARING_DOWN -+
//!        ^                                                        |
//!        +--------------------------------------------------------+
//! ```
//!
//! There is no terminal state in normal operation; the loop runs until the
//! process is killed externally or the backend's event stream ends.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::errors::Result;
use crate::export::{ExportJob, Exporter};
use crate::registry::RootRegistry;
use crate::watch::{ChangeEvent, WatchBackend};

/// Drives a [`WatchBackend`] against the roots registry and dispatches
/// qualifying change events to an [`Exporter`].
///
/// Single logical thread of control: exports are awaited inline, so no two
/// exports are ever in flight at once. A slow export stalls further event
/// processing until it returns; there is no built-in timeout.
pub struct WatchCoordinator<B: WatchBackend, E: Exporter> {
    registry: RootRegistry,
    backend: B,
    exporter: E,
    roots_file: PathBuf,
}

impl<B: WatchBackend, E: Exporter> WatchCoordinator<B, E> {
    pub fn new(registry: RootRegistry, backend: B, exporter: E) -> Self {
        let roots_file = registry.path().to_path_buf();
        Self {
            registry,
            backend,
            exporter,
            roots_file,
        }
    }

    /// Run the watch loop until the event stream ends.
    ///
    /// Only configuration-level and version-parsing failures abort the
    /// loop; a failed export or an unwatchable directory never does.
    pub async fn run(mut self) -> Result<()> {
        loop {
            // BUILDING_WATCHES
            let roots = self.registry.list()?;
            info!(
                folders = %join_paths(&roots),
                "monitoring figure folders"
            );
            self.backend.subscribe(&roots)?;

            // RUNNING
            let rebuild = loop {
                let Some(event) = self.backend.next_event().await else {
                    break false;
                };

                if event.path() == self.roots_file {
                    info!("roots file has been updated; rebuilding watches");
                    break true;
                }

                self.dispatch(event).await?;
            };

            if !rebuild {
                info!("watch event stream ended; exiting");
                return Ok(());
            }

            // TEARING_DOWN
            for root in &roots {
                self.backend.unsubscribe(root);
            }
        }
    }

    async fn dispatch(&mut self, event: ChangeEvent) -> Result<()> {
        let path = event.path();
        match ExportJob::from_source(&path) {
            Some(job) => {
                debug!(figure = %job.name, "dispatching export job");
                self.exporter.export(job).await
            }
            // Non-figure files are a no-op; ExportJob::from_source already
            // logged the skip at debug level.
            None => Ok(()),
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
