// src/watch/notify_backend.rs

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use notify::event::{AccessKind, AccessMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::debug;

use crate::errors::Result;
use crate::watch::{ChangeEvent, WatchBackend};

/// Event-subscription watch backend built on `notify`.
///
/// One persistent watch stays on the roots file itself so edits to it
/// surface as ordinary events; directory watches are added per subscription
/// build and removed again on teardown.
pub struct NotifyBackend {
    roots_file: PathBuf,
    roots_file_watched: bool,
    watcher: RecommendedWatcher,
    event_rx: mpsc::UnboundedReceiver<Event>,
}

impl std::fmt::Debug for NotifyBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyBackend")
            .field("roots_file", &self.roots_file)
            .finish_non_exhaustive()
    }
}

impl NotifyBackend {
    pub fn new(roots_file: PathBuf) -> Result<Self> {
        // Channel from the blocking notify callback into the async world.
        let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

        let watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if let Err(err) = event_tx.send(event) {
                        // We can't log via tracing here easily, so fallback to stderr.
                        eprintln!("figwatch: failed to forward notify event: {err}");
                    }
                }
                Err(err) => {
                    eprintln!("figwatch: file watch error: {err}");
                }
            },
            Config::default(),
        )?;

        Ok(Self {
            roots_file,
            roots_file_watched: false,
            watcher,
            event_rx,
        })
    }

    fn is_close_write(kind: &EventKind) -> bool {
        matches!(
            kind,
            EventKind::Access(AccessKind::Close(AccessMode::Write))
        )
    }
}

impl WatchBackend for NotifyBackend {
    fn subscribe(&mut self, dirs: &[PathBuf]) -> Result<()> {
        // The roots-file watch survives teardown; add it only once.
        if !self.roots_file_watched {
            self.watcher
                .watch(&self.roots_file, RecursiveMode::NonRecursive)?;
            self.roots_file_watched = true;
        }

        for dir in dirs {
            if let Err(err) = self.watcher.watch(dir, RecursiveMode::NonRecursive) {
                debug!(dir = ?dir, error = %err, "could not add watch for root");
            }
        }

        Ok(())
    }

    fn unsubscribe(&mut self, dir: &Path) {
        match self.watcher.unwatch(dir) {
            Ok(()) => debug!(dir = ?dir, "removed watch for root"),
            Err(err) => debug!(dir = ?dir, error = %err, "could not remove watch for root"),
        }
    }

    fn next_event(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = Option<ChangeEvent>> + Send + '_>> {
        Box::pin(async move {
            loop {
                let event = self.event_rx.recv().await?;

                if !Self::is_close_write(&event.kind) {
                    continue;
                }

                if let Some(change) = event
                    .paths
                    .first()
                    .and_then(|path| ChangeEvent::from_path(path))
                {
                    return Some(change);
                }
            }
        })
    }
}
