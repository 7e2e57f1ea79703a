// src/watch/poll_backend.rs

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStdout, Command};
use tracing::{debug, warn};

use crate::errors::{FigwatchError, Result};
use crate::watch::{ChangeEvent, WatchBackend};

/// External helper binary used for polling-based watching.
pub const POLL_HELPER: &str = "fswatch";

/// Polling-process watch backend.
///
/// Delegates directory watching to a long-lived `fswatch` child launched
/// with every watched root plus the registry's containing directory; changed
/// paths arrive one per line on its stdout. Reconfiguration uses the
/// rebuild-from-scratch strategy: teardown terminates the helper and the
/// next subscription build spawns a fresh one.
pub struct PollBackend {
    config_dir: PathBuf,
    child: Option<Child>,
    lines: Option<Lines<BufReader<ChildStdout>>>,
}

impl std::fmt::Debug for PollBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollBackend")
            .field("config_dir", &self.config_dir)
            .field("running", &self.child.is_some())
            .finish()
    }
}

impl PollBackend {
    /// `config_dir` is the directory containing the roots file; it is always
    /// passed to the helper as the final argument.
    pub fn new(config_dir: PathBuf) -> Self {
        Self {
            config_dir,
            child: None,
            lines: None,
        }
    }

    fn terminate_helper(&mut self) {
        self.lines = None;
        if let Some(mut child) = self.child.take() {
            if let Err(err) = child.start_kill() {
                warn!(error = %err, "could not terminate poll helper");
            } else {
                debug!("terminated poll helper");
            }
        }
    }
}

impl WatchBackend for PollBackend {
    fn subscribe(&mut self, dirs: &[PathBuf]) -> Result<()> {
        // Rebuild-from-scratch: any previous helper is replaced wholesale.
        self.terminate_helper();

        let mut cmd = Command::new(POLL_HELPER);
        cmd.args(dirs)
            .arg(&self.config_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .with_context(|| format!("spawning `{POLL_HELPER}`"))?;

        // A helper without a stdout pipe could never deliver an event; fail
        // the build instead of blocking forever.
        let stdout = child.stdout.take().ok_or_else(|| {
            FigwatchError::Config(format!("`{POLL_HELPER}` did not expose a stdout pipe"))
        })?;

        self.lines = Some(BufReader::new(stdout).lines());
        self.child = Some(child);

        debug!(dirs = ?dirs, "poll helper started");
        Ok(())
    }

    fn unsubscribe(&mut self, _dir: &Path) {
        // Per-directory removal is not supported by the helper; the first
        // teardown call terminates it and the rest are no-ops.
        self.terminate_helper();
    }

    fn next_event(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = Option<ChangeEvent>> + Send + '_>> {
        Box::pin(async move {
            let lines = self.lines.as_mut()?;

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        if let Some(change) = ChangeEvent::from_path(Path::new(line)) {
                            return Some(change);
                        }
                    }
                    Ok(None) => {
                        debug!("poll helper stdout closed");
                        return None;
                    }
                    Err(err) => {
                        warn!(error = %err, "error reading from poll helper");
                        return None;
                    }
                }
            }
        })
    }
}
