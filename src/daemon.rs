// src/daemon.rs

//! Background daemon lifecycle tracked by a PID file.
//!
//! The daemon is a re-spawn of the current executable running the foreground
//! watch loop, detached into its own session with null stdio. Presence of
//! the PID file at [`DAEMON_PID`] means a daemon is considered running; a
//! PID file whose process is gone is a stale handle and is cleaned up on the
//! next start.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::cli::LogLevel;
use crate::errors::{FigwatchError, Result};

/// Well-known PID file path.
pub const DAEMON_PID: &str = "/tmp/figwatch.pid";

/// Observed daemon state, derived from the PID file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonState {
    /// PID file present and the process is alive.
    Running(i32),
    /// PID file present but the process is gone (or the file is garbage).
    Stale,
    /// No PID file.
    Stopped,
}

/// Outcome of a `stop` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// A PID file was removed.
    Stopped,
    /// There was nothing to stop.
    NotRunning,
}

/// Inspect the PID file and probe the recorded process.
pub fn query(pid_path: &Path) -> DaemonState {
    let contents = match fs::read_to_string(pid_path) {
        Ok(s) => s,
        Err(_) => return DaemonState::Stopped,
    };

    match contents.trim().parse::<i32>() {
        Ok(pid) if process_alive(pid) => DaemonState::Running(pid),
        _ => DaemonState::Stale,
    }
}

/// Detach the watch loop into a background process and record its PID.
pub async fn start_detached(pid_path: &Path, log_level: Option<LogLevel>) -> Result<()> {
    match query(pid_path) {
        DaemonState::Running(pid) => {
            return Err(FigwatchError::Config(format!(
                "a watch daemon is already running (pid {pid})"
            )));
        }
        DaemonState::Stale => {
            info!(path = ?pid_path, "removing stale PID file");
            fs::remove_file(pid_path)
                .with_context(|| format!("removing stale PID file {:?}", pid_path))?;
        }
        DaemonState::Stopped => {}
    }

    let exe = std::env::current_exe().context("resolving current executable")?;

    let mut cmd = Command::new(exe);
    cmd.arg("watch")
        .arg("--no-daemon")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    if let Some(level) = log_level {
        cmd.arg("--log-level").arg(level.as_arg());
    }
    #[cfg(unix)]
    cmd.process_group(0);

    let child = cmd.spawn().context("detaching watch daemon")?;
    let pid = child.id().ok_or_else(|| {
        FigwatchError::Config("detached daemon exited before its PID was known".to_string())
    })?;

    fs::write(pid_path, pid.to_string())
        .with_context(|| format!("writing PID file {:?}", pid_path))?;

    info!(pid, "monitoring figures");
    Ok(())
}

/// Stop a running daemon.
///
/// An absent PID file reports "nothing to stop" without error. Deletion
/// failures are surfaced as distinct conditions: the file vanishing between
/// the check and the delete versus missing permissions.
pub fn stop(pid_path: &Path) -> Result<StopOutcome> {
    if !pid_path.exists() {
        warn!("no watch daemon is currently active");
        return Ok(StopOutcome::NotRunning);
    }

    // Exiting is delegated to the process owner; the signal is best effort.
    match fs::read_to_string(pid_path)
        .ok()
        .and_then(|s| s.trim().parse::<i32>().ok())
    {
        Some(pid) => signal_term(pid),
        None => warn!(path = ?pid_path, "PID file did not contain a numeric PID"),
    }

    match fs::remove_file(pid_path) {
        Ok(()) => {
            info!("removed the watch daemon");
            Ok(StopOutcome::Stopped)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Err(FigwatchError::PidFileVanished(pid_path.to_path_buf()))
        }
        Err(err) if err.kind() == ErrorKind::PermissionDenied => {
            Err(FigwatchError::PidFilePermission(pid_path.to_path_buf()))
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(unix)]
fn process_alive(pid: i32) -> bool {
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    // Zero-signal probe: no signal is delivered, only liveness is checked.
    kill(Pid::from_raw(pid), None).is_ok()
}

#[cfg(not(unix))]
fn process_alive(_pid: i32) -> bool {
    // Without a portable probe, treat a present PID file as live.
    true
}

#[cfg(unix)]
fn signal_term(pid: i32) {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    match kill(Pid::from_raw(pid), Signal::SIGTERM) {
        Ok(()) => debug!(pid, "sent SIGTERM to watch daemon"),
        Err(err) => warn!(pid, error = %err, "could not signal watch daemon"),
    }
}

#[cfg(not(unix))]
fn signal_term(pid: i32) {
    warn!(pid, "process signalling is not supported on this platform");
}
