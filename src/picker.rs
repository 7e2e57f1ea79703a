// src/picker.rs

//! External line-oriented chooser (rofi-style).
//!
//! Options go in on the picker's stdin, one per line; the selected line
//! comes back on stdout. A cancelled picker (non-zero exit, empty output)
//! is a normal outcome, not an error.

use std::process::Stdio;

use anyhow::Context;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::errors::{FigwatchError, Result};

/// Present `options` through the given picker command and return the index
/// of the chosen entry.
pub async fn pick(options: &[String], command: &str) -> Result<Option<usize>> {
    let mut words = command.split_whitespace();
    let program = words.next().ok_or_else(|| {
        FigwatchError::Config("picker command is empty".to_string())
    })?;

    let mut child = Command::new(program)
        .args(words)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("spawning picker `{program}`"))?;

    if let Some(mut stdin) = child.stdin.take() {
        // A picker that exits without reading its stdin (cancelled straight
        // away) breaks the pipe; that is a cancellation, not an error.
        if let Err(err) = stdin.write_all(options.join("\n").as_bytes()).await {
            debug!(error = %err, "picker closed stdin early");
        }
    }

    let output = child
        .wait_with_output()
        .await
        .with_context(|| format!("waiting for picker `{program}`"))?;

    if !output.status.success() {
        debug!(code = output.status.code().unwrap_or(-1), "picker cancelled");
        return Ok(None);
    }

    let selected = String::from_utf8_lossy(&output.stdout);
    let selected = selected.trim_end_matches('\n');
    if selected.is_empty() {
        return Ok(None);
    }

    Ok(options.iter().position(|opt| opt == selected))
}
