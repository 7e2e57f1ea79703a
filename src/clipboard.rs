// src/clipboard.rs

//! Fire-and-forget hand-off of text to the platform clipboard tool.
//!
//! Mirrors what the usual clipboard shims do: pipe the text into the first
//! available external helper. No acknowledgment is consumed; a clipboard
//! failure is never fatal to the caller's loop.

use std::process::Stdio;

use anyhow::Context;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::errors::{FigwatchError, Result};

/// Copy `text` to the system clipboard via the first tool that spawns.
pub async fn copy(text: &str) -> Result<()> {
    for (tool, args) in candidates() {
        match pipe_to(tool, args, text).await {
            Ok(()) => {
                debug!(tool, "clipboard updated");
                return Ok(());
            }
            Err(err) => {
                debug!(tool, error = %err, "clipboard tool unavailable");
            }
        }
    }

    Err(FigwatchError::Config(
        "no clipboard tool available (tried pbcopy/wl-copy/xclip/xsel)".to_string(),
    ))
}

fn candidates() -> Vec<(&'static str, Vec<&'static str>)> {
    if cfg!(target_os = "macos") {
        vec![("pbcopy", vec![])]
    } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        vec![
            ("wl-copy", vec![]),
            ("xclip", vec!["-selection", "clipboard"]),
            ("xsel", vec!["--clipboard", "--input"]),
        ]
    } else {
        vec![
            ("xclip", vec!["-selection", "clipboard"]),
            ("xsel", vec!["--clipboard", "--input"]),
            ("wl-copy", vec![]),
        ]
    }
}

async fn pipe_to(tool: &str, args: Vec<&str>, text: &str) -> anyhow::Result<()> {
    let mut child = Command::new(tool)
        .args(&args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("spawning clipboard tool `{tool}`"))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .await
            .with_context(|| format!("writing to `{tool}` stdin"))?;
    }

    // Wait so the child is reaped; the exit status itself is not consumed.
    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for `{tool}`"))?;
    debug!(tool, code = status.code().unwrap_or(-1), "clipboard tool exited");
    Ok(())
}
