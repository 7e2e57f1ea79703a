// src/ops/mod.rs

//! User-facing figure operations: `create` and `edit`.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;
use tracing::debug;

use crate::errors::Result;
use crate::export::command::EXPORT_TOOL;

pub mod create;
pub mod edit;

/// Open a figure in the external editor without waiting for it.
pub fn launch_editor(figure: &Path) -> Result<()> {
    let child = Command::new(EXPORT_TOOL)
        .arg(figure)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("opening {:?} in {EXPORT_TOOL}", figure))?;

    debug!(figure = ?figure, pid = ?child.id(), "editor launched");
    Ok(())
}

/// Resolve a user-supplied root to an absolute path without touching
/// symlinks.
pub fn absolutize(root: &Path) -> Result<PathBuf> {
    Ok(std::path::absolute(root).with_context(|| format!("resolving {:?}", root))?)
}
