// src/ops/edit.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::clipboard;
use crate::config::UserConfig;
use crate::errors::{FigwatchError, Result};
use crate::export::snippet::{beautify, SnippetTemplate};
use crate::export::FIGURE_EXT;
use crate::ops;
use crate::picker;
use crate::registry::RootRegistry;

/// Pick a figure under `root` and open it for editing.
pub async fn run(
    registry: &RootRegistry,
    config: &UserConfig,
    template: &SnippetTemplate,
    root: &Path,
) -> Result<()> {
    let figures = ops::absolutize(root)?;
    if !figures.is_dir() {
        return Err(FigwatchError::Config(format!(
            "{:?} is not a directory",
            figures
        )));
    }

    let files = figures_by_mtime(&figures)?;
    if files.is_empty() {
        info!(dir = ?figures, "no figures to edit");
        return Ok(());
    }

    let names: Vec<String> = files
        .iter()
        .filter_map(|f| f.file_stem().and_then(|s| s.to_str()))
        .map(beautify)
        .collect();

    let Some(index) = picker::pick(&names, &config.picker.command).await? else {
        debug!("picker cancelled; nothing to edit");
        return Ok(());
    };

    let path = &files[index];
    registry.add(&figures)?;
    ops::launch_editor(path)?;

    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
        let snippet = template.render(stem);
        if let Err(err) = clipboard::copy(&snippet).await {
            warn!(error = %err, "could not copy include snippet to clipboard");
        }
    }

    Ok(())
}

/// All figure files directly under `dir`, newest modification first.
fn figures_by_mtime(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<(PathBuf, SystemTime)> = Vec::new();

    for entry in fs::read_dir(dir).with_context(|| format!("reading dir {:?}", dir))? {
        let entry = entry.with_context(|| format!("reading dir entry in {:?}", dir))?;
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != FIGURE_EXT) {
            continue;
        }
        let mtime = entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        files.push((path, mtime));
    }

    files.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(files.into_iter().map(|(path, _)| path).collect())
}
