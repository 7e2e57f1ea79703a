// src/ops/create.rs

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::config::ConfigPaths;
use crate::errors::Result;
use crate::export::snippet::{indent, SnippetTemplate};
use crate::export::FIGURE_EXT;
use crate::ops;
use crate::registry::RootRegistry;

/// Create a new figure named after `title` under `root`.
///
/// The include snippet is printed to stdout, indented to match the leading
/// whitespace of the input title, so it can be piped straight back into the
/// document being edited.
pub async fn run(
    paths: &ConfigPaths,
    registry: &RootRegistry,
    template: &SnippetTemplate,
    title: &str,
    root: &Path,
) -> Result<()> {
    let trimmed = title.trim();
    let name = trimmed.replace(' ', "-").to_lowercase();
    let file_name = format!("{name}.{FIGURE_EXT}");

    let figures = ops::absolutize(root)?;
    if !figures.exists() {
        fs::create_dir_all(&figures)
            .with_context(|| format!("creating figure directory {:?}", figures))?;
    }

    let figure_path = figures.join(&file_name);

    // A name collision is bounced back to the user with a suggested
    // alternative instead of overwriting the existing figure.
    if figure_path.exists() {
        println!("{trimmed} 2");
        return Ok(());
    }

    fs::copy(&paths.template_file, &figure_path).with_context(|| {
        format!(
            "copying template {:?} to {:?}",
            paths.template_file, figure_path
        )
    })?;
    info!(figure = ?figure_path, "created figure");

    registry.add(&figures)?;
    ops::launch_editor(&figure_path)?;

    let leading_spaces = title.len() - title.trim_start().len();
    println!(
        "{}",
        indent(&template.render_titled(&name, trimmed), leading_spaces)
    );

    Ok(())
}
