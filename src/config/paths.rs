// src/config/paths.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use crate::errors::{FigwatchError, Result};

/// Directory name under the platform config dir.
const APP_DIR: &str = "figwatch";

/// Blank figure bundled into the binary and materialized on first run.
pub const DEFAULT_TEMPLATE_SVG: &str = include_str!("../../assets/template.svg");

/// Well-known file locations for a figwatch installation.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_dir: PathBuf,
    pub roots_file: PathBuf,
    pub template_file: PathBuf,
    pub config_file: PathBuf,
}

impl ConfigPaths {
    /// Resolve against the platform user config directory.
    pub fn resolve() -> Result<Self> {
        let base = dirs::config_dir().ok_or_else(|| {
            FigwatchError::Config("could not determine the user config directory".to_string())
        })?;
        Ok(Self::in_dir(base.join(APP_DIR)))
    }

    /// Anchor all paths under an explicit directory (used by tests).
    pub fn in_dir(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        Self {
            roots_file: config_dir.join("roots"),
            template_file: config_dir.join("template.svg"),
            config_file: config_dir.join("config.toml"),
            config_dir,
        }
    }

    /// First-run initialization: create the config directory, an empty roots
    /// file and the default figure template. Existing files are left alone.
    ///
    /// Failure here is a configuration error and fatal to the operation that
    /// needed the files.
    pub fn ensure_initialized(&self) -> Result<()> {
        fs::create_dir_all(&self.config_dir)
            .with_context(|| format!("creating config dir {:?}", self.config_dir))?;

        if !self.roots_file.is_file() {
            info!(path = ?self.roots_file, "creating empty roots file");
            write_new(&self.roots_file, b"")?;
        }

        if !self.template_file.is_file() {
            info!(path = ?self.template_file, "installing default figure template");
            write_new(&self.template_file, DEFAULT_TEMPLATE_SVG.as_bytes())?;
        }

        debug!(dir = ?self.config_dir, "config directory ready");
        Ok(())
    }
}

fn write_new(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("creating file {:?}", path))?;
    Ok(())
}
