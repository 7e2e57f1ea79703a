// src/export/mod.rs

//! Version-aware figure export pipeline.
//!
//! This module is responsible for turning a changed figure file into a
//! page-ready PDF + LaTeX export, using `tokio::process::Command` to drive
//! the external Inkscape binary.
//!
//! - [`version`] probes and parses the tool version.
//! - [`command`] selects and runs the version-specific command line.
//! - [`snippet`] renders the include snippet copied to the clipboard.
//! - [`Exporter`] is the trait seam the watch coordinator dispatches through
//!   in production; tests can replace it with a fake implementation that
//!   doesn't spawn real processes.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tracing::{debug, info, warn};

use crate::clipboard;
use crate::errors::Result;
use crate::export::snippet::SnippetTemplate;

pub mod command;
pub mod snippet;
pub mod version;

pub use command::{export_args, probe_version, run_export};
pub use version::ToolVersion;

/// Extension of figure source files.
pub const FIGURE_EXT: &str = "svg";

/// Extension of the exported artifact.
pub const EXPORT_EXT: &str = "pdf";

/// One export of one changed figure.
///
/// Jobs only exist for qualifying paths; anything without the figure
/// extension never enters the export pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    /// The changed figure source file.
    pub source: PathBuf,
    /// Derived output path: same stem, export extension.
    pub output: PathBuf,
    /// Figure name (file stem), used for the include snippet.
    pub name: String,
}

impl ExportJob {
    /// Derive a job from a changed path, or `None` if the file is not a
    /// figure.
    pub fn from_source(path: &Path) -> Option<Self> {
        match path.extension() {
            Some(ext) if ext == FIGURE_EXT => {}
            other => {
                debug!(path = ?path, ext = ?other, "changed file is not a figure; ignoring");
                return None;
            }
        }

        let name = path.file_stem()?.to_str()?.to_string();
        let output = path.with_extension(EXPORT_EXT);
        Some(Self {
            source: path.to_path_buf(),
            output,
            name,
        })
    }
}

/// Trait abstracting how export jobs are carried out.
///
/// Production code uses [`InkscapeExporter`]; tests can provide their own
/// implementation that records jobs instead of spawning Inkscape.
pub trait Exporter: Send {
    /// Run one export to completion.
    ///
    /// An `Err` from this method is fatal to the watch loop (version probing
    /// went wrong); a failed export command is handled internally and is
    /// *not* an error.
    fn export(&mut self, job: ExportJob) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Real exporter driving the external Inkscape binary.
#[derive(Debug, Clone)]
pub struct InkscapeExporter {
    template: SnippetTemplate,
}

impl InkscapeExporter {
    pub fn new(template: SnippetTemplate) -> Self {
        Self { template }
    }
}

impl Exporter for InkscapeExporter {
    fn export(&mut self, job: ExportJob) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let template = self.template.clone();

        Box::pin(async move {
            info!(figure = %job.name, source = ?job.source, "recompiling figure");

            let version = probe_version().await?;
            debug!(version = %version, "detected export tool version");

            run_export(&version, &job).await?;

            // The include snippet is copied even when the export command
            // failed; only fatal probe errors skip it.
            let snippet = template.render(&job.name);
            match clipboard::copy(&snippet).await {
                Ok(()) => debug!(figure = %job.name, "copied include snippet to clipboard"),
                Err(err) => warn!(
                    figure = %job.name,
                    error = %err,
                    "could not copy include snippet to clipboard"
                ),
            }

            Ok(())
        })
    }
}
