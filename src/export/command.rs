// src/export/command.rs

//! Version-specific export command lines.
//!
//! The two flag sets below are a hard compatibility contract with the
//! external tool; both spelling and argument order must be preserved
//! exactly.

use std::ffi::OsString;

use anyhow::Context;
use tokio::process::Command;
use tracing::{debug, error};

use crate::errors::Result;
use crate::export::version::{parse_version, ToolVersion};
use crate::export::ExportJob;

/// External export tool binary.
pub const EXPORT_TOOL: &str = "inkscape";

/// Fixed export resolution.
pub const EXPORT_DPI: &str = "300";

/// Build the argument list for exporting `job` with the given tool version.
///
/// - Below 1.0: separate `--export-pdf` / `--export-latex` flags, with the
///   output path supplied to `--export-pdf`.
/// - 1.0 and later: unified `--export-type=pdf` plus `--export-filename`.
pub fn export_args(version: &ToolVersion, job: &ExportJob) -> Vec<OsString> {
    if version.has_unified_cli() {
        vec![
            job.source.clone().into_os_string(),
            OsString::from("--export-area-page"),
            OsString::from("--export-dpi"),
            OsString::from(EXPORT_DPI),
            OsString::from("--export-type=pdf"),
            OsString::from("--export-latex"),
            OsString::from("--export-filename"),
            job.output.clone().into_os_string(),
        ]
    } else {
        vec![
            OsString::from("--export-area-page"),
            OsString::from("--export-dpi"),
            OsString::from(EXPORT_DPI),
            OsString::from("--export-pdf"),
            job.output.clone().into_os_string(),
            OsString::from("--export-latex"),
            job.source.clone().into_os_string(),
        ]
    }
}

/// Query the export tool for its version.
pub async fn probe_version() -> Result<ToolVersion> {
    let output = Command::new(EXPORT_TOOL)
        .arg("--version")
        .output()
        .await
        .with_context(|| format!("running `{EXPORT_TOOL} --version`"))?;

    let banner = String::from_utf8_lossy(&output.stdout);
    debug!(banner = %banner.trim(), "export tool version banner");
    parse_version(&banner)
}

/// Run the export command for `job` synchronously.
///
/// A non-zero exit status is logged as an error but deliberately not
/// raised; the watch loop keeps running after a failed export.
pub async fn run_export(version: &ToolVersion, job: &ExportJob) -> Result<()> {
    let args = export_args(version, job);
    debug!(tool = EXPORT_TOOL, ?args, "running export command");

    let status = Command::new(EXPORT_TOOL)
        .args(&args)
        .status()
        .await
        .with_context(|| format!("spawning `{EXPORT_TOOL}` for {:?}", job.source))?;

    if status.success() {
        debug!(figure = %job.name, "export command succeeded");
    } else {
        error!(
            figure = %job.name,
            code = status.code().unwrap_or(-1),
            "export command failed"
        );
    }

    Ok(())
}
