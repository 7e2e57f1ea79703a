// src/export/version.rs

//! Export tool version detection.
//!
//! Inkscape's `--version` banner changed shape over the years:
//!
//! - `Inkscape 0.92.4 (unknown)`
//! - `Inkscape 1.1-dev (3a9df5bcce, 2020-03-18)`
//! - `Inkscape 1.0rc1`
//!
//! We take the first run of digit/period characters, split on `.`, and
//! right-pad with zeros to exactly three components, so the examples above
//! become `0.92.4`, `1.1.0` and `1.0.0`.

use std::fmt;

use anyhow::Context;
use regex::Regex;

use crate::errors::{FigwatchError, Result};

/// Numeric tool version triple with lexicographic ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ToolVersion(pub [u32; 3]);

/// First version with the unified `--export-type` CLI.
pub const UNIFIED_CLI: ToolVersion = ToolVersion([1, 0, 0]);

impl ToolVersion {
    /// Whether this version uses the unified export flag set.
    pub fn has_unified_cli(&self) -> bool {
        *self >= UNIFIED_CLI
    }
}

impl fmt::Display for ToolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.0[0], self.0[1], self.0[2])
    }
}

/// Parse a version triple out of a raw `--version` banner.
///
/// A banner with no parseable numeric version is a loud failure: every
/// subsequent export would silently pick the wrong command shape otherwise.
pub fn parse_version(raw: &str) -> Result<ToolVersion> {
    let re = Regex::new(r"[0-9.]+").context("compiling version pattern")?;
    let m = re
        .find(raw)
        .ok_or_else(|| FigwatchError::VersionParse(raw.to_string()))?;

    let mut parts = [0u32; 3];
    let mut count = 0;
    for piece in m.as_str().split('.').filter(|p| !p.is_empty()) {
        if count == 3 {
            break;
        }
        parts[count] = piece
            .parse()
            .map_err(|_| FigwatchError::VersionParse(raw.to_string()))?;
        count += 1;
    }

    if count == 0 {
        return Err(FigwatchError::VersionParse(raw.to_string()));
    }

    Ok(ToolVersion(parts))
}
