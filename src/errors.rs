// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FigwatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse an export tool version out of {0:?}")]
    VersionParse(String),

    #[error("File watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Missing permission to delete PID file {0:?}")]
    PidFilePermission(PathBuf),

    #[error("PID file {0:?} disappeared before it could be removed")]
    PidFileVanished(PathBuf),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, FigwatchError>;
