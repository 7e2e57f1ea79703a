// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `figwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "figwatch",
    version,
    about = "Keep vector figures compiled to page-ready PDF + LaTeX exports.",
    long_about = None
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FIGWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Monitor figure folders and recompile figures as they change.
    Watch {
        /// Run in the foreground instead of detaching as a daemon.
        #[arg(long)]
        no_daemon: bool,

        /// Stop a running watch daemon.
        #[arg(long)]
        stop: bool,
    },

    /// Create a figure at ROOT with the name of TITLE.
    Create {
        /// Human-readable figure title; also used to derive the file name.
        title: String,

        /// Directory the figure is created in.
        #[arg(value_name = "ROOT", default_value = ".")]
        root: PathBuf,
    },

    /// Open a picker at ROOT for editing figures.
    Edit {
        /// Directory to pick figures from.
        #[arg(value_name = "ROOT", default_value = ".")]
        root: PathBuf,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Spelling used when forwarding the level to a re-spawned process.
    pub fn as_arg(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
