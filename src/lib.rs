// src/lib.rs

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod daemon;
pub mod errors;
pub mod export;
pub mod fs;
pub mod logging;
pub mod ops;
pub mod picker;
pub mod registry;
pub mod watch;

use std::path::Path;

use tracing::info;

use crate::cli::{CliArgs, Command, LogLevel};
use crate::config::ConfigPaths;
use crate::errors::Result;
use crate::export::snippet::SnippetTemplate;
use crate::export::InkscapeExporter;
use crate::registry::RootRegistry;
use crate::watch::{NotifyBackend, PollBackend, WatchCoordinator};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - well-known paths + first-run initialization
/// - the roots registry
/// - the watch coordinator with its platform backend
/// - daemon lifecycle handling
/// - the `create` / `edit` figure operations
pub async fn run(args: CliArgs) -> Result<()> {
    let paths = ConfigPaths::resolve()?;
    paths.ensure_initialized()?;

    match args.command {
        Command::Watch { no_daemon, stop } => {
            run_watch(&paths, no_daemon, stop, args.log_level).await
        }
        Command::Create { title, root } => {
            let user_config = config::load_or_default(&paths.config_file)?;
            let registry = RootRegistry::open(paths.roots_file.clone());
            let template = SnippetTemplate::new(user_config.snippet.template);
            ops::create::run(&paths, &registry, &template, &title, &root).await
        }
        Command::Edit { root } => {
            let user_config = config::load_or_default(&paths.config_file)?;
            let registry = RootRegistry::open(paths.roots_file.clone());
            let template = SnippetTemplate::new(user_config.snippet.template.clone());
            ops::edit::run(&registry, &user_config, &template, &root).await
        }
    }
}

async fn run_watch(
    paths: &ConfigPaths,
    no_daemon: bool,
    stop: bool,
    log_level: Option<LogLevel>,
) -> Result<()> {
    if stop {
        daemon::stop(Path::new(daemon::DAEMON_PID))?;
        return Ok(());
    }

    if !no_daemon {
        return daemon::start_detached(Path::new(daemon::DAEMON_PID), log_level).await;
    }

    info!("monitoring figures");
    run_foreground(paths).await
}

/// Run the watch loop in the foreground until its event stream ends.
pub async fn run_foreground(paths: &ConfigPaths) -> Result<()> {
    let user_config = config::load_or_default(&paths.config_file)?;
    let registry = RootRegistry::open(paths.roots_file.clone());
    let template = SnippetTemplate::new(user_config.snippet.template);
    let exporter = InkscapeExporter::new(template);

    // The backend is selected once by platform capability: inotify-style
    // close-write subscriptions on Linux, the external poll helper elsewhere.
    if cfg!(target_os = "linux") {
        let backend = NotifyBackend::new(paths.roots_file.clone())?;
        WatchCoordinator::new(registry, backend, exporter).run().await
    } else {
        let backend = PollBackend::new(paths.config_dir.clone());
        WatchCoordinator::new(registry, backend, exporter).run().await
    }
}
