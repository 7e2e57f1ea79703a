// tests/coordinator_loop.rs

//! Watch-loop semantics, exercised with fake backend/exporter
//! implementations instead of real watchers and processes.

mod common;
use crate::common::init_tracing;

use std::collections::VecDeque;
use std::error::Error;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::time::{timeout, Duration};

use figwatch::errors::{FigwatchError, Result as FigResult};
use figwatch::export::{ExportJob, Exporter};
use figwatch::fs::mock::MockFileSystem;
use figwatch::registry::RootRegistry;
use figwatch::watch::{ChangeEvent, WatchBackend, WatchCoordinator};

type TestResult = Result<(), Box<dyn Error>>;

const ROOTS_FILE: &str = "/cfg/roots";

/// A fake backend that replays a scripted queue of events and records every
/// subscription build and teardown. An exhausted queue ends the stream.
struct FakeBackend {
    events: Arc<Mutex<VecDeque<ChangeEvent>>>,
    subscriptions: Arc<Mutex<Vec<Vec<PathBuf>>>>,
    unsubscribed: Arc<Mutex<Vec<PathBuf>>>,
}

impl FakeBackend {
    fn scripted(paths: &[&str]) -> Self {
        let events = paths
            .iter()
            .map(|p| ChangeEvent::from_path(Path::new(p)).unwrap())
            .collect();
        Self {
            events: Arc::new(Mutex::new(events)),
            subscriptions: Arc::new(Mutex::new(Vec::new())),
            unsubscribed: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl WatchBackend for FakeBackend {
    fn subscribe(&mut self, dirs: &[PathBuf]) -> FigResult<()> {
        self.subscriptions.lock().unwrap().push(dirs.to_vec());
        Ok(())
    }

    fn unsubscribe(&mut self, dir: &Path) {
        self.unsubscribed.lock().unwrap().push(dir.to_path_buf());
    }

    fn next_event(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = Option<ChangeEvent>> + Send + '_>> {
        let events = Arc::clone(&self.events);
        Box::pin(async move { events.lock().unwrap().pop_front() })
    }
}

/// A fake exporter that records dispatched jobs.
///
/// - Names in `failing` simulate a non-zero export exit: recorded as failed
///   but still `Ok`, matching the real exporter's contract.
/// - A name equal to `fatal` simulates a version-probe failure, which is a
///   real error.
struct FakeExporter {
    exported: Arc<Mutex<Vec<(String, bool)>>>,
    failing: Vec<String>,
    fatal: Option<String>,
}

impl FakeExporter {
    fn new() -> Self {
        Self {
            exported: Arc::new(Mutex::new(Vec::new())),
            failing: Vec::new(),
            fatal: None,
        }
    }
}

impl Exporter for FakeExporter {
    fn export(&mut self, job: ExportJob) -> Pin<Box<dyn Future<Output = FigResult<()>> + Send + '_>> {
        let exported = Arc::clone(&self.exported);
        let failing = self.failing.clone();
        let fatal = self.fatal.clone();

        Box::pin(async move {
            if fatal.as_deref() == Some(job.name.as_str()) {
                return Err(FigwatchError::VersionParse("garbled banner".to_string()));
            }
            let success = !failing.contains(&job.name);
            exported.lock().unwrap().push((job.name, success));
            Ok(())
        })
    }
}

fn registry_with_roots(roots: &str) -> RootRegistry {
    let fs = Arc::new(MockFileSystem::new());
    fs.add_file(ROOTS_FILE, roots);
    RootRegistry::with_fs(ROOTS_FILE, fs)
}

async fn run_coordinator(
    registry: RootRegistry,
    backend: FakeBackend,
    exporter: FakeExporter,
) -> FigResult<()> {
    let coordinator = WatchCoordinator::new(registry, backend, exporter);
    timeout(Duration::from_secs(3), coordinator.run())
        .await
        .expect("watch loop did not finish within 3 seconds")
}

#[tokio::test]
async fn roots_file_event_rebuilds_and_never_reaches_the_exporter() -> TestResult {
    init_tracing();

    let registry = registry_with_roots("/figs");
    let backend = FakeBackend::scripted(&[ROOTS_FILE]);
    let exporter = FakeExporter::new();

    let subscriptions = Arc::clone(&backend.subscriptions);
    let unsubscribed = Arc::clone(&backend.unsubscribed);
    let exported = Arc::clone(&exporter.exported);

    run_coordinator(registry, backend, exporter).await?;

    // One build before the event, one after the teardown.
    assert_eq!(subscriptions.lock().unwrap().len(), 2);
    assert_eq!(
        unsubscribed.lock().unwrap().as_slice(),
        &[PathBuf::from("/figs")]
    );
    assert!(exported.lock().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
async fn dispatching_continues_after_a_rebuild() -> TestResult {
    init_tracing();

    let registry = registry_with_roots("/figs");
    let backend = FakeBackend::scripted(&[ROOTS_FILE, "/figs/circle.svg"]);
    let exporter = FakeExporter::new();

    let subscriptions = Arc::clone(&backend.subscriptions);
    let exported = Arc::clone(&exporter.exported);

    run_coordinator(registry, backend, exporter).await?;

    assert_eq!(subscriptions.lock().unwrap().len(), 2);
    assert_eq!(
        exported.lock().unwrap().as_slice(),
        &[("circle".to_string(), true)]
    );

    Ok(())
}

#[tokio::test]
async fn non_figure_events_are_discarded() -> TestResult {
    init_tracing();

    let registry = registry_with_roots("/figs");
    let backend = FakeBackend::scripted(&["/figs/notes.txt", "/figs/build.log"]);
    let exporter = FakeExporter::new();

    let exported = Arc::clone(&exporter.exported);

    run_coordinator(registry, backend, exporter).await?;

    assert!(exported.lock().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
async fn failed_export_does_not_stop_the_loop() -> TestResult {
    init_tracing();

    let registry = registry_with_roots("/figs");
    let backend = FakeBackend::scripted(&["/figs/broken.svg", "/figs/fine.svg"]);
    let mut exporter = FakeExporter::new();
    exporter.failing.push("broken".to_string());

    let exported = Arc::clone(&exporter.exported);

    run_coordinator(registry, backend, exporter).await?;

    // The qualifying event after the failure is still processed.
    assert_eq!(
        exported.lock().unwrap().as_slice(),
        &[
            ("broken".to_string(), false),
            ("fine".to_string(), true),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn fatal_version_probe_error_aborts_the_loop() -> TestResult {
    init_tracing();

    let registry = registry_with_roots("/figs");
    let backend = FakeBackend::scripted(&["/figs/first.svg", "/figs/second.svg"]);
    let mut exporter = FakeExporter::new();
    exporter.fatal = Some("first".to_string());

    let exported = Arc::clone(&exporter.exported);

    let result = run_coordinator(registry, backend, exporter).await;
    assert!(matches!(result, Err(FigwatchError::VersionParse(_))));

    // Nothing after the fatal error was dispatched.
    assert!(exported.lock().unwrap().is_empty());

    Ok(())
}
