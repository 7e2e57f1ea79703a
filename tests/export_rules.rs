// tests/export_rules.rs

//! The version-detection and command-shape rules are a hard compatibility
//! contract with the external tool; these tests pin both flag sets exactly,
//! including the boundary versions around 1.0.0.

use std::ffi::OsString;
use std::path::Path;

use figwatch::errors::FigwatchError;
use figwatch::export::version::{parse_version, ToolVersion};
use figwatch::export::{export_args, ExportJob};

#[test]
fn version_triple_derivation() {
    assert_eq!(
        parse_version("Inkscape 0.92.4 (unknown)").unwrap(),
        ToolVersion([0, 92, 4])
    );
    assert_eq!(
        parse_version("Inkscape 1.1-dev (3a9df5bcce, 2020-03-18)").unwrap(),
        ToolVersion([1, 1, 0])
    );
    assert_eq!(
        parse_version("Inkscape 1.0rc1").unwrap(),
        ToolVersion([1, 0, 0])
    );
}

#[test]
fn unparseable_version_is_a_distinct_loud_error() {
    let err = parse_version("definitely not a version banner").unwrap_err();
    assert!(matches!(err, FigwatchError::VersionParse(_)));

    // Periods alone carry no version either.
    let err = parse_version("... ...").unwrap_err();
    assert!(matches!(err, FigwatchError::VersionParse(_)));
}

fn job() -> ExportJob {
    ExportJob::from_source(Path::new("/figs/fourier-series.svg")).unwrap()
}

#[test]
fn legacy_flag_set_below_one_zero_zero() {
    let args = export_args(&ToolVersion([0, 99, 9]), &job());
    let expected: Vec<OsString> = [
        "--export-area-page",
        "--export-dpi",
        "300",
        "--export-pdf",
        "/figs/fourier-series.pdf",
        "--export-latex",
        "/figs/fourier-series.svg",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    assert_eq!(args, expected);
}

#[test]
fn unified_flag_set_at_and_above_one_zero_zero() {
    let args = export_args(&ToolVersion([1, 0, 0]), &job());
    let expected: Vec<OsString> = [
        "/figs/fourier-series.svg",
        "--export-area-page",
        "--export-dpi",
        "300",
        "--export-type=pdf",
        "--export-latex",
        "--export-filename",
        "/figs/fourier-series.pdf",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    assert_eq!(args, expected);
}

#[test]
fn shape_selection_is_pure_in_the_version_triple() {
    assert!(!ToolVersion([0, 99, 9]).has_unified_cli());
    assert!(ToolVersion([1, 0, 0]).has_unified_cli());
    assert!(!ToolVersion([0, 92, 4]).has_unified_cli());
    assert!(ToolVersion([1, 1, 0]).has_unified_cli());
}

#[test]
fn jobs_derive_only_from_figure_files() {
    let job = ExportJob::from_source(Path::new("/figs/gradient_descent.svg")).unwrap();
    assert_eq!(job.name, "gradient_descent");
    assert_eq!(job.output, Path::new("/figs/gradient_descent.pdf"));

    assert!(ExportJob::from_source(Path::new("/figs/notes.txt")).is_none());
    assert!(ExportJob::from_source(Path::new("/figs/no-extension")).is_none());
    assert!(ExportJob::from_source(Path::new("/figs/archive.svg.bak")).is_none());
}
