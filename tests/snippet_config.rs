// tests/snippet_config.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;

use tempfile::TempDir;

use figwatch::config::{load_or_default, ConfigPaths};
use figwatch::export::snippet::{beautify, indent, SnippetTemplate};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn beautify_replaces_separators_and_title_cases() {
    assert_eq!(beautify("fourier-series"), "Fourier Series");
    assert_eq!(beautify("gradient_descent_step"), "Gradient Descent Step");
    assert_eq!(beautify("plain"), "Plain");
}

#[test]
fn default_template_renders_the_incfig_block() {
    let template = SnippetTemplate::default();
    let rendered = template.render("unit-circle");
    assert_eq!(
        rendered,
        "\\begin{figure}[ht]\n    \\centering\n    \\incfig{unit-circle}\n    \\caption{Unit Circle}\n    \\label{fig:unit-circle}\n\\end{figure}"
    );
}

#[test]
fn explicit_title_overrides_the_beautified_one() {
    let template = SnippetTemplate::default();
    let rendered = template.render_titled("unit-circle", "The unit circle");
    assert!(rendered.contains("\\caption{The unit circle}"));
    assert!(rendered.contains("\\incfig{unit-circle}"));
}

#[test]
fn indent_prefixes_every_line() {
    assert_eq!(indent("a\nb", 4), "    a\n    b");
    assert_eq!(indent("a", 0), "a");
}

#[test]
fn user_config_overrides_the_snippet_template() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let paths = ConfigPaths::in_dir(dir.path());
    std::fs::create_dir_all(&paths.config_dir)?;
    std::fs::write(
        &paths.config_file,
        "[snippet]\ntemplate = \"\\\\includegraphics{{name}} % {title}\"\n",
    )?;

    let config = load_or_default(&paths.config_file)?;
    let template = SnippetTemplate::new(config.snippet.template);
    assert_eq!(
        template.render("unit-circle"),
        "\\includegraphics{unit-circle} % Unit Circle"
    );

    Ok(())
}

#[test]
fn missing_config_file_yields_defaults() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let paths = ConfigPaths::in_dir(dir.path());
    let config = load_or_default(&paths.config_file)?;
    assert_eq!(config.picker.command, "rofi -dmenu -i -p figure");
    assert_eq!(
        config.snippet.template,
        figwatch::export::snippet::DEFAULT_TEMPLATE
    );

    Ok(())
}

#[test]
fn first_run_initialization_creates_the_well_known_files() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let paths = ConfigPaths::in_dir(dir.path().join("figwatch"));
    paths.ensure_initialized()?;

    assert!(paths.roots_file.is_file());
    assert!(paths.template_file.is_file());
    assert_eq!(std::fs::read(&paths.roots_file)?, b"");

    let template = std::fs::read_to_string(&paths.template_file)?;
    assert!(template.contains("<svg"));

    // A second run leaves existing files alone.
    std::fs::write(&paths.roots_file, "/figures/kept")?;
    paths.ensure_initialized()?;
    assert_eq!(std::fs::read_to_string(&paths.roots_file)?, "/figures/kept");

    Ok(())
}
