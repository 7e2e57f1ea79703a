// tests/picker_process.rs

//! Drive the external picker seam with plain shell utilities standing in
//! for a real chooser.

#![cfg(unix)]

mod common;
use crate::common::init_tracing;

use figwatch::picker::pick;

fn options() -> Vec<String> {
    vec!["Alpha".to_string(), "Beta".to_string(), "Gamma".to_string()]
}

#[tokio::test]
async fn selected_line_maps_back_to_its_index() {
    init_tracing();

    // `head -n 1` echoes the first offered option back, like a picker in
    // which the user confirmed the top entry.
    let selection = pick(&options(), "head -n 1").await.unwrap();
    assert_eq!(selection, Some(0));
}

#[tokio::test]
async fn cancelled_picker_yields_no_selection() {
    init_tracing();

    // Non-zero exit without output, like a dismissed chooser. This picker
    // never reads stdin, so it also exercises the broken-pipe tolerance.
    let selection = pick(&options(), "false").await.unwrap();
    assert_eq!(selection, None);
}

#[tokio::test]
async fn unknown_selection_yields_none() {
    init_tracing();

    let selection = pick(&options(), "echo Delta").await.unwrap();
    assert_eq!(selection, None);
}
