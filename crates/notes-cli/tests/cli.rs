//! Integration tests for the command-line entry point.

use std::ffi::OsString;
use std::fs;
use std::path::Path;

use clap::Parser;
use tempfile::tempdir;

use notes_cli::cli::Cli;
use notes_cli::commands::run_extract;
use notes_ingest::NOTES_DIR_ENV_VAR;

fn cli(output: &Path, notes_dir: &Path) -> Cli {
    Cli::try_parse_from([
        OsString::from("notes-extract"),
        output.as_os_str().to_os_string(),
        OsString::from("--notes-dir"),
        notes_dir.as_os_str().to_os_string(),
        OsString::from("--no-progress"),
    ])
    .expect("parse arguments")
}

#[test]
fn notes_dir_flag_locates_discharge_csv() {
    let notes = tempdir().unwrap();
    fs::write(
        notes.path().join("discharge.csv"),
        "h\nn1,10001,20001,DS,1,t,s,\"Stable, 2 days.\"\nn2,10002,20002,RR,1,t,s,x\n",
    )
    .unwrap();
    let out = tempdir().unwrap();
    let output = out.path().join("disch_full.csv");

    let summary = run_extract(&cli(&output, notes.path())).expect("run extract");

    assert_eq!(summary.input_path, notes.path().join("discharge.csv"));
    assert_eq!(summary.records_written, 1);
    assert_eq!(summary.rows_skipped, 1);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "SUBJECT_ID,HADM_ID,CHARTTIME,TEXT\n10001,20001,t,\"stable days\"\n"
    );
}

#[test]
#[allow(unsafe_code)]
fn notes_dir_flag_overrides_environment() {
    let notes = tempdir().unwrap();
    fs::write(notes.path().join("discharge.csv"), "h\n").unwrap();
    let output = notes.path().join("out.csv");
    let elsewhere = notes.path().join("not-here");
    // SAFETY: no other test in this binary reads or writes the variable.
    unsafe { std::env::set_var(NOTES_DIR_ENV_VAR, &elsewhere) };

    let result = run_extract(&cli(&output, notes.path()));

    unsafe { std::env::remove_var(NOTES_DIR_ENV_VAR) };
    let summary = result.expect("run extract");
    assert_eq!(summary.input_path, notes.path().join("discharge.csv"));
    assert_eq!(summary.rows_read, 0);
}

#[test]
fn missing_notes_file_error_names_both_paths() {
    let notes = tempdir().unwrap();
    let output = notes.path().join("out.csv");

    let err = run_extract(&cli(&output, notes.path())).unwrap_err();
    let message = format!("{err:#}");

    assert!(message.starts_with("extract discharge summaries from "));
    assert!(message.contains(&notes.path().join("discharge.csv").display().to_string()));
    assert!(message.contains(&output.display().to_string()));
    assert!(!output.exists());
}

#[test]
fn malformed_row_error_carries_line_in_chain() {
    let notes = tempdir().unwrap();
    fs::write(notes.path().join("discharge.csv"), "h\nn1,1,2,DS\n").unwrap();
    let output = notes.path().join("out.csv");

    let err = run_extract(&cli(&output, notes.path())).unwrap_err();

    let causes: Vec<String> = err.chain().map(ToString::to_string).collect();
    assert_eq!(causes.len(), 2);
    assert!(causes[1].contains(":2: missing"));
    assert!(causes[1].contains("row has 4 fields"));
}
