use std::io::{self, IsTerminal};

use anyhow::{Context, Result};

use notes_ingest::{notes_file_path, resolve_notes_dir};
use notes_transform::WordTokenizer;

use crate::cli::Cli;
use crate::pipeline::{ExtractSummary, extract_with_progress};
use crate::progress::{create_row_spinner, report_progress};

/// Resolve the notes file from the command line and run the extraction.
pub fn run_extract(cli: &Cli) -> Result<ExtractSummary> {
    let notes_dir = resolve_notes_dir(cli.notes_dir.as_deref()).context("resolve notes directory")?;
    let input_path = notes_file_path(&notes_dir);
    let tokenizer = WordTokenizer::new().context("build word tokenizer")?;

    let spinner = create_row_spinner(!cli.no_progress && io::stderr().is_terminal());
    let result = extract_with_progress(&input_path, &cli.output, &tokenizer, &mut |progress| {
        report_progress(&spinner, progress);
    });
    spinner.finish_and_clear();

    result.with_context(|| {
        format!(
            "extract discharge summaries from {} to {}",
            input_path.display(),
            cli.output.display()
        )
    })
}
