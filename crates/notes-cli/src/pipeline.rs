//! Discharge-summary extraction.
//!
//! One forward pass over the notes export: every data row is parsed into a
//! `NoteRecord`, rows whose category is not `DS` are skipped,
//! and the rest are normalized and appended to the output file. Any malformed
//! row aborts the run; lines written before it stay on disk.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info, info_span, trace};

use notes_ingest::{IngestError, NoteReader};
use notes_output::{DischargeWriter, OutputError};
use notes_transform::{Tokenizer, TransformError, WordTokenizer, discharge_record};

use crate::logging::redact_value;

/// Rows between two progress reports.
pub const PROGRESS_INTERVAL: u64 = 10_000;

/// Counters handed to the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractProgress {
    pub rows_read: u64,
    pub records_written: usize,
}

/// Outcome of a completed extraction.
#[derive(Debug, Clone)]
pub struct ExtractSummary {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Data rows read, header excluded.
    pub rows_read: u64,
    pub records_written: usize,
    /// Rows whose category was not a discharge summary.
    pub rows_skipped: u64,
    pub duration: Duration,
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Extract discharge summaries from `input_path` into `output_path` using
/// the default word tokenizer and no progress reporting.
pub fn extract(input_path: &Path, output_path: &Path) -> Result<ExtractSummary, ExtractError> {
    let tokenizer = WordTokenizer::new()?;
    extract_with_progress(input_path, output_path, &tokenizer, &mut |_| {})
}

/// Extract discharge summaries, reporting progress every
/// [`PROGRESS_INTERVAL`] rows and once more when the input is exhausted,
/// unless the last periodic report already covered every row.
///
/// # Errors
///
/// Fails when either file cannot be opened, when the input has no header
/// row, or on the first row that is shorter than eight fields (a blank line
/// has none) or carries a non-integer `subject_id`. The output file is left as written so far.
pub fn extract_with_progress<T: Tokenizer + ?Sized>(
    input_path: &Path,
    output_path: &Path,
    tokenizer: &T,
    on_progress: &mut dyn FnMut(ExtractProgress),
) -> Result<ExtractSummary, ExtractError> {
    let span = info_span!(
        "extract",
        input = %input_path.display(),
        output = %output_path.display()
    );
    let _guard = span.enter();
    let start = Instant::now();

    let mut reader = NoteReader::open(input_path)?;
    let mut writer = DischargeWriter::create(output_path)?;
    info!("processing notes file");
    reader.skip_header()?;

    let mut rows_skipped = 0u64;
    let mut last_reported = None;
    while let Some(note) = reader.next_note()? {
        match discharge_record(tokenizer, note) {
            Some(record) => {
                trace!(
                    subject_id = redact_value(&record.subject_id),
                    hadm_id = redact_value(&record.hadm_id),
                    "discharge summary"
                );
                writer.write_record(&record)?;
            }
            None => rows_skipped += 1,
        }

        let rows_read = reader.rows_read();
        if rows_read % PROGRESS_INTERVAL == 0 {
            let records_written = writer.records_written();
            debug!(rows_read, records_written, "extraction progress");
            on_progress(ExtractProgress {
                rows_read,
                records_written,
            });
            last_reported = Some(rows_read);
        }
    }

    let rows_read = reader.rows_read();
    let records_written = writer.finish()?;
    if last_reported != Some(rows_read) {
        on_progress(ExtractProgress {
            rows_read,
            records_written,
        });
    }

    let duration = start.elapsed();
    info!(
        rows_read,
        records_written,
        rows_skipped,
        duration_ms = duration.as_millis(),
        "extraction complete"
    );

    Ok(ExtractSummary {
        input_path: input_path.to_path_buf(),
        output_path: output_path.to_path_buf(),
        rows_read,
        records_written,
        rows_skipped,
        duration,
    })
}
