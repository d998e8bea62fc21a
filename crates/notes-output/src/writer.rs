//! Line writer for the discharge-summary dataset.
//!
//! The layout is fixed: a `SUBJECT_ID,HADM_ID,CHARTTIME,TEXT` header, then
//! one line per record with the identifiers passed through unquoted and the
//! text always wrapped in double quotes. Embedded quotes are not escaped;
//! normalized text never contains them because tokenization strips every
//! non-word character.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use notes_model::{DischargeRecord, output_header_line};

use crate::error::{OutputError, Result};

/// Format one output line, without the trailing newline.
pub fn format_discharge_line(record: &DischargeRecord) -> String {
    format!(
        "{},{},{},\"{}\"",
        record.subject_id, record.hadm_id, record.charttime, record.text
    )
}

/// Append-only writer for [`DischargeRecord`] lines.
///
/// The header is written on construction. Buffered lines are flushed by
/// [`DischargeWriter::finish`] and also when the writer is dropped on an
/// error path, so records written before a failure reach the file.
pub struct DischargeWriter<W: Write> {
    path: PathBuf,
    out: W,
    records_written: usize,
}

impl DischargeWriter<BufWriter<File>> {
    /// Create or truncate `path` and write the header line.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| OutputError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "created output file");
        Self::from_writer(BufWriter::new(file), path)
    }
}

impl<W: Write> DischargeWriter<W> {
    /// Wrap an arbitrary sink and write the header line to it.
    pub fn from_writer(out: W, path: impl Into<PathBuf>) -> Result<Self> {
        let mut writer = Self {
            path: path.into(),
            out,
            records_written: 0,
        };
        let header = output_header_line();
        writer.write_line(&header)?;
        Ok(writer)
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    pub fn write_record(&mut self, record: &DischargeRecord) -> Result<()> {
        let line = format_discharge_line(record);
        self.write_line(&line)?;
        self.records_written += 1;
        Ok(())
    }

    /// Flush buffered lines and return the number of records written.
    pub fn finish(mut self) -> Result<usize> {
        self.out.flush().map_err(|source| OutputError::Write {
            path: self.path.clone(),
            source,
        })?;
        Ok(self.records_written)
    }

    /// Flush and hand back the underlying sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.out.flush().map_err(|source| OutputError::Write {
            path: self.path.clone(),
            source,
        })?;
        Ok(self.out)
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.out
            .write_all(line.as_bytes())
            .and_then(|()| self.out.write_all(b"\n"))
            .map_err(|source| OutputError::Write {
                path: self.path.clone(),
                source,
            })
    }
}
