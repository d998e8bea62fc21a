//! Forward-only reader over the notes export.
//!
//! Rows are read as raw bytes and each field is decoded as ISO-8859-1, which
//! maps every byte to a code point and therefore never fails. Only one row is
//! held in memory at a time.
//!
//! Blank lines are rows with zero fields, not separators. The `csv` crate
//! drops them silently, so the reader counts the line breaks each record
//! consumes and reports every blank line it skipped as an empty row.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use csv::{ByteRecord, ReaderBuilder, Terminator};
use encoding_rs::mem::decode_latin1;
use tracing::debug;

use notes_model::{ModelError, NoteRecord};

use crate::error::{IngestError, Result};

/// Byte source that remembers how much it produced and its final byte.
struct TrackedSource<R> {
    inner: R,
    bytes_read: u64,
    last_byte: Option<u8>,
}

impl<R: Read> Read for TrackedSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            self.bytes_read += n as u64;
            self.last_byte = Some(buf[n - 1]);
        }
        Ok(n)
    }
}

/// One physical row together with the line it starts on.
#[derive(Debug, Clone, Copy)]
enum RawRow {
    /// An empty line.
    Blank(u64),
    /// The row held in the reader's record buffer.
    Record(u64),
}

/// Streaming reader producing one [`NoteRecord`] per data row.
///
/// The first row is a header and is discarded without inspection, either
/// explicitly through [`NoteReader::skip_header`] or on the first call to
/// [`NoteReader::next_note`]. A blank first line counts as that header.
pub struct NoteReader<R> {
    path: PathBuf,
    reader: csv::Reader<TrackedSource<R>>,
    record: ByteRecord,
    header_skipped: bool,
    rows_read: u64,
    pending_blank_rows: u64,
    next_blank_line: u64,
    pending_row: Option<RawRow>,
}

impl NoteReader<File> {
    /// Open the notes file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| IngestError::open_failed(path.to_path_buf(), e))?;
        debug!(path = %path.display(), "opened notes file");
        Ok(Self::from_reader(file, path))
    }
}

impl<R: Read> NoteReader<R> {
    /// Wrap an arbitrary byte source. `path` is only used in error messages.
    pub fn from_reader(source: R, path: impl Into<PathBuf>) -> Self {
        // `\n` alone ends a record so that every consumed line break is
        // accounted for within the call that read it. A trailing `\r` is
        // stripped from the last field instead.
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .terminator(Terminator::Any(b'\n'))
            .from_reader(TrackedSource {
                inner: source,
                bytes_read: 0,
                last_byte: None,
            });
        Self {
            path: path.into(),
            reader,
            record: ByteRecord::new(),
            header_skipped: false,
            rows_read: 0,
            pending_blank_rows: 0,
            next_blank_line: 0,
            pending_row: None,
        }
    }

    /// Number of data rows read so far, header excluded.
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }

    /// Consume the header row. Calling it more than once is a no-op.
    pub fn skip_header(&mut self) -> Result<()> {
        if self.header_skipped {
            return Ok(());
        }
        if self.read_raw()?.is_none() {
            return Err(IngestError::MissingHeader {
                path: self.path.clone(),
            });
        }
        self.header_skipped = true;
        Ok(())
    }

    /// Read the next data row.
    ///
    /// Returns `Ok(None)` once the input is exhausted. A short row, a blank
    /// line or a non-integer `subject_id` is an error regardless of the
    /// row's category.
    pub fn next_note(&mut self) -> Result<Option<NoteRecord>> {
        self.skip_header()?;
        let Some(row) = self.read_raw()? else {
            return Ok(None);
        };
        self.rows_read += 1;

        let (line, fields) = match row {
            RawRow::Blank(line) => (line, Vec::new()),
            RawRow::Record(line) => (line, self.decoded_fields()),
        };
        NoteRecord::from_fields(fields)
            .map(Some)
            .map_err(|err| self.row_error(line, err))
    }

    fn read_raw(&mut self) -> Result<Option<RawRow>> {
        if self.pending_blank_rows > 0 {
            self.pending_blank_rows -= 1;
            let line = self.next_blank_line;
            self.next_blank_line += 1;
            return Ok(Some(RawRow::Blank(line)));
        }
        if let Some(row) = self.pending_row.take() {
            return Ok(Some(row));
        }

        let start_line = self.reader.position().line();
        let more = match self.reader.read_byte_record(&mut self.record) {
            Ok(more) => more,
            Err(source) => {
                let line = source
                    .position()
                    .map_or_else(|| self.reader.position().line(), csv::Position::line);
                return Err(IngestError::CsvParse {
                    path: self.path.clone(),
                    line,
                    source,
                });
            }
        };

        let consumed = self.reader.position().line().saturating_sub(start_line);
        let blank_rows = if more {
            consumed.saturating_sub(self.quoted_newlines() + u64::from(self.ended_on_newline()))
        } else {
            consumed
        };
        let row_line = start_line + blank_rows;
        let row = more.then(|| {
            if self.is_blank_record() {
                RawRow::Blank(row_line)
            } else {
                RawRow::Record(row_line)
            }
        });
        if blank_rows == 0 {
            return Ok(row);
        }

        debug!(line = start_line, blank_rows, "blank lines in notes file");
        self.pending_blank_rows = blank_rows - 1;
        self.next_blank_line = start_line + 1;
        self.pending_row = row;
        Ok(Some(RawRow::Blank(start_line)))
    }

    /// Line breaks inside quoted fields of the current record.
    fn quoted_newlines(&self) -> u64 {
        self.record
            .iter()
            .flat_map(|field| field.iter())
            .filter(|&&byte| byte == b'\n')
            .count() as u64
    }

    /// Whether the current record was closed by a line break rather than by
    /// the end of the input.
    fn ended_on_newline(&self) -> bool {
        let source = self.reader.get_ref();
        self.reader.position().byte() < source.bytes_read || source.last_byte == Some(b'\n')
    }

    /// A `\r\n` line with nothing before the break.
    fn is_blank_record(&self) -> bool {
        self.record.len() == 1 && &self.record[0] == b"\r"
    }

    fn decoded_fields(&self) -> Vec<String> {
        let last = self.record.len().saturating_sub(1);
        self.record
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let field = if index == last {
                    field.strip_suffix(b"\r").unwrap_or(field)
                } else {
                    field
                };
                decode_latin1(field).into_owned()
            })
            .collect()
    }

    fn row_error(&self, line: u64, err: ModelError) -> IngestError {
        let path = self.path.clone();
        match err {
            ModelError::MissingColumn {
                column,
                found,
                expected,
            } => IngestError::MissingColumn {
                path,
                line,
                column,
                found,
                expected,
            },
            ModelError::InvalidSubjectId { value, source } => IngestError::InvalidSubjectId {
                path,
                line,
                value,
                source,
            },
        }
    }
}

impl<R: Read> Iterator for NoteReader<R> {
    type Item = Result<NoteRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_note().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "note_id,subject_id,hadm_id,note_type,note_seq,charttime,storetime,text\n";

    fn reader(content: &[u8]) -> NoteReader<Cursor<Vec<u8>>> {
        NoteReader::from_reader(Cursor::new(content.to_vec()), "discharge.csv")
    }

    #[test]
    fn test_header_is_skipped() {
        let content = format!("{HEADER}n1,1,2,DS,1,t,s,text\n");
        let mut notes = reader(content.as_bytes());
        let note = notes.next_note().unwrap().unwrap();
        assert_eq!(note.note_id, "n1");
        assert!(notes.next_note().unwrap().is_none());
        assert_eq!(notes.rows_read(), 1);
    }

    #[test]
    fn test_header_content_is_not_inspected() {
        let mut notes = reader(b"garbage\nn1,1,2,DS,1,t,s,text\n");
        assert!(notes.next_note().unwrap().is_some());
    }

    #[test]
    fn test_empty_input_has_no_header() {
        let mut notes = reader(b"");
        assert!(matches!(
            notes.next_note(),
            Err(IngestError::MissingHeader { .. })
        ));
    }

    #[test]
    fn test_header_only() {
        let mut notes = reader(HEADER.as_bytes());
        assert!(notes.next_note().unwrap().is_none());
        assert_eq!(notes.rows_read(), 0);
    }

    #[test]
    fn test_quoted_text_with_commas_and_newlines() {
        let content = format!("{HEADER}n1,1,2,DS,1,t,s,\"Line one, still text\nline two\"\n");
        let note = reader(content.as_bytes()).next_note().unwrap().unwrap();
        assert_eq!(note.text, "Line one, still text\nline two");
    }

    #[test]
    fn test_latin1_bytes_decode() {
        let mut content = HEADER.as_bytes().to_vec();
        content.extend_from_slice(b"n1,1,2,DS,1,t,s,caf\xe9 \xb5g\n");
        let note = reader(&content).next_note().unwrap().unwrap();
        assert_eq!(note.text, "caf\u{e9} \u{b5}g");
    }

    #[test]
    fn test_short_row_reports_line() {
        let content = format!("{HEADER}n1,1,2,DS,1,t,s,ok\nn2,1,2,DS,1\n");
        let mut notes = reader(content.as_bytes());
        assert!(notes.next_note().unwrap().is_some());
        let err = notes.next_note().unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { found: 5, .. }));
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_blank_line_is_an_empty_row() {
        let content = format!("{HEADER}n1,1,2,DS,1,t,s,a\n\nn3,3,4,DS,1,t,s,b\n");
        let mut notes = reader(content.as_bytes());
        assert!(notes.next_note().unwrap().is_some());
        let err = notes.next_note().unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { found: 0, .. }));
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_consecutive_blank_lines_keep_their_lines() {
        let content = format!("{HEADER}\n\nn1,1,2,DS,1,t,s,a\n");
        let mut notes = reader(content.as_bytes());
        assert_eq!(notes.next_note().unwrap_err().line(), Some(2));
        assert_eq!(notes.next_note().unwrap_err().line(), Some(3));
        let note = notes.next_note().unwrap().unwrap();
        assert_eq!(note.note_id, "n1");
        assert_eq!(notes.rows_read(), 3);
    }

    #[test]
    fn test_crlf_blank_line_is_an_empty_row() {
        let content = b"h\r\nn1,1,2,DS,1,t,s,a\r\n\r\n";
        let mut notes = reader(content);
        assert_eq!(notes.next_note().unwrap().unwrap().text, "a");
        let err = notes.next_note().unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { found: 0, .. }));
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_trailing_blank_line_is_an_empty_row() {
        let content = format!("{HEADER}n1,1,2,DS,1,t,s,a\n\n");
        let mut notes = reader(content.as_bytes());
        assert!(notes.next_note().unwrap().is_some());
        assert!(matches!(
            notes.next_note(),
            Err(IngestError::MissingColumn { found: 0, .. })
        ));
        assert!(notes.next_note().unwrap().is_none());
    }

    #[test]
    fn test_blank_line_before_unterminated_last_row() {
        let content = format!("{HEADER}\nn1,1,2,DS,1,t,s,a");
        let mut notes = reader(content.as_bytes());
        assert_eq!(notes.next_note().unwrap_err().line(), Some(2));
        assert_eq!(notes.next_note().unwrap().unwrap().text, "a");
        assert!(notes.next_note().unwrap().is_none());
    }

    #[test]
    fn test_leading_blank_line_is_the_header() {
        let content = format!("\n{HEADER}");
        let err = reader(content.as_bytes()).next_note().unwrap_err();
        assert!(
            matches!(err, IngestError::InvalidSubjectId { ref value, .. } if value == "subject_id")
        );
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_blank_lines_inside_quoted_text_are_kept() {
        let content = format!("{HEADER}n1,1,2,DS,1,t,s,\"para one\n\npara two\"\nn2,1,2,RR,1,t,s,b\n");
        let mut notes = reader(content.as_bytes());
        assert_eq!(notes.next_note().unwrap().unwrap().text, "para one\n\npara two");
        assert_eq!(notes.next_note().unwrap().unwrap().note_id, "n2");
        assert!(notes.next_note().unwrap().is_none());
    }

    #[test]
    fn test_crlf_is_stripped_from_last_field() {
        let content = b"h\r\nn1,1,2,DS,1,t,s,\"quoted\"\r\nn2,1,2,DS,1,t,s,plain\r\n";
        let notes: Vec<_> = reader(content).collect::<Result<Vec<_>>>().unwrap();
        assert_eq!(notes[0].text, "quoted");
        assert_eq!(notes[1].text, "plain");
    }

    #[test]
    fn test_invalid_subject_id_on_any_category() {
        let content = format!("{HEADER}n1,abc,2,RR,1,t,s,text\n");
        let err = reader(content.as_bytes()).next_note().unwrap_err();
        assert!(matches!(err, IngestError::InvalidSubjectId { ref value, .. } if value == "abc"));
    }

    #[test]
    fn test_iterator_yields_all_rows() {
        let content = format!("{HEADER}n1,1,2,DS,1,t,s,a\nn2,1,2,RR,1,t,s,b\n");
        let notes: Vec<_> = reader(content.as_bytes())
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[1].note_type, "RR");
    }
}
