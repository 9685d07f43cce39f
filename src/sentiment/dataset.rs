use csv::{ByteRecord, Reader, ReaderBuilder};
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::errors::ToolError;

/// One data row of the lyrics dataset, as seen by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LyricRow {
    Lyrics(String),
    /// Row did not parse, or the lyric column is absent or empty.
    Unusable,
}

/// Streams the lyric column out of a headered CSV source, one row at a time.
pub struct LyricRows<R: Read> {
    rdr: Reader<R>,
    field: usize,
    record: ByteRecord,
}

impl<R: Read> LyricRows<R> {
    pub fn new(reader: R, field: usize) -> Self {
        let rdr = ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);
        Self { rdr, field, record: ByteRecord::new() }
    }

    /// Next row, or `None` at end of input.
    ///
    /// # Errors
    /// Only I/O failures of the underlying reader are returned; malformed rows come back as
    /// `LyricRow::Unusable`.
    pub fn next_row(&mut self) -> Result<Option<LyricRow>, ToolError> {
        match self.rdr.read_byte_record(&mut self.record) {
            Ok(false) => Ok(None),
            Ok(true) => Ok(Some(field_text(&self.record, self.field).map_or(LyricRow::Unusable, LyricRow::Lyrics))),
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => Err(ToolError::Csv(e)),
            Err(e) => {
                log::debug!("dataset: unparsable row: {e}");
                Ok(Some(LyricRow::Unusable))
            }
        }
    }
}

impl LyricRows<File> {
    /// # Errors
    /// `DatasetNotFound` if the file does not exist, `Io` for other open failures.
    pub fn open(path: &Path, field: usize) -> Result<Self, ToolError> {
        match File::open(path) {
            Ok(f) => Ok(Self::new(f, field)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ToolError::DatasetNotFound(path.to_path_buf())),
            Err(e) => Err(e.into()),
        }
    }
}

/// Field `field` as text, or `None` when missing or empty. Invalid UTF-8 sequences are dropped.
fn field_text(record: &ByteRecord, field: usize) -> Option<String> {
    let raw = record.get(field)?;
    if raw.is_empty() {
        return None;
    }
    Some(decode_dropping_invalid(raw))
}

fn decode_dropping_invalid(raw: &[u8]) -> String {
    match String::from_utf8_lossy(raw) {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s.replace(char::REPLACEMENT_CHARACTER, ""),
    }
}

/// Parse a single CSV line (no header) and return its lyric column.
///
/// Standalone entry point for fuzzing and tests; [`LyricRows`] does the streaming scan.
#[must_use]
pub fn extract_lyrics_from_line(line: &str, field: usize) -> Option<String> {
    let mut rdr = ReaderBuilder::new().has_headers(false).flexible(true).from_reader(line.as_bytes());
    let mut record = ByteRecord::new();
    match rdr.read_byte_record(&mut record) {
        Ok(true) => field_text(&record, field),
        _ => None,
    }
}
