//! Readers for person record files.
//!
//! - **JSON**: an array of [`PersonRecord`] objects
//! - **TSV/CSV**: columns `first_name`, `last_name`, `gender`, `date_of_birth`,
//!   then optional `weak_match_key` and `id`
//!
//! Files ending in `.gz` are decompressed transparently. Empty cells and
//! missing JSON keys become absent fields; the matcher rejects records with an
//! absent required field when it scores them.
//!
//! ## Example
//!
//! ```rust,no_run
//! use name_matcher::parsing::parse_records_file;
//! use std::path::Path;
//!
//! let candidates = parse_records_file(Path::new("candidates.tsv.gz")).unwrap();
//! println!("{} candidates", candidates.len());
//! ```

use std::io::{self, BufReader, Read, Take};
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;

use crate::core::record::PersonRecord;
use crate::utils::validation::{MAX_INPUT_BYTES, MAX_RECORDS};

pub mod json;
pub mod tsv;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid delimited input: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid record format: {0}")]
    InvalidFormat(String),

    #[error("Too many records: more than {max} allowed")]
    TooManyRecords { max: usize },

    #[error("Input too large: more than {max} bytes")]
    InputTooLarge { max: u64 },

    /// `record` is the 1-based line number for TSV/CSV, the 1-based position for JSON
    #[error("Field too long in record {record}: {len} characters")]
    FieldTooLong { record: usize, len: usize },
}

/// Record file formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum RecordFormat {
    Json,
    Tsv,
    Csv,
}

impl RecordFormat {
    /// Detect the format from a file name, ignoring a trailing `.gz`
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().to_lowercase();
        let name = name.strip_suffix(".gz").unwrap_or(name.as_str());

        match Path::new(name).extension()?.to_str()? {
            "json" => Some(Self::Json),
            "tsv" | "txt" => Some(Self::Tsv),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Bounds enforced while records are read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadLimits {
    pub max_records: usize,
    /// Counted after decompression
    pub max_bytes: u64,
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self {
            max_records: MAX_RECORDS,
            max_bytes: MAX_INPUT_BYTES,
        }
    }
}

/// Parse records from text in the given format
///
/// # Errors
///
/// Returns a `ParseError` describing the first malformed record.
pub fn parse_records_text(text: &str, format: RecordFormat) -> Result<Vec<PersonRecord>, ParseError> {
    parse_records_reader(text.as_bytes(), format, ReadLimits::default())
}

/// Parse records from a reader, failing as soon as either limit is exceeded
///
/// # Errors
///
/// Returns `ParseError::InputTooLarge` or `ParseError::TooManyRecords` when a
/// limit is hit, otherwise the first read or parse error.
pub fn parse_records_reader<R: Read>(
    reader: R,
    format: RecordFormat,
    limits: ReadLimits,
) -> Result<Vec<PersonRecord>, ParseError> {
    let mut input = LimitedReader::new(reader, limits.max_bytes);

    let result = match format {
        RecordFormat::Json => json::parse_json_reader(&mut input, limits.max_records),
        RecordFormat::Tsv => tsv::parse_delimited(&mut input, b'\t', limits.max_records),
        RecordFormat::Csv => tsv::parse_delimited(&mut input, b',', limits.max_records),
    };

    // The byte cap surfaces inside the parser's own error type
    if input.exceeded() {
        return Err(ParseError::InputTooLarge {
            max: limits.max_bytes,
        });
    }
    result
}

/// Parse a record file, detecting the format from its extension.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the extension is not recognized, or
/// any error from reading or parsing the file.
pub fn parse_records_file(path: &Path) -> Result<Vec<PersonRecord>, ParseError> {
    let format = RecordFormat::from_path(path).ok_or_else(|| {
        ParseError::InvalidFormat(format!(
            "Cannot detect record format of {} (expected .json, .tsv or .csv)",
            path.display()
        ))
    })?;
    parse_records_file_as(path, format)
}

/// Parse a record file in an explicit format, decompressing gzip when the
/// name ends in `.gz`
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened, or a parse error.
pub fn parse_records_file_as(
    path: &Path,
    format: RecordFormat,
) -> Result<Vec<PersonRecord>, ParseError> {
    let file = std::fs::File::open(path)?;
    let limits = ReadLimits::default();

    if is_gzipped(path) {
        parse_records_reader(GzDecoder::new(BufReader::new(file)), format, limits)
    } else {
        parse_records_reader(file, format, limits)
    }
}

#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    path.to_string_lossy().to_lowercase().ends_with(".gz")
}

/// Reader that fails once more than `limit` bytes have come through
struct LimitedReader<R> {
    inner: Take<R>,
    limit: u64,
    read: u64,
}

impl<R: Read> LimitedReader<R> {
    fn new(inner: R, limit: u64) -> Self {
        Self {
            inner: inner.take(limit.saturating_add(1)),
            limit,
            read: 0,
        }
    }

    fn exceeded(&self) -> bool {
        self.read > self.limit
    }
}

impl<R: Read> Read for LimitedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.read = self
            .read
            .saturating_add(u64::try_from(n).unwrap_or(u64::MAX));
        if self.exceeded() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("input exceeds {} bytes", self.limit),
            ));
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            RecordFormat::from_path(Path::new("people.json")),
            Some(RecordFormat::Json)
        );
        assert_eq!(
            RecordFormat::from_path(Path::new("dir/People.TSV.gz")),
            Some(RecordFormat::Tsv)
        );
        assert_eq!(
            RecordFormat::from_path(Path::new("people.csv")),
            Some(RecordFormat::Csv)
        );
        assert_eq!(RecordFormat::from_path(Path::new("people.xlsx")), None);
        assert_eq!(RecordFormat::from_path(&PathBuf::from("people")), None);
    }

    #[test]
    fn test_parse_records_text_dispatches_on_format() {
        let csv = "\"ANN\",\"SMITH, JR\",F,1990-03-12\n";
        let records = parse_records_text(csv, RecordFormat::Csv).unwrap();
        assert_eq!(records[0].last_name.as_deref(), Some("SMITH, JR"));

        // the same line read as TSV is a single short row
        assert!(parse_records_text(csv, RecordFormat::Tsv).is_err());

        let json = r#"[{"first_name": "ANN", "last_name": "LEE"}]"#;
        assert_eq!(parse_records_text(json, RecordFormat::Json).unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = parse_records_file(Path::new("people.xlsx")).unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(_)));
    }

    fn gzip(text: &str) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_byte_limit_applies_after_decompression() {
        let tsv = "JOANNE\tCAGEY\tF\t1962-05-25\n".repeat(100);
        let compressed = gzip(&tsv);
        let limits = ReadLimits {
            max_records: MAX_RECORDS,
            max_bytes: 1024,
        };
        assert!(compressed.len() < 1024);

        let err = parse_records_reader(GzDecoder::new(compressed.as_slice()), RecordFormat::Tsv, limits)
            .unwrap_err();
        assert!(matches!(err, ParseError::InputTooLarge { max: 1024 }));

        let json = format!("[{}]", r#"{"first_name": "A"},"#.repeat(100));
        let err = parse_records_reader(json.as_bytes(), RecordFormat::Json, limits).unwrap_err();
        assert!(matches!(err, ParseError::InputTooLarge { max: 1024 }));
    }

    #[test]
    fn test_input_at_byte_limit_is_accepted() {
        let tsv = "JOANNE\tCAGEY\tF\t1962-05-25\n";
        let limits = ReadLimits {
            max_records: 1,
            max_bytes: u64::try_from(tsv.len()).unwrap(),
        };
        let records = parse_records_reader(tsv.as_bytes(), RecordFormat::Tsv, limits).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_record_limit_per_format() {
        let limits = ReadLimits {
            max_records: 1,
            ..ReadLimits::default()
        };
        let csv = "ANN,LEE,F,1990-03-12\nBOB,LEE,M,1991-04-13\n";
        assert!(matches!(
            parse_records_reader(csv.as_bytes(), RecordFormat::Csv, limits),
            Err(ParseError::TooManyRecords { max: 1 })
        ));

        let json = r#"[{"first_name": "ANN"}, {"first_name": "BOB"}]"#;
        assert!(matches!(
            parse_records_reader(json.as_bytes(), RecordFormat::Json, limits),
            Err(ParseError::TooManyRecords { max: 1 })
        ));
    }

    #[test]
    fn test_parse_gzipped_tsv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.tsv.gz");

        let file = std::fs::File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        writeln!(encoder, "JOANNE\tCAGEY\tF\t1962-05-25").unwrap();
        encoder.finish().unwrap();

        let records = parse_records_file(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].first_name.as_deref(), Some("JOANNE"));
    }
}
