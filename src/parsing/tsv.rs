use std::io::Read;

use chrono::NaiveDate;

use crate::core::record::{PersonRecord, DATE_FORMAT};
use crate::parsing::ParseError;
use crate::utils::validation::{at_record_limit, check_field_length, non_empty, MAX_RECORDS};

/// Parse TSV/CSV text with columns:
/// `first_name, last_name, gender, date_of_birth, [weak_match_key], [id]`
///
/// # Errors
///
/// See [`parse_delimited`].
pub fn parse_tsv_text(text: &str, delimiter: u8) -> Result<Vec<PersonRecord>, ParseError> {
    parse_delimited(text.as_bytes(), delimiter, MAX_RECORDS)
}

/// Parse delimited records from a reader, stopping after `max_records`.
///
/// Fields may be quoted. Blank lines and `#` comments are skipped, as is a
/// header row whose first two cells are `first_name`/`last_name` (or
/// `first`/`last`). Empty cells become absent fields.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a line has fewer than 4 fields or an
/// unparseable date, `ParseError::FieldTooLong` if a cell is too long,
/// `ParseError::TooManyRecords` if the limit is exceeded, or
/// `ParseError::Csv` for malformed input.
pub fn parse_delimited<R: Read>(
    reader: R,
    delimiter: u8,
    max_records: usize,
) -> Result<Vec<PersonRecord>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut first_row = true;

    for result in reader.records() {
        let row = result?;
        if row.iter().all(str::is_empty) {
            continue;
        }

        if first_row {
            first_row = false;
            if is_header(&row) {
                continue;
            }
        }

        // 1-based, as reported by the reader
        let line_num = row
            .position()
            .map_or(0, |p| usize::try_from(p.line()).unwrap_or(usize::MAX));

        if row.len() < 4 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has fewer than 4 fields"
            )));
        }

        if let Some(len) = row.iter().find_map(check_field_length) {
            return Err(ParseError::FieldTooLong {
                record: line_num,
                len,
            });
        }

        let date_of_birth = row
            .get(3)
            .and_then(non_empty)
            .map(|dob| {
                NaiveDate::parse_from_str(dob, DATE_FORMAT).map_err(|_| {
                    ParseError::InvalidFormat(format!(
                        "Invalid date of birth on line {line_num}: '{dob}' (expected YYYY-MM-DD)"
                    ))
                })
            })
            .transpose()?;

        let cell = |idx: usize| row.get(idx).and_then(non_empty).map(String::from);

        if at_record_limit(records.len(), max_records) {
            return Err(ParseError::TooManyRecords { max: max_records });
        }

        records.push(PersonRecord {
            id: cell(5),
            first_name: cell(0),
            last_name: cell(1),
            gender: cell(2),
            date_of_birth,
            weak_match_key: cell(4),
        });
    }

    Ok(records)
}

fn is_header(row: &csv::StringRecord) -> bool {
    let cell = |idx: usize| row.get(idx).map(str::to_lowercase).unwrap_or_default();
    matches!(
        (cell(0).as_str(), cell(1).as_str()),
        ("first_name", "last_name") | ("first", "last")
    )
}
