use std::cell::Cell;
use std::fmt;
use std::io::{BufReader, Read};

use serde::de::{self, DeserializeSeed, Deserializer, SeqAccess, Visitor};

use crate::core::record::PersonRecord;
use crate::parsing::ParseError;
use crate::utils::validation::{at_record_limit, check_field_length, MAX_RECORDS};

/// Parse a JSON array of person records
///
/// # Errors
///
/// See [`parse_json_reader`].
pub fn parse_json_text(text: &str) -> Result<Vec<PersonRecord>, ParseError> {
    parse_json_reader(text.as_bytes(), MAX_RECORDS)
}

/// Stream a JSON array of person records from a reader, stopping after
/// `max_records`.
///
/// # Errors
///
/// Returns `ParseError::Json` if the input is not an array of records,
/// `ParseError::TooManyRecords` if the limit is exceeded, or
/// `ParseError::FieldTooLong` if a name field is too long.
pub fn parse_json_reader<R: Read>(
    reader: R,
    max_records: usize,
) -> Result<Vec<PersonRecord>, ParseError> {
    let over_limit = Cell::new(false);
    let mut deserializer = serde_json::Deserializer::from_reader(BufReader::new(reader));

    let seed = RecordSeq {
        max_records,
        over_limit: &over_limit,
    };
    let records = match seed.deserialize(&mut deserializer) {
        Ok(records) => records,
        Err(_) if over_limit.get() => {
            return Err(ParseError::TooManyRecords { max: max_records });
        }
        Err(e) => return Err(e.into()),
    };
    deserializer.end()?;

    for (i, record) in records.iter().enumerate() {
        let fields = [
            &record.first_name,
            &record.last_name,
            &record.gender,
            &record.weak_match_key,
        ];
        for field in fields.into_iter().flatten() {
            if let Some(len) = check_field_length(field) {
                return Err(ParseError::FieldTooLong { record: i + 1, len });
            }
        }
    }

    Ok(records)
}

/// Array visitor that refuses to collect more than `max_records` elements
struct RecordSeq<'a> {
    max_records: usize,
    over_limit: &'a Cell<bool>,
}

impl<'de> DeserializeSeed<'de> for RecordSeq<'_> {
    type Value = Vec<PersonRecord>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(self)
    }
}

impl<'de> Visitor<'de> for RecordSeq<'_> {
    type Value = Vec<PersonRecord>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of person records")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut records = Vec::new();
        while let Some(record) = seq.next_element::<PersonRecord>()? {
            if at_record_limit(records.len(), self.max_records) {
                self.over_limit.set(true);
                return Err(de::Error::custom(format!(
                    "more than {} records",
                    self.max_records
                )));
            }
            records.push(record);
        }
        Ok(records)
    }
}
