use std::convert::Infallible;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::person::Person;

/// Date format used for `date_of_birth` in record files and on the command line
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A plain person record, as read from JSON or TSV input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Caller-side identifier, carried through to output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub gender: Option<String>,

    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,

    /// Extra value compared by [`Person::weak_match`] (e.g. middle initial)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weak_match_key: Option<String>,
}

impl PersonRecord {
    /// Build a record with every required field present.
    ///
    /// # Errors
    ///
    /// Returns an error if `date_of_birth` is not `YYYY-MM-DD`.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        gender: impl Into<String>,
        date_of_birth: &str,
    ) -> Result<Self, chrono::ParseError> {
        Ok(Self {
            id: None,
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            gender: Some(gender.into()),
            date_of_birth: Some(NaiveDate::parse_from_str(date_of_birth, DATE_FORMAT)?),
            weak_match_key: None,
        })
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_weak_match_key(mut self, key: impl Into<String>) -> Self {
        self.weak_match_key = Some(key.into());
        self
    }

    /// Short label for display: the id if present, otherwise "FIRST LAST"
    #[must_use]
    pub fn label(&self) -> String {
        if let Some(id) = &self.id {
            return id.clone();
        }
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or("?"),
            self.last_name.as_deref().unwrap_or("?")
        )
    }
}

impl Person for PersonRecord {
    type Error = Infallible;

    fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }

    /// Weak match when both records carry the same key
    fn weak_match(&self, candidate: &Self) -> Result<bool, Self::Error> {
        Ok(match (&self.weak_match_key, &candidate.weak_match_key) {
            (Some(ours), Some(theirs)) => ours == theirs,
            _ => false,
        })
    }
}
