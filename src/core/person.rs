use chrono::{Datelike, NaiveDate};

use crate::core::types::{PersonField, PersonRole};
use crate::matching::engine::MatchError;

/// Read-only view of a person record, implemented by the embedding application.
///
/// Accessors return `None` when a field is absent; the matcher rejects such
/// records with [`MatchError::InvalidInput`] instead of scoring them.
pub trait Person {
    /// Error raised by [`Person::weak_match`]
    type Error: std::error::Error + Send + Sync + 'static;

    fn first_name(&self) -> Option<&str>;

    fn last_name(&self) -> Option<&str>;

    /// Compared by exact equality, no normalization
    fn gender(&self) -> Option<&str>;

    fn date_of_birth(&self) -> Option<NaiveDate>;

    /// Caller-defined secondary equality check on fields the matcher cannot see
    /// (e.g. middle initial). Called on the target with the candidate as argument.
    ///
    /// # Errors
    ///
    /// Any error aborts the whole match call.
    fn weak_match(&self, candidate: &Self) -> Result<bool, Self::Error>;
}

/// Year, month and day of a birth date, compared component-wise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl BirthDate {
    #[must_use]
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    #[must_use]
    pub fn same_day(&self, other: &Self) -> bool {
        self == other
    }

    #[must_use]
    pub fn same_month_day(&self, other: &Self) -> bool {
        self.month == other.month && self.day == other.day
    }

    #[must_use]
    pub fn same_year(&self, other: &Self) -> bool {
        self.year == other.year
    }

    /// Two-digit, zero-padded day of month ("04", "21")
    #[must_use]
    pub fn day_digits(&self) -> String {
        format!("{:02}", self.day)
    }
}

impl From<NaiveDate> for BirthDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

/// The fields of a [`Person`] after presence checks
#[derive(Debug, Clone, Copy)]
pub struct PersonView<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub gender: &'a str,
    pub birth_date: BirthDate,
}

impl<'a> PersonView<'a> {
    /// Extract the fields the matcher needs, failing on the first absent one.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidInput` naming the role and the missing field.
    pub fn from_person<P: Person>(person: &'a P, role: PersonRole) -> Result<Self, MatchError> {
        let missing = |field| MatchError::InvalidInput { role, field };

        Ok(Self {
            first_name: person
                .first_name()
                .ok_or_else(|| missing(PersonField::FirstName))?,
            last_name: person
                .last_name()
                .ok_or_else(|| missing(PersonField::LastName))?,
            gender: person.gender().ok_or_else(|| missing(PersonField::Gender))?,
            birth_date: person
                .date_of_birth()
                .map(BirthDate::from)
                .ok_or_else(|| missing(PersonField::DateOfBirth))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::PersonRecord;

    #[test]
    fn test_birth_date_components() {
        let date = NaiveDate::from_ymd_opt(1957, 5, 24).unwrap();
        let birth = BirthDate::from(date);
        assert_eq!(birth, BirthDate::new(1957, 5, 24));
    }

    #[test]
    fn test_birth_date_comparisons() {
        let a = BirthDate::new(1957, 5, 24);
        let b = BirthDate::new(1962, 5, 24);
        let c = BirthDate::new(1957, 4, 24);

        assert!(a.same_day(&a));
        assert!(!a.same_day(&b));
        assert!(a.same_month_day(&b));
        assert!(!a.same_month_day(&c));
        assert!(a.same_year(&c));
        assert!(!a.same_year(&b));
    }

    #[test]
    fn test_day_digits_zero_padded() {
        assert_eq!(BirthDate::new(1972, 8, 4).day_digits(), "04");
        assert_eq!(BirthDate::new(1972, 8, 21).day_digits(), "21");
    }

    #[test]
    fn test_view_reports_missing_field() {
        let mut record = PersonRecord::new("NICHOLAS", "CAGEY", "M", "1957-05-24").unwrap();
        record.gender = None;

        let err = PersonView::from_person(&record, PersonRole::Candidate(3)).unwrap_err();
        match err {
            MatchError::InvalidInput { role, field } => {
                assert_eq!(role, PersonRole::Candidate(3));
                assert_eq!(field, PersonField::Gender);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_view_accepts_empty_strings() {
        let record = PersonRecord::new("", "", "", "2000-01-01").unwrap();
        let view = PersonView::from_person(&record, PersonRole::Target).unwrap();
        assert_eq!(view.first_name, "");
        assert_eq!(view.birth_date, BirthDate::new(2000, 1, 1));
    }
}
