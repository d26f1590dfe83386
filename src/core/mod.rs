//! Core data types for person matching.
//!
//! - [`Person`](person::Person): the read-only capability the matcher scores against
//! - [`BirthDate`](person::BirthDate): year/month/day components of a date of birth
//! - [`PersonRecord`](record::PersonRecord): a concrete record type for file input
//! - [`Confidence`](types::Confidence), [`MatchTier`](types::MatchTier): result types
//!
//! ## Fields
//!
//! | Field | Compared by |
//! |-------|-------------|
//! | first name | edit distance |
//! | last name | edit distance, alternate name, hyphenated parts |
//! | gender | exact equality |
//! | date of birth | year, month+day, and day components |
//!
//! No case folding or other normalization is applied; callers that want
//! case-insensitive matching should normalize before building records.

pub mod person;
pub mod record;
pub mod types;
