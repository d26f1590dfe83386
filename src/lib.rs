//! # name-matcher
//!
//! A library for fuzzy identity matching of person records.
//!
//! Given a target person (first name, last name, gender, date of birth) and a
//! list of candidate records, `name-matcher` ranks the candidates by an integer
//! confidence (0 = perfect match, larger = weaker) and returns the best ones
//! within a caller-defined ceiling.
//!
//! ## Features
//!
//! - **Misspelled names**: Levenshtein distance on first and last names
//! - **Compound surnames**: Hyphenated or space-separated surnames match on their parts
//! - **Alternate surname**: A second surname (e.g. maiden name) is tried too
//! - **Transposed birth days**: 12 vs 21 is treated as a likely typo
//! - **Weak match**: A caller-defined predicate on fields the matcher cannot see
//!
//! ## Example
//!
//! ```rust
//! use name_matcher::{NameMatcher, PersonRecord};
//!
//! let target = PersonRecord::new("NICHOLAS", "CAGEY", "M", "1957-05-24").unwrap();
//! let candidates = vec![
//!     PersonRecord::new("NICHOLAS", "CAGEY", "M", "1957-04-24").unwrap(),
//!     PersonRecord::new("JOANNE", "CAGEY", "F", "1962-05-25").unwrap(),
//! ];
//!
//! let matcher = NameMatcher::new();
//! let matches = matcher.find_matches(&target, &candidates, None, 8, 5).unwrap();
//!
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].first_name.as_deref(), Some("NICHOLAS"));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: The `Person` capability, birth dates, and the `PersonRecord` type
//! - [`matching`]: Matching engine, scoring tiers, and configuration
//! - [`parsing`]: Readers for JSON, TSV and CSV record files
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::person::{BirthDate, Person};
pub use crate::core::record::PersonRecord;
pub use crate::core::types::*;
pub use crate::matching::config::{MatchConfig, MatchOptions};
pub use crate::matching::engine::{MatchError, MatchResult, NameMatcher};
pub use crate::matching::scoring::MatchScore;
