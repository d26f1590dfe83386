//! Person matching engine and scoring algorithm.
//!
//! - [`NameMatcher`](engine::NameMatcher): main entry point for finding matches
//! - [`MatchScore`](scoring::MatchScore): confidence of one candidate, with its terms
//! - [`MatchConfig`](config::MatchConfig): validated thresholds
//!
//! ## Scoring
//!
//! Confidence starts at the first-name edit distance plus a surname term, then
//! passes through a series of date-of-birth tiers. Each tier either accepts the
//! candidate or adds `confidence_increment` before the next:
//!
//! 1. **Exact**: date of birth and gender equal
//! 2. **Same month/day**: different year, confidence under `year_of_birth_threshold`
//! 3. **Same year**: confidence under `day_of_birth_threshold`, and either the
//!    same day of month or transposed day digits (12 vs 21)
//! 4. **Weak match**: caller predicate holds, confidence under `weak_match_threshold`
//! 5. **Default**: accumulated confidence
//!
//! The surname term is the smallest of the plain edit distance, the distance to
//! an alternate surname, and the closest pair of parts of hyphenated or
//! space-separated surnames.
//!
//! ## Selection
//!
//! Scored candidates are stably sorted by confidence. Only the first
//! `max_returns` are considered, and of those only candidates at or under the
//! ceiling are returned.
//!
//! ## Example
//!
//! ```rust
//! use name_matcher::{NameMatcher, PersonRecord};
//!
//! let target = PersonRecord::new("NICHOLS", "CAGEY", "M", "2000-10-15").unwrap();
//! let candidates = vec![
//!     PersonRecord::new("NICHOLS", "MCNICKOLS-CAGEY", "M", "2002-10-15").unwrap(),
//!     PersonRecord::new("LAURA", "MCNICKOLS", "F", "1972-08-04").unwrap(),
//! ];
//!
//! let matcher = NameMatcher::new();
//! let found = matcher.find_matches(&target, &candidates, Some("CAGEY"), 8, 5).unwrap();
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].last_name.as_deref(), Some("MCNICKOLS-CAGEY"));
//! ```

pub mod config;
pub mod distance;
pub mod engine;
pub mod scoring;
pub mod surname;
