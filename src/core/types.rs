use serde::{Deserialize, Serialize};

/// Match confidence: 0 is a perfect match, larger values are weaker matches
pub type Confidence = u32;

/// The scoring tier that accepted a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Date of birth and gender both equal
    Exact,
    /// Same month and day of birth, different year
    SameMonthDay,
    /// Same year and day of birth (month differs)
    SameYearSameDay,
    /// Same year, day-of-month digits reversed (e.g. 12 vs 21)
    TransposedDay,
    /// Caller-defined weak match
    WeakMatch,
    /// Every tier failed; confidence is the accumulated total
    Default,
}

impl MatchTier {
    /// Machine-readable name, as serialized
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::SameMonthDay => "same_month_day",
            Self::SameYearSameDay => "same_year_same_day",
            Self::TransposedDay => "transposed_day",
            Self::WeakMatch => "weak_match",
            Self::Default => "default",
        }
    }
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::SameMonthDay => write!(f, "same month/day"),
            Self::SameYearSameDay => write!(f, "same year/day"),
            Self::TransposedDay => write!(f, "transposed day"),
            Self::WeakMatch => write!(f, "weak match"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Which side of a comparison a person record sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonRole {
    Target,
    /// Candidate at this position in the input list
    Candidate(usize),
    /// The one candidate of a pairwise comparison
    SingleCandidate,
}

impl std::fmt::Display for PersonRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Target => write!(f, "target"),
            Self::Candidate(index) => write!(f, "candidate {index}"),
            Self::SingleCandidate => write!(f, "candidate"),
        }
    }
}

/// A person field the matcher requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonField {
    FirstName,
    LastName,
    Gender,
    DateOfBirth,
}

impl std::fmt::Display for PersonField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstName => write!(f, "first name"),
            Self::LastName => write!(f, "last name"),
            Self::Gender => write!(f, "gender"),
            Self::DateOfBirth => write!(f, "date of birth"),
        }
    }
}
