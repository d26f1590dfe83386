use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::core::types::Confidence;

/// Default confidence below which a same month/day birth date is accepted
pub const DEFAULT_YEAR_OF_BIRTH_THRESHOLD: Confidence = 5;
/// Default confidence below which a same-year birth date is accepted
pub const DEFAULT_DAY_OF_BIRTH_THRESHOLD: Confidence = 5;
/// Default confidence below which a weak match is accepted
pub const DEFAULT_WEAK_MATCH_THRESHOLD: Confidence = 5;
/// Default penalty added for every failed tier
pub const DEFAULT_CONFIDENCE_INCREMENT: Confidence = 2;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Caller-supplied thresholds, any of which may be missing or out of range.
///
/// Deserialized from JSON config files and built from CLI flags; turned into a
/// validated [`MatchConfig`] with [`MatchConfig::from_options`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchOptions {
    #[serde(default)]
    pub year_of_birth_threshold: Option<i64>,
    #[serde(default)]
    pub day_of_birth_threshold: Option<i64>,
    #[serde(default)]
    pub weak_match_threshold: Option<i64>,
    #[serde(default)]
    pub confidence_increment: Option<i64>,
}

impl MatchOptions {
    /// Load options from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse options from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Overlay `other` on top of `self`: values present in `other` win
    #[must_use]
    pub fn merge(self, other: MatchOptions) -> Self {
        Self {
            year_of_birth_threshold: other.year_of_birth_threshold.or(self.year_of_birth_threshold),
            day_of_birth_threshold: other.day_of_birth_threshold.or(self.day_of_birth_threshold),
            weak_match_threshold: other.weak_match_threshold.or(self.weak_match_threshold),
            confidence_increment: other.confidence_increment.or(self.confidence_increment),
        }
    }
}

/// Validated matcher thresholds. Every value is a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchConfig {
    year_of_birth_threshold: Confidence,
    day_of_birth_threshold: Confidence,
    weak_match_threshold: Confidence,
    confidence_increment: Confidence,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            year_of_birth_threshold: DEFAULT_YEAR_OF_BIRTH_THRESHOLD,
            day_of_birth_threshold: DEFAULT_DAY_OF_BIRTH_THRESHOLD,
            weak_match_threshold: DEFAULT_WEAK_MATCH_THRESHOLD,
            confidence_increment: DEFAULT_CONFIDENCE_INCREMENT,
        }
    }
}

impl MatchConfig {
    /// Build a config from options. A value is used only if present and
    /// strictly positive; anything else keeps the default.
    #[must_use]
    pub fn from_options(options: &MatchOptions) -> Self {
        let defaults = Self::default();
        Self {
            year_of_birth_threshold: positive_or(
                "year_of_birth_threshold",
                options.year_of_birth_threshold,
                defaults.year_of_birth_threshold,
            ),
            day_of_birth_threshold: positive_or(
                "day_of_birth_threshold",
                options.day_of_birth_threshold,
                defaults.day_of_birth_threshold,
            ),
            weak_match_threshold: positive_or(
                "weak_match_threshold",
                options.weak_match_threshold,
                defaults.weak_match_threshold,
            ),
            confidence_increment: positive_or(
                "confidence_increment",
                options.confidence_increment,
                defaults.confidence_increment,
            ),
        }
    }

    #[must_use]
    pub fn year_of_birth_threshold(&self) -> Confidence {
        self.year_of_birth_threshold
    }

    #[must_use]
    pub fn day_of_birth_threshold(&self) -> Confidence {
        self.day_of_birth_threshold
    }

    #[must_use]
    pub fn weak_match_threshold(&self) -> Confidence {
        self.weak_match_threshold
    }

    #[must_use]
    pub fn confidence_increment(&self) -> Confidence {
        self.confidence_increment
    }
}

fn positive_or(name: &str, value: Option<i64>, default: Confidence) -> Confidence {
    match value {
        None => default,
        Some(v) if v > 0 => Confidence::try_from(v).unwrap_or(Confidence::MAX),
        Some(v) => {
            warn!("Ignoring non-positive {name} ({v}), using default {default}");
            default
        }
    }
}
