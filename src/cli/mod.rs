//! Command-line interface for name-matcher.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **find**: Find the best matches for a target person in a candidate file
//! - **score**: Show every candidate's confidence and the tier that accepted it
//!
//! ## Usage
//!
//! ```text
//! # Best five matches within confidence 8
//! name-matcher find candidates.tsv --first NICHOLS --last CAGEY --gender M --dob 2000-10-15
//!
//! # Try an alternate (e.g. maiden) surname too, strict ceiling
//! name-matcher find candidates.json --first ANN --last LEE --gender F --dob 1990-03-12 \
//!     --alternate-last-name SMITH --ceiling 0
//!
//! # Pipe JSON records from another tool
//! export-people | name-matcher score - --first ANN --last LEE --gender F --dob 1990-03-12
//!
//! # JSON output for scripting
//! name-matcher --format json find candidates.csv.gz --first ANN --last LEE --gender F --dob 1990-03-12
//! ```

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::core::record::{PersonRecord, DATE_FORMAT};
use crate::matching::config::{MatchConfig, MatchOptions};
use crate::parsing::{self, ReadLimits, RecordFormat};

pub mod find;
pub mod score;

#[derive(Parser)]
#[command(name = "name-matcher")]
#[command(version)]
#[command(about = "Fuzzy-match a person against candidate person records")]
#[command(
    long_about = "name-matcher ranks candidate person records against a target by first name, last name, gender and date of birth.\n\nIt tolerates common data-entry noise:\n- Misspelled names\n- Hyphenated or compound surnames entered inconsistently\n- An alternate (e.g. maiden) surname\n- Transposed day-of-month digits in dates of birth"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the best matches for a target person
    Find(find::FindArgs),

    /// Score every candidate against a target person
    Score(score::ScoreArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Candidate record input
#[derive(clap::Args)]
pub struct InputArgs {
    /// Candidate records (JSON, TSV or CSV, optionally .gz).
    /// Use '-' for stdin
    #[arg(required = true)]
    pub candidates: PathBuf,

    /// Record format (detected from the file extension by default; JSON for stdin)
    #[arg(long)]
    pub input_format: Option<RecordFormat>,
}

impl InputArgs {
    /// Read and parse the candidate records
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or parsed.
    pub fn load(&self) -> anyhow::Result<Vec<PersonRecord>> {
        if self.candidates.as_os_str() == "-" {
            let format = self.input_format.unwrap_or(RecordFormat::Json);
            let records =
                parsing::parse_records_reader(std::io::stdin().lock(), format, ReadLimits::default())
                    .context("Failed to read candidates from stdin")?;
            return Ok(records);
        }

        let records = match self.input_format {
            Some(format) => parsing::parse_records_file_as(&self.candidates, format),
            None => parsing::parse_records_file(&self.candidates),
        }
        .with_context(|| format!("Failed to load {}", self.candidates.display()))?;

        Ok(records)
    }
}

/// The person to match
#[derive(clap::Args)]
pub struct TargetArgs {
    /// Target first name
    #[arg(long)]
    pub first: String,

    /// Target last name
    #[arg(long)]
    pub last: String,

    /// Target gender (compared exactly)
    #[arg(long)]
    pub gender: String,

    /// Target date of birth (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub dob: NaiveDate,

    /// Value compared against each candidate's weak_match_key
    #[arg(long)]
    pub weak_key: Option<String>,

    /// Alternate last name to also try (e.g. a maiden name)
    #[arg(long)]
    pub alternate_last_name: Option<String>,
}

impl TargetArgs {
    #[must_use]
    pub fn to_record(&self) -> PersonRecord {
        PersonRecord {
            id: None,
            first_name: Some(self.first.clone()),
            last_name: Some(self.last.clone()),
            gender: Some(self.gender.clone()),
            date_of_birth: Some(self.dob),
            weak_match_key: self.weak_key.clone(),
        }
    }

    /// "FIRST LAST (GENDER, DOB)"
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "{} {} ({}, {})",
            self.first,
            self.last,
            self.gender,
            self.dob.format(DATE_FORMAT)
        )
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| format!("invalid date '{s}' (expected YYYY-MM-DD): {e}"))
}

/// Threshold overrides. Non-positive values fall back to the defaults.
#[derive(clap::Args)]
pub struct ThresholdArgs {
    /// JSON file with threshold settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Confidence below which a same month/day, different year birth date is accepted (default 5)
    #[arg(long, allow_negative_numbers = true)]
    pub year_threshold: Option<i64>,

    /// Confidence below which a same-year birth date is accepted (default 5)
    #[arg(long, allow_negative_numbers = true)]
    pub day_threshold: Option<i64>,

    /// Confidence below which a weak match is accepted (default 5)
    #[arg(long, allow_negative_numbers = true)]
    pub weak_threshold: Option<i64>,

    /// Penalty added for each failed tier (default 2)
    #[arg(long, allow_negative_numbers = true)]
    pub increment: Option<i64>,
}

impl ThresholdArgs {
    /// Build the matcher config: config file first, flags on top
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub fn to_config(&self) -> anyhow::Result<MatchConfig> {
        let file_options = match &self.config {
            Some(path) => MatchOptions::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => MatchOptions::default(),
        };

        let flag_options = MatchOptions {
            year_of_birth_threshold: self.year_threshold,
            day_of_birth_threshold: self.day_threshold,
            weak_match_threshold: self.weak_threshold,
            confidence_increment: self.increment,
        };

        Ok(MatchConfig::from_options(&file_options.merge(flag_options)))
    }
}

/// Display value for an optional field
pub(crate) fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
