use clap::Args;

use crate::cli::{or_dash, InputArgs, OutputFormat, TargetArgs, ThresholdArgs};
use crate::core::record::{PersonRecord, DATE_FORMAT};
use crate::matching::engine::{MatchResult, NameMatcher};

#[derive(Args)]
pub struct FindArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Highest confidence accepted (0 = perfect match only; negative values act as 0)
    #[arg(long, default_value = "8", allow_negative_numbers = true)]
    pub ceiling: i64,

    /// Number of best-ranked candidates considered; values below 1 act as 1
    #[arg(short = 'n', long, default_value = "5", allow_negative_numbers = true)]
    pub max_returns: i64,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

/// Execute the find subcommand
///
/// # Errors
///
/// Returns an error if inputs cannot be loaded or a record is missing a
/// required field.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: FindArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.thresholds.to_config()?;
    let candidates = args.input.load()?;
    let target = args.target.to_record();

    if verbose {
        eprintln!(
            "Loaded {} candidates; thresholds: year {}, day {}, weak {}, increment {}",
            candidates.len(),
            config.year_of_birth_threshold(),
            config.day_of_birth_threshold(),
            config.weak_match_threshold(),
            config.confidence_increment(),
        );
    }

    let matcher = NameMatcher::with_config(config);
    let matches = matcher.find_scored_matches(
        &target,
        &candidates,
        args.target.alternate_last_name.as_deref(),
        args.ceiling,
        args.max_returns,
    )?;

    match format {
        OutputFormat::Text => print_text_results(&matches, &args.target),
        OutputFormat::Json => print_json_results(&matches)?,
        OutputFormat::Tsv => print_tsv_results(&matches),
    }

    Ok(())
}

fn print_text_results(matches: &[MatchResult<'_, PersonRecord>], target: &TargetArgs) {
    if matches.is_empty() {
        eprintln!("No matching candidates found.");
        return;
    }

    println!("\nMatches for {}:", target.describe());

    for (rank, m) in matches.iter().enumerate() {
        let dob = m
            .person
            .date_of_birth
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default();
        println!(
            "\n#{} {} ({}, {})",
            rank + 1,
            m.person.label(),
            or_dash(m.person.gender.as_deref()),
            dob
        );
        println!(
            "   Confidence: {} ({}; first name +{}, last name +{})",
            m.score.confidence, m.score.tier, m.score.first_name_distance, m.score.surname_distance
        );
    }
}

pub(crate) fn result_json(rank: usize, m: &MatchResult<'_, PersonRecord>) -> serde_json::Value {
    serde_json::json!({
        "rank": rank,
        "index": m.index,
        "confidence": m.score.confidence,
        "tier": m.score.tier,
        "first_name_distance": m.score.first_name_distance,
        "surname_distance": m.score.surname_distance,
        "person": m.person,
    })
}

fn print_json_results(matches: &[MatchResult<'_, PersonRecord>]) -> anyhow::Result<()> {
    let output: Vec<serde_json::Value> = matches
        .iter()
        .enumerate()
        .map(|(i, m)| result_json(i + 1, m))
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub(crate) const TSV_HEADER: &str =
    "rank\tindex\tid\tfirst_name\tlast_name\tgender\tdate_of_birth\tconfidence\ttier";

pub(crate) fn result_tsv_row(rank: usize, m: &MatchResult<'_, PersonRecord>) -> String {
    let dob = m
        .person
        .date_of_birth
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default();
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        rank,
        m.index,
        m.person.id.as_deref().unwrap_or(""),
        m.person.first_name.as_deref().unwrap_or(""),
        m.person.last_name.as_deref().unwrap_or(""),
        m.person.gender.as_deref().unwrap_or(""),
        dob,
        m.score.confidence,
        m.score.tier.name(),
    )
}

fn print_tsv_results(matches: &[MatchResult<'_, PersonRecord>]) {
    println!("{TSV_HEADER}");
    for (i, m) in matches.iter().enumerate() {
        println!("{}", result_tsv_row(i + 1, m));
    }
}
