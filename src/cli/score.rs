//! Score command - show how every candidate scores against a target.
//!
//! Unlike `find`, no ceiling or result window is applied: every candidate is
//! listed in ranked order with the tier that accepted it. Useful for tuning
//! thresholds and ceilings.

use clap::Args;

use crate::cli::find::{result_json, result_tsv_row, TSV_HEADER};
use crate::cli::{InputArgs, OutputFormat, TargetArgs, ThresholdArgs};
use crate::core::record::PersonRecord;
use crate::matching::engine::{MatchResult, NameMatcher};

/// Arguments for the score command
#[derive(Args)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

/// Execute the score command
///
/// # Errors
///
/// Returns an error if inputs cannot be loaded or a record is missing a
/// required field.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ScoreArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.thresholds.to_config()?;
    let candidates = args.input.load()?;
    let target = args.target.to_record();

    if verbose {
        eprintln!("Scoring {} candidates", candidates.len());
    }

    let ranked = NameMatcher::with_config(config).score_all(
        &target,
        &candidates,
        args.target.alternate_last_name.as_deref(),
    )?;

    match format {
        OutputFormat::Text => print_text_results(&ranked, &args.target),
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = ranked
                .iter()
                .enumerate()
                .map(|(i, m)| result_json(i + 1, m))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("{TSV_HEADER}");
            for (i, m) in ranked.iter().enumerate() {
                println!("{}", result_tsv_row(i + 1, m));
            }
        }
    }

    Ok(())
}

fn print_text_results(ranked: &[MatchResult<'_, PersonRecord>], target: &TargetArgs) {
    println!("\nScores for {}:", target.describe());
    println!("\n   {:>4}  {:>10}  {:<16}  Candidate", "Rank", "Confidence", "Tier");

    for (i, m) in ranked.iter().enumerate() {
        println!(
            "   {:>4}  {:>10}  {:<16}  {}",
            i + 1,
            m.score.confidence,
            m.score.tier.to_string(),
            m.person.label()
        );
    }
}
