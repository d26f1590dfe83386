use thiserror::Error;
use tracing::debug;

use crate::core::person::{Person, PersonView};
use crate::core::types::{Confidence, PersonField, PersonRole};
use crate::matching::config::MatchConfig;
use crate::matching::scoring::{weak_match, MatchScore};

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid input: {role} has no {field}")]
    InvalidInput { role: PersonRole, field: PersonField },

    #[error("Weak match failed for {candidate}: {source}")]
    WeakMatch {
        candidate: PersonRole,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// A ranked candidate with its score
#[derive(Debug)]
pub struct MatchResult<'a, P> {
    /// Position of the candidate in the input list
    pub index: usize,

    /// The matched candidate
    pub person: &'a P,

    /// Score details
    pub score: MatchScore,
}

impl<P> Clone for MatchResult<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for MatchResult<'_, P> {}

/// The matching façade: scores candidates against a target and selects the best
#[derive(Debug, Clone, Copy, Default)]
pub struct NameMatcher {
    config: MatchConfig,
}

impl NameMatcher {
    /// Create a matcher with default thresholds
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher with custom thresholds
    #[must_use]
    pub fn with_config(config: MatchConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Find the candidates that best match `target`, best first.
    ///
    /// `ceiling` is the highest confidence accepted (negative values become 0);
    /// `max_returns` caps the number of results (values below 1 become 1).
    /// An empty result means nothing matched.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidInput` if the target or any candidate lacks a
    /// required field, or `MatchError::WeakMatch` if the weak-match predicate fails.
    pub fn find_matches<'a, P: Person>(
        &self,
        target: &P,
        candidates: &'a [P],
        alternate_last_name: Option<&str>,
        ceiling: i64,
        max_returns: i64,
    ) -> Result<Vec<&'a P>, MatchError> {
        Ok(self
            .find_scored_matches(target, candidates, alternate_last_name, ceiling, max_returns)?
            .into_iter()
            .map(|m| m.person)
            .collect())
    }

    /// Like [`find_matches`](Self::find_matches), keeping each result's score.
    ///
    /// Only the `max_returns` best-ranked candidates are considered; of those,
    /// candidates above `ceiling` are dropped rather than replaced by lower-ranked
    /// ones.
    ///
    /// # Errors
    ///
    /// See [`find_matches`](Self::find_matches).
    pub fn find_scored_matches<'a, P: Person>(
        &self,
        target: &P,
        candidates: &'a [P],
        alternate_last_name: Option<&str>,
        ceiling: i64,
        max_returns: i64,
    ) -> Result<Vec<MatchResult<'a, P>>, MatchError> {
        let ceiling = ceiling.max(0);
        let max_returns = usize::try_from(max_returns.max(1)).unwrap_or(usize::MAX);

        let ranked = self.score_all(target, candidates, alternate_last_name)?;
        let window = max_returns.min(ranked.len());

        let results: Vec<MatchResult<'a, P>> = ranked
            .into_iter()
            .take(window)
            .filter(|m| i64::from(m.score.confidence) <= ceiling)
            .collect();

        debug!(
            candidates = candidates.len(),
            window,
            ceiling,
            matched = results.len(),
            "Selected matches"
        );

        Ok(results)
    }

    /// Score every candidate and sort ascending by confidence.
    ///
    /// The sort is stable: candidates with equal confidence keep their input
    /// order. No window or ceiling is applied.
    ///
    /// # Errors
    ///
    /// See [`find_matches`](Self::find_matches).
    pub fn score_all<'a, P: Person>(
        &self,
        target: &P,
        candidates: &'a [P],
        alternate_last_name: Option<&str>,
    ) -> Result<Vec<MatchResult<'a, P>>, MatchError> {
        let target_view = PersonView::from_person(target, PersonRole::Target)?;

        let mut ranked = candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| -> Result<MatchResult<'a, P>, MatchError> {
                let role = PersonRole::Candidate(index);
                let candidate_view = PersonView::from_person(candidate, role)?;
                let score = MatchScore::from_views(
                    &target_view,
                    &candidate_view,
                    alternate_last_name,
                    &self.config,
                    || weak_match(target, candidate, role),
                )?;

                debug!(
                    index,
                    confidence = score.confidence,
                    tier = %score.tier,
                    "Scored candidate"
                );

                Ok(MatchResult {
                    index,
                    person: candidate,
                    score,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        ranked.sort_by_key(|m| m.score.confidence);
        Ok(ranked)
    }

    /// Score a single candidate
    ///
    /// # Errors
    ///
    /// See [`find_matches`](Self::find_matches).
    pub fn score<P: Person>(
        &self,
        target: &P,
        candidate: &P,
        alternate_last_name: Option<&str>,
    ) -> Result<Confidence, MatchError> {
        MatchScore::calculate(target, candidate, alternate_last_name, &self.config)
            .map(|s| s.confidence)
    }
}
