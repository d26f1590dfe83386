use serde::Serialize;

use crate::core::person::{Person, PersonView};
use crate::core::types::{Confidence, MatchTier, PersonRole};
use crate::matching::config::MatchConfig;
use crate::matching::distance::edit_distance;
use crate::matching::engine::MatchError;
use crate::matching::surname::min_part_distance;

/// Confidence of one candidate against a target, with the terms that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchScore {
    /// Final confidence (0 = perfect)
    pub confidence: Confidence,

    /// Tier that accepted the candidate
    pub tier: MatchTier,

    /// Edit distance between the first names
    pub first_name_distance: Confidence,

    /// Surname term added to the base confidence (0 when surnames are equal)
    pub surname_distance: Confidence,
}

impl MatchScore {
    /// Score `candidate` against `target`.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidInput` if either person lacks a required
    /// field, or `MatchError::WeakMatch` if the weak-match predicate fails.
    pub fn calculate<P: Person>(
        target: &P,
        candidate: &P,
        alternate_last_name: Option<&str>,
        config: &MatchConfig,
    ) -> Result<Self, MatchError> {
        let target_view = PersonView::from_person(target, PersonRole::Target)?;
        let role = PersonRole::SingleCandidate;
        let candidate_view = PersonView::from_person(candidate, role)?;

        Self::from_views(
            &target_view,
            &candidate_view,
            alternate_last_name,
            config,
            || weak_match(target, candidate, role),
        )
    }

    /// Tiered confidence computation over already-validated fields.
    ///
    /// Each tier either accepts the candidate or adds the configured increment
    /// before the next tier. `weak_match` is called at most once, and only
    /// when the weak-match tier is reachable under its threshold.
    pub(crate) fn from_views<F>(
        target: &PersonView<'_>,
        candidate: &PersonView<'_>,
        alternate_last_name: Option<&str>,
        config: &MatchConfig,
        weak_match: F,
    ) -> Result<Self, MatchError>
    where
        F: FnOnce() -> Result<bool, MatchError>,
    {
        let increment = config.confidence_increment();
        let first_name_distance = edit_distance(candidate.first_name, target.first_name);
        let surname_distance =
            surname_distance(target.last_name, candidate.last_name, alternate_last_name);

        let accept = |confidence: Confidence, tier: MatchTier| -> Result<Self, MatchError> {
            Ok(Self {
                confidence,
                tier,
                first_name_distance,
                surname_distance,
            })
        };

        let target_dob = &target.birth_date;
        let candidate_dob = &candidate.birth_date;
        let mut confidence = first_name_distance.saturating_add(surname_distance);

        if candidate_dob.same_day(target_dob) && candidate.gender == target.gender {
            return accept(confidence, MatchTier::Exact);
        }
        confidence = confidence.saturating_add(increment);

        if candidate_dob.same_month_day(target_dob)
            && confidence < config.year_of_birth_threshold()
        {
            return accept(confidence, MatchTier::SameMonthDay);
        }
        confidence = confidence.saturating_add(increment);

        // Month off, or day-of-month digits transposed (1/21 vs 1/12)
        if candidate_dob.same_year(target_dob) && confidence < config.day_of_birth_threshold() {
            if candidate_dob.day == target_dob.day {
                return accept(confidence, MatchTier::SameYearSameDay);
            }
            confidence = confidence.saturating_add(increment);

            let reversed: String = candidate_dob.day_digits().chars().rev().collect();
            if reversed == target_dob.day_digits() {
                return accept(
                    confidence.saturating_add(increment),
                    MatchTier::TransposedDay,
                );
            }
        }
        confidence = confidence.saturating_add(increment);

        if confidence < config.weak_match_threshold() && weak_match()? {
            return accept(confidence.saturating_add(increment), MatchTier::WeakMatch);
        }
        confidence = confidence.saturating_add(increment);

        accept(confidence, MatchTier::Default)
    }
}

/// Surname term: 0 for identical surnames, otherwise the closest of the plain
/// distance, the distance to the alternate surname, and the part-wise distances
/// of compound surnames.
fn surname_distance(target_last: &str, candidate_last: &str, alternate: Option<&str>) -> Confidence {
    if candidate_last == target_last {
        return 0;
    }

    let mut best = edit_distance(candidate_last, target_last);

    if let Some(alternate) = alternate.filter(|alt| !alt.is_empty()) {
        best = best.min(edit_distance(candidate_last, alternate));
        if let Some(parts) = min_part_distance(alternate, candidate_last) {
            best = best.min(parts);
        }
    }

    if let Some(parts) = min_part_distance(target_last, candidate_last) {
        best = best.min(parts);
    }

    best
}

/// Run the caller's weak-match predicate, tagging failures with the candidate
pub(crate) fn weak_match<P: Person>(
    target: &P,
    candidate: &P,
    role: PersonRole,
) -> Result<bool, MatchError> {
    target
        .weak_match(candidate)
        .map_err(|e| MatchError::WeakMatch {
            candidate: role,
            source: Box::new(e),
        })
}
