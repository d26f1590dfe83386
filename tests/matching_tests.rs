//! Matching behavior against the canonical fixture set
//!
//! Five candidates sharing a family surname, matched against targets that
//! differ in birth date, first name, surname hyphenation and gender.

use chrono::NaiveDate;
use name_matcher::{
    MatchConfig, MatchError, MatchTier, NameMatcher, Person, PersonRecord, PersonRole,
};

const WEAK_KEY: &str = "012345";

fn person(first: &str, last: &str, gender: &str, dob: &str) -> PersonRecord {
    PersonRecord::new(first, last, gender, dob)
        .unwrap()
        .with_weak_match_key(WEAK_KEY)
}

fn candidates() -> Vec<PersonRecord> {
    vec![
        person("NICHOLAS", "CAGEY", "M", "1957-04-24").with_id("c1"),
        person("JOANNE", "CAGEY", "F", "1962-05-25").with_id("c2"),
        person("LAURA", "MCNICKOLS", "F", "1972-08-04").with_id("c3"),
        person("NICHOLS", "MCNICKOLS-CAGEY", "M", "2002-10-15").with_id("c4"),
        person("MICHELLE", "CAGEY", "F", "2015-02-10").with_id("c5"),
    ]
}

fn ids(found: &[&PersonRecord]) -> Vec<String> {
    found.iter().map(|p| p.label()).collect()
}

fn find(target: &PersonRecord, ceiling: i64, max_returns: i64) -> Vec<String> {
    let candidates = candidates();
    let found = NameMatcher::new()
        .find_matches(target, &candidates, Some("CAGEY"), ceiling, max_returns)
        .unwrap();
    ids(&found)
}

#[test]
fn test_birth_month_one_off() {
    let target = person("NICHOLAS", "CAGEY", "M", "1957-05-24");
    assert_eq!(find(&target, 8, 5), vec!["c1"]);
}

#[test]
fn test_birth_date_far_off() {
    let target = person("NICHOLAS", "CAGEY", "M", "1972-08-04");
    assert_eq!(find(&target, 8, 5), vec!["c1"]);
}

#[test]
fn test_first_name_far_off() {
    let target = person("BABYGIRL", "CAGEY", "F", "2015-02-10");
    assert_eq!(find(&target, 8, 5), vec!["c5"]);
}

#[test]
fn test_hyphenated_surname() {
    let target = person("NICHOLS", "CAGEY", "M", "2000-10-15");
    assert_eq!(find(&target, 8, 5), vec!["c4"]);
}

#[test]
fn test_completely_wrong_name() {
    let target = person("ALBERT", "WASHINGTON", "M", "2000-10-15");
    assert!(find(&target, 8, 5).is_empty());
}

#[test]
fn test_strict_ceiling() {
    let exact = person("NICHOLAS", "CAGEY", "M", "1957-04-24");
    assert_eq!(find(&exact, 0, 5), vec!["c1"]);

    let one_letter_off = person("NICOLAS", "CAGEY", "M", "1957-04-24");
    assert!(find(&one_letter_off, 0, 5).is_empty());
}

#[test]
fn test_lenient_ceiling_returns_ranked_list() {
    let target = person("NICHOLS", "CAGEY", "M", "1972-08-04");
    assert_eq!(find(&target, 20, 5), vec!["c4", "c1", "c5", "c2"]);
}

#[test]
fn test_window_limits_lenient_results() {
    let target = person("NICHOLS", "CAGEY", "M", "1972-08-04");
    assert_eq!(find(&target, 20, 2), vec!["c4", "c1"]);
}

#[test]
fn test_identity_scores_zero() {
    let matcher = NameMatcher::new();
    for p in candidates() {
        assert_eq!(matcher.score(&p, &p, Some("")).unwrap(), 0);
        assert_eq!(matcher.score(&p, &p, None).unwrap(), 0);
    }
}

#[test]
fn test_window_never_exceeds_candidates_or_max_returns() {
    let candidates = candidates();
    let target = person("NICHOLS", "CAGEY", "M", "1972-08-04");
    let matcher = NameMatcher::new();

    for max_returns in -1..8 {
        let found = matcher
            .find_matches(&target, &candidates, Some("CAGEY"), 1000, max_returns)
            .unwrap();
        let limit = usize::try_from(max_returns.max(1)).unwrap().min(candidates.len());
        assert_eq!(found.len(), limit);
    }
}

#[test]
fn test_ceiling_is_monotonic_within_window() {
    let candidates = candidates();
    let target = person("NICHOLS", "CAGEY", "M", "1972-08-04");
    let matcher = NameMatcher::new();

    let mut previous: Vec<String> = Vec::new();
    for ceiling in 0..30 {
        let found = ids(&matcher
            .find_matches(&target, &candidates, Some("CAGEY"), ceiling, 3)
            .unwrap());
        assert!(previous.iter().all(|id| found.contains(id)));
        previous = found;
    }
}

#[test]
fn test_equal_confidence_keeps_input_order() {
    let candidates = vec![
        person("NICHOLAS", "CAGEY", "M", "1957-04-24").with_id("first"),
        person("NICHOLAS", "CAGEY", "M", "1957-04-24").with_id("second"),
        person("NICHOLAS", "CAGEY", "M", "1957-04-24").with_id("third"),
    ];
    let target = person("NICHOLAS", "CAGEY", "M", "1957-04-24");
    let found = NameMatcher::new()
        .find_matches(&target, &candidates, None, 0, 5)
        .unwrap();
    assert_eq!(ids(&found), vec!["first", "second", "third"]);
}

#[test]
fn test_hyphenation_never_hurts_surname_term() {
    let matcher = NameMatcher::new();
    let target = person("ANN", "JONES", "F", "1990-03-12");
    let plain = person("ANN", "JONAS", "F", "1990-03-12");
    let hyphenated = person("ANN", "SMITH-JONAS", "F", "1990-03-12");
    let exact_part = person("ANN", "SMITH-JONES", "F", "1990-03-12");

    assert_eq!(matcher.score(&target, &plain, None).unwrap(), 1);
    assert_eq!(matcher.score(&target, &hyphenated, None).unwrap(), 1);
    assert_eq!(matcher.score(&target, &exact_part, None).unwrap(), 0);
}

#[test]
fn test_transposed_day_stays_in_day_tier() {
    let target = person("ANN", "LEE", "F", "1990-03-12");
    let candidates = vec![person("ANN", "LEE", "F", "1990-03-21")];
    let results = NameMatcher::new()
        .find_scored_matches(&target, &candidates, None, 100, 1)
        .unwrap();
    assert_eq!(results[0].score.tier, MatchTier::TransposedDay);
    assert_eq!(results[0].score.confidence, 8);
}

#[test]
fn test_missing_date_of_birth_is_invalid_input() {
    let target = person("ANN", "LEE", "F", "1990-03-12");
    let mut candidate = person("ANN", "LEE", "F", "1990-03-12");
    candidate.date_of_birth = None;

    let err = NameMatcher::new()
        .find_matches(&target, &[candidate], None, 8, 5)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid input: candidate 0 has no date of birth"
    );
}

#[derive(Debug, thiserror::Error)]
#[error("lookup service unavailable")]
struct LookupError;

/// A person whose weak match consults an external lookup that may fail
#[derive(Debug)]
struct LookupPerson {
    first: &'static str,
    dob: NaiveDate,
    lookup_fails: bool,
}

impl Person for LookupPerson {
    type Error = LookupError;

    fn first_name(&self) -> Option<&str> {
        Some(self.first)
    }

    fn last_name(&self) -> Option<&str> {
        Some("LEE")
    }

    fn gender(&self) -> Option<&str> {
        Some("F")
    }

    fn date_of_birth(&self) -> Option<NaiveDate> {
        Some(self.dob)
    }

    fn weak_match(&self, candidate: &Self) -> Result<bool, Self::Error> {
        if candidate.lookup_fails {
            Err(LookupError)
        } else {
            Ok(true)
        }
    }
}

fn lookup_person(first: &'static str, dob: (i32, u32, u32), lookup_fails: bool) -> LookupPerson {
    LookupPerson {
        first,
        dob: NaiveDate::from_ymd_opt(dob.0, dob.1, dob.2).unwrap(),
        lookup_fails,
    }
}

#[test]
fn test_weak_match_error_aborts_match() {
    // A lenient weak threshold makes the weak-match tier reachable
    let config = MatchConfig::from_options(&name_matcher::MatchOptions {
        weak_match_threshold: Some(10),
        ..Default::default()
    });
    let matcher = NameMatcher::with_config(config);

    let target = lookup_person("ANN", (1990, 3, 12), false);
    let candidates = vec![
        lookup_person("ANN", (1990, 3, 12), false),
        lookup_person("ANN", (1985, 7, 30), true),
    ];

    let err = matcher
        .find_matches(&target, &candidates, None, 100, 5)
        .unwrap_err();
    match err {
        MatchError::WeakMatch { candidate, source } => {
            assert_eq!(candidate, PersonRole::Candidate(1));
            assert_eq!(source.to_string(), "lookup service unavailable");
        }
        other @ MatchError::InvalidInput { .. } => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_weak_match_error_from_single_score() {
    let config = MatchConfig::from_options(&name_matcher::MatchOptions {
        weak_match_threshold: Some(10),
        ..Default::default()
    });
    let target = lookup_person("ANN", (1990, 3, 12), false);
    let candidate = lookup_person("ANN", (1985, 7, 30), true);

    let err = NameMatcher::with_config(config)
        .score(&target, &candidate, None)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Weak match failed for candidate: lookup service unavailable"
    );
}

#[test]
fn test_weak_match_not_consulted_when_earlier_tier_accepts() {
    let target = lookup_person("ANN", (1990, 3, 12), false);
    // exact birth date accepts before the failing lookup is reached
    let candidates = vec![lookup_person("ANN", (1990, 3, 12), true)];

    let found = NameMatcher::new()
        .find_matches(&target, &candidates, None, 0, 1)
        .unwrap();
    assert_eq!(found.len(), 1);
}

#[test]
fn test_weak_match_tier_scores_with_bonus_increment() {
    let config = MatchConfig::from_options(&name_matcher::MatchOptions {
        weak_match_threshold: Some(10),
        ..Default::default()
    });
    let target = lookup_person("ANN", (1990, 3, 12), false);
    let candidates = vec![lookup_person("ANN", (1985, 7, 30), false)];

    let results = NameMatcher::with_config(config)
        .find_scored_matches(&target, &candidates, None, 100, 1)
        .unwrap();
    assert_eq!(results[0].score.tier, MatchTier::WeakMatch);
    assert_eq!(results[0].score.confidence, 8);
}
