//! Hyphenated and compound surname comparison.
//!
//! Surnames such as `MCNICKOLS-CAGEY` or `VAN DYKE` are often entered
//! inconsistently: parts swapped, one part dropped, or separated by a space
//! instead of a hyphen. Splitting both names into parts and taking the closest
//! pair of parts tolerates all of these.

use crate::core::types::Confidence;
use crate::matching::distance::edit_distance;

const SEPARATORS: [char; 2] = ['-', ' '];

/// Whether a surname contains a hyphen or a space
#[must_use]
pub fn is_compound(surname: &str) -> bool {
    surname.contains(SEPARATORS)
}

/// All parts of a surname: the hyphen-split parts followed by the space-split
/// parts. Empty parts are dropped.
///
/// `"A-B C"` yields `["A", "B C", "A-B", "C"]`.
#[must_use]
pub fn surname_parts(surname: &str) -> Vec<&str> {
    SEPARATORS
        .iter()
        .flat_map(|&sep| surname.split(sep))
        .filter(|part| !part.is_empty())
        .collect()
}

/// Minimum edit distance between any part of `a` and any part of `b`.
///
/// Returns `None` when neither surname contains a separator, or when one of
/// them has no non-empty parts at all (an empty surname).
#[must_use]
pub fn min_part_distance(a: &str, b: &str) -> Option<Confidence> {
    if !is_compound(a) && !is_compound(b) {
        return None;
    }

    let parts_a = surname_parts(a);
    let parts_b = surname_parts(b);

    parts_a
        .iter()
        .flat_map(|pa| parts_b.iter().map(move |pb| edit_distance(pa, pb)))
        .min()
}
