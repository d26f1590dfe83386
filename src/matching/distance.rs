use crate::core::types::Confidence;

/// Levenshtein edit distance between two strings, counted in characters.
#[inline]
#[must_use]
pub fn edit_distance(a: &str, b: &str) -> Confidence {
    to_confidence(strsim::levenshtein(a, b))
}

/// Convert a distance to a confidence, saturating on absurdly long inputs
#[inline]
pub(crate) fn to_confidence(distance: usize) -> Confidence {
    Confidence::try_from(distance).unwrap_or(Confidence::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("CAGEY", "CAGEY"), 0);
        assert_eq!(edit_distance("NICHOLAS", "NICOLAS"), 1);
        assert_eq!(edit_distance("NICHOLS", "NICHOLAS"), 1);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "ABC"), 3);
    }

    #[test]
    fn test_edit_distance_is_symmetric() {
        assert_eq!(
            edit_distance("WASHINGTON", "MCNICKOLS"),
            edit_distance("MCNICKOLS", "WASHINGTON")
        );
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(edit_distance("JOSÉ", "JOSE"), 1);
    }
}
