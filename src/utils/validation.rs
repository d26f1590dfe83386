//! Centralized input limits.
//!
//! Edit distance is quadratic in name length and scoring is linear in the
//! number of candidates, so record files are bounded on both axes.

/// Maximum number of records allowed in a single file (DOS protection)
pub const MAX_RECORDS: usize = 1_000_000;

/// Maximum number of bytes read from one input, after decompression
pub const MAX_INPUT_BYTES: u64 = 256 * 1024 * 1024;

/// Maximum length, in characters, of a single name field
pub const MAX_FIELD_LENGTH: usize = 256;

/// Check if adding another record would exceed `max`.
///
/// Call this with the current count BEFORE adding a new record.
#[must_use]
pub fn at_record_limit(count: usize, max: usize) -> bool {
    count >= max
}

/// Check that a field is within [`MAX_FIELD_LENGTH`] characters.
///
/// Returns the offending length if it is not.
#[must_use]
pub fn check_field_length(value: &str) -> Option<usize> {
    let len = value.chars().count();
    (len > MAX_FIELD_LENGTH).then_some(len)
}

/// Treat empty or whitespace-only cells as absent
#[must_use]
pub fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_record_limit() {
        assert!(!at_record_limit(0, MAX_RECORDS));
        assert!(!at_record_limit(MAX_RECORDS - 1, MAX_RECORDS));
        assert!(at_record_limit(MAX_RECORDS, MAX_RECORDS));
        assert!(at_record_limit(2, 2));
    }

    #[test]
    fn test_check_field_length() {
        assert_eq!(check_field_length("CAGEY"), None);
        let long = "A".repeat(MAX_FIELD_LENGTH + 1);
        assert_eq!(check_field_length(&long), Some(MAX_FIELD_LENGTH + 1));
        // counted in characters
        let accented = "É".repeat(MAX_FIELD_LENGTH);
        assert_eq!(check_field_length(&accented), None);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  M "), Some("M"));
        assert_eq!(non_empty("   "), None);
        assert_eq!(non_empty(""), None);
    }
}
