//! Isochrone interval text: validation and parsing.
//!
//! Users type intervals as comma-separated integers ("5, 10, 15").
//! Input is validated against the grammar, never auto-corrected.

/// Check interval text against the grammar `<int>(,<int>)*`.
///
/// Whitespace is tolerated after commas only; empty entries and
/// non-digit characters are rejected.
pub fn intervals_valid(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    text.split(',').enumerate().all(|(i, entry)| {
        let digits = if i == 0 { entry } else { entry.trim_start() };
        !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
    })
}

/// Parse interval text into a numerically ascending sequence.
///
/// Returns `None` if the text does not match the grammar. Duplicates are
/// preserved; the sort is numeric, not lexical.
pub fn parse_intervals(text: &str) -> Option<Vec<u32>> {
    if !intervals_valid(text) {
        return None;
    }
    let mut values: Vec<u32> = text
        .split(',')
        .map(|entry| entry.trim().parse().ok())
        .collect::<Option<_>>()?;
    values.sort_unstable();
    Some(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaced_list_parses() {
        assert_eq!(parse_intervals("5, 10, 15"), Some(vec![5, 10, 15]));
    }

    #[test]
    fn test_sort_is_numeric_ascending() {
        assert_eq!(parse_intervals("15,5,10"), Some(vec![5, 10, 15]));
        // A lexical sort would yield [100, 20, 3]
        assert_eq!(parse_intervals("100,3,20"), Some(vec![3, 20, 100]));
    }

    #[test]
    fn test_duplicates_preserved() {
        assert_eq!(parse_intervals("10,5,10"), Some(vec![5, 10, 10]));
    }

    #[test]
    fn test_single_entry() {
        assert!(intervals_valid("5"));
        assert_eq!(parse_intervals("5"), Some(vec![5]));
    }

    #[test]
    fn test_malformed_rejected() {
        assert!(!intervals_valid(""));
        assert!(!intervals_valid("5,,10"));
        assert!(!intervals_valid("abc"));
        assert!(!intervals_valid("5,abc"));
        assert!(!intervals_valid("5 ,10")); // space before comma
        assert!(!intervals_valid(" 5,10")); // leading space
        assert!(!intervals_valid("5,10 ")); // trailing space
        assert!(!intervals_valid("-5,10"));
        assert_eq!(parse_intervals("5,,10"), None);
        assert_eq!(parse_intervals("abc"), None);
    }
}
