//! Helpers for keeping log lines short.

/// Longest prefix of `s` that fits in `max_bytes` and ends on a char
/// boundary. Query and response text is cut with this before it is logged.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let end = s
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|&end| end <= max_bytes)
        .last()
        .unwrap_or(0);
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_query_is_unchanged() {
        assert_eq!(truncate_str("wire transfer", 80), "wire transfer");
        assert_eq!(truncate_str("", 10), "");
    }

    #[test]
    fn test_long_query_is_cut() {
        assert_eq!(truncate_str("card not present fraud", 4), "card");
    }

    #[test]
    fn test_never_splits_a_character() {
        // "€" is 3 bytes
        let amount = "€€€ refund";
        assert_eq!(truncate_str(amount, 4), "€");
        assert_eq!(truncate_str(amount, 6), "€€");
        assert_eq!(truncate_str(amount, 2), "");
    }
}
