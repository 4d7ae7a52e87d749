/// Strips all formatting from a phone number, keeping digits only.
/// The normalized form is the unique login identifier.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Brazilian numbers carry 10 or 11 digits including the area code.
pub fn has_valid_length(phone: &str) -> bool {
    matches!(phone.len(), 10 | 11)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_all_non_digits() {
        assert_eq!(normalize("(21) 99999-9999"), "21999999999");
        assert_eq!(normalize("+55 21 3333.4444"), "552133334444");
        assert_eq!(normalize("21999999999"), "21999999999");
    }

    #[test]
    fn normalize_of_garbage_is_empty() {
        assert_eq!(normalize("abc-def"), "");
    }

    #[test]
    fn length_check_accepts_ten_or_eleven_digits() {
        assert!(has_valid_length("2133334444"));
        assert!(has_valid_length("21999999999"));
        assert!(!has_valid_length("219999999"));
        assert!(!has_valid_length("552199999999"));
        assert!(!has_valid_length(""));
    }
}
