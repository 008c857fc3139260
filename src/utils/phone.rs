use regex::Regex;

/// Normalize a locally entered Sri Lankan phone number to E.164.
///
/// Rules, in order:
/// - strip every character except digits and a leading `+`
/// - already `+`-prefixed: kept as-is
/// - starts with country code `94`: prepend `+`
/// - starts with a trunk `0`: drop it and prepend `+94`
/// - exactly 9 digits starting with `7` (mobile without trunk): prepend `+94`
/// - any other 6-15 digit string: prepend `+`
/// - everything else is rejected
pub fn normalize_to_e164(raw: &str) -> Option<String> {
    let mut cleaned = String::with_capacity(raw.len());
    for (i, c) in raw.trim().chars().enumerate() {
        if c.is_ascii_digit() || (c == '+' && i == 0) {
            cleaned.push(c);
        }
    }

    if let Some(rest) = cleaned.strip_prefix('+') {
        if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        return Some(cleaned);
    }

    if cleaned.is_empty() {
        return None;
    }

    if cleaned.starts_with("94") {
        return Some(format!("+{}", cleaned));
    }

    if let Some(rest) = cleaned.strip_prefix('0') {
        return Some(format!("+94{}", rest));
    }

    if cleaned.len() == 9 && cleaned.starts_with('7') {
        return Some(format!("+94{}", cleaned));
    }

    if (6..=15).contains(&cleaned.len()) {
        return Some(format!("+{}", cleaned));
    }

    None
}

/// Strict check used before submission paths that require a Sri Lankan
/// mobile/landline number.
pub fn is_sri_lankan_e164(phone: &str) -> bool {
    let re = Regex::new(r"^\+94\d{9}$").unwrap();
    re.is_match(phone)
}

/// Normalize and require the Sri Lankan format in one step.
pub fn normalize_sri_lankan(raw: &str) -> Option<String> {
    normalize_to_e164(raw).filter(|phone| is_sri_lankan_e164(phone))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_number_with_trunk_zero() {
        assert_eq!(
            normalize_to_e164("0740536517"),
            Some("+94740536517".to_string())
        );
    }

    #[test]
    fn test_already_e164_is_idempotent() {
        assert_eq!(
            normalize_to_e164("+94740536517"),
            Some("+94740536517".to_string())
        );
    }

    #[test]
    fn test_mobile_without_trunk_zero() {
        assert_eq!(
            normalize_to_e164("740536517"),
            Some("+94740536517".to_string())
        );
    }

    #[test]
    fn test_country_code_without_plus() {
        assert_eq!(
            normalize_to_e164("94740536517"),
            Some("+94740536517".to_string())
        );
    }

    #[test]
    fn test_formatting_characters_are_stripped() {
        assert_eq!(
            normalize_to_e164("074-053 6517"),
            Some("+94740536517".to_string())
        );
    }

    #[test]
    fn test_too_short_is_rejected() {
        assert_eq!(normalize_to_e164("12345"), None);
        assert_eq!(normalize_to_e164(""), None);
        assert_eq!(normalize_to_e164("+"), None);
    }

    #[test]
    fn test_foreign_number_passes_generic_rule_but_fails_strict_check() {
        let normalized = normalize_to_e164("447911123456").unwrap();
        assert_eq!(normalized, "+447911123456");
        assert!(!is_sri_lankan_e164(&normalized));
        assert_eq!(normalize_sri_lankan("447911123456"), None);
    }

    #[test]
    fn test_strict_sri_lankan_check() {
        assert!(is_sri_lankan_e164("+94740536517"));
        assert!(!is_sri_lankan_e164("+9474053651"));
        assert!(!is_sri_lankan_e164("+947405365170"));
        assert!(!is_sri_lankan_e164("94740536517"));
    }
}
