//! Live input mask for Hungarian mobile numbers.

use shared::NATIONAL_PHONE_PREFIX;

/// Subscriber digits after the national prefix
const SUBSCRIBER_DIGITS: usize = 9;

/// Normalize free text into the `+36 XX XXX XXXX` display mask.
///
/// Runs on every keystroke, so its output must map to itself:
/// `format_phone(&format_phone(x)) == format_phone(x)`.
pub fn format_phone(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    let country_code = &NATIONAL_PHONE_PREFIX[1..];
    let subscriber: &str = if let Some(rest) = cleaned.strip_prefix(NATIONAL_PHONE_PREFIX) {
        rest
    } else if let Some(rest) = cleaned.strip_prefix(country_code) {
        rest
    } else if let Some(rest) = cleaned.strip_prefix('+') {
        // Wrong country code: keep the digits, force ours
        rest
    } else {
        &cleaned
    };

    let digits: String = subscriber
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(SUBSCRIBER_DIGITS)
        .collect();

    match digits.len() {
        0..=2 => format!("{} {}", NATIONAL_PHONE_PREFIX, digits),
        3..=5 => format!("{} {} {}", NATIONAL_PHONE_PREFIX, &digits[..2], &digits[2..]),
        _ => format!(
            "{} {} {} {}",
            NATIONAL_PHONE_PREFIX,
            &digits[..2],
            &digits[2..5],
            &digits[5..]
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::is_valid_phone;

    #[test]
    fn test_groups_digits() {
        assert_eq!(format_phone(""), "+36 ");
        assert_eq!(format_phone("+36"), "+36 ");
        assert_eq!(format_phone("+36 3"), "+36 3");
        assert_eq!(format_phone("+36 30"), "+36 30");
        assert_eq!(format_phone("+36 301"), "+36 30 1");
        assert_eq!(format_phone("+36 30 123"), "+36 30 123");
        assert_eq!(format_phone("+36 30 1234"), "+36 30 123 4");
        assert_eq!(format_phone("+36301234567"), "+36 30 123 4567");
    }

    #[test]
    fn test_injects_prefix() {
        // Bare country code
        assert_eq!(format_phone("36301234567"), "+36 30 123 4567");
        // Wrong country code
        assert_eq!(format_phone("+44 30 123 4567"), "+36 44 301 2345");
        // Digits only
        assert_eq!(format_phone("301234567"), "+36 30 123 4567");
        // Separators of any kind
        assert_eq!(format_phone("(30) 123-4567"), "+36 30 123 4567");
    }

    #[test]
    fn test_truncates_extra_digits() {
        assert_eq!(format_phone("+36 30 123 45678"), "+36 30 123 4567");
        assert_eq!(format_phone("+36301234567999"), "+36 30 123 4567");
    }

    #[test]
    fn test_drops_stray_plus_signs() {
        assert_eq!(format_phone("+36+30+123"), "+36 30 123");
    }

    #[test]
    fn test_is_idempotent() {
        let inputs = [
            "",
            "+",
            "+3",
            "3",
            "36",
            "+36 ",
            "06",
            "06 30 123 4567",
            "+36 30 123 4567",
            "+36 30 123 4567 89",
            "+1 (555) 010-9999",
            "abc",
            "+36 3a0 1b2",
            "++36",
        ];
        for input in inputs {
            let once = format_phone(input);
            assert_eq!(format_phone(&once), once, "input {:?}", input);
        }
    }

    #[test]
    fn test_typing_character_by_character() {
        let typed = "+36 30 123 4567";
        let mut value = String::new();
        for c in "301234567".chars() {
            value.push(c);
            value = format_phone(&value);
        }
        assert_eq!(value, typed);
        assert!(is_valid_phone(&value));
    }
}
