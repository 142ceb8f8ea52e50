//! Personal data form validation.
//!
//! All checks are pure. `FormValidator::validate` collects one error per
//! invalid field so the view can render feedback next to each input.

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use shared::{FormErrors, PersonalDataError, PersonalDataForm, SignupConfig, HUNGARIAN_MONTHS};

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email shape pattern"));

static EMAIL_FORBIDDEN_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>()\[\]\\,;:\s"]"#).expect("email charset pattern"));

// ASCII digits only, `\d` would accept any Unicode digit
static HUNGARIAN_MOBILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+36[0-9]{9}$").expect("phone pattern"));

const MIN_BIRTH_DAY: i32 = 1;
const MAX_BIRTH_DAY: i32 = 31;

/// `local@domain.tld` shape without any of `<>()[]\,;:`, whitespace or quotes
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email) && !EMAIL_FORBIDDEN_CHARS.is_match(email)
}

/// `+36` followed by exactly 9 digits once whitespace is removed
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    HUNGARIAN_MOBILE.is_match(&compact)
}

/// One of the twelve two-digit month codes offered by the month select
pub fn is_valid_month_code(month: &str) -> bool {
    HUNGARIAN_MONTHS.iter().any(|(code, _)| *code == month)
}

fn parse_number(input: &str) -> Option<i32> {
    input.trim().parse::<i32>().ok()
}

/// Validator for the step 1 form
#[derive(Debug, Clone)]
pub struct FormValidator {
    config: SignupConfig,
}

impl FormValidator {
    pub fn new() -> Self {
        Self {
            config: SignupConfig::default(),
        }
    }

    pub fn with_config(config: SignupConfig) -> Self {
        Self { config }
    }

    pub fn is_valid_birth_year(&self, year: &str, current_year: i32) -> bool {
        parse_number(year)
            .map(|y| (self.config.min_birth_year..=current_year).contains(&y))
            .unwrap_or(false)
    }

    /// Day 31 is accepted for every month, there is no calendar cross-check
    pub fn is_valid_birth_day(&self, day: &str) -> bool {
        parse_number(day)
            .map(|d| (MIN_BIRTH_DAY..=MAX_BIRTH_DAY).contains(&d))
            .unwrap_or(false)
    }

    pub fn is_valid_birth_date(&self, year: &str, month: &str, day: &str, current_year: i32) -> bool {
        self.is_valid_birth_year(year, current_year)
            && is_valid_month_code(month)
            && self.is_valid_birth_day(day)
    }

    /// Validate the form against the current calendar year
    pub fn validate(&self, form: &PersonalDataForm) -> FormErrors {
        self.validate_at(form, Utc::now().year())
    }

    /// Validate the form; an empty result means every field is valid
    pub fn validate_at(&self, form: &PersonalDataForm, current_year: i32) -> FormErrors {
        let mut errors = FormErrors::new();

        if form.first_name.trim().is_empty() {
            errors.insert(PersonalDataError::FirstNameRequired);
        }
        if form.last_name.trim().is_empty() {
            errors.insert(PersonalDataError::LastNameRequired);
        }

        if !self.is_valid_birth_year(&form.birth_year, current_year) {
            errors.insert(PersonalDataError::InvalidBirthYear);
        }
        if !is_valid_month_code(&form.birth_month) {
            errors.insert(PersonalDataError::InvalidBirthMonth);
        }
        if !self.is_valid_birth_day(&form.birth_day) {
            errors.insert(PersonalDataError::InvalidBirthDay);
        }

        if form.email.trim().is_empty() {
            errors.insert(PersonalDataError::EmailRequired);
        } else if !is_valid_email(&form.email) {
            errors.insert(PersonalDataError::InvalidEmail);
        }

        if form.phone.trim().is_empty() {
            errors.insert(PersonalDataError::PhoneRequired);
        } else if !is_valid_phone(&form.phone) {
            errors.insert(PersonalDataError::InvalidPhone);
        }

        if !form.accepted_privacy {
            errors.insert(PersonalDataError::PrivacyNotAccepted);
        }

        errors
    }

    pub fn config(&self) -> &SignupConfig {
        &self.config
    }
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::FormField;

    const CURRENT_YEAR: i32 = 2025;

    fn valid_form() -> PersonalDataForm {
        PersonalDataForm::demo()
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        let validator = FormValidator::new();
        let errors = validator.validate_at(&valid_form(), CURRENT_YEAR);
        assert!(errors.is_empty(), "unexpected errors: {}", errors);
    }

    #[test]
    fn test_single_invalid_field_reports_only_that_field() {
        let validator = FormValidator::new();
        let cases: [(FormField, fn(&mut PersonalDataForm)); 8] = [
            (FormField::FirstName, |f| f.first_name = "   ".to_string()),
            (FormField::LastName, |f| f.last_name = String::new()),
            (FormField::BirthYear, |f| f.birth_year = "1899".to_string()),
            (FormField::BirthMonth, |f| f.birth_month = String::new()),
            (FormField::BirthDay, |f| f.birth_day = "32".to_string()),
            (FormField::Email, |f| f.email = "teszt@email".to_string()),
            (FormField::Phone, |f| f.phone = "+36 30 123 456".to_string()),
            (FormField::AcceptedPrivacy, |f| f.accepted_privacy = false),
        ];

        for (field, break_field) in cases {
            let mut form = valid_form();
            break_field(&mut form);
            let errors = validator.validate_at(&form, CURRENT_YEAR);
            assert_eq!(errors.len(), 1, "field {} produced {}", field, errors);
            assert!(errors.contains(field), "missing error for {}", field);
        }
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let validator = FormValidator::new();
        let errors = validator.validate_at(&PersonalDataForm::default(), CURRENT_YEAR);

        assert_eq!(errors.len(), FormField::ALL.len());
        assert_eq!(errors.get(FormField::Email), Some(PersonalDataError::EmailRequired));
        // The prefilled "+36 " is not empty, just incomplete
        assert_eq!(errors.get(FormField::Phone), Some(PersonalDataError::InvalidPhone));
        assert_eq!(errors.message(FormField::FirstName), Some("A keresztnév megadása kötelező"));
    }

    #[test]
    fn test_required_versus_format_errors() {
        let validator = FormValidator::new();

        let mut form = valid_form();
        form.email = "  ".to_string();
        form.phone = String::new();
        let errors = validator.validate_at(&form, CURRENT_YEAR);
        assert_eq!(errors.get(FormField::Email), Some(PersonalDataError::EmailRequired));
        assert_eq!(errors.get(FormField::Phone), Some(PersonalDataError::PhoneRequired));

        form.email = "not-an-email".to_string();
        form.phone = "06301234567".to_string();
        let errors = validator.validate_at(&form, CURRENT_YEAR);
        assert_eq!(errors.get(FormField::Email), Some(PersonalDataError::InvalidEmail));
        assert_eq!(errors.get(FormField::Phone), Some(PersonalDataError::InvalidPhone));
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("teszt@email.com"));
        assert!(is_valid_email("first.last+tag@sub.example.hu"));

        assert!(!is_valid_email(""));
        assert!(!is_valid_email("teszt@email"));
        assert!(!is_valid_email("teszt.email.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email(" teszt@email.com"));
        assert!(!is_valid_email("te szt@email.com"));
        assert!(!is_valid_email("<teszt>@email.com"));
        assert!(!is_valid_email("teszt@email.com;"));
        assert!(!is_valid_email("te,szt@email.com"));
        assert!(!is_valid_email("te:szt@email.com"));
        assert!(!is_valid_email("te\"szt@email.com"));
        assert!(!is_valid_email("te\\szt@email.com"));
        assert!(!is_valid_email("teszt@[email].com"));
        assert!(!is_valid_email("teszt(x)@email.com"));
    }

    #[test]
    fn test_is_valid_phone() {
        assert!(is_valid_phone("+36 30 123 4567"));
        assert!(is_valid_phone("+36301234567"));
        assert!(is_valid_phone(" +36 30\t123 4567 "));

        assert!(!is_valid_phone("+3630123456"));
        assert!(!is_valid_phone("+363012345678"));
        assert!(!is_valid_phone("06301234567"));
        assert!(!is_valid_phone("+36-30-123-4567"));
        assert!(!is_valid_phone("+36 30 123 456٧"));
        assert!(!is_valid_phone("+36 "));
    }

    #[test]
    fn test_birth_year_range() {
        let validator = FormValidator::new();
        assert!(validator.is_valid_birth_year("1900", CURRENT_YEAR));
        assert!(validator.is_valid_birth_year("2025", CURRENT_YEAR));
        assert!(validator.is_valid_birth_year(" 1990 ", CURRENT_YEAR));

        assert!(!validator.is_valid_birth_year("1899", CURRENT_YEAR));
        assert!(!validator.is_valid_birth_year("2026", CURRENT_YEAR));
        assert!(!validator.is_valid_birth_year("", CURRENT_YEAR));
        assert!(!validator.is_valid_birth_year("abcd", CURRENT_YEAR));
    }

    #[test]
    fn test_birth_date_has_no_month_length_check() {
        let validator = FormValidator::new();
        assert!(validator.is_valid_birth_date("2001", "02", "31", CURRENT_YEAR));
        assert!(validator.is_valid_birth_date("1990", "12", "1", CURRENT_YEAR));

        assert!(!validator.is_valid_birth_date("1990", "13", "1", CURRENT_YEAR));
        assert!(!validator.is_valid_birth_date("1990", "6", "15", CURRENT_YEAR));
        assert!(!validator.is_valid_birth_date("1990", "06", "0", CURRENT_YEAR));
    }

    #[test]
    fn test_custom_min_birth_year() {
        let validator = FormValidator::with_config(SignupConfig {
            min_birth_year: 1950,
            ..SignupConfig::default()
        });
        assert!(!validator.is_valid_birth_year("1949", CURRENT_YEAR));
        assert!(validator.is_valid_birth_year("1950", CURRENT_YEAR));
        assert_eq!(validator.config().min_birth_year, 1950);
    }
}
