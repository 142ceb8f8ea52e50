use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// National prefix every accepted phone number starts with
pub const NATIONAL_PHONE_PREFIX: &str = "+36";

/// Month codes offered by the birth month select, with their Hungarian labels
pub const HUNGARIAN_MONTHS: [(&str, &str); 12] = [
    ("01", "Január"),
    ("02", "Február"),
    ("03", "Március"),
    ("04", "Április"),
    ("05", "Május"),
    ("06", "Június"),
    ("07", "Július"),
    ("08", "Augusztus"),
    ("09", "Szeptember"),
    ("10", "Október"),
    ("11", "November"),
    ("12", "December"),
];

/// One of the three sequential phases of the sign-up flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    /// Step 1: personal data entry
    PersonalData,
    /// Step 2: waiting for the external payment flow
    Payment,
    /// Step 3: member id and QR code
    Summary,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [
        WizardStep::PersonalData,
        WizardStep::Payment,
        WizardStep::Summary,
    ];

    /// 1-based step number as shown in the step indicator
    pub fn number(self) -> u8 {
        match self {
            WizardStep::PersonalData => 1,
            WizardStep::Payment => 2,
            WizardStep::Summary => 3,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(WizardStep::PersonalData),
            2 => Some(WizardStep::Payment),
            3 => Some(WizardStep::Summary),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::PersonalData => "Adatok",
            WizardStep::Payment => "Fizetés",
            WizardStep::Summary => "Összegzés",
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number(), self.label())
    }
}

/// Personal data collected in step 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalDataForm {
    pub first_name: String,
    pub last_name: String,
    /// Four digit year as typed
    pub birth_year: String,
    /// Two digit month code, one of `HUNGARIAN_MONTHS`
    pub birth_month: String,
    /// Day of month as typed, not zero-padded
    pub birth_day: String,
    pub email: String,
    /// Masked display value, e.g. "+36 30 123 4567"
    pub phone: String,
    pub accepted_privacy: bool,
}

impl Default for PersonalDataForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            birth_year: String::new(),
            birth_month: String::new(),
            birth_day: String::new(),
            email: String::new(),
            phone: format!("{} ", NATIONAL_PHONE_PREFIX),
            accepted_privacy: false,
        }
    }
}

impl PersonalDataForm {
    /// Fixed data set submitted by the "Szimulálás" button
    pub fn demo() -> Self {
        Self {
            first_name: "Teszt".to_string(),
            last_name: "Felhasználó".to_string(),
            birth_year: "1990".to_string(),
            birth_month: "06".to_string(),
            birth_day: "15".to_string(),
            email: "teszt@email.com".to_string(),
            phone: "+36 30 123 4567".to_string(),
            accepted_privacy: true,
        }
    }

    /// ISO 8601 birthday (YYYY-MM-DD) with the day zero-padded
    pub fn birthday(&self) -> String {
        format!(
            "{}-{}-{:0>2}",
            self.birth_year.trim(),
            self.birth_month.trim(),
            self.birth_day.trim()
        )
    }
}

/// Fields of the personal data form that can carry an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FormField {
    FirstName,
    LastName,
    BirthYear,
    BirthMonth,
    BirthDay,
    Email,
    Phone,
    AcceptedPrivacy,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::BirthYear,
        FormField::BirthMonth,
        FormField::BirthDay,
        FormField::Email,
        FormField::Phone,
        FormField::AcceptedPrivacy,
    ];

    /// Key used for the field in the error map and as the input id
    pub fn as_str(self) -> &'static str {
        match self {
            FormField::FirstName => "firstName",
            FormField::LastName => "lastName",
            FormField::BirthYear => "birthYear",
            FormField::BirthMonth => "birthMonth",
            FormField::BirthDay => "birthDay",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::AcceptedPrivacy => "acceptedPrivacy",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Specific validation errors for the personal data form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonalDataError {
    FirstNameRequired,
    LastNameRequired,
    InvalidBirthYear,
    InvalidBirthMonth,
    InvalidBirthDay,
    EmailRequired,
    InvalidEmail,
    PhoneRequired,
    InvalidPhone,
    PrivacyNotAccepted,
}

impl PersonalDataError {
    pub fn field(self) -> FormField {
        match self {
            PersonalDataError::FirstNameRequired => FormField::FirstName,
            PersonalDataError::LastNameRequired => FormField::LastName,
            PersonalDataError::InvalidBirthYear => FormField::BirthYear,
            PersonalDataError::InvalidBirthMonth => FormField::BirthMonth,
            PersonalDataError::InvalidBirthDay => FormField::BirthDay,
            PersonalDataError::EmailRequired | PersonalDataError::InvalidEmail => FormField::Email,
            PersonalDataError::PhoneRequired | PersonalDataError::InvalidPhone => FormField::Phone,
            PersonalDataError::PrivacyNotAccepted => FormField::AcceptedPrivacy,
        }
    }

    /// User-facing message rendered under the field
    pub fn message(self) -> &'static str {
        match self {
            PersonalDataError::FirstNameRequired => "A keresztnév megadása kötelező",
            PersonalDataError::LastNameRequired => "A vezetéknév megadása kötelező",
            PersonalDataError::InvalidBirthYear => "Érvénytelen év",
            PersonalDataError::InvalidBirthMonth => "Válasszon hónapot",
            PersonalDataError::InvalidBirthDay => "Érvénytelen nap",
            PersonalDataError::EmailRequired => "Az email cím megadása kötelező",
            PersonalDataError::InvalidEmail => "Érvénytelen email cím formátum",
            PersonalDataError::PhoneRequired => "A telefonszám megadása kötelező",
            PersonalDataError::InvalidPhone => {
                "Érvénytelen telefonszám (formátum: +36 XX XXX XXXX)"
            }
            PersonalDataError::PrivacyNotAccepted => {
                "Az adatkezelési tájékoztató elfogadása kötelező"
            }
        }
    }
}

impl fmt::Display for PersonalDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Field-level validation result. A field without an entry is valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    errors: BTreeMap<FormField, PersonalDataError>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error, replacing any earlier error for the same field
    pub fn insert(&mut self, error: PersonalDataError) {
        self.errors.insert(error.field(), error);
    }

    pub fn get(&self, field: FormField) -> Option<PersonalDataError> {
        self.errors.get(&field).copied()
    }

    pub fn message(&self, field: FormField) -> Option<&'static str> {
        self.get(field).map(PersonalDataError::message)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, PersonalDataError)> + '_ {
        self.errors.iter().map(|(field, error)| (*field, *error))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().map(FormField::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Membership record of one sign-up session, as known by the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRecord {
    /// Random UUID v4 token, primary key of the remote row
    pub member_uuid: String,
    /// Public id encoded into the QR code, e.g. "abcdef12-KOVÁCS"
    pub member_id: String,
    pub payment_status: bool,
    pub payment_date: Option<DateTime<Utc>>,
    pub membership_start: Option<NaiveDate>,
    pub membership_end: Option<NaiveDate>,
}

impl MemberRecord {
    /// Unpaid record right after creation
    pub fn new(member_uuid: String, member_id: String) -> Self {
        Self {
            member_uuid,
            member_id,
            payment_status: false,
            payment_date: None,
            membership_start: None,
            membership_end: None,
        }
    }
}

/// Row inserted into the member table when step 1 completes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMemberRequest {
    #[serde(rename = "vendeg_uuid")]
    pub member_uuid: String,
    #[serde(rename = "vendeg_id")]
    pub member_id: String,
    #[serde(rename = "vendeg_first_name")]
    pub first_name: String,
    #[serde(rename = "vendeg_last_name")]
    pub last_name: String,
    /// ISO 8601 date (YYYY-MM-DD)
    #[serde(rename = "vendeg_birthday")]
    pub birthday: String,
    #[serde(rename = "vendeg_email")]
    pub email: String,
    #[serde(rename = "vendeg_telefon")]
    pub phone: String,
    pub payment_status: bool,
}

impl CreateMemberRequest {
    pub fn new(member: &MemberRecord, form: &PersonalDataForm) -> Self {
        Self {
            member_uuid: member.member_uuid.clone(),
            member_id: member.member_id.clone(),
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            birthday: form.birthday(),
            email: form.email.trim().to_string(),
            phone: form.phone.clone(),
            payment_status: false,
        }
    }
}

/// Patch applied to the member row once payment is confirmed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentUpdateRequest {
    /// RFC 3339 timestamp with millisecond precision
    pub payment_date: String,
    pub payment_status: bool,
    pub membership_end: NaiveDate,
    /// Only sent when the stored row has no membership start yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_start: Option<NaiveDate>,
}

/// Projection of the member row read before the payment update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipStartRow {
    pub membership_start: Option<NaiveDate>,
}

/// Configuration for the sign-up flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupConfig {
    pub min_birth_year: i32,
    /// Length of the membership window started by the first payment
    pub membership_months: u32,
    pub notification_duration_ms: u32,
    pub qr_size_px: u32,
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            min_birth_year: 1900,
            membership_months: 12,
            notification_duration_ms: 4000,
            qr_size_px: 140,
        }
    }
}
