//! Field validation for donor and request registration.
//!
//! Registration runs an ordered pipeline of checks that stops at the first
//! failure. The missing-field check always runs first, so a form with an empty
//! field never reaches the format checks.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{BloodRequest, BloodType, Donor, Urgency};

/// The youngest age a donor may register with.
pub const MIN_DONOR_AGE: u8 = 16;

/// The oldest age a donor may register with.
pub const MAX_DONOR_AGE: u8 = 100;

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z ]+$").expect("name pattern is valid"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is valid"));

static GMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@gmail\.com$").expect("gmail pattern is valid")
});

/// Returns `true` if the name is non-empty and made of ASCII letters and
/// spaces only.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    NAME.is_match(name)
}

/// Returns `true` if the age is all decimal digits and lies in `16..=100`.
#[must_use]
pub fn is_valid_age(age: &str) -> bool {
    parse_age(age).is_some()
}

/// Returns `true` for a 10-digit phone number or a `@gmail.com` address.
///
/// Other email domains are rejected.
#[must_use]
pub fn is_valid_contact(contact: &str) -> bool {
    PHONE.is_match(contact) || GMAIL.is_match(contact)
}

fn parse_age(age: &str) -> Option<u8> {
    if age.is_empty() || !age.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Digit strings too long for a u8 are out of range anyway.
    let age: u8 = age.parse().ok()?;
    (MIN_DONOR_AGE..=MAX_DONOR_AGE).contains(&age).then_some(age)
}

/// Why a form was rejected. Nothing is written when validation fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was empty after trimming.
    #[error("Please fill all fields ('{0}' is missing).")]
    MissingField(&'static str),

    /// The name contains something other than letters and spaces.
    #[error("Name must contain alphabets and spaces only.")]
    InvalidName,

    /// The age is not a whole number between 16 and 100.
    #[error("Age must be a number between 16 and 100.")]
    InvalidAge,

    /// The contact is neither a phone number nor a Gmail address.
    #[error("Enter 10-digit phone number or Gmail ending with @gmail.com")]
    InvalidContact,

    /// The blood type is not one of the eight groups.
    #[error("Blood type must be one of A+, A-, B+, B-, AB+, AB-, O+, O-.")]
    InvalidBloodType,

    /// The urgency is not one of the four levels.
    #[error("Urgency must be one of Low, Medium, High, Critical.")]
    InvalidUrgency,

    /// A verified name is blank or spans more than one line.
    #[error("A verified name must be a single non-empty line.")]
    InvalidLogEntry,
}

type Check<F> = fn(&F) -> Result<(), ValidationError>;

fn run_checks<F>(form: &F, checks: &[Check<F>]) -> Result<(), ValidationError> {
    checks.iter().try_for_each(|check| check(form))
}

fn require(fields: &[(&'static str, &str)]) -> Result<(), ValidationError> {
    fields
        .iter()
        .find(|(_, value)| value.trim().is_empty())
        .map_or(Ok(()), |&(field, _)| Err(ValidationError::MissingField(field)))
}

/// Raw input for registering a donor, as typed by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DonorForm {
    /// Donor name.
    pub name: String,
    /// Age, as entered.
    pub age: String,
    /// Blood type label, e.g. `"O-"`.
    pub blood_type: String,
    /// Hospital or city.
    pub location: String,
    /// Phone number or Gmail address.
    pub contact: String,
}

impl DonorForm {
    const CHECKS: &'static [Check<Self>] = &[
        Self::check_present,
        Self::check_name,
        Self::check_age,
        Self::check_contact,
        Self::check_blood_type,
    ];

    /// Validates every field and builds the donor.
    ///
    /// Fields are trimmed before checking.
    ///
    /// # Errors
    ///
    /// Returns the first failing check, in this order: missing field, name,
    /// age, contact, blood type.
    pub fn validate(&self) -> Result<Donor, ValidationError> {
        run_checks(self, Self::CHECKS)?;

        Ok(Donor {
            name: self.name.trim().to_string(),
            age: parse_age(self.age.trim()).ok_or(ValidationError::InvalidAge)?,
            blood_type: parse_blood_type(&self.blood_type)?,
            location: self.location.trim().to_string(),
            contact: self.contact.trim().to_string(),
        })
    }

    fn check_present(&self) -> Result<(), ValidationError> {
        require(&[
            ("name", self.name.as_str()),
            ("age", self.age.as_str()),
            ("blood", self.blood_type.as_str()),
            ("location", self.location.as_str()),
            ("contact", self.contact.as_str()),
        ])
    }

    fn check_name(&self) -> Result<(), ValidationError> {
        check(is_valid_name(self.name.trim()), ValidationError::InvalidName)
    }

    fn check_age(&self) -> Result<(), ValidationError> {
        check(is_valid_age(self.age.trim()), ValidationError::InvalidAge)
    }

    fn check_contact(&self) -> Result<(), ValidationError> {
        check(
            is_valid_contact(self.contact.trim()),
            ValidationError::InvalidContact,
        )
    }

    fn check_blood_type(&self) -> Result<(), ValidationError> {
        parse_blood_type(&self.blood_type).map(drop)
    }
}

/// Raw input for submitting a blood request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestForm {
    /// Patient name.
    pub name: String,
    /// Blood type label needed.
    pub blood_type: String,
    /// Hospital or city.
    pub location: String,
    /// Urgency label, e.g. `"High"`.
    pub urgency: String,
}

impl RequestForm {
    const CHECKS: &'static [Check<Self>] = &[
        Self::check_present,
        Self::check_blood_type,
        Self::check_urgency,
    ];

    /// Validates every field and builds the request.
    ///
    /// Patient names are free text; only presence is checked.
    ///
    /// # Errors
    ///
    /// Returns the first failing check, in this order: missing field, blood
    /// type, urgency.
    pub fn validate(&self) -> Result<BloodRequest, ValidationError> {
        run_checks(self, Self::CHECKS)?;

        Ok(BloodRequest {
            name: self.name.trim().to_string(),
            blood_type: parse_blood_type(&self.blood_type)?,
            location: self.location.trim().to_string(),
            urgency: parse_urgency(&self.urgency)?,
        })
    }

    fn check_present(&self) -> Result<(), ValidationError> {
        require(&[
            ("name", self.name.as_str()),
            ("blood", self.blood_type.as_str()),
            ("location", self.location.as_str()),
            ("urgency", self.urgency.as_str()),
        ])
    }

    fn check_blood_type(&self) -> Result<(), ValidationError> {
        parse_blood_type(&self.blood_type).map(drop)
    }

    fn check_urgency(&self) -> Result<(), ValidationError> {
        parse_urgency(&self.urgency).map(drop)
    }
}

/// Checks a name destined for the verified-name log and returns it trimmed.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidLogEntry`] if the name is blank or
/// contains a line break.
pub fn validate_log_entry(name: &str) -> Result<&str, ValidationError> {
    let name = name.trim();
    if name.is_empty() || name.contains(['\n', '\r']) {
        return Err(ValidationError::InvalidLogEntry);
    }
    Ok(name)
}

const fn check(ok: bool, error: ValidationError) -> Result<(), ValidationError> {
    if ok { Ok(()) } else { Err(error) }
}

fn parse_blood_type(label: &str) -> Result<BloodType, ValidationError> {
    label
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidBloodType)
}

fn parse_urgency(label: &str) -> Result<Urgency, ValidationError> {
    label
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidUrgency)
}
