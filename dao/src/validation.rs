//! Field validators shared by the contact form and the admin entities.
//!
//! A rule set is an explicit list of `(field, validators)` pairs. Every field
//! is checked; within one field the chain stops at its first failure.

use chrono::{DateTime, NaiveDateTime, Utc};
use pf_error::{Error, FieldError, Result};
use validator::ValidateEmail;

pub type Validator = fn(&str) -> Option<&'static str>;

pub type Rule<'a> = (&'a str, &'a [Validator]);

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const EMAIL_MESSAGE: &str = "Invalid email address.";
pub const DATETIME_MESSAGE: &str = "Not a valid datetime value.";

pub fn required(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        Some(REQUIRED_MESSAGE)
    } else {
        None
    }
}

/// Local part, `@`, and a dotted domain on top of the `validator` syntax check.
pub fn email(value: &str) -> Option<&'static str> {
    let dotted_domain = value
        .rsplit_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        });

    if dotted_domain && value.to_owned().validate_email() {
        None
    } else {
        Some(EMAIL_MESSAGE)
    }
}

pub fn datetime(value: &str) -> Option<&'static str> {
    match parse_datetime(value) {
        Some(_) => None,
        None => Some(DATETIME_MESSAGE),
    }
}

/// Accepts RFC 3339 or `YYYY-MM-DD HH:MM:SS` (read as UTC).
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|date| date.and_utc())
}

/// Runs every rule and collects all failures into one `Error::Validation`.
///
/// Fields `value_of` cannot find are validated as empty strings.
pub fn validate<'v>(rules: &[Rule<'_>], value_of: impl Fn(&str) -> Option<&'v str>) -> Result<()> {
    let mut errors = Vec::new();

    for &(field, validators) in rules {
        let value = value_of(field).unwrap_or_default();
        if let Some(message) = validators.iter().find_map(|validator| validator(value)) {
            errors.push(FieldError::new(field, message));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::validation(errors))
    }
}
