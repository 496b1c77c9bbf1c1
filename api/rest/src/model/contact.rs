use pf_dao::validation::{self, email, required, Rule, Validator};
use pf_error::{Error, FieldError, Result};
use serde::Deserialize;

use crate::csrf::{self, CSRF_FIELD};

const REQUIRED: &[Validator] = &[required];
const REQUIRED_EMAIL: &[Validator] = &[required, email];

const CONTACT_FORM_RULES: &[Rule<'static>] = &[
    ("name", REQUIRED),
    ("email", REQUIRED_EMAIL),
    ("message", REQUIRED),
];

/// Landing-page contact form. Absent fields deserialize as empty strings.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ContactReqForm {
    csrf_token: String,
    name: String,
    email: String,
    message: String,
}

impl ContactReqForm {
    pub fn new(csrf_token: &str, name: &str, email: &str, message: &str) -> Self {
        Self {
            csrf_token: csrf_token.to_owned(),
            name: name.to_owned(),
            email: email.to_owned(),
            message: message.to_owned(),
        }
    }

    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// `expected_csrf_token` is the token from the signed cookie, if any.
    /// The token check is reported first, alongside every field failure.
    pub fn validate(&self, expected_csrf_token: Option<&str>) -> Result<()> {
        let mut errors = Vec::new();

        if let Some(message) = csrf::check(expected_csrf_token, &self.csrf_token) {
            errors.push(FieldError::new(CSRF_FIELD, message));
        }

        match validation::validate(CONTACT_FORM_RULES, |field| match field {
            "name" => Some(self.name.as_str()),
            "email" => Some(self.email.as_str()),
            "message" => Some(self.message.as_str()),
            _ => None,
        }) {
            Ok(()) => {}
            Err(Error::Validation(field_errors)) => {
                errors.extend(field_errors.errors().iter().cloned())
            }
            Err(err) => return Err(err),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "0f1e2d3c4b5a69788796a5b4c3d2e1f0";

    fn field_errors(form: &ContactReqForm, expected: Option<&str>) -> Vec<String> {
        match form.validate(expected) {
            Ok(()) => Vec::new(),
            Err(Error::Validation(errors)) => errors
                .errors()
                .iter()
                .map(|err| err.field().to_owned())
                .collect(),
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    #[test]
    fn accepts_complete_form() {
        let form = ContactReqForm::new(TOKEN, "Jane Doe", "jane@example.com", "Hello");
        assert!(field_errors(&form, Some(TOKEN)).is_empty());
    }

    #[test]
    fn reports_every_bad_field_at_once() {
        let form = ContactReqForm::new(TOKEN, "", "not-an-email", "  ");
        assert_eq!(
            field_errors(&form, Some(TOKEN)),
            ["name", "email", "message"]
        );
    }

    #[test]
    fn missing_fields_deserialize_as_empty() {
        let form: ContactReqForm = serde_json::from_str(r#"{"name":"Jane"}"#).unwrap();
        assert_eq!(
            field_errors(&form, Some(TOKEN)),
            ["csrf_token", "email", "message"]
        );
    }

    #[test]
    fn token_must_match_the_cookie() {
        let form = ContactReqForm::new(TOKEN, "Jane Doe", "jane@example.com", "Hello");
        assert_eq!(field_errors(&form, None), ["csrf_token"]);
        assert_eq!(
            field_errors(&form, Some("ffffffffffffffffffffffffffffffff")),
            ["csrf_token"]
        );
    }
}
