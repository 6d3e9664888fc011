//! Form Validation
//!
//! Field-presence and format checks for the login, register and result
//! forms. Errors are collected per field so each can render under its input.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::models::{Credentials, Registration};

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("valid phone regex"))
}

/// Field name -> message, ordered for stable rendering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// First message, for single-line displays
    pub fn first(&self) -> Option<&str> {
        self.0.values().next().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// How the user identifies on the login screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMethod {
    #[default]
    Email,
    Phone,
}

pub fn check_email(errors: &mut FieldErrors, email: &str) {
    let email = email.trim();
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if !email_pattern().is_match(email) {
        errors.add("email", "Invalid email address");
    }
}

pub fn check_phone(errors: &mut FieldErrors, phone: &str) {
    let phone = phone.trim();
    if phone.is_empty() {
        errors.add("phone", "Phone number is required");
    } else if !phone_pattern().is_match(phone) {
        errors.add("phone", "Phone must be 10 digits");
    }
}

pub fn check_password(errors: &mut FieldErrors, password: &str) {
    if password.is_empty() {
        errors.add("password", "Password is required");
    }
}

/// Mark `field` as missing when `value` is blank
pub fn require(errors: &mut FieldErrors, field: &'static str, label: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, format!("{} is required", label));
    }
}

/// Validate the login form and build the credentials it describes
pub fn login_credentials(
    method: LoginMethod,
    identifier: &str,
    password: &str,
) -> Result<Credentials, FieldErrors> {
    let mut errors = FieldErrors::new();
    match method {
        LoginMethod::Email => check_email(&mut errors, identifier),
        LoginMethod::Phone => check_phone(&mut errors, identifier),
    }
    check_password(&mut errors, password);
    errors.into_result()?;

    let identifier = identifier.trim();
    Ok(match method {
        LoginMethod::Email => Credentials::email(identifier, password),
        LoginMethod::Phone => Credentials::phone(identifier, password),
    })
}

/// Validate the sign-up form
pub fn registration(email: &str, password: &str, name: &str) -> Result<Registration, FieldErrors> {
    let mut errors = FieldErrors::new();
    check_email(&mut errors, email);
    check_password(&mut errors, password);
    errors.into_result()?;

    let name = name.trim();
    Ok(Registration {
        email: email.trim().to_string(),
        password: password.to_string(),
        name: (!name.is_empty()).then(|| name.to_string()),
    })
}

/// Parse a marks cell; blank and negative values are rejected
pub fn parse_marks(value: &str) -> Option<f64> {
    let marks: f64 = value.trim().parse().ok()?;
    (marks.is_finite() && marks >= 0.0).then_some(marks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_email_messages() {
        let errors = login_credentials(LoginMethod::Email, "", "").unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));

        let errors = login_credentials(LoginMethod::Email, "not-an-email", "pw").unwrap_err();
        assert_eq!(errors.get("email"), Some("Invalid email address"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_login_phone_messages() {
        let errors = login_credentials(LoginMethod::Phone, "", "pw").unwrap_err();
        assert_eq!(errors.get("phone"), Some("Phone number is required"));

        let errors = login_credentials(LoginMethod::Phone, "12345", "pw").unwrap_err();
        assert_eq!(errors.get("phone"), Some("Phone must be 10 digits"));

        let creds = login_credentials(LoginMethod::Phone, " 9876543210 ", "pw").unwrap();
        assert_eq!(creds, Credentials::phone("9876543210", "pw"));
    }

    #[test]
    fn test_registration_trims_and_drops_blank_name() {
        let reg = registration(" new@college.edu ", "pw", "  ").unwrap();
        assert_eq!(reg.email, "new@college.edu");
        assert!(reg.name.is_none());

        assert!(registration("new@college", "pw", "").is_err());
    }

    #[test]
    fn test_parse_marks() {
        assert_eq!(parse_marks(" 78 "), Some(78.0));
        assert_eq!(parse_marks("66.5"), Some(66.5));
        assert_eq!(parse_marks(""), None);
        assert_eq!(parse_marks("-1"), None);
        assert_eq!(parse_marks("abc"), None);
    }

    #[test]
    fn test_first_error_is_stable() {
        let mut errors = FieldErrors::new();
        errors.add("session", "Session is required");
        errors.add("course", "Course is required");
        errors.add("course", "ignored duplicate");
        assert_eq!(errors.first(), Some("Course is required"));
    }
}
