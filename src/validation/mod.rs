//! Typed field validators.
//!
//! Each validator normalizes its input or returns the client-facing message
//! for that field. Callers collect messages into [`FieldErrors`] so every
//! failing field is reported in one response.

pub mod employee;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use validator::ValidateEmail;

pub use employee::EmployeePayload;

pub const REQUIRED: &str = "This field is required.";
pub const NOT_NULL: &str = "This field may not be null.";
pub const INVALID_EMAIL: &str = "Enter a valid email address.";

pub const EMAIL_MAX_LEN: usize = 254;
pub const USERNAME_MAX_LEN: usize = 150;
pub const PASSWORD_MIN_LEN: usize = 8;

/// Field name → messages, serialized as `{"email": ["..."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Distinguishes an absent key (`None`) from an explicit `null` (`Some(None)`).
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Trimmed and lowercased email, or the reason it is unacceptable.
pub fn normalize_email(raw: &str) -> Result<String, String> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err("Email is required.".to_string());
    }
    if email.len() > EMAIL_MAX_LEN {
        return Err(format!("Ensure this field has no more than {} characters.", EMAIL_MAX_LEN));
    }
    if !email.validate_email() {
        return Err(INVALID_EMAIL.to_string());
    }
    Ok(email)
}

pub fn validate_username(raw: &str) -> Result<String, String> {
    let username = raw.trim();
    if username.is_empty() {
        return Err("Username cannot be empty.".to_string());
    }
    if username.chars().count() < 3 {
        return Err("Username must be at least 3 characters.".to_string());
    }
    if username.chars().count() > USERNAME_MAX_LEN {
        return Err(format!("Username must be at most {} characters.", USERNAME_MAX_LEN));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '@' | '+'))
    {
        return Err("Username may contain only letters, numbers, and @/./+/-/_ characters.".to_string());
    }
    Ok(username.to_string())
}

pub fn validate_password(raw: &str) -> Result<(), String> {
    if raw.chars().count() < PASSWORD_MIN_LEN {
        return Err(format!(
            "This password is too short. It must contain at least {} characters.",
            PASSWORD_MIN_LEN
        ));
    }
    if raw.trim().is_empty() {
        return Err("Password cannot be blank.".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalized() {
        assert_eq!(normalize_email("  Alice@Example.COM ").unwrap(), "alice@example.com");
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for bad in ["plainaddress", "@example.com", "alice@", "a b@example.com", "alice@@example.com"] {
            assert_eq!(normalize_email(bad).unwrap_err(), INVALID_EMAIL, "accepted {bad}");
        }
        assert!(normalize_email("   ").is_err());
    }

    #[test]
    fn overlong_email_is_rejected() {
        let email = format!("{}@example.com", "a".repeat(250));
        assert!(normalize_email(&email).unwrap_err().contains("254"));
    }

    #[test]
    fn username_rules() {
        assert_eq!(validate_username(" admin ").unwrap(), "admin");
        assert!(validate_username("ab").is_err());
        assert!(validate_username("bad name").is_err());
        assert!(validate_username("first.last+tag@corp").is_ok());
    }

    #[test]
    fn password_rules() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("        ").is_err());
        assert!(validate_password("long enough").is_ok());
    }

    #[test]
    fn field_errors_collect_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("name", "one");
        errors.add("name", "two");
        errors.add("email", "three");
        assert_eq!(errors.get("name").unwrap(), ["one", "two"]);
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({"email": ["three"], "name": ["one", "two"]})
        );
        assert!(!errors.is_empty());
    }
}
