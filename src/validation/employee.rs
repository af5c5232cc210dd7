use serde::Deserialize;

use super::{nullable, normalize_email, FieldErrors, NOT_NULL, REQUIRED};
use crate::database::models::{Department, EmployeeFields, Role};

pub const NAME_MAX_LEN: usize = 255;

/// Client-supplied employee body. Read-only fields (`id`, `date_joined`)
/// and unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeePayload {
    #[serde(default, deserialize_with = "nullable")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub department: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub role: Option<Option<String>>,
}

impl EmployeePayload {
    /// Validate into a complete set of fields.
    ///
    /// With `base = None` (create, full update) `name` and `email` are
    /// required and omitted choices are cleared. With `base = Some(..)`
    /// (partial update) omitted keys keep the base value.
    pub fn resolve(self, base: Option<&EmployeeFields>) -> Result<EmployeeFields, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = match self.name {
            None => match base {
                Some(b) => Some(b.name.clone()),
                None => {
                    errors.add("name", REQUIRED);
                    None
                }
            },
            Some(None) => {
                errors.add("name", NOT_NULL);
                None
            }
            Some(Some(raw)) => match validate_name(&raw) {
                Ok(name) => Some(name),
                Err(msg) => {
                    errors.add("name", msg);
                    None
                }
            },
        };

        let email = match self.email {
            None => match base {
                Some(b) => Some(b.email.clone()),
                None => {
                    errors.add("email", REQUIRED);
                    None
                }
            },
            Some(None) => {
                errors.add("email", NOT_NULL);
                None
            }
            Some(Some(raw)) => match normalize_email(&raw) {
                Ok(email) => Some(email),
                Err(msg) => {
                    errors.add("email", msg);
                    None
                }
            },
        };

        let department = match self.department {
            None => base.and_then(|b| b.department),
            Some(raw) => parse_department(raw.as_deref()).unwrap_or_else(|msg| {
                errors.add("department", msg);
                None
            }),
        };

        let role = match self.role {
            None => base.and_then(|b| b.role),
            Some(raw) => parse_role(raw.as_deref()).unwrap_or_else(|msg| {
                errors.add("role", msg);
                None
            }),
        };

        match (name, email) {
            (Some(name), Some(email)) if errors.is_empty() => Ok(EmployeeFields {
                name,
                email,
                department,
                role,
            }),
            _ => Err(errors),
        }
    }

    /// The normalized email this payload would store, if it names a valid one.
    pub fn normalized_email(&self) -> Option<String> {
        match &self.email {
            Some(Some(raw)) => normalize_email(raw).ok(),
            _ => None,
        }
    }
}

pub fn validate_name(raw: &str) -> Result<String, String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("Name cannot be empty.".to_string());
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(format!("Ensure this field has no more than {} characters.", NAME_MAX_LEN));
    }
    Ok(name.to_string())
}

/// `None`/blank → not assigned; anything else must be a known department.
pub fn parse_department(raw: Option<&str>) -> Result<Option<Department>, String> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => Department::parse(value).map(Some).ok_or_else(|| {
            let choices: Vec<&str> = Department::ALL.iter().map(|d| d.as_str()).collect();
            format!("Invalid department. Choose from: {}.", choices.join(", "))
        }),
    }
}

pub fn parse_role(raw: Option<&str>) -> Result<Option<Role>, String> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => Role::parse(value).map(Some).ok_or_else(|| {
            let choices: Vec<&str> = Role::ALL.iter().map(|r| r.as_str()).collect();
            format!("Invalid role. Choose from: {}.", choices.join(", "))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> EmployeePayload {
        serde_json::from_value(value).unwrap()
    }

    fn base() -> EmployeeFields {
        EmployeeFields {
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
            department: Some(Department::Engineering),
            role: Some(Role::Developer),
        }
    }

    #[test]
    fn create_requires_name_and_email() {
        let errors = payload(json!({})).resolve(None).unwrap_err();
        assert_eq!(errors.get("name").unwrap(), [REQUIRED]);
        assert_eq!(errors.get("email").unwrap(), [REQUIRED]);
    }

    #[test]
    fn whitespace_name_is_rejected() {
        let errors = payload(json!({"name": "   ", "email": "a@x.com"})).resolve(None).unwrap_err();
        assert_eq!(errors.get("name").unwrap(), ["Name cannot be empty."]);
        assert!(!errors.contains("email"));
    }

    #[test]
    fn all_field_errors_are_reported_together() {
        let errors = payload(json!({
            "name": "",
            "email": "not-an-email",
            "department": "Legal",
            "role": "CEO"
        }))
        .resolve(None)
        .unwrap_err();
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec!["department", "email", "name", "role"]);
    }

    #[test]
    fn valid_create_normalizes() {
        let fields = payload(json!({
            "id": 99,
            "name": "  Bob Smith ",
            "email": "Bob@Example.com",
            "department": "HR",
            "role": "",
            "date_joined": "1999-01-01"
        }))
        .resolve(None)
        .unwrap();
        assert_eq!(fields.name, "Bob Smith");
        assert_eq!(fields.email, "bob@example.com");
        assert_eq!(fields.department, Some(Department::HR));
        assert_eq!(fields.role, None);
    }

    #[test]
    fn full_update_clears_omitted_choices() {
        let fields = payload(json!({"name": "Alice", "email": "alice@example.com"}))
            .resolve(None)
            .unwrap();
        assert_eq!(fields.department, None);
        assert_eq!(fields.role, None);
    }

    #[test]
    fn partial_update_keeps_omitted_fields() {
        let fields = payload(json!({"role": "Lead"})).resolve(Some(&base())).unwrap();
        assert_eq!(fields.name, "Alice Johnson");
        assert_eq!(fields.department, Some(Department::Engineering));
        assert_eq!(fields.role, Some(Role::Lead));

        let cleared = payload(json!({"department": null})).resolve(Some(&base())).unwrap();
        assert_eq!(cleared.department, None);
    }

    #[test]
    fn partial_update_still_validates_supplied_fields() {
        let errors = payload(json!({"name": null})).resolve(Some(&base())).unwrap_err();
        assert_eq!(errors.get("name").unwrap(), [NOT_NULL]);
    }
}
