use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::manager::DatabaseError;

/// Departments an employee may be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    HR,
    Engineering,
    Sales,
    Marketing,
    Finance,
    Operations,
}

impl Department {
    pub const ALL: [Department; 6] = [
        Department::HR,
        Department::Engineering,
        Department::Sales,
        Department::Marketing,
        Department::Finance,
        Department::Operations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::HR => "HR",
            Department::Engineering => "Engineering",
            Department::Sales => "Sales",
            Department::Marketing => "Marketing",
            Department::Finance => "Finance",
            Department::Operations => "Operations",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Department::HR => "Human Resources",
            other => other.as_str(),
        }
    }

    /// Exact, case-sensitive match against the stored value.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Manager,
    Developer,
    Analyst,
    Designer,
    Lead,
    Intern,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Manager,
        Role::Developer,
        Role::Analyst,
        Role::Designer,
        Role::Lead,
        Role::Intern,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "Manager",
            Role::Developer => "Developer",
            Role::Analyst => "Analyst",
            Role::Designer => "Designer",
            Role::Lead => "Lead",
            Role::Intern => "Intern",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Lead => "Team Lead",
            other => other.as_str(),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }
}

/// The mutable part of an employee, already validated and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeFields {
    pub name: String,
    pub email: String,
    pub department: Option<Department>,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: Option<Department>,
    pub role: Option<Role>,
    pub date_joined: NaiveDate,
}

impl Employee {
    pub fn from_fields(id: i64, fields: EmployeeFields, date_joined: NaiveDate) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
            department: fields.department,
            role: fields.role,
            date_joined,
        }
    }

    pub fn fields(&self) -> EmployeeFields {
        EmployeeFields {
            name: self.name.clone(),
            email: self.email.clone(),
            department: self.department,
            role: self.role,
        }
    }

    pub fn department_display(&self) -> &'static str {
        self.department.map(|d| d.label()).unwrap_or("Not Assigned")
    }

    pub fn role_display(&self) -> &'static str {
        self.role.map(|r| r.label()).unwrap_or("Not Assigned")
    }
}

/// Row shape of the `employee` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployeeRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub role: Option<String>,
    pub date_joined: NaiveDate,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = DatabaseError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let department = match row.department.as_deref() {
            None | Some("") => None,
            Some(value) => Some(Department::parse(value).ok_or_else(|| {
                DatabaseError::InvalidRow(format!("employee {} has unknown department '{}'", row.id, value))
            })?),
        };
        let role = match row.role.as_deref() {
            None | Some("") => None,
            Some(value) => Some(Role::parse(value).ok_or_else(|| {
                DatabaseError::InvalidRow(format!("employee {} has unknown role '{}'", row.id, value))
            })?),
        };

        Ok(Self {
            id: row.id,
            name: row.name,
            email: row.email,
            department,
            role,
            date_joined: row.date_joined,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_choice_table() {
        assert_eq!(Department::HR.label(), "Human Resources");
        assert_eq!(Department::Sales.label(), "Sales");
        assert_eq!(Role::Lead.label(), "Team Lead");
        assert_eq!(Role::Intern.label(), "Intern");
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(Department::parse("Engineering"), Some(Department::Engineering));
        assert_eq!(Department::parse("engineering"), None);
        assert_eq!(Role::parse("Manager"), Some(Role::Manager));
        assert_eq!(Role::parse("CEO"), None);
    }

    #[test]
    fn row_with_unknown_choice_is_rejected() {
        let row = EmployeeRow {
            id: 7,
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            department: Some("Legal".to_string()),
            role: None,
            date_joined: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        };
        assert!(matches!(Employee::try_from(row), Err(DatabaseError::InvalidRow(_))));
    }

    #[test]
    fn displays_default_to_not_assigned() {
        let employee = Employee {
            id: 1,
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            department: None,
            role: Some(Role::Lead),
            date_joined: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        };
        assert_eq!(employee.department_display(), "Not Assigned");
        assert_eq!(employee.role_display(), "Team Lead");
    }
}
