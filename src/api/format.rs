use chrono::NaiveDate;
use serde::Serialize;

use crate::database::models::{Employee, User};

/// Wire representation of an employee. Choice fields carry both the stored
/// value (`null` when unassigned) and its display label.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: Option<&'static str>,
    pub department_display: &'static str,
    pub role: Option<&'static str>,
    pub role_display: &'static str,
    pub date_joined: NaiveDate,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            department: employee.department.map(|d| d.as_str()),
            department_display: employee.department_display(),
            role: employee.role.map(|r| r.as_str()),
            role_display: employee.role_display(),
            date_joined: employee.date_joined,
            name: employee.name,
            email: employee.email,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{Department, EmployeeFields};
    use serde_json::json;

    #[test]
    fn unassigned_choices_render_as_null_and_not_assigned() {
        let employee = Employee::from_fields(
            7,
            EmployeeFields {
                name: "Alice".into(),
                email: "alice@example.com".into(),
                department: Some(Department::HR),
                role: None,
            },
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        );

        let value = serde_json::to_value(EmployeeResponse::from(employee)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 7,
                "name": "Alice",
                "email": "alice@example.com",
                "department": "HR",
                "department_display": "Human Resources",
                "role": null,
                "role_display": "Not Assigned",
                "date_joined": "2024-05-01"
            })
        );
    }
}
