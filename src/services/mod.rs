pub mod auth_service;
pub mod employee_service;

pub use auth_service::{AuthService, Registration};
pub use employee_service::{EmployeeError, EmployeeService, ListParams};
