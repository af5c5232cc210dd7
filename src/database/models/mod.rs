pub mod employee;
pub mod user;

pub use employee::{Department, Employee, EmployeeFields, EmployeeRow, Role};
pub use user::{NewUser, User};
