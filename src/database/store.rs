use async_trait::async_trait;
use chrono::NaiveDate;

use crate::database::manager::DatabaseError;
use crate::database::models::{Employee, EmployeeFields, NewUser, User};
use crate::filter::EmployeeQuery;

/// Persistence for employee records.
///
/// Implementations must enforce email uniqueness atomically with each write
/// and report a collision as [`DatabaseError::DuplicateEmail`].
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn insert(&self, fields: EmployeeFields, date_joined: NaiveDate) -> Result<Employee, DatabaseError>;

    async fn get(&self, id: i64) -> Result<Option<Employee>, DatabaseError>;

    /// Replace the mutable fields. `Ok(None)` when the id does not exist.
    async fn update(&self, id: i64, fields: EmployeeFields) -> Result<Option<Employee>, DatabaseError>;

    /// `Ok(false)` when the id does not exist.
    async fn delete(&self, id: i64) -> Result<bool, DatabaseError>;

    async fn email_taken(&self, email: &str, exclude_id: Option<i64>) -> Result<bool, DatabaseError>;

    async fn count(&self, query: &EmployeeQuery) -> Result<u64, DatabaseError>;

    /// Matching records in the query's ordering.
    async fn list(&self, query: &EmployeeQuery, limit: u64, offset: u64) -> Result<Vec<Employee>, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// Persistence for API accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`DatabaseError::DuplicateUsername`] on a taken username.
    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError>;

    async fn get(&self, id: i64) -> Result<Option<User>, DatabaseError>;
}
