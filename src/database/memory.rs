use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Employee, EmployeeFields, NewUser, User};
use crate::database::store::{EmployeeStore, UserStore};
use crate::filter::{EmployeeQuery, FilterOrder, FilterWhere};

struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Process-local employee store. Uniqueness checks and writes share one
/// write lock, so concurrent creates cannot both claim an email.
#[derive(Default)]
pub struct MemoryEmployeeStore {
    table: RwLock<Table<Employee>>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_in_use(rows: &BTreeMap<i64, Employee>, email: &str, exclude_id: Option<i64>) -> bool {
    rows.values()
        .any(|e| e.email == email && Some(e.id) != exclude_id)
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn insert(&self, fields: EmployeeFields, date_joined: NaiveDate) -> Result<Employee, DatabaseError> {
        let mut table = self.table.write().await;
        if email_in_use(&table.rows, &fields.email, None) {
            return Err(DatabaseError::DuplicateEmail);
        }
        let id = table.allocate_id();
        let employee = Employee::from_fields(id, fields, date_joined);
        table.rows.insert(id, employee.clone());
        Ok(employee)
    }

    async fn get(&self, id: i64) -> Result<Option<Employee>, DatabaseError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn update(&self, id: i64, fields: EmployeeFields) -> Result<Option<Employee>, DatabaseError> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&id) {
            return Ok(None);
        }
        if email_in_use(&table.rows, &fields.email, Some(id)) {
            return Err(DatabaseError::DuplicateEmail);
        }
        let Some(existing) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        existing.name = fields.name;
        existing.email = fields.email;
        existing.department = fields.department;
        existing.role = fields.role;
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn email_taken(&self, email: &str, exclude_id: Option<i64>) -> Result<bool, DatabaseError> {
        Ok(email_in_use(&self.table.read().await.rows, email, exclude_id))
    }

    async fn count(&self, query: &EmployeeQuery) -> Result<u64, DatabaseError> {
        let table = self.table.read().await;
        Ok(table.rows.values().filter(|e| FilterWhere::matches(query, e)).count() as u64)
    }

    async fn list(&self, query: &EmployeeQuery, limit: u64, offset: u64) -> Result<Vec<Employee>, DatabaseError> {
        let table = self.table.read().await;
        let mut matching: Vec<&Employee> = table
            .rows
            .values()
            .filter(|e| FilterWhere::matches(query, e))
            .collect();
        matching.sort_by(|a, b| FilterOrder::compare(&query.ordering, a, b));

        Ok(matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    table: RwLock<Table<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut table = self.table.write().await;
        if table.rows.values().any(|u| u.username == user.username) {
            return Err(DatabaseError::DuplicateUsername);
        }
        let id = table.allocate_id();
        let user = User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            is_active: true,
            date_joined: Utc::now(),
        };
        table.rows.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|u| u.username == username).cloned())
    }

    async fn get(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }
}
