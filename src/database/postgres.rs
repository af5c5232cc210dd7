use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Employee, EmployeeFields, EmployeeRow, NewUser, User};
use crate::database::store::{EmployeeStore, UserStore};
use crate::filter::{EmployeeQuery, FilterOrder, FilterWhere};

const EMPLOYEE_COLUMNS: &str = "id, name, email, department, role, date_joined";
const USER_COLUMNS: &str = "id, username, email, password_hash, is_active, date_joined";

/// Employee store backed by the `employee` table
#[derive(Clone)]
pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_employee_write_error(err: sqlx::Error) -> DatabaseError {
    if DatabaseError::is_unique_violation(&err) {
        DatabaseError::DuplicateEmail
    } else {
        DatabaseError::Sqlx(err)
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn insert(&self, fields: EmployeeFields, date_joined: NaiveDate) -> Result<Employee, DatabaseError> {
        let sql = format!(
            "INSERT INTO employee (name, email, department, role, date_joined) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            EMPLOYEE_COLUMNS
        );
        let row = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(&fields.name)
            .bind(&fields.email)
            .bind(fields.department.map(|d| d.as_str()))
            .bind(fields.role.map(|r| r.as_str()))
            .bind(date_joined)
            .fetch_one(&self.pool)
            .await
            .map_err(map_employee_write_error)?;
        row.try_into()
    }

    async fn get(&self, id: i64) -> Result<Option<Employee>, DatabaseError> {
        let sql = format!("SELECT {} FROM employee WHERE id = $1", EMPLOYEE_COLUMNS);
        let row = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Employee::try_from).transpose()
    }

    async fn update(&self, id: i64, fields: EmployeeFields) -> Result<Option<Employee>, DatabaseError> {
        let sql = format!(
            "UPDATE employee SET name = $2, email = $3, department = $4, role = $5 \
             WHERE id = $1 RETURNING {}",
            EMPLOYEE_COLUMNS
        );
        let row = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(id)
            .bind(&fields.name)
            .bind(&fields.email)
            .bind(fields.department.map(|d| d.as_str()))
            .bind(fields.role.map(|r| r.as_str()))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_employee_write_error)?;
        row.map(Employee::try_from).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM employee WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn email_taken(&self, email: &str, exclude_id: Option<i64>) -> Result<bool, DatabaseError> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM employee WHERE email = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn count(&self, query: &EmployeeQuery) -> Result<u64, DatabaseError> {
        let where_sql = FilterWhere::generate(query, 0);
        let sql = format!("SELECT COUNT(*) AS count FROM employee WHERE {}", where_sql.query);

        let mut q = sqlx::query_scalar::<_, i64>(&sql);
        for p in where_sql.params.iter() {
            q = q.bind(p.as_str());
        }
        let count = q.fetch_one(&self.pool).await?;
        Ok(count.max(0) as u64)
    }

    async fn list(&self, query: &EmployeeQuery, limit: u64, offset: u64) -> Result<Vec<Employee>, DatabaseError> {
        let where_sql = FilterWhere::generate(query, 0);
        let sql = format!(
            "SELECT {} FROM employee WHERE {} {} LIMIT {} OFFSET {}",
            EMPLOYEE_COLUMNS,
            where_sql.query,
            FilterOrder::generate(&query.ordering),
            limit,
            offset
        );
        tracing::debug!("Listing employees: {}", sql);

        let mut q = sqlx::query_as::<_, EmployeeRow>(&sql);
        for p in where_sql.params.iter() {
            q = q.bind(p.as_str());
        }
        let rows = q.fetch_all(&self.pool).await?;
        rows.into_iter().map(Employee::try_from).collect()
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

/// User store backed by the `api_user` table
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO api_user (username, email, password_hash) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                if DatabaseError::is_unique_violation(&err) {
                    DatabaseError::DuplicateUsername
                } else {
                    DatabaseError::Sqlx(err)
                }
            })
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM api_user WHERE username = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn get(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM api_user WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}
