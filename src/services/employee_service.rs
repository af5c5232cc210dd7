use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::debug;

use crate::api::pagination::{resolve_page_size, PageRequest, PageSlice, PageWindow};
use crate::config::PaginationConfig;
use crate::database::models::{Employee, EmployeeFields};
use crate::database::{DatabaseError, EmployeeStore};
use crate::filter::EmployeeQuery;
use crate::validation::{EmployeePayload, FieldErrors};

pub const DUPLICATE_EMAIL: &str = "An employee with this email already exists.";

#[derive(Debug, Error)]
pub enum EmployeeError {
    #[error("Employee '{0}' not found")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    InvalidField(FieldErrors),

    #[error("Duplicate email: {0}")]
    DuplicateEmail(FieldErrors),

    #[error(transparent)]
    Store(DatabaseError),
}

impl From<DatabaseError> for EmployeeError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::DuplicateEmail => {
                EmployeeError::DuplicateEmail(FieldErrors::single("email", DUPLICATE_EMAIL))
            }
            other => EmployeeError::Store(other),
        }
    }
}

/// Raw list parameters as they arrive on the query string.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub query: EmployeeQuery,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Employee CRUD on top of an [`EmployeeStore`]
#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
    pagination: PaginationConfig,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>, pagination: PaginationConfig) -> Self {
        Self { store, pagination }
    }

    pub async fn create(&self, payload: EmployeePayload) -> Result<Employee, EmployeeError> {
        let duplicate = self.email_conflict(&payload, None).await?;
        let fields = settle(payload.resolve(None), duplicate)?;

        let employee = self.store.insert(fields, Utc::now().date_naive()).await?;
        debug!("Inserted employee {} <{}>", employee.id, employee.email);
        Ok(employee)
    }

    pub async fn retrieve(&self, raw_id: &str) -> Result<Employee, EmployeeError> {
        let id = parse_id(raw_id)?;
        self.store
            .get(id)
            .await?
            .ok_or_else(|| EmployeeError::NotFound(raw_id.to_string()))
    }

    /// Full (`partial = false`) or partial update of an existing record.
    pub async fn update(
        &self,
        raw_id: &str,
        payload: EmployeePayload,
        partial: bool,
    ) -> Result<Employee, EmployeeError> {
        let existing = self.retrieve(raw_id).await?;
        let base = partial.then(|| existing.fields());

        let duplicate = self.email_conflict(&payload, Some(existing.id)).await?;
        let fields = settle(payload.resolve(base.as_ref()), duplicate)?;

        let updated = self
            .store
            .update(existing.id, fields)
            .await?
            .ok_or_else(|| EmployeeError::NotFound(raw_id.to_string()))?;
        debug!("Updated employee {} (partial={})", updated.id, partial);
        Ok(updated)
    }

    pub async fn delete(&self, raw_id: &str) -> Result<(), EmployeeError> {
        let id = parse_id(raw_id)?;
        if !self.store.delete(id).await? {
            return Err(EmployeeError::NotFound(raw_id.to_string()));
        }
        debug!("Deleted employee {}", id);
        Ok(())
    }

    pub async fn list(&self, params: ListParams) -> Result<PageSlice<Employee>, EmployeeError> {
        let request = PageRequest::parse(params.page.as_deref());
        let size = resolve_page_size(params.page_size.as_deref(), &self.pagination);

        let count = self.store.count(&params.query).await?;
        let window = PageWindow::compute(count, size, request);

        let results = if window.in_range() && count > 0 {
            self.store.list(&params.query, window.size, window.offset).await?
        } else {
            Vec::new()
        };
        debug!(
            "Listed employees: count={} page={} size={} returned={}",
            count,
            window.number,
            window.size,
            results.len()
        );

        Ok(PageSlice { count, window, results })
    }

    pub async fn ping(&self) -> Result<(), EmployeeError> {
        self.store.ping().await.map_err(EmployeeError::Store)
    }

    async fn email_conflict(
        &self,
        payload: &EmployeePayload,
        exclude_id: Option<i64>,
    ) -> Result<bool, EmployeeError> {
        match payload.normalized_email() {
            Some(email) => Ok(self.store.email_taken(&email, exclude_id).await?),
            None => Ok(false),
        }
    }
}

/// Non-integer ids can never name a record.
pub fn parse_id(raw: &str) -> Result<i64, EmployeeError> {
    raw.parse::<i64>()
        .map_err(|_| EmployeeError::NotFound(raw.to_string()))
}

/// A duplicate email wins the error kind, but the body carries every field error.
fn settle(
    resolved: Result<EmployeeFields, FieldErrors>,
    duplicate: bool,
) -> Result<EmployeeFields, EmployeeError> {
    match (resolved, duplicate) {
        (Ok(fields), false) => Ok(fields),
        (Ok(_), true) => Err(EmployeeError::DuplicateEmail(FieldErrors::single(
            "email",
            DUPLICATE_EMAIL,
        ))),
        (Err(mut errors), true) => {
            errors.add("email", DUPLICATE_EMAIL);
            Err(EmployeeError::DuplicateEmail(errors))
        }
        (Err(errors), false) => Err(EmployeeError::InvalidField(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::database::models::{Department, Role};
    use crate::database::MemoryEmployeeStore;
    use serde_json::json;

    fn service() -> EmployeeService {
        EmployeeService::new(
            Arc::new(MemoryEmployeeStore::new()),
            AppConfig::development().pagination,
        )
    }

    fn payload(value: serde_json::Value) -> EmployeePayload {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn create_sets_join_date_and_normalizes() {
        let service = service();
        let employee = service
            .create(payload(json!({"name": "Alice", "email": "Alice@Example.com", "department": "Engineering"})))
            .await
            .unwrap();
        assert_eq!(employee.email, "alice@example.com");
        assert_eq!(employee.department, Some(Department::Engineering));
        assert_eq!(employee.date_joined, Utc::now().date_naive());
    }

    #[tokio::test]
    async fn duplicate_email_is_case_insensitive() {
        let service = service();
        service
            .create(payload(json!({"name": "Alice", "email": "alice@example.com"})))
            .await
            .unwrap();
        let err = service
            .create(payload(json!({"name": "Other", "email": "ALICE@example.com"})))
            .await
            .unwrap_err();
        assert!(matches!(err, EmployeeError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn duplicate_with_other_errors_reports_all_fields() {
        let service = service();
        service
            .create(payload(json!({"name": "Alice", "email": "alice@example.com"})))
            .await
            .unwrap();
        let err = service
            .create(payload(json!({"name": "", "email": "alice@example.com", "role": "CEO"})))
            .await
            .unwrap_err();
        match err {
            EmployeeError::DuplicateEmail(errors) => {
                let fields: Vec<&str> = errors.fields().collect();
                assert_eq!(fields, vec!["email", "name", "role"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_claim_an_email_once() {
        let service = service();
        let mut set = tokio::task::JoinSet::new();
        for i in 0..16 {
            let service = service.clone();
            set.spawn(async move {
                service
                    .create(payload(json!({"name": format!("Racer {i}"), "email": "Race@Example.com"})))
                    .await
            });
        }

        let (mut created, mut duplicates) = (0, 0);
        while let Some(joined) = set.join_next().await {
            match joined.unwrap() {
                Ok(_) => created += 1,
                Err(EmployeeError::DuplicateEmail(errors)) => {
                    assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["email"]);
                    duplicates += 1;
                }
                Err(other) => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!((created, duplicates), (1, 15));
        assert_eq!(service.list(ListParams::default()).await.unwrap().count, 1);
    }

    #[tokio::test]
    async fn update_may_keep_own_email() {
        let service = service();
        let alice = service
            .create(payload(json!({"name": "Alice", "email": "alice@example.com", "role": "Developer"})))
            .await
            .unwrap();
        let id = alice.id.to_string();

        let updated = service
            .update(&id, payload(json!({"name": "Alice J", "email": "alice@example.com"})), false)
            .await
            .unwrap();
        assert_eq!(updated.name, "Alice J");
        assert_eq!(updated.role, None);
        assert_eq!(updated.date_joined, alice.date_joined);

        let patched = service.update(&id, payload(json!({"role": "Lead"})), true).await.unwrap();
        assert_eq!(patched.name, "Alice J");
        assert_eq!(patched.role, Some(Role::Lead));
    }

    #[tokio::test]
    async fn missing_and_malformed_ids_are_not_found() {
        let service = service();
        assert!(matches!(service.retrieve("999").await, Err(EmployeeError::NotFound(_))));
        assert!(matches!(service.retrieve("abc").await, Err(EmployeeError::NotFound(_))));
        assert!(matches!(service.delete("999").await, Err(EmployeeError::NotFound(_))));
        assert!(matches!(
            service.update("abc", EmployeePayload::default(), true).await,
            Err(EmployeeError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_pages_through_results() {
        let service = service();
        for i in 0..12 {
            service
                .create(payload(json!({"name": format!("Employee {i:02}"), "email": format!("e{i}@example.com")})))
                .await
                .unwrap();
        }

        let first = service.list(ListParams::default()).await.unwrap();
        assert_eq!((first.count, first.results.len()), (12, 10));

        let second = service
            .list(ListParams { page: Some("2".into()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(second.results.len(), 2);

        let beyond = service
            .list(ListParams { page: Some("9".into()), ..Default::default() })
            .await
            .unwrap();
        assert!(beyond.results.is_empty());
        assert_eq!(beyond.window.previous(), Some(2));

        let junk = service
            .list(ListParams { page: Some("zero".into()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!((junk.window.number, junk.results.len()), (1, 10));
    }
}
