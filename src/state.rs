use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::JwtKeys;
use crate::config::AppConfig;
use crate::database::{MemoryEmployeeStore, MemoryUserStore, PgEmployeeStore, PgUserStore};
use crate::services::{AuthService, EmployeeService};

/// Shared handles passed to every handler. Clones are cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub employees: EmployeeService,
    pub auth: AuthService,
}

impl AppState {
    /// Stores backed by Postgres.
    pub fn postgres(config: AppConfig, pool: PgPool) -> Self {
        let employees = EmployeeService::new(
            Arc::new(PgEmployeeStore::new(pool.clone())),
            config.pagination.clone(),
        );
        let auth = AuthService::new(Arc::new(PgUserStore::new(pool)), JwtKeys::new(&config.auth));
        Self {
            config: Arc::new(config),
            employees,
            auth,
        }
    }

    /// Process-local stores; contents are lost on exit.
    pub fn in_memory(config: AppConfig) -> Self {
        let employees = EmployeeService::new(
            Arc::new(MemoryEmployeeStore::new()),
            config.pagination.clone(),
        );
        let auth = AuthService::new(Arc::new(MemoryUserStore::new()), JwtKeys::new(&config.auth));
        Self {
            config: Arc::new(config),
            employees,
            auth,
        }
    }
}
