use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Secret used by the development preset. Production refuses to start with it.
pub const DEVELOPMENT_JWT_SECRET: &str = "development-only-secret-change-me";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub pagination: PaginationConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres connection string. `None` means the in-memory stores are used.
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub access_token_ttl_secs: u64,
    pub refresh_token_ttl_secs: u64,
    pub bootstrap_username: Option<String>,
    #[serde(skip_serializing)]
    pub bootstrap_password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    /// Empty list with CORS enabled means permissive.
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT secret must be set (AUTH_JWT_SECRET) outside development")]
    InsecureJwtSecret,

    #[error("Invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        override_parsed("PORT", &mut self.server.port);
        override_parsed("SERVER_PORT", &mut self.server.port);
        override_parsed("API_REQUEST_TIMEOUT_SECS", &mut self.server.request_timeout_secs);
        override_parsed("API_MAX_REQUEST_SIZE_BYTES", &mut self.server.max_request_size_bytes);

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = if v.trim().is_empty() { None } else { Some(v) };
        }
        override_parsed("DATABASE_MAX_CONNECTIONS", &mut self.database.max_connections);
        override_parsed("DATABASE_CONNECTION_TIMEOUT", &mut self.database.connection_timeout);
        override_parsed("DATABASE_RUN_MIGRATIONS", &mut self.database.run_migrations);

        // Auth overrides
        if let Ok(v) = env::var("AUTH_JWT_SECRET") {
            self.auth.jwt_secret = v;
        }
        override_parsed("AUTH_ACCESS_TOKEN_TTL_SECS", &mut self.auth.access_token_ttl_secs);
        override_parsed("AUTH_REFRESH_TOKEN_TTL_SECS", &mut self.auth.refresh_token_ttl_secs);
        if let Ok(v) = env::var("AUTH_BOOTSTRAP_USERNAME") {
            self.auth.bootstrap_username = Some(v);
        }
        if let Ok(v) = env::var("AUTH_BOOTSTRAP_PASSWORD") {
            self.auth.bootstrap_password = Some(v);
        }

        // Pagination overrides
        override_parsed("PAGINATION_DEFAULT_PAGE_SIZE", &mut self.pagination.default_page_size);
        override_parsed("PAGINATION_MAX_PAGE_SIZE", &mut self.pagination.max_page_size);

        // Security overrides
        override_parsed("SECURITY_ENABLE_CORS", &mut self.security.enable_cors);
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        self
    }

    /// Reject combinations that must never reach a running server.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment != Environment::Development
            && (self.auth.jwt_secret.is_empty() || self.auth.jwt_secret == DEVELOPMENT_JWT_SECRET)
        {
            return Err(ConfigError::InsecureJwtSecret);
        }
        if self.auth.jwt_secret.is_empty() {
            return Err(ConfigError::InsecureJwtSecret);
        }
        if self.pagination.default_page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "PAGINATION_DEFAULT_PAGE_SIZE",
                reason: "must be positive".to_string(),
            });
        }
        if self.pagination.max_page_size < self.pagination.default_page_size {
            return Err(ConfigError::Invalid {
                key: "PAGINATION_MAX_PAGE_SIZE",
                reason: "must not be smaller than the default page size".to_string(),
            });
        }
        if self.auth.access_token_ttl_secs == 0 || self.auth.refresh_token_ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "AUTH_*_TOKEN_TTL_SECS",
                reason: "token lifetimes must be positive".to_string(),
            });
        }
        Ok(())
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
                request_timeout_secs: 30,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
                run_migrations: true,
            },
            auth: AuthConfig {
                jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
                access_token_ttl_secs: 60 * 60,
                refresh_token_ttl_secs: 24 * 60 * 60,
                bootstrap_username: None,
                bootstrap_password: None,
            },
            pagination: PaginationConfig {
                default_page_size: 10,
                max_page_size: 100,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec![],
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                request_timeout_secs: 15,
                max_request_size_bytes: 512 * 1024,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
                run_migrations: true,
            },
            auth: AuthConfig {
                jwt_secret: String::new(),
                access_token_ttl_secs: 60 * 60,
                refresh_token_ttl_secs: 24 * 60 * 60,
                bootstrap_username: None,
                bootstrap_password: None,
            },
            pagination: PaginationConfig {
                default_page_size: 10,
                max_page_size: 100,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                request_timeout_secs: 10,
                max_request_size_bytes: 256 * 1024,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
                run_migrations: false,
            },
            auth: AuthConfig {
                jwt_secret: String::new(),
                access_token_ttl_secs: 60 * 60,
                refresh_token_ttl_secs: 24 * 60 * 60,
                bootstrap_username: None,
                bootstrap_password: None,
            },
            pagination: PaginationConfig {
                default_page_size: 10,
                max_page_size: 100,
            },
            security: SecurityConfig {
                enable_cors: false,
                cors_origins: vec![],
            },
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn override_parsed<T: FromStr>(key: &str, target: &mut T) {
    if let Ok(v) = env::var(key) {
        match v.trim().parse() {
            Ok(parsed) => *target = parsed,
            Err(_) => tracing::warn!("Ignoring unparsable value for {}", key),
        }
    }
}
