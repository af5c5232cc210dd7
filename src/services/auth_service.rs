use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::{AuthError, Claims, JwtKeys, TokenPair, TokenType};
use crate::database::models::{NewUser, User};
use crate::database::{DatabaseError, UserStore};
use crate::validation::{normalize_email, validate_password, validate_username, FieldErrors, REQUIRED};

pub const USERNAME_TAKEN: &str = "A user with that username already exists.";

/// Body of `POST /api/register/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Registration {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Credential checks, token issuance and account creation
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, keys: JwtKeys) -> Self {
        Self { users, keys }
    }

    pub fn keys(&self) -> &JwtKeys {
        &self.keys
    }

    /// Exchange a username and password for an access/refresh pair.
    pub async fn obtain_pair(&self, username: &str, password: &str) -> Result<TokenPair, AuthError> {
        let Some(user) = self.users.find_by_username(username.trim()).await? else {
            warn!("Token request for unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        let hash = user.password_hash.clone();
        let candidate = password.to_string();
        let matches = tokio::task::spawn_blocking(move || verify_password(&candidate, &hash))
            .await
            .map_err(|e| AuthError::Crypto(format!("verify task: {}", e)))??;

        if !matches || !user.is_active {
            warn!("Rejected credentials for user {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        info!("Issued token pair for user {}", user.id);
        self.keys.issue_pair(user.id, &user.username)
    }

    /// New access token from a refresh token whose account is still active.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let claims = self.keys.verify(refresh_token, TokenType::Refresh)?;
        let user = self
            .users
            .get(claims.user_id()?)
            .await?
            .filter(|u| u.is_active)
            .ok_or(AuthError::InactiveUser)?;

        self.keys.issue(user.id, &user.username, TokenType::Access)
    }

    /// Validate a bearer access token. Stateless: no store lookup.
    pub fn authenticate(&self, token: &str) -> Result<Claims, AuthError> {
        self.keys.verify(token, TokenType::Access)
    }

    pub async fn register(&self, registration: Registration) -> Result<User, AuthError> {
        let mut errors = FieldErrors::new();

        let username = match registration.username.as_deref() {
            None => {
                errors.add("username", REQUIRED);
                None
            }
            Some(raw) => validate_username(raw)
                .map_err(|msg| errors.add("username", msg))
                .ok(),
        };

        let email = match registration.email.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => normalize_email(raw).map_err(|msg| errors.add("email", msg)).ok(),
        };

        let password = match registration.password {
            None => {
                errors.add("password", REQUIRED);
                None
            }
            Some(raw) => match validate_password(&raw) {
                Ok(()) => Some(raw),
                Err(msg) => {
                    errors.add("password", msg);
                    None
                }
            },
        };

        if let Some(name) = &username {
            if self.users.find_by_username(name).await?.is_some() {
                errors.add("username", USERNAME_TAKEN);
            }
        }

        let (Some(username), Some(password)) = (username, password) else {
            return Err(AuthError::Validation(errors));
        };
        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }

        self.create_user(&username, &password, email).await
    }

    /// Hash and store an account. Callers validate the inputs.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        email: Option<String>,
    ) -> Result<User, AuthError> {
        let plain = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&plain))
            .await
            .map_err(|e| AuthError::Crypto(format!("hash task: {}", e)))??;

        let user = self
            .users
            .insert(NewUser {
                username: username.to_string(),
                email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                DatabaseError::DuplicateUsername => {
                    AuthError::Validation(FieldErrors::single("username", USERNAME_TAKEN))
                }
                other => AuthError::Store(other),
            })?;

        info!("Created user {} ({})", user.id, user.username);
        Ok(user)
    }

    /// Create the configured bootstrap account unless it already exists.
    pub async fn ensure_user(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        if self.users.find_by_username(username).await?.is_some() {
            return Ok(false);
        }
        self.create_user(username, password, None).await?;
        Ok(true)
    }
}
