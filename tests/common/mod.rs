#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use employee_api::auth::TokenType;
use employee_api::{app, AppConfig, AppState};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "password123";

/// Router over in-memory stores with one registered account.
pub struct TestApp {
    pub state: AppState,
    router: Router,
    pub token: String,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Result<Self> {
        let state = AppState::in_memory(AppConfig::development());
        let user = state.auth.create_user(USERNAME, PASSWORD, None).await?;
        let token = state.auth.keys().issue(user.id, &user.username, TokenType::Access)?;
        let router = app(state.clone());
        Ok(Self { state, router, token })
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> Result<TestResponse> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).context("response body is not JSON")?
        };
        Ok(TestResponse { status, body })
    }

    /// Authenticated request with the default account's token.
    pub async fn authed(&self, method: Method, uri: &str, body: Option<Value>) -> Result<TestResponse> {
        self.request(method, uri, Some(self.token.as_str()), body).await
    }

    pub async fn create_employee(&self, body: Value) -> Result<Value> {
        let res = self.authed(Method::POST, "/api/employees/", Some(body)).await?;
        anyhow::ensure!(res.status == StatusCode::CREATED, "create failed: {} {}", res.status, res.body);
        Ok(res.body)
    }
}
