mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn retrieve_existing_and_missing() -> Result<()> {
    let app = TestApp::spawn().await?;
    let created = app
        .create_employee(json!({"name": "Jane Roe", "email": "jane@example.com", "role": "Analyst"}))
        .await?;
    let uri = format!("/api/employees/{}/", created["id"]);

    let res = app.authed(Method::GET, &uri, None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, created);

    let res = app.authed(Method::GET, "/api/employees/9999/", None).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["code"], "NOT_FOUND");

    let res = app.authed(Method::GET, "/api/employees/not-a-number/", None).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn put_replaces_and_clears_omitted_choices() -> Result<()> {
    let app = TestApp::spawn().await?;
    let created = app
        .create_employee(json!({"name": "Jane", "email": "jane@example.com", "department": "Finance", "role": "Analyst"}))
        .await?;
    let uri = format!("/api/employees/{}/", created["id"]);

    let res = app
        .authed(
            Method::PUT,
            &uri,
            Some(json!({"name": "Jane Roe", "email": "jane@example.com", "date_joined": "2000-01-01"})),
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "Jane Roe");
    assert!(res.body["department"].is_null());
    assert_eq!(res.body["role_display"], "Not Assigned");
    assert_eq!(res.body["date_joined"], created["date_joined"]);

    let res = app.authed(Method::PUT, &uri, Some(json!({"name": "Jane"}))).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["field_errors"]["email"].is_array());
    Ok(())
}

#[tokio::test]
async fn patch_changes_only_supplied_fields() -> Result<()> {
    let app = TestApp::spawn().await?;
    let created = app
        .create_employee(json!({"name": "Jane", "email": "jane@example.com", "department": "Finance", "role": "Analyst"}))
        .await?;
    let uri = format!("/api/employees/{}/", created["id"]);

    let res = app.authed(Method::PATCH, &uri, Some(json!({"role": "Lead"}))).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["role"], "Lead");
    assert_eq!(res.body["role_display"], "Team Lead");
    assert_eq!(res.body["department"], "Finance");
    assert_eq!(res.body["name"], "Jane");

    let res = app.authed(Method::PATCH, &uri, Some(json!({"name": ""}))).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["field_errors"]["name"].is_array());
    Ok(())
}

#[tokio::test]
async fn update_rejects_another_employees_email() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.create_employee(json!({"name": "A", "email": "a@example.com"})).await?;
    let b = app.create_employee(json!({"name": "B", "email": "b@example.com"})).await?;
    let uri = format!("/api/employees/{}/", b["id"]);

    let res = app.authed(Method::PATCH, &uri, Some(json!({"email": "A@example.com"}))).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "DUPLICATE_EMAIL");

    // Keeping its own email is fine
    let res = app
        .authed(Method::PUT, &uri, Some(json!({"name": "B2", "email": "B@example.com"})))
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn update_missing_employee_is_not_found() -> Result<()> {
    let app = TestApp::spawn().await?;
    let res = app
        .authed(Method::PUT, "/api/employees/42/", Some(json!({"name": "X", "email": "x@example.com"})))
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_then_retrieve_is_not_found() -> Result<()> {
    let app = TestApp::spawn().await?;
    let created = app.create_employee(json!({"name": "Gone", "email": "gone@example.com"})).await?;
    let uri = format!("/api/employees/{}/", created["id"]);

    let res = app.authed(Method::DELETE, &uri, None).await?;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert!(res.body.is_null());

    let res = app.authed(Method::GET, &uri, None).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app.authed(Method::DELETE, &uri, None).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app.authed(Method::DELETE, "/api/employees/9999/", None).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn record_routes_require_a_token() -> Result<()> {
    let app = TestApp::spawn().await?;
    let created = app.create_employee(json!({"name": "Jane", "email": "jane@example.com"})).await?;
    let uri = format!("/api/employees/{}/", created["id"]);

    for method in [Method::GET, Method::PUT, Method::PATCH, Method::DELETE] {
        let res = app.request(method.clone(), &uri, None, None).await?;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "{method}");
    }

    // Still there
    let res = app.authed(Method::GET, &uri, None).await?;
    assert_eq!(res.status, StatusCode::OK);
    Ok(())
}
