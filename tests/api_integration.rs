//! End-to-end tests over the assembled router: auth flows, CRUD round
//! trips, filters, and partial-update semantics.

use apptrack_backend::{
    applications::{AppState, ApplicationStore},
    auth::{AdminCredentials, AuthState, JwtHandler},
    router::create_router,
};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::ServiceExt;

const TEST_EMAIL: &str = "admin@test.dev";
const TEST_PASSWORD: &str = "Secret@123";
const TEST_SECRET: &str = "integration-test-secret";

struct TestApp {
    router: Router,
    _db: NamedTempFile,
}

fn spawn_app() -> TestApp {
    let db = NamedTempFile::new().unwrap();
    let store = Arc::new(ApplicationStore::new(db.path().to_str().unwrap()).unwrap());

    let credentials = AdminCredentials {
        email: TEST_EMAIL.to_string(),
        password: TEST_PASSWORD.to_string(),
    };
    let jwt_handler = Arc::new(JwtHandler::new(
        TEST_SECRET.to_string(),
        120,
        credentials.email.clone(),
    ));

    let router = create_router(
        AppState { store },
        AuthState::new(credentials, jwt_handler.clone()),
        jwt_handler,
    );

    TestApp { router, _db: db }
}

async fn send(app: &TestApp, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.router.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn login(app: &TestApp) -> String {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": TEST_EMAIL, "password": TEST_PASSWORD })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    body["access_token"].as_str().unwrap().to_string()
}

async fn create_application(app: &TestApp, token: &str, body: Value) -> Value {
    let (status, created) = send(
        app,
        json_request("POST", "/api/applications/", Some(token), Some(body)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    created
}

#[tokio::test]
async fn health_is_public() {
    let app = spawn_app();

    let (status, body) = send(&app, json_request("GET", "/health", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn login_issues_usable_token() {
    let app = spawn_app();
    let token = login(&app).await;

    let (status, body) = send(
        &app,
        json_request("GET", "/api/applications/", Some(&token), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn login_with_bad_credentials_rejected() {
    let app = spawn_app();

    for payload in [
        json!({ "email": TEST_EMAIL, "password": "wrong" }),
        json!({ "email": "other@test.dev", "password": TEST_PASSWORD }),
        json!({ "email": "other@test.dev", "password": "wrong" }),
    ] {
        let (status, _) = send(
            &app,
            json_request("POST", "/api/auth/login", None, Some(payload)),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn protected_routes_require_token() {
    let app = spawn_app();

    let (status, _) = send(&app, json_request("GET", "/api/applications/", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        json_request("GET", "/api/applications/", Some("not.a.real.token"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_other_secret_rejected() {
    let app = spawn_app();

    let forger = JwtHandler::new("different-secret".to_string(), 120, TEST_EMAIL.to_string());
    let forged = forger.issue_token().unwrap();

    let (status, _) = send(
        &app,
        json_request("GET", "/api/applications/", Some(&forged), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_for_other_identity_rejected() {
    let app = spawn_app();

    // Right secret, wrong subject: structurally valid, still refused
    let other = JwtHandler::new(
        TEST_SECRET.to_string(),
        120,
        "intruder@test.dev".to_string(),
    );
    let token = other.issue_token().unwrap();

    let (status, _) = send(
        &app,
        json_request("GET", "/api/applications/", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_defaults_status_and_lists_newest_first() {
    let app = spawn_app();
    let token = login(&app).await;

    let first = create_application(
        &app,
        &token,
        json!({ "company": "Acme", "role": "Engineer" }),
    )
    .await;
    assert_eq!(first["status"], "Applied");
    assert!(first["id"].as_i64().unwrap() > 0);

    let second = create_application(
        &app,
        &token,
        json!({ "company": "Globex", "role": "Analyst", "status": "Interviewing" }),
    )
    .await;

    let (status, body) = send(
        &app,
        json_request("GET", "/api/applications/", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let apps = body.as_array().unwrap();
    assert_eq!(apps.len(), 2);
    assert_eq!(apps[0]["id"], second["id"]);
    assert_eq!(apps[1]["id"], first["id"]);
}

#[tokio::test]
async fn create_without_required_fields_rejected() {
    let app = spawn_app();
    let token = login(&app).await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/applications/",
            Some(&token),
            Some(json!({ "company": "Acme" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn list_filters_by_status_and_company() {
    let app = spawn_app();
    let token = login(&app).await;

    create_application(
        &app,
        &token,
        json!({ "company": "Acme", "role": "Engineer" }),
    )
    .await;
    create_application(
        &app,
        &token,
        json!({ "company": "Initech", "role": "Analyst", "status": "Interviewing" }),
    )
    .await;

    // Case-insensitive substring on company
    let (status, body) = send(
        &app,
        json_request("GET", "/api/applications/?company=cme", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let apps = body.as_array().unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0]["company"], "Acme");

    // Exact status match
    let (status, body) = send(
        &app,
        json_request(
            "GET",
            "/api/applications/?status=Applied",
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let apps = body.as_array().unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0]["status"], "Applied");

    // AND combination with no matches
    let (status, body) = send(
        &app,
        json_request(
            "GET",
            "/api/applications/?status=Interviewing&company=acme",
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn empty_filter_values_are_treated_as_absent() {
    let app = spawn_app();
    let token = login(&app).await;

    create_application(
        &app,
        &token,
        json!({ "company": "Acme", "role": "Engineer" }),
    )
    .await;

    // ?status= and ?company= must behave like no filter at all, not
    // like a filter that matches the empty string
    for uri in [
        "/api/applications/?status=",
        "/api/applications/?company=",
        "/api/applications/?status=&company=",
    ] {
        let (status, body) = send(&app, json_request("GET", uri, Some(&token), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1, "uri: {}", uri);
    }
}

#[tokio::test]
async fn patch_changes_only_named_fields() {
    let app = spawn_app();
    let token = login(&app).await;

    let created = create_application(
        &app,
        &token,
        json!({ "company": "Acme", "role": "Engineer", "location": "Remote" }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/applications/{}", id),
            Some(&token),
            Some(json!({ "status": "Interviewing" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Interviewing");
    assert_eq!(updated["company"], "Acme");
    assert_eq!(updated["role"], "Engineer");
    assert_eq!(updated["location"], "Remote");
}

#[tokio::test]
async fn patch_with_explicit_null_clears_field() {
    let app = spawn_app();
    let token = login(&app).await;

    let created = create_application(
        &app,
        &token,
        json!({ "company": "Acme", "role": "Engineer", "location": "Remote" }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/applications/{}", id),
            Some(&token),
            Some(json!({ "location": null })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["location"], Value::Null);
    // Omitted field untouched
    assert_eq!(updated["company"], "Acme");
}

#[tokio::test]
async fn patch_missing_id_is_not_found() {
    let app = spawn_app();
    let token = login(&app).await;

    let (status, body) = send(
        &app,
        json_request(
            "PATCH",
            "/api/applications/9999",
            Some(&token),
            Some(json!({ "status": "Interviewing" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Application not found");
}

#[tokio::test]
async fn delete_twice_returns_not_found_second_time() {
    let app = spawn_app();
    let token = login(&app).await;

    let created = create_application(
        &app,
        &token,
        json!({ "company": "Acme", "role": "Engineer" }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let uri = format!("/api/applications/{}", id);

    let (status, body) = send(&app, json_request("DELETE", &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], true);

    let (status, _) = send(&app, json_request("DELETE", &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn collection_route_works_without_trailing_slash() {
    let app = spawn_app();
    let token = login(&app).await;

    let (status, _) = send(
        &app,
        json_request("GET", "/api/applications", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
