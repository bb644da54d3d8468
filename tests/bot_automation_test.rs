use std::env;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use hirenow_backend::storage::{MemStore, Storage};
use hirenow_backend::AppState;

async fn init() -> Router {
    dotenvy::dotenv().ok();
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("JWT_SECRET", "test_secret_key");
    hirenow_backend::config::init_config().ok();

    let store: Arc<dyn Storage> = Arc::new(MemStore::new());
    let state = AppState::new(store);
    state.user_service.seed_users().await.unwrap();
    hirenow_backend::routes::api_router(state.clone()).with_state(state)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let value = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn login(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn automation_progresses_a_half_matching_application() {
    let app = init().await;
    let applicant = login(&app, "applicant@example.com").await;
    let admin = login(&app, "admin@example.com").await;
    let bot = login(&app, "bot@example.com").await;

    let (status, job) = send(
        &app,
        "POST",
        "/api/jobs",
        Some(&admin),
        Some(json!({
            "title": "Full-Stack Developer",
            "company": "Acme",
            "type": "Technical",
            "requiredSkills": ["React", "Node.js"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, application) = send(
        &app,
        "POST",
        "/api/applications/detailed",
        Some(&applicant),
        Some(json!({
            "jobId": job["id"],
            "name": "John Applicant",
            "email": "applicant@example.com",
            "havingSkills": ["React"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Only the bot may trigger the batch.
    let (status, _) = send(&app, "POST", "/api/bot/automate", Some(&admin), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // 1/2 required skills matched: exactly at the 50% threshold.
    let (status, outcome) = send(&app, "POST", "/api/bot/automate", Some(&bot), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["message"], "Processed 1 applications");
    assert_eq!(outcome["errors"], json!([]));
    assert_eq!(outcome["processed"][0]["status"], "Reviewed");

    let activities_uri = format!("/api/applications/{}/activities", application["id"]);
    let (_, activities) = send(&app, "GET", &activities_uri, Some(&bot), None).await;
    let row = &activities[0];
    assert_eq!(row["isAutomated"], true);
    assert_eq!(row["previousStatus"], "Applied");
    assert_eq!(row["newStatus"], "Reviewed");
    let comment = row["comment"].as_str().unwrap();
    assert!(comment.contains("50%"), "comment was: {}", comment);
    assert!(comment.contains("1/2"), "comment was: {}", comment);

    // Each further run advances one stage, then the terminal state is left
    // alone.
    let (_, outcome) = send(&app, "POST", "/api/bot/automate", Some(&bot), None).await;
    assert_eq!(outcome["processed"][0]["status"], "Interview");
    let (_, outcome) = send(&app, "POST", "/api/bot/automate", Some(&bot), None).await;
    assert_eq!(outcome["processed"][0]["status"], "Offer");
    let (_, outcome) = send(&app, "POST", "/api/bot/automate", Some(&bot), None).await;
    assert_eq!(outcome["message"], "Processed 0 applications");

    let (_, activities) = send(&app, "GET", &activities_uri, Some(&bot), None).await;
    // Submission + three automated transitions; the idle fourth run added
    // nothing.
    assert_eq!(activities.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn automation_holds_and_audits_below_threshold_applications() {
    let app = init().await;
    let applicant = login(&app, "applicant@example.com").await;
    let admin = login(&app, "admin@example.com").await;
    let bot = login(&app, "bot@example.com").await;

    let (_, job) = send(
        &app,
        "POST",
        "/api/jobs",
        Some(&admin),
        Some(json!({
            "title": "Platform Engineer",
            "company": "Acme",
            "type": "Technical",
            "requiredSkills": ["Go", "Kubernetes", "Terraform"],
        })),
    )
    .await;

    let (_, application) = send(
        &app,
        "POST",
        "/api/applications/detailed",
        Some(&applicant),
        Some(json!({
            "jobId": job["id"],
            "name": "John Applicant",
            "email": "applicant@example.com",
            "havingSkills": ["Go"],
        })),
    )
    .await;

    // 1/3 matched is below the 50% gate: the application is held, but the
    // deliberation still lands in the audit trail.
    let (status, outcome) = send(&app, "POST", "/api/bot/automate", Some(&bot), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["message"], "Processed 0 applications");

    let app_uri = format!("/api/applications/{}", application["id"]);
    let (_, details) = send(&app, "GET", &app_uri, Some(&bot), None).await;
    assert_eq!(details["status"], "Applied");

    let activities_uri = format!("/api/applications/{}/activities", application["id"]);
    let (_, activities) = send(&app, "GET", &activities_uri, Some(&bot), None).await;
    let row = &activities[0];
    assert_eq!(row["isAutomated"], true);
    assert_eq!(row["previousStatus"], "Applied");
    assert_eq!(row["newStatus"], "Applied");
    let comment = row["comment"].as_str().unwrap();
    assert!(
        comment.contains("Below 50% threshold"),
        "comment was: {}",
        comment
    );
}
