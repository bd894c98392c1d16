use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::registration::router::registration_router;
use crate::workflows::registration::status::ApplicationStatus;

fn build_router() -> (axum::Router, Arc<MemoryRoster>) {
    let (service, roster, _, _) = build_service();
    (registration_router(Arc::new(service)), roster)
}

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn json_request(method: &str, uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(payload).expect("serialize")))
        .expect("request")
}

#[tokio::test]
async fn register_endpoint_creates_profile() {
    let (router, roster) = build_router();
    let row = sample_row("row-000301");
    roster.seed(row.clone());

    let payload = json!({
        "roster_row_id": row.id.0,
        "form": registration_form(),
    });
    let response = router
        .clone()
        .oneshot(json_request("POST", "/api/v1/registrations", &payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert!(body.get("graduate_id").is_some());
    assert_eq!(
        body.get("status").and_then(Value::as_str),
        Some(ApplicationStatus::UnderReview.label()),
    );
    assert_eq!(
        body.get("service_progress_percent").and_then(Value::as_u64),
        Some(0),
    );
}

#[tokio::test]
async fn register_endpoint_lists_all_form_violations() {
    let (router, roster) = build_router();
    let row = sample_row("row-000302");
    roster.seed(row.clone());

    let mut form = registration_form();
    form.personal.email = "broken".to_string();
    form.credentials.password = "short".to_string();
    form.credentials.confirm_password = "short".to_string();

    let payload = json!({ "roster_row_id": row.id.0, "form": form });
    let response = router
        .clone()
        .oneshot(json_request("POST", "/api/v1/registrations", &payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    let errors = body
        .get("errors")
        .and_then(Value::as_array)
        .expect("errors array");
    assert_eq!(errors.len(), 2);
}

#[tokio::test]
async fn register_endpoint_reports_taken_records() {
    let (router, roster) = build_router();
    let row = sample_row("row-000303");
    roster.seed(row.clone());

    let payload = json!({ "roster_row_id": row.id.0, "form": registration_form() });
    let first = router
        .clone()
        .oneshot(json_request("POST", "/api/v1/registrations", &payload))
        .await
        .expect("router dispatch");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = router
        .clone()
        .oneshot(json_request("POST", "/api/v1/registrations", &payload))
        .await
        .expect("router dispatch");
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn register_endpoint_404s_unknown_rows() {
    let (router, _) = build_router();

    let payload = json!({ "roster_row_id": "row-missing", "form": registration_form() });
    let response = router
        .clone()
        .oneshot(json_request("POST", "/api/v1/registrations", &payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_endpoint_returns_claimed_indicator() {
    let (router, roster) = build_router();
    let row = sample_row("row-000304");
    roster.seed(row.clone());

    let payload = serde_json::to_value(query_for(&row)).expect("serialize query");
    let response = router
        .clone()
        .oneshot(json_request("POST", "/api/v1/roster/search", &payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let matches = body
        .get("matches")
        .and_then(Value::as_array)
        .expect("matches array");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].get("claimed"), Some(&json!(false)));
    assert!(
        matches[0].get("chapter_pastor").is_none(),
        "pastoral contacts stay off the public search"
    );
}

#[tokio::test]
async fn search_endpoint_returns_empty_matches_not_an_error() {
    let (router, _) = build_router();

    let payload = json!({
        "zone_id": "zone-lagos-1",
        "surname": "Nobody",
        "gender": "FEMALE",
        "phone_number": "+2340000000000",
    });
    let response = router
        .clone()
        .oneshot(json_request("POST", "/api/v1/roster/search", &payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body.get("matches"), Some(&json!([])));
}

#[tokio::test]
async fn status_endpoint_rejects_invalid_transitions() {
    let (router, roster) = build_router();
    let row = sample_row("row-000305");
    roster.seed(row.clone());

    let payload = json!({ "roster_row_id": row.id.0, "form": registration_form() });
    let created = router
        .clone()
        .oneshot(json_request("POST", "/api/v1/registrations", &payload))
        .await
        .expect("router dispatch");
    let graduate_id = read_json_body(created)
        .await
        .get("graduate_id")
        .and_then(Value::as_str)
        .expect("graduate id")
        .to_string();

    let change = json!({ "target_status": "serving" });
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/graduates/{graduate_id}/status"),
            &change,
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = read_json_body(response).await;
    let message = body
        .get("error")
        .and_then(Value::as_str)
        .expect("error message");
    assert!(message.contains("Under Review"));
    assert!(message.contains("Serving"));
}

#[tokio::test]
async fn status_endpoint_advances_the_pipeline() {
    let (router, roster) = build_router();
    let row = sample_row("row-000306");
    roster.seed(row.clone());

    let payload = json!({ "roster_row_id": row.id.0, "form": registration_form() });
    let created = router
        .clone()
        .oneshot(json_request("POST", "/api/v1/registrations", &payload))
        .await
        .expect("router dispatch");
    let graduate_id = read_json_body(created)
        .await
        .get("graduate_id")
        .and_then(Value::as_str)
        .expect("graduate id")
        .to_string();

    let change = json!({ "target_status": "invited_for_interview" });
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/graduates/{graduate_id}/status"),
            &change,
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(
        body.get("status").and_then(Value::as_str),
        Some(ApplicationStatus::InvitedForInterview.label()),
    );
}
