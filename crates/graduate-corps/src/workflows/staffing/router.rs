use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{StaffRequest, StaffRequestDraft, StaffRequestId, StaffRequestStatus};
use super::repository::{StaffRequestRepository, StaffRequestRepositoryError};
use super::service::{StaffingError, StaffingService};

/// Router builder exposing staff request endpoints for departments and the
/// office dashboard.
pub fn staffing_router<S>(service: Arc<StaffingService<S>>) -> Router
where
    S: StaffRequestRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/staff-requests",
            post(create_handler::<S>).get(list_handler::<S>),
        )
        .route(
            "/api/v1/staff-requests/status/:status",
            get(filtered_handler::<S>),
        )
        .route(
            "/api/v1/staff-requests/:request_id",
            get(fetch_handler::<S>),
        )
        .route(
            "/api/v1/staff-requests/:request_id/fulfillment",
            post(increment_handler::<S>),
        )
        .route(
            "/api/v1/staff-requests/:request_id/release",
            post(release_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn create_handler<S>(
    State(service): State<Arc<StaffingService<S>>>,
    axum::Json(draft): axum::Json<StaffRequestDraft>,
) -> Response
where
    S: StaffRequestRepository + 'static,
{
    match service.create(draft) {
        Ok(request) => (StatusCode::CREATED, axum::Json(request.status_view())).into_response(),
        Err(error @ StaffingError::EmptyHeadcount) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn list_handler<S>(
    State(service): State<Arc<StaffingService<S>>>,
) -> Response
where
    S: StaffRequestRepository + 'static,
{
    match service.list(None) {
        Ok(requests) => list_response(requests),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn filtered_handler<S>(
    State(service): State<Arc<StaffingService<S>>>,
    Path(status): Path<String>,
) -> Response
where
    S: StaffRequestRepository + 'static,
{
    let Some(status) = StaffRequestStatus::parse(&status) else {
        let payload = json!({ "error": format!("unknown staff request status '{status}'") });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    };

    match service.list(Some(status)) {
        Ok(requests) => list_response(requests),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn fetch_handler<S>(
    State(service): State<Arc<StaffingService<S>>>,
    Path(request_id): Path<String>,
) -> Response
where
    S: StaffRequestRepository + 'static,
{
    let id = StaffRequestId(request_id);
    match service.get(&id) {
        Ok(request) => (StatusCode::OK, axum::Json(request.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn increment_handler<S>(
    State(service): State<Arc<StaffingService<S>>>,
    Path(request_id): Path<String>,
) -> Response
where
    S: StaffRequestRepository + 'static,
{
    let id = StaffRequestId(request_id);
    match service.increment_fulfillment(&id) {
        Ok(request) => (StatusCode::OK, axum::Json(request.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn release_handler<S>(
    State(service): State<Arc<StaffingService<S>>>,
    Path(request_id): Path<String>,
) -> Response
where
    S: StaffRequestRepository + 'static,
{
    let id = StaffRequestId(request_id);
    match service.release_fulfillment(&id) {
        Ok(request) => (StatusCode::OK, axum::Json(request.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

fn list_response(requests: Vec<StaffRequest>) -> Response {
    let views: Vec<_> = requests
        .iter()
        .map(StaffRequest::status_view)
        .collect();
    (StatusCode::OK, axum::Json(json!({ "requests": views }))).into_response()
}

fn error_response(error: StaffingError) -> Response {
    let status = match &error {
        StaffingError::Overfulfilled { .. }
        | StaffingError::NothingToRelease
        | StaffingError::RequestClosed { .. } => StatusCode::CONFLICT,
        StaffingError::EmptyHeadcount | StaffingError::DerivedStatus => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        StaffingError::Repository(StaffRequestRepositoryError::NotFound) => StatusCode::NOT_FOUND,
        StaffingError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

fn internal_error(error: StaffingError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
