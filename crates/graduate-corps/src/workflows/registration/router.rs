use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::{DepartmentId, GraduateId, RegistrationForm};
use super::repository::{FulfillmentLedger, FulfillmentLedgerError, ProfileRepository, ProfileRepositoryError};
use super::service::{
    DepartmentAssignment, RegistrationError, RegistrationService, StatusChange,
};
use super::status::{ApplicationStatus, StatusError};
use crate::workflows::roster::domain::{RosterMatchView, RosterRow, RosterRowId};
use crate::workflows::roster::repository::{RosterQuery, RosterRepository, RosterRepositoryError};
use crate::workflows::staffing::domain::StaffRequestId;

/// Registration endpoint payload: the claimed row plus the full form.
#[derive(Debug, Deserialize)]
pub struct RegistrationRequest {
    pub roster_row_id: RosterRowId,
    pub form: RegistrationForm,
}

/// Office payload for the status transition endpoint.
#[derive(Debug, Deserialize)]
pub struct StatusChangeRequest {
    pub target_status: ApplicationStatus,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    #[serde(default)]
    pub staff_request_id: Option<StaffRequestId>,
    #[serde(default)]
    pub effective_on: Option<NaiveDate>,
}

/// Router builder exposing claim search, registration, and review
/// endpoints.
pub fn registration_router<R, P, F>(service: Arc<RegistrationService<R, P, F>>) -> Router
where
    R: RosterRepository + 'static,
    P: ProfileRepository + 'static,
    F: FulfillmentLedger + 'static,
{
    Router::new()
        .route("/api/v1/roster/search", post(search_handler::<R, P, F>))
        .route("/api/v1/registrations", post(register_handler::<R, P, F>))
        .route(
            "/api/v1/graduates/:graduate_id",
            get(graduate_handler::<R, P, F>),
        )
        .route(
            "/api/v1/graduates/:graduate_id/status",
            post(status_handler::<R, P, F>),
        )
        .with_state(service)
}

pub(crate) async fn search_handler<R, P, F>(
    State(service): State<Arc<RegistrationService<R, P, F>>>,
    axum::Json(query): axum::Json<RosterQuery>,
) -> Response
where
    R: RosterRepository + 'static,
    P: ProfileRepository + 'static,
    F: FulfillmentLedger + 'static,
{
    match service.search(&query) {
        Ok(rows) => {
            let matches: Vec<RosterMatchView> = rows.iter().map(RosterRow::match_view).collect();
            (StatusCode::OK, axum::Json(json!({ "matches": matches }))).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn register_handler<R, P, F>(
    State(service): State<Arc<RegistrationService<R, P, F>>>,
    axum::Json(payload): axum::Json<RegistrationRequest>,
) -> Response
where
    R: RosterRepository + 'static,
    P: ProfileRepository + 'static,
    F: FulfillmentLedger + 'static,
{
    match service.register(&payload.roster_row_id, payload.form) {
        Ok(profile) => {
            let view = profile.status_view(Local::now().date_naive());
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(RegistrationError::Validation { errors }) => {
            let payload = json!({ "errors": errors });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(RegistrationError::Roster(RosterRepositoryError::AlreadyClaimed)) => {
            let payload = json!({ "error": "this record has already been claimed" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(RegistrationError::Roster(RosterRepositoryError::NotFound)) => {
            let payload = json!({ "error": "roster row not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn graduate_handler<R, P, F>(
    State(service): State<Arc<RegistrationService<R, P, F>>>,
    Path(graduate_id): Path<String>,
) -> Response
where
    R: RosterRepository + 'static,
    P: ProfileRepository + 'static,
    F: FulfillmentLedger + 'static,
{
    let id = GraduateId(graduate_id);
    match service.get(&id) {
        Ok(profile) => {
            let view = profile.status_view(Local::now().date_naive());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(RegistrationError::Profile(ProfileRepositoryError::NotFound)) => {
            let payload = json!({ "error": "graduate profile not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn status_handler<R, P, F>(
    State(service): State<Arc<RegistrationService<R, P, F>>>,
    Path(graduate_id): Path<String>,
    axum::Json(payload): axum::Json<StatusChangeRequest>,
) -> Response
where
    R: RosterRepository + 'static,
    P: ProfileRepository + 'static,
    F: FulfillmentLedger + 'static,
{
    let id = GraduateId(graduate_id);
    let StatusChangeRequest {
        target_status,
        department_id,
        staff_request_id,
        effective_on,
    } = payload;

    let change = StatusChange {
        target: target_status,
        assignment: department_id.map(|department_id| DepartmentAssignment {
            department_id,
            staff_request_id,
        }),
        effective_on: effective_on.unwrap_or_else(|| Local::now().date_naive()),
    };

    match service.transition(&id, change) {
        Ok(profile) => {
            let view = profile.status_view(Local::now().date_naive());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(RegistrationError::Status(error @ StatusError::InvalidTransition { .. })) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(RegistrationError::Status(error @ StatusError::DepartmentNotAssigned)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(RegistrationError::Profile(ProfileRepositoryError::NotFound)) => {
            let payload = json!({ "error": "graduate profile not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(RegistrationError::Fulfillment(
            error @ (FulfillmentLedgerError::Overfulfilled | FulfillmentLedgerError::Refused(_)),
        )) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(RegistrationError::Fulfillment(FulfillmentLedgerError::RequestNotFound)) => {
            let payload = json!({ "error": "staff request not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

fn internal_error(error: RegistrationError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
