use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use graduate_corps::workflows::registration::repository::ProfileRepository;
use graduate_corps::workflows::registration::router::registration_router;
use graduate_corps::workflows::registration::service::RegistrationService;
use graduate_corps::workflows::roster::ingest::RosterIngestion;
use graduate_corps::workflows::roster::repository::RosterRepository;
use graduate_corps::workflows::roster::router::roster_router;
use graduate_corps::workflows::staffing::repository::StaffRequestRepository;
use graduate_corps::workflows::staffing::router::staffing_router;
use graduate_corps::workflows::staffing::service::StaffingService;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_portal_routes<R, P, S>(
    ingestion: Arc<RosterIngestion<R>>,
    registration: Arc<RegistrationService<R, P, StaffingService<S>>>,
    staffing: Arc<StaffingService<S>>,
) -> axum::Router
where
    R: RosterRepository + 'static,
    P: ProfileRepository + 'static,
    S: StaffRequestRepository + 'static,
{
    roster_router(ingestion)
        .merge(registration_router(registration))
        .merge(staffing_router(staffing))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
