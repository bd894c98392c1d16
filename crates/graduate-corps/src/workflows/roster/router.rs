use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{RawRow, ZoneId};
use super::importer::RosterCsvImporter;
use super::ingest::RosterIngestion;
use super::repository::RosterRepository;

/// Payload for the upload ingress: rows already parsed by the collaborator,
/// or a CSV document for the importer to decode. Both may be supplied; the
/// decoded rows are appended after the parsed ones.
#[derive(Debug, Deserialize)]
pub struct RosterUploadRequest {
    #[serde(default)]
    pub rows: Vec<RawRow>,
    #[serde(default)]
    pub csv: Option<String>,
}

/// Router builder exposing the zone roster upload endpoint.
pub fn roster_router<R>(ingestion: Arc<RosterIngestion<R>>) -> Router
where
    R: RosterRepository + 'static,
{
    Router::new()
        .route("/api/v1/zones/:zone_id/roster", post(upload_handler::<R>))
        .with_state(ingestion)
}

pub(crate) async fn upload_handler<R>(
    State(ingestion): State<Arc<RosterIngestion<R>>>,
    Path(zone_id): Path<String>,
    axum::Json(payload): axum::Json<RosterUploadRequest>,
) -> Response
where
    R: RosterRepository + 'static,
{
    let zone_id = ZoneId(zone_id);
    let mut rows = payload.rows;

    if let Some(csv) = payload.csv {
        match RosterCsvImporter::from_reader(Cursor::new(csv.into_bytes())) {
            Ok(mut decoded) => rows.append(&mut decoded),
            Err(error) => {
                let payload = json!({ "error": error.to_string() });
                return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
            }
        }
    }

    match ingestion.ingest(&zone_id, rows) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
