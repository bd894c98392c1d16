use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::domain::{columns, ChapterPastor, Gender, RawRow, RosterRow, RosterRowId, ZoneId};
use super::repository::{RosterRepository, RosterRepositoryError};
use super::validator::{validate_row, GENDER_RULE};

static ROW_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_row_id() -> RosterRowId {
    let id = ROW_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RosterRowId(format!("row-{id:06}"))
}

/// Coordinator running the row validator over an uploaded batch and
/// persisting the rows that pass.
///
/// Ingestion is partial-success by design: a bad row is reported, not
/// thrown, and never blocks its neighbors. Only store-level failures
/// propagate as errors. Repeated uploads are not deduplicated here; that
/// policy belongs to the office workflow, surfaced through claim search.
pub struct RosterIngestion<R> {
    repository: Arc<R>,
}

/// One row that failed validation, reported with its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    pub row_index: usize,
    pub errors: Vec<String>,
}

/// Counts that must always reconcile: `accepted + rejected == total_rows`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestionSummary {
    pub total_rows: usize,
    pub accepted: usize,
    pub rejected: usize,
}

/// Full outcome of one batch upload.
#[derive(Debug, Clone, Serialize)]
pub struct IngestionReport {
    pub accepted: Vec<RosterRow>,
    pub rejected: Vec<RejectedRow>,
    pub summary: IngestionSummary,
}

impl<R> RosterIngestion<R>
where
    R: RosterRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Ingest one uploaded batch for a zone.
    pub fn ingest(
        &self,
        zone_id: &ZoneId,
        rows: Vec<RawRow>,
    ) -> Result<IngestionReport, RosterRepositoryError> {
        let total_rows = rows.len();
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();

        for (index, raw) in rows.into_iter().enumerate() {
            let row_index = index + 1;
            let validation = validate_row(&raw);
            if !validation.is_valid() {
                rejected.push(RejectedRow {
                    row_index,
                    errors: validation.errors,
                });
                continue;
            }

            let gender = match Gender::parse(cell(&raw, columns::GENDER).as_str()) {
                Some(gender) => gender,
                None => {
                    rejected.push(RejectedRow {
                        row_index,
                        errors: vec![GENDER_RULE.to_string()],
                    });
                    continue;
                }
            };

            let row = RosterRow {
                id: next_row_id(),
                zone_id: zone_id.clone(),
                first_name: cell(&raw, columns::FIRST_NAME),
                surname: cell(&raw, columns::SURNAME),
                gender,
                phone_number: cell(&raw, columns::PHONE_NUMBER),
                university: cell(&raw, columns::UNIVERSITY),
                course: cell(&raw, columns::COURSE),
                graduation_year: cell(&raw, columns::GRADUATION_YEAR),
                fellowship: cell(&raw, columns::FELLOWSHIP),
                zonal_pastor: cell(&raw, columns::ZONAL_PASTOR),
                chapter_pastor: ChapterPastor {
                    name: cell(&raw, columns::CHAPTER_PASTOR_NAME),
                    phone_number: cell(&raw, columns::CHAPTER_PASTOR_PHONE),
                    email: cell(&raw, columns::CHAPTER_PASTOR_EMAIL),
                },
                claimed: false,
                claimed_at: None,
            };

            let stored = self.repository.insert(row)?;
            accepted.push(stored);
        }

        let summary = IngestionSummary {
            total_rows,
            accepted: accepted.len(),
            rejected: rejected.len(),
        };

        info!(
            zone = %zone_id.0,
            total = summary.total_rows,
            accepted = summary.accepted,
            rejected = summary.rejected,
            "roster batch ingested"
        );

        Ok(IngestionReport {
            accepted,
            rejected,
            summary,
        })
    }
}

fn cell(raw: &RawRow, name: &str) -> String {
    raw.get(name)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}
