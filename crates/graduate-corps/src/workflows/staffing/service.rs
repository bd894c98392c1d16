use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{
    StaffRequest, StaffRequestDraft, StaffRequestId, StaffRequestStatus,
};
use super::repository::{StaffRequestRepository, StaffRequestRepositoryError};
use crate::workflows::registration::repository::{FulfillmentLedger, FulfillmentLedgerError};

static REQUEST_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_request_id() -> StaffRequestId {
    let id = REQUEST_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    StaffRequestId(format!("req-{id:06}"))
}

/// Service owning staff request intake, the office review dial, and the
/// fulfillment counter.
pub struct StaffingService<S> {
    repository: Arc<S>,
}

impl<S> StaffingService<S>
where
    S: StaffRequestRepository + 'static,
{
    pub fn new(repository: Arc<S>) -> Self {
        Self { repository }
    }

    /// Open a new request; it starts Pending with nothing fulfilled.
    pub fn create(&self, draft: StaffRequestDraft) -> Result<StaffRequest, StaffingError> {
        if draft.number_of_staff == 0 {
            return Err(StaffingError::EmptyHeadcount);
        }

        let request = StaffRequest {
            id: next_request_id(),
            department_id: draft.department_id,
            position: draft.position,
            description: draft.description,
            number_of_staff: draft.number_of_staff,
            urgency: draft.urgency,
            gender_preference: draft.gender_preference,
            status: StaffRequestStatus::Pending,
            fulfilled_count: 0,
            requested_at: Utc::now(),
        };

        let stored = self.repository.insert(request)?;
        info!(
            request = %stored.id.0,
            department = %stored.department_id.0,
            headcount = stored.number_of_staff,
            "staff request opened"
        );
        Ok(stored)
    }

    pub fn get(&self, id: &StaffRequestId) -> Result<StaffRequest, StaffingError> {
        let request = self
            .repository
            .fetch(id)?
            .ok_or(StaffRequestRepositoryError::NotFound)?;
        Ok(request)
    }

    pub fn list(
        &self,
        status: Option<StaffRequestStatus>,
    ) -> Result<Vec<StaffRequest>, StaffingError> {
        Ok(self.repository.list(status)?)
    }

    /// Office dial over the review states. `Fulfilled` is derived from the
    /// counter and refused here.
    pub fn set_review_status(
        &self,
        id: &StaffRequestId,
        status: StaffRequestStatus,
    ) -> Result<StaffRequest, StaffingError> {
        if status == StaffRequestStatus::Fulfilled {
            return Err(StaffingError::DerivedStatus);
        }

        let mut request = self.get(id)?;
        request.status = status;
        self.repository.update(request.clone())?;
        Ok(request)
    }

    /// Record one assignment against the request. Exactly one; reaching the
    /// requested total flips the status to `Fulfilled`.
    pub fn increment_fulfillment(
        &self,
        id: &StaffRequestId,
    ) -> Result<StaffRequest, StaffingError> {
        let mut request = self.get(id)?;

        if matches!(
            request.status,
            StaffRequestStatus::Rejected | StaffRequestStatus::Cancelled
        ) {
            return Err(StaffingError::RequestClosed {
                status: request.status,
            });
        }
        if request.fulfilled_count == request.number_of_staff {
            return Err(StaffingError::Overfulfilled {
                requested: request.number_of_staff,
            });
        }

        request.fulfilled_count += 1;
        if request.is_fully_staffed() {
            request.status = StaffRequestStatus::Fulfilled;
        }
        self.repository.update(request.clone())?;

        info!(
            request = %request.id.0,
            fulfilled = request.fulfilled_count,
            requested = request.number_of_staff,
            "staff request fulfillment recorded"
        );
        Ok(request)
    }

    /// Explicit decrement for a graduate leaving an assignment; the counter
    /// never goes below zero. Leaving the full mark reverts `Fulfilled` to
    /// `Approved`.
    pub fn release_fulfillment(
        &self,
        id: &StaffRequestId,
    ) -> Result<StaffRequest, StaffingError> {
        let mut request = self.get(id)?;

        if request.fulfilled_count == 0 {
            return Err(StaffingError::NothingToRelease);
        }

        let was_full = request.is_fully_staffed();
        request.fulfilled_count -= 1;
        if was_full && request.status == StaffRequestStatus::Fulfilled {
            request.status = StaffRequestStatus::Approved;
        }
        self.repository.update(request.clone())?;

        info!(
            request = %request.id.0,
            fulfilled = request.fulfilled_count,
            requested = request.number_of_staff,
            "staff request fulfillment released"
        );
        Ok(request)
    }
}

impl<S> FulfillmentLedger for StaffingService<S>
where
    S: StaffRequestRepository + 'static,
{
    fn record_assignment(
        &self,
        request_id: &StaffRequestId,
    ) -> Result<(), FulfillmentLedgerError> {
        self.increment_fulfillment(request_id)
            .map(|_| ())
            .map_err(|error| match error {
                StaffingError::Overfulfilled { .. } => FulfillmentLedgerError::Overfulfilled,
                StaffingError::Repository(StaffRequestRepositoryError::NotFound) => {
                    FulfillmentLedgerError::RequestNotFound
                }
                StaffingError::RequestClosed { .. } => {
                    FulfillmentLedgerError::Refused(error.to_string())
                }
                other => FulfillmentLedgerError::Unavailable(other.to_string()),
            })
    }
}

/// Error raised by the staffing service.
#[derive(Debug, thiserror::Error)]
pub enum StaffingError {
    #[error("number of staff must be at least one")]
    EmptyHeadcount,
    #[error("staff request already fulfilled ({requested} of {requested} filled)")]
    Overfulfilled { requested: u32 },
    #[error("no recorded fulfillment to release")]
    NothingToRelease,
    #[error("request is {}; assignments are only recorded against open requests", .status.label())]
    RequestClosed { status: StaffRequestStatus },
    #[error("fulfilled is derived from the counter and cannot be set directly")]
    DerivedStatus,
    #[error(transparent)]
    Repository(#[from] StaffRequestRepositoryError),
}
