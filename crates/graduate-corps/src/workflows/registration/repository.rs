use super::domain::{GraduateId, GraduateProfile};
use crate::workflows::roster::domain::RosterRowId;
use crate::workflows::staffing::domain::StaffRequestId;

/// Storage abstraction over graduate profiles. Implementations must reject
/// a second profile for the same roster row.
pub trait ProfileRepository: Send + Sync {
    fn insert(&self, profile: GraduateProfile) -> Result<GraduateProfile, ProfileRepositoryError>;
    fn update(&self, profile: GraduateProfile) -> Result<(), ProfileRepositoryError>;
    fn fetch(&self, id: &GraduateId) -> Result<Option<GraduateProfile>, ProfileRepositoryError>;
    fn fetch_by_roster_row(
        &self,
        roster_row_id: &RosterRowId,
    ) -> Result<Option<GraduateProfile>, ProfileRepositoryError>;
}

/// Error enumeration for profile store failures.
#[derive(Debug, thiserror::Error)]
pub enum ProfileRepositoryError {
    #[error("a profile already references this roster row")]
    Conflict,
    #[error("graduate profile not found")]
    NotFound,
    #[error("profile store unavailable: {0}")]
    Unavailable(String),
}

/// Outbound seam the staffing tracker implements so department assignments
/// recorded during review land on the right staff request.
pub trait FulfillmentLedger: Send + Sync {
    fn record_assignment(
        &self,
        request_id: &StaffRequestId,
    ) -> Result<(), FulfillmentLedgerError>;
}

/// Error enumeration for assignment recording.
#[derive(Debug, thiserror::Error)]
pub enum FulfillmentLedgerError {
    #[error("staff request not found")]
    RequestNotFound,
    #[error("staff request already fulfilled")]
    Overfulfilled,
    #[error("assignment refused: {0}")]
    Refused(String),
    #[error("fulfillment ledger unavailable: {0}")]
    Unavailable(String),
}
