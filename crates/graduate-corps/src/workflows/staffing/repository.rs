use super::domain::{StaffRequest, StaffRequestId, StaffRequestStatus};

/// Storage abstraction over department staff requests.
pub trait StaffRequestRepository: Send + Sync {
    fn insert(&self, request: StaffRequest) -> Result<StaffRequest, StaffRequestRepositoryError>;
    fn update(&self, request: StaffRequest) -> Result<(), StaffRequestRepositoryError>;
    fn fetch(
        &self,
        id: &StaffRequestId,
    ) -> Result<Option<StaffRequest>, StaffRequestRepositoryError>;
    fn list(
        &self,
        status: Option<StaffRequestStatus>,
    ) -> Result<Vec<StaffRequest>, StaffRequestRepositoryError>;
}

/// Error enumeration for staff request store failures.
#[derive(Debug, thiserror::Error)]
pub enum StaffRequestRepositoryError {
    #[error("staff request already exists")]
    Conflict,
    #[error("staff request not found")]
    NotFound,
    #[error("staff request store unavailable: {0}")]
    Unavailable(String),
}
