//! Department staff requests and the fulfillment counter that tracks how
//! much of a requested headcount has been satisfied by assignments.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    StaffRequest, StaffRequestDraft, StaffRequestId, StaffRequestStatus, StaffRequestView,
    UrgencyTier,
};
pub use repository::{StaffRequestRepository, StaffRequestRepositoryError};
pub use router::staffing_router;
pub use service::{StaffingError, StaffingService};
