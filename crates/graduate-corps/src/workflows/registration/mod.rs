//! Graduate registration: the claim matcher over uploaded roster rows, the
//! claim-once registration binder, and the office-driven application status
//! machine.

pub mod domain;
pub mod intake;
pub mod repository;
pub mod router;
pub mod service;
pub mod status;

#[cfg(test)]
mod tests;

pub use domain::{
    AccountCredentials, DepartmentId, EducationDetails, FamilyDetails, GraduateId,
    GraduateProfile, GraduateStatusView, PersonalDetails, RegistrationForm, SpiritualJourney,
    TestAnswer,
};
pub use intake::RegistrationIntake;
pub use repository::{
    FulfillmentLedger, FulfillmentLedgerError, ProfileRepository, ProfileRepositoryError,
};
pub use router::{registration_router, RegistrationRequest, StatusChangeRequest};
pub use service::{
    DepartmentAssignment, RegistrationError, RegistrationService, StatusChange,
};
pub use status::{ApplicationStatus, StatusError};
