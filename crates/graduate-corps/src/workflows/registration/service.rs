use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;

use super::domain::{DepartmentId, GraduateId, GraduateProfile, RegistrationForm};
use super::intake::RegistrationIntake;
use super::repository::{
    FulfillmentLedger, FulfillmentLedgerError, ProfileRepository, ProfileRepositoryError,
};
use super::status::{ApplicationStatus, StatusError};
use crate::workflows::roster::domain::{RosterRow, RosterRowId};
use crate::workflows::roster::repository::{
    RosterQuery, RosterRepository, RosterRepositoryError,
};
use crate::workflows::staffing::domain::StaffRequestId;

static GRADUATE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_graduate_id() -> GraduateId {
    let id = GRADUATE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    GraduateId(format!("grad-{id:06}"))
}

/// Service composing the claim matcher, registration binder, and status
/// machine over the roster and profile stores, with assignments recorded
/// through the fulfillment ledger.
pub struct RegistrationService<R, P, F> {
    roster: Arc<R>,
    profiles: Arc<P>,
    ledger: Arc<F>,
    intake: RegistrationIntake,
}

/// Office-initiated status change, optionally carrying the department
/// assignment that must precede `Serving`.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub target: ApplicationStatus,
    pub assignment: Option<DepartmentAssignment>,
    pub effective_on: NaiveDate,
}

/// Department placement, optionally tied to the staff request it satisfies.
#[derive(Debug, Clone)]
pub struct DepartmentAssignment {
    pub department_id: DepartmentId,
    pub staff_request_id: Option<StaffRequestId>,
}

impl<R, P, F> RegistrationService<R, P, F>
where
    R: RosterRepository + 'static,
    P: ProfileRepository + 'static,
    F: FulfillmentLedger + 'static,
{
    pub fn new(roster: Arc<R>, profiles: Arc<P>, ledger: Arc<F>) -> Self {
        Self {
            roster,
            profiles,
            ledger,
            intake: RegistrationIntake,
        }
    }

    /// Exact-match claim search. Claimed rows are included so callers can
    /// show "this record is taken" instead of a false miss; an empty result
    /// is the normal not-yet-uploaded case, not an error.
    pub fn search(&self, query: &RosterQuery) -> Result<Vec<RosterRow>, RegistrationError> {
        Ok(self.roster.search(query)?)
    }

    /// Bind a graduate to an unclaimed roster row and create their profile.
    ///
    /// The claim is the repository's single conditional mutation; under two
    /// concurrent binds exactly one caller gets the row and the other sees
    /// `AlreadyClaimed`.
    pub fn register(
        &self,
        roster_row_id: &RosterRowId,
        form: RegistrationForm,
    ) -> Result<GraduateProfile, RegistrationError> {
        let violations = self.intake.validate(&form);
        if !violations.is_empty() {
            return Err(RegistrationError::Validation { errors: violations });
        }

        let claimed_at = Utc::now();
        let row = self.roster.claim(roster_row_id, claimed_at)?;

        let profile =
            GraduateProfile::from_claimed_row(next_graduate_id(), &row, form, claimed_at);
        match self.profiles.insert(profile) {
            Ok(stored) => {
                info!(
                    graduate = %stored.id.0,
                    roster_row = %roster_row_id.0,
                    "graduate bound to roster row"
                );
                Ok(stored)
            }
            Err(error) => {
                // A claimed row without a profile must not survive.
                self.roster.release_claim(roster_row_id)?;
                Err(error.into())
            }
        }
    }

    /// Fetch a graduate's profile for API responses.
    pub fn get(&self, id: &GraduateId) -> Result<GraduateProfile, RegistrationError> {
        let profile = self
            .profiles
            .fetch(id)?
            .ok_or(ProfileRepositoryError::NotFound)?;
        Ok(profile)
    }

    /// Place a graduate in a service department ahead of the Serving move.
    pub fn assign(
        &self,
        id: &GraduateId,
        assignment: DepartmentAssignment,
    ) -> Result<GraduateProfile, RegistrationError> {
        let mut profile = self
            .profiles
            .fetch(id)?
            .ok_or(ProfileRepositoryError::NotFound)?;

        self.apply_assignment(&mut profile, &assignment)?;
        self.profiles.update(profile.clone())?;

        info!(
            graduate = %profile.id.0,
            department = %assignment.department_id.0,
            "graduate assigned to service department"
        );
        Ok(profile)
    }

    /// Apply an office-initiated status change.
    ///
    /// The transition is checked before anything is written; a refused
    /// ledger increment aborts the whole change.
    pub fn transition(
        &self,
        id: &GraduateId,
        change: StatusChange,
    ) -> Result<GraduateProfile, RegistrationError> {
        let mut profile = self
            .profiles
            .fetch(id)?
            .ok_or(ProfileRepositoryError::NotFound)?;

        if !profile.status.can_move_to(change.target) {
            return Err(StatusError::InvalidTransition {
                from: profile.status,
                to: change.target,
            }
            .into());
        }

        if change.target == ApplicationStatus::Serving
            && profile.service_department_id.is_none()
            && change.assignment.is_none()
        {
            return Err(StatusError::DepartmentNotAssigned.into());
        }

        if let Some(assignment) = &change.assignment {
            self.apply_assignment(&mut profile, assignment)?;
        }

        if change.target == ApplicationStatus::Serving && profile.service_started_date.is_none() {
            profile.service_started_date = Some(change.effective_on);
        }

        let previous = profile.status;
        profile.status = change.target;
        self.profiles.update(profile.clone())?;

        info!(
            graduate = %profile.id.0,
            from = previous.label(),
            to = profile.status.label(),
            "application status changed"
        );
        Ok(profile)
    }

    fn apply_assignment(
        &self,
        profile: &mut GraduateProfile,
        assignment: &DepartmentAssignment,
    ) -> Result<(), RegistrationError> {
        if let Some(request_id) = &assignment.staff_request_id {
            self.ledger.record_assignment(request_id)?;
        }
        profile.service_department_id = Some(assignment.department_id.clone());
        Ok(())
    }
}

/// Error raised by the registration service.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("registration form invalid: {}", .errors.join("; "))]
    Validation { errors: Vec<String> },
    #[error(transparent)]
    Roster(#[from] RosterRepositoryError),
    #[error(transparent)]
    Profile(#[from] ProfileRepositoryError),
    #[error(transparent)]
    Status(#[from] StatusError),
    #[error(transparent)]
    Fulfillment(#[from] FulfillmentLedgerError),
}
