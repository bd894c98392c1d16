use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, Utc};

use crate::workflows::registration::domain::{
    AccountCredentials, EducationDetails, FamilyDetails, GraduateId, GraduateProfile,
    PersonalDetails, RegistrationForm, SpiritualJourney, TestAnswer,
};
use crate::workflows::registration::repository::{
    FulfillmentLedger, FulfillmentLedgerError, ProfileRepository, ProfileRepositoryError,
};
use crate::workflows::registration::service::RegistrationService;
use crate::workflows::roster::domain::{ChapterPastor, Gender, RosterRow, RosterRowId, ZoneId};
use crate::workflows::roster::repository::{
    RosterQuery, RosterRepository, RosterRepositoryError,
};
use crate::workflows::staffing::domain::StaffRequestId;

pub(super) fn zone() -> ZoneId {
    ZoneId("zone-lagos-1".to_string())
}

pub(super) fn sample_row(id: &str) -> RosterRow {
    RosterRow {
        id: RosterRowId(id.to_string()),
        zone_id: zone(),
        first_name: "John".to_string(),
        surname: "Doe".to_string(),
        gender: Gender::Male,
        phone_number: "+2348012345678".to_string(),
        university: "University of Jos".to_string(),
        course: "Accounting".to_string(),
        graduation_year: "2024".to_string(),
        fellowship: "Campus Fellowship".to_string(),
        zonal_pastor: "Pastor A. Obi".to_string(),
        chapter_pastor: ChapterPastor {
            name: "Pastor E. Bello".to_string(),
            phone_number: "+2348025551234".to_string(),
            email: "e.bello@chapter.org".to_string(),
        },
        claimed: false,
        claimed_at: None,
    }
}

pub(super) fn query_for(row: &RosterRow) -> RosterQuery {
    RosterQuery {
        zone_id: row.zone_id.clone(),
        surname: row.surname.clone(),
        gender: row.gender,
        phone_number: row.phone_number.clone(),
    }
}

pub(super) fn registration_form() -> RegistrationForm {
    RegistrationForm {
        personal: PersonalDetails {
            email: "john.doe@example.org".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 3, 14).expect("valid date"),
            marital_status: "Single".to_string(),
            state_of_origin: "Plateau".to_string(),
            residential_address: "12 Hillcrest Road, Jos".to_string(),
        },
        family: FamilyDetails {
            next_of_kin_name: "Mary Doe".to_string(),
            next_of_kin_phone: "+2348098765432".to_string(),
            next_of_kin_relationship: "Mother".to_string(),
        },
        education: EducationDetails {
            highest_qualification: "BSc Accounting".to_string(),
            skills: vec!["Bookkeeping".to_string()],
        },
        spiritual: SpiritualJourney {
            born_again: true,
            water_baptized: true,
            years_in_fellowship: 4,
            testimony: "Joined the fellowship in my first year.".to_string(),
        },
        test_answers: vec![TestAnswer {
            question: "Why do you want to serve?".to_string(),
            answer: "To give a year back to the ministry.".to_string(),
        }],
        credentials: AccountCredentials {
            password: "correct-horse".to_string(),
            confirm_password: "correct-horse".to_string(),
        },
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRoster {
    rows: Arc<Mutex<HashMap<RosterRowId, RosterRow>>>,
}

impl MemoryRoster {
    pub(super) fn seed(&self, row: RosterRow) {
        self.rows
            .lock()
            .expect("roster mutex poisoned")
            .insert(row.id.clone(), row);
    }

    pub(super) fn row(&self, id: &RosterRowId) -> Option<RosterRow> {
        self.rows
            .lock()
            .expect("roster mutex poisoned")
            .get(id)
            .cloned()
    }
}

impl RosterRepository for MemoryRoster {
    fn insert(&self, row: RosterRow) -> Result<RosterRow, RosterRepositoryError> {
        let mut guard = self.rows.lock().expect("roster mutex poisoned");
        guard.insert(row.id.clone(), row.clone());
        Ok(row)
    }

    fn fetch(&self, id: &RosterRowId) -> Result<Option<RosterRow>, RosterRepositoryError> {
        let guard = self.rows.lock().expect("roster mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn search(&self, query: &RosterQuery) -> Result<Vec<RosterRow>, RosterRepositoryError> {
        let guard = self.rows.lock().expect("roster mutex poisoned");
        let mut matches: Vec<RosterRow> = guard
            .values()
            .filter(|row| {
                row.zone_id == query.zone_id
                    && row.surname == query.surname
                    && row.gender == query.gender
                    && row.phone_number == query.phone_number
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(matches)
    }

    fn claim(
        &self,
        id: &RosterRowId,
        at: DateTime<Utc>,
    ) -> Result<RosterRow, RosterRepositoryError> {
        let mut guard = self.rows.lock().expect("roster mutex poisoned");
        let row = guard.get_mut(id).ok_or(RosterRepositoryError::NotFound)?;
        if row.claimed {
            return Err(RosterRepositoryError::AlreadyClaimed);
        }
        row.claimed = true;
        row.claimed_at = Some(at);
        Ok(row.clone())
    }

    fn release_claim(&self, id: &RosterRowId) -> Result<(), RosterRepositoryError> {
        let mut guard = self.rows.lock().expect("roster mutex poisoned");
        let row = guard.get_mut(id).ok_or(RosterRepositoryError::NotFound)?;
        row.claimed = false;
        row.claimed_at = None;
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryProfiles {
    profiles: Arc<Mutex<HashMap<GraduateId, GraduateProfile>>>,
}

impl ProfileRepository for MemoryProfiles {
    fn insert(&self, profile: GraduateProfile) -> Result<GraduateProfile, ProfileRepositoryError> {
        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
        let duplicate = guard
            .values()
            .any(|existing| existing.roster_row_id == profile.roster_row_id);
        if duplicate || guard.contains_key(&profile.id) {
            return Err(ProfileRepositoryError::Conflict);
        }
        guard.insert(profile.id.clone(), profile.clone());
        Ok(profile)
    }

    fn update(&self, profile: GraduateProfile) -> Result<(), ProfileRepositoryError> {
        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
        if !guard.contains_key(&profile.id) {
            return Err(ProfileRepositoryError::NotFound);
        }
        guard.insert(profile.id.clone(), profile);
        Ok(())
    }

    fn fetch(&self, id: &GraduateId) -> Result<Option<GraduateProfile>, ProfileRepositoryError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn fetch_by_roster_row(
        &self,
        roster_row_id: &RosterRowId,
    ) -> Result<Option<GraduateProfile>, ProfileRepositoryError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        Ok(guard
            .values()
            .find(|profile| &profile.roster_row_id == roster_row_id)
            .cloned())
    }
}

impl MemoryProfiles {
    pub(super) fn count(&self) -> usize {
        self.profiles.lock().expect("profile mutex poisoned").len()
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryLedger {
    assignments: Arc<Mutex<Vec<StaffRequestId>>>,
}

impl MemoryLedger {
    pub(super) fn assignments(&self) -> Vec<StaffRequestId> {
        self.assignments
            .lock()
            .expect("ledger mutex poisoned")
            .clone()
    }
}

impl FulfillmentLedger for MemoryLedger {
    fn record_assignment(
        &self,
        request_id: &StaffRequestId,
    ) -> Result<(), FulfillmentLedgerError> {
        self.assignments
            .lock()
            .expect("ledger mutex poisoned")
            .push(request_id.clone());
        Ok(())
    }
}

/// Ledger double that refuses every assignment, for abort-path tests.
pub(super) struct FullLedger;

impl FulfillmentLedger for FullLedger {
    fn record_assignment(
        &self,
        _request_id: &StaffRequestId,
    ) -> Result<(), FulfillmentLedgerError> {
        Err(FulfillmentLedgerError::Overfulfilled)
    }
}

/// Profile store double that rejects every insert, for claim-rollback tests.
pub(super) struct ConflictProfiles;

impl ProfileRepository for ConflictProfiles {
    fn insert(&self, _profile: GraduateProfile) -> Result<GraduateProfile, ProfileRepositoryError> {
        Err(ProfileRepositoryError::Conflict)
    }

    fn update(&self, _profile: GraduateProfile) -> Result<(), ProfileRepositoryError> {
        Err(ProfileRepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &GraduateId) -> Result<Option<GraduateProfile>, ProfileRepositoryError> {
        Ok(None)
    }

    fn fetch_by_roster_row(
        &self,
        _roster_row_id: &RosterRowId,
    ) -> Result<Option<GraduateProfile>, ProfileRepositoryError> {
        Ok(None)
    }
}

pub(super) fn build_service() -> (
    RegistrationService<MemoryRoster, MemoryProfiles, MemoryLedger>,
    Arc<MemoryRoster>,
    Arc<MemoryProfiles>,
    Arc<MemoryLedger>,
) {
    let roster = Arc::new(MemoryRoster::default());
    let profiles = Arc::new(MemoryProfiles::default());
    let ledger = Arc::new(MemoryLedger::default());
    let service = RegistrationService::new(roster.clone(), profiles.clone(), ledger.clone());
    (service, roster, profiles, ledger)
}
