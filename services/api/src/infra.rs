use chrono::{DateTime, NaiveDate, Utc};
use graduate_corps::workflows::registration::domain::{
    AccountCredentials, EducationDetails, FamilyDetails, GraduateId, GraduateProfile,
    PersonalDetails, RegistrationForm, SpiritualJourney, TestAnswer,
};
use graduate_corps::workflows::registration::repository::{
    ProfileRepository, ProfileRepositoryError,
};
use graduate_corps::workflows::roster::domain::{RosterRow, RosterRowId};
use graduate_corps::workflows::roster::repository::{
    RosterQuery, RosterRepository, RosterRepositoryError,
};
use graduate_corps::workflows::staffing::domain::{
    StaffRequest, StaffRequestId, StaffRequestStatus,
};
use graduate_corps::workflows::staffing::repository::{
    StaffRequestRepository, StaffRequestRepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRosterRepository {
    rows: Arc<Mutex<HashMap<RosterRowId, RosterRow>>>,
}

impl RosterRepository for InMemoryRosterRepository {
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

    // The claim flag is tested and set inside one critical section; this is
    // the single conditional mutation the binder relies on.
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
pub(crate) struct InMemoryProfileRepository {
    profiles: Arc<Mutex<HashMap<GraduateId, GraduateProfile>>>,
}

impl ProfileRepository for InMemoryProfileRepository {
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

#[derive(Default, Clone)]
pub(crate) struct InMemoryStaffRequestRepository {
    requests: Arc<Mutex<HashMap<StaffRequestId, StaffRequest>>>,
}

impl StaffRequestRepository for InMemoryStaffRequestRepository {
    fn insert(&self, request: StaffRequest) -> Result<StaffRequest, StaffRequestRepositoryError> {
        let mut guard = self.requests.lock().expect("request mutex poisoned");
        if guard.contains_key(&request.id) {
            return Err(StaffRequestRepositoryError::Conflict);
        }
        guard.insert(request.id.clone(), request.clone());
        Ok(request)
    }

    fn update(&self, request: StaffRequest) -> Result<(), StaffRequestRepositoryError> {
        let mut guard = self.requests.lock().expect("request mutex poisoned");
        if !guard.contains_key(&request.id) {
            return Err(StaffRequestRepositoryError::NotFound);
        }
        guard.insert(request.id.clone(), request);
        Ok(())
    }

    fn fetch(
        &self,
        id: &StaffRequestId,
    ) -> Result<Option<StaffRequest>, StaffRequestRepositoryError> {
        let guard = self.requests.lock().expect("request mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(
        &self,
        status: Option<StaffRequestStatus>,
    ) -> Result<Vec<StaffRequest>, StaffRequestRepositoryError> {
        let guard = self.requests.lock().expect("request mutex poisoned");
        let mut requests: Vec<StaffRequest> = guard
            .values()
            .filter(|request| status.map_or(true, |wanted| request.status == wanted))
            .cloned()
            .collect();
        requests.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(requests)
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn sample_registration_form() -> RegistrationForm {
    RegistrationForm {
        personal: PersonalDetails {
            email: "john.doe@example.org".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 3, 14).unwrap_or_default(),
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
            skills: vec!["Bookkeeping".to_string(), "Media production".to_string()],
        },
        spiritual: SpiritualJourney {
            born_again: true,
            water_baptized: true,
            years_in_fellowship: 4,
            testimony: "Joined the fellowship in my first year on campus.".to_string(),
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
