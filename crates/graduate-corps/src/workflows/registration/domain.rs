use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::status::ApplicationStatus;
use crate::workflows::roster::domain::{Gender, RosterRow, RosterRowId};

/// Identifier wrapper for registered graduates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraduateId(pub String);

/// Identifier wrapper for service departments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepartmentId(pub String);

/// Full registration payload a graduate submits while claiming a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub personal: PersonalDetails,
    pub family: FamilyDetails,
    pub education: EducationDetails,
    pub spiritual: SpiritualJourney,
    pub test_answers: Vec<TestAnswer>,
    pub credentials: AccountCredentials,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDetails {
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub marital_status: String,
    pub state_of_origin: String,
    pub residential_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyDetails {
    pub next_of_kin_name: String,
    pub next_of_kin_phone: String,
    pub next_of_kin_relationship: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationDetails {
    pub highest_qualification: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpiritualJourney {
    pub born_again: bool,
    pub water_baptized: bool,
    pub years_in_fellowship: u8,
    pub testimony: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestAnswer {
    pub question: String,
    pub answer: String,
}

/// Password pair checked during intake and consumed at the account
/// boundary; it is never stored on the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCredentials {
    pub password: String,
    pub confirm_password: String,
}

/// Profile created exactly once per claimed roster row.
///
/// Identity fields are copied from the row at bind time so the profile
/// stays self-contained even if the roster row is later altered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraduateProfile {
    pub id: GraduateId,
    pub roster_row_id: RosterRowId,
    pub first_name: String,
    pub surname: String,
    pub gender: Gender,
    pub phone_number: String,
    pub university: String,
    pub course: String,
    pub graduation_year: String,
    pub personal: PersonalDetails,
    pub family: FamilyDetails,
    pub education: EducationDetails,
    pub spiritual: SpiritualJourney,
    pub test_answers: Vec<TestAnswer>,
    pub status: ApplicationStatus,
    pub service_department_id: Option<DepartmentId>,
    pub service_started_date: Option<NaiveDate>,
    pub service_completed_date: Option<NaiveDate>,
    pub registered_at: DateTime<Utc>,
}

impl GraduateProfile {
    pub fn from_claimed_row(
        id: GraduateId,
        row: &RosterRow,
        form: RegistrationForm,
        registered_at: DateTime<Utc>,
    ) -> Self {
        let RegistrationForm {
            personal,
            family,
            education,
            spiritual,
            test_answers,
            credentials: _,
        } = form;

        Self {
            id,
            roster_row_id: row.id.clone(),
            first_name: row.first_name.clone(),
            surname: row.surname.clone(),
            gender: row.gender,
            phone_number: row.phone_number.clone(),
            university: row.university.clone(),
            course: row.course.clone(),
            graduation_year: row.graduation_year.clone(),
            personal,
            family,
            education,
            spiritual,
            test_answers,
            status: ApplicationStatus::UnderReview,
            service_department_id: None,
            service_started_date: None,
            service_completed_date: None,
            registered_at,
        }
    }

    /// Share of the one-year tour already served, for dashboards. Derived,
    /// never stored: 0 without a start date, capped at 100.
    pub fn service_progress_percent(&self, today: NaiveDate) -> u8 {
        let Some(started) = self.service_started_date else {
            return 0;
        };

        let days = (today - started).num_days().max(0);
        ((days * 100) / 365).min(100) as u8
    }

    pub fn status_view(&self, today: NaiveDate) -> GraduateStatusView {
        GraduateStatusView {
            graduate_id: self.id.clone(),
            roster_row_id: self.roster_row_id.clone(),
            full_name: format!("{} {}", self.first_name, self.surname),
            status: self.status.label(),
            service_department_id: self.service_department_id.clone(),
            service_started_date: self.service_started_date,
            service_completed_date: self.service_completed_date,
            service_progress_percent: self.service_progress_percent(today),
        }
    }
}

/// Sanitized representation of a graduate's exposed review state.
#[derive(Debug, Clone, Serialize)]
pub struct GraduateStatusView {
    pub graduate_id: GraduateId,
    pub roster_row_id: RosterRowId,
    pub full_name: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_department_id: Option<DepartmentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_started_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_completed_date: Option<NaiveDate>,
    pub service_progress_percent: u8,
}
