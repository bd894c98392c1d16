use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for the regional office that uploads a roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneId(pub String);

/// Identifier wrapper for uploaded roster rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RosterRowId(pub String);

/// An uploaded row before validation: declared column name to raw cell.
/// Cell types inferred by spreadsheet parsers are never trusted; typing
/// happens only after the row validator passes the row.
pub type RawRow = BTreeMap<String, String>;

/// Accepted gender literals. Matching is case-sensitive at the validation
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "MALE" => Some(Gender::Male),
            "FEMALE" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Chapter pastor contact block carried on every roster row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterPastor {
    pub name: String,
    pub phone_number: String,
    pub email: String,
}

/// One uploaded graduate identity record, claimable exactly once.
///
/// Immutable after the claim except for the claim flag and timestamp, which
/// the registration binder flips through the repository's atomic `claim`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRow {
    pub id: RosterRowId,
    pub zone_id: ZoneId,
    pub first_name: String,
    pub surname: String,
    pub gender: Gender,
    pub phone_number: String,
    pub university: String,
    pub course: String,
    pub graduation_year: String,
    pub fellowship: String,
    pub zonal_pastor: String,
    pub chapter_pastor: ChapterPastor,
    pub claimed: bool,
    pub claimed_at: Option<DateTime<Utc>>,
}

impl RosterRow {
    /// Graduate-facing search result: identity essentials plus the claimed
    /// flag, without the pastoral contact block.
    pub fn match_view(&self) -> RosterMatchView {
        RosterMatchView {
            roster_row_id: self.id.clone(),
            zone_id: self.zone_id.clone(),
            first_name: self.first_name.clone(),
            surname: self.surname.clone(),
            gender: self.gender,
            university: self.university.clone(),
            course: self.course.clone(),
            graduation_year: self.graduation_year.clone(),
            claimed: self.claimed,
        }
    }
}

/// Sanitized projection of a roster row returned by the claim search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterMatchView {
    pub roster_row_id: RosterRowId,
    pub zone_id: ZoneId,
    pub first_name: String,
    pub surname: String,
    pub gender: Gender,
    pub university: String,
    pub course: String,
    pub graduation_year: String,
    pub claimed: bool,
}

/// Declared roster column names as they appear in upload headers.
pub mod columns {
    pub const FIRST_NAME: &str = "First Name";
    pub const SURNAME: &str = "Surname";
    pub const GENDER: &str = "Gender";
    pub const PHONE_NUMBER: &str = "Phone Number";
    pub const UNIVERSITY: &str = "University";
    pub const COURSE: &str = "Course";
    pub const GRADUATION_YEAR: &str = "Graduation Year";
    pub const FELLOWSHIP: &str = "Fellowship";
    pub const ZONAL_PASTOR: &str = "Zonal Pastor";
    pub const CHAPTER_PASTOR_NAME: &str = "Chapter Pastor Name";
    pub const CHAPTER_PASTOR_PHONE: &str = "Chapter Pastor Phone";
    pub const CHAPTER_PASTOR_EMAIL: &str = "Chapter Pastor Email";
}

/// Format expectation the validator applies to a declared column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnFormat {
    Text,
    Gender,
    Phone,
    Email,
}

/// One declared roster column and its format rule.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub format: ColumnFormat,
}

/// Every column a zone must supply for a row to be accepted.
pub const REQUIRED_COLUMNS: [ColumnSpec; 12] = [
    ColumnSpec {
        name: columns::FIRST_NAME,
        format: ColumnFormat::Text,
    },
    ColumnSpec {
        name: columns::SURNAME,
        format: ColumnFormat::Text,
    },
    ColumnSpec {
        name: columns::GENDER,
        format: ColumnFormat::Gender,
    },
    ColumnSpec {
        name: columns::PHONE_NUMBER,
        format: ColumnFormat::Phone,
    },
    ColumnSpec {
        name: columns::UNIVERSITY,
        format: ColumnFormat::Text,
    },
    ColumnSpec {
        name: columns::COURSE,
        format: ColumnFormat::Text,
    },
    ColumnSpec {
        name: columns::GRADUATION_YEAR,
        format: ColumnFormat::Text,
    },
    ColumnSpec {
        name: columns::FELLOWSHIP,
        format: ColumnFormat::Text,
    },
    ColumnSpec {
        name: columns::ZONAL_PASTOR,
        format: ColumnFormat::Text,
    },
    ColumnSpec {
        name: columns::CHAPTER_PASTOR_NAME,
        format: ColumnFormat::Text,
    },
    ColumnSpec {
        name: columns::CHAPTER_PASTOR_PHONE,
        format: ColumnFormat::Phone,
    },
    ColumnSpec {
        name: columns::CHAPTER_PASTOR_EMAIL,
        format: ColumnFormat::Email,
    },
];
