use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::registration::domain::DepartmentId;
use crate::workflows::roster::domain::Gender;

/// Identifier wrapper for staff requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaffRequestId(pub String);

/// Urgency tiers the office uses to sequence sourcing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyTier {
    Immediate,
    High,
    Routine,
}

impl UrgencyTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Immediate => "Immediate",
            Self::High => "High",
            Self::Routine => "Routine",
        }
    }
}

/// Office-visible request lifecycle. `Fulfilled` is derived from the
/// fulfillment counter, never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRequestStatus {
    Pending,
    Approved,
    Rejected,
    Fulfilled,
    Cancelled,
}

impl StaffRequestStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Fulfilled => "Fulfilled",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "fulfilled" => Some(Self::Fulfilled),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Department-submitted request for a number of corps staff.
///
/// Invariant: `0 <= fulfilled_count <= number_of_staff`, and the status is
/// `Fulfilled` exactly when the counter reaches the requested total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRequest {
    pub id: StaffRequestId,
    pub department_id: DepartmentId,
    pub position: String,
    pub description: String,
    pub number_of_staff: u32,
    pub urgency: UrgencyTier,
    pub gender_preference: Option<Gender>,
    pub status: StaffRequestStatus,
    pub fulfilled_count: u32,
    pub requested_at: DateTime<Utc>,
}

impl StaffRequest {
    pub fn is_fully_staffed(&self) -> bool {
        self.fulfilled_count == self.number_of_staff
    }

    pub fn outstanding(&self) -> u32 {
        self.number_of_staff.saturating_sub(self.fulfilled_count)
    }

    pub fn status_view(&self) -> StaffRequestView {
        StaffRequestView {
            request_id: self.id.clone(),
            department_id: self.department_id.clone(),
            position: self.position.clone(),
            status: self.status.label(),
            urgency: self.urgency.label(),
            number_of_staff: self.number_of_staff,
            fulfilled_count: self.fulfilled_count,
            outstanding: self.outstanding(),
        }
    }
}

/// Payload a department submits to open a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffRequestDraft {
    pub department_id: DepartmentId,
    pub position: String,
    #[serde(default)]
    pub description: String,
    pub number_of_staff: u32,
    pub urgency: UrgencyTier,
    #[serde(default)]
    pub gender_preference: Option<Gender>,
}

/// Dashboard projection of a staff request.
#[derive(Debug, Clone, Serialize)]
pub struct StaffRequestView {
    pub request_id: StaffRequestId,
    pub department_id: DepartmentId,
    pub position: String,
    pub status: &'static str,
    pub urgency: &'static str,
    pub number_of_staff: u32,
    pub fulfilled_count: u32,
    pub outstanding: u32,
}
