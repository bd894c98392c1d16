use serde::{Deserialize, Serialize};

/// Review pipeline states for a bound graduate.
///
/// Transitions are office-initiated and follow the closed table in
/// `can_move_to`; nothing in the portal compares status strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    UnderReview,
    InvitedForInterview,
    Interviewed,
    Sighting,
    Serving,
    NotAccepted,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::UnderReview => "Under Review",
            Self::InvitedForInterview => "Invited For Interview",
            Self::Interviewed => "Interviewed",
            Self::Sighting => "Sighting",
            Self::Serving => "Serving",
            Self::NotAccepted => "Not Accepted",
        }
    }

    /// No status transition is modeled beyond these two; `Serving` still
    /// accepts service-date updates on the profile itself.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Serving | Self::NotAccepted)
    }

    /// Closed transition table. `NotAccepted` is reachable from every
    /// non-terminal state; everything else moves one review step at a time.
    pub const fn can_move_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::UnderReview, Self::InvitedForInterview)
            | (Self::InvitedForInterview, Self::Interviewed)
            | (Self::Interviewed, Self::Sighting)
            | (Self::Sighting, Self::Serving) => true,
            (from, Self::NotAccepted) => !from.is_terminal(),
            _ => false,
        }
    }

    pub const fn ordered() -> [Self; 6] {
        [
            Self::UnderReview,
            Self::InvitedForInterview,
            Self::Interviewed,
            Self::Sighting,
            Self::Serving,
            Self::NotAccepted,
        ]
    }
}

/// Errors raised by the status machine. An invalid transition always names
/// both states; it never silently no-ops.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error("cannot move application from {} to {}", .from.label(), .to.label())]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    #[error("a service department must be assigned before serving")]
    DepartmentNotAssigned,
}
