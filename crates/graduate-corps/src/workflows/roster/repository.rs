use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Gender, RosterRow, RosterRowId, ZoneId};

/// Exact-match criteria a registering graduate asserts about themselves.
/// All four fields are required; partial or fuzzy matching is never
/// performed so a record can only be found by its real owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterQuery {
    pub zone_id: ZoneId,
    pub surname: String,
    pub gender: Gender,
    pub phone_number: String,
}

/// Storage abstraction over the zone roster.
///
/// `claim` carries the system's single concurrency invariant: it must test
/// and set the claimed flag as one conditional mutation, never a read
/// followed by a separate write.
pub trait RosterRepository: Send + Sync {
    fn insert(&self, row: RosterRow) -> Result<RosterRow, RosterRepositoryError>;
    fn fetch(&self, id: &RosterRowId) -> Result<Option<RosterRow>, RosterRepositoryError>;
    fn search(&self, query: &RosterQuery) -> Result<Vec<RosterRow>, RosterRepositoryError>;
    fn claim(
        &self,
        id: &RosterRowId,
        at: DateTime<Utc>,
    ) -> Result<RosterRow, RosterRepositoryError>;
    fn release_claim(&self, id: &RosterRowId) -> Result<(), RosterRepositoryError>;
}

/// Error enumeration for roster store failures.
#[derive(Debug, thiserror::Error)]
pub enum RosterRepositoryError {
    #[error("roster row already claimed")]
    AlreadyClaimed,
    #[error("roster row not found")]
    NotFound,
    #[error("roster store unavailable: {0}")]
    Unavailable(String),
}
