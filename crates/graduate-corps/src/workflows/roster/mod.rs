//! Zone roster upload: per-row validation, partial-success batch ingestion,
//! and CSV decoding for the upload ingress.

pub mod domain;
pub mod importer;
pub mod ingest;
pub mod repository;
pub mod router;
pub mod validator;

pub use domain::{
    ChapterPastor, ColumnFormat, ColumnSpec, Gender, RawRow, RosterMatchView, RosterRow,
    RosterRowId, ZoneId,
};
pub use importer::{RosterCsvImporter, RosterImportError};
pub use ingest::{IngestionReport, IngestionSummary, RejectedRow, RosterIngestion};
pub use repository::{RosterQuery, RosterRepository, RosterRepositoryError};
pub use router::{roster_router, RosterUploadRequest};
pub use validator::{validate_row, RowValidation};
