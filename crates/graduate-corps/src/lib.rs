//! Core engine for the graduate corps portal: zone roster ingestion and
//! validation, the claim-once registration binder, the application review
//! status machine, and staff request fulfillment tracking.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
