pub mod registration;
pub mod roster;
pub mod staffing;
