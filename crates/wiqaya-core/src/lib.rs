//! wiqaya-core
//!
//! Pure domain types for the screening program: the patient clinical record,
//! prediction and target results, and pilot outcome records.
//! No scoring logic lives here. This is the shared vocabulary of the Wiqaya
//! system.

pub mod error;
pub mod models;
