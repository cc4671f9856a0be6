//! wiqaya-scoring
//!
//! Deterministic scoring for the screening program. Pure functions only:
//! no I/O, no global state, no ambient randomness. Every function here can be
//! called concurrently over independent records.
//!
//! - [`targets`]: age/comorbidity adjusted clinical targets
//! - [`prediction`]: per-disease indices, triage priority, confidence
//! - [`pilot`]: seeded simulation of follow-up outcomes
//! - [`stats`]: dashboard aggregates over a batch of records

pub mod pilot;
pub mod prediction;
pub mod stats;
pub mod targets;

pub use pilot::{generate_pilot_outcome, hash_patient_id};
pub use prediction::generate_prediction;
pub use stats::{Aggregator, AggregatorConfig};
pub use targets::compute_targets;

/// Round a score to an integer and clamp it into `[0, 100]`.
pub(crate) fn round_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}
