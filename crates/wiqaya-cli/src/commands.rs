use std::path::Path;

use serde::Serialize;
use wiqaya_core::models::{
    PatientClinicalRecord, PatientTargets, PilotOutcomeRecord, PriorityLevel,
};
use wiqaya_scoring::pilot::{PilotLabs, generate_pilot_outcome, hash_patient_id};
use wiqaya_scoring::stats::{AggregateStatistics, RankedPatient};
use wiqaya_scoring::targets::{PatientProfile, compute_targets};
use wiqaya_scoring::{Aggregator, AggregatorConfig};

/// Read a JSON array of patient records.
pub fn read_patients(path: &Path) -> eyre::Result<Vec<PatientClinicalRecord>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read patients at {}: {e}", path.display()))?;
    let records: Vec<PatientClinicalRecord> = serde_json::from_str(&contents)
        .map_err(|e| eyre::eyre!("invalid patient export {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), count = records.len(), "loaded patients");
    Ok(records)
}

pub fn stats(records: &[PatientClinicalRecord], config: AggregatorConfig) -> AggregateStatistics {
    Aggregator::new(config).aggregate(records)
}

/// The triage worklist, optionally cut at a minimum priority.
pub fn predict(
    records: &[PatientClinicalRecord],
    config: AggregatorConfig,
    min_priority: Option<PriorityLevel>,
) -> Vec<RankedPatient> {
    let mut ranked = Aggregator::new(config).prioritize(records);
    if let Some(min) = min_priority {
        ranked.retain(|r| r.prediction.priority_level >= min);
    }
    ranked
}

pub fn targets(profile: &PatientProfile) -> PatientTargets {
    compute_targets(profile)
}

#[derive(Debug, Clone, Serialize)]
pub struct PilotPreview {
    pub patient_id: String,
    pub hash: u32,
    pub outcome: PilotOutcomeRecord,
}

/// Show the simulated outcome a patient ID maps to.
pub fn pilot(patient_id: &str, age: Option<u32>, config: AggregatorConfig) -> PilotPreview {
    let hash = hash_patient_id(patient_id);
    PilotPreview {
        patient_id: patient_id.to_string(),
        hash,
        outcome: generate_pilot_outcome(hash, age, &PilotLabs::default(), config.reference_date),
    }
}

pub fn print_json<T: Serialize>(value: &T) -> eyre::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
