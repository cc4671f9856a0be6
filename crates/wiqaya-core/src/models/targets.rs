use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single clinical target with an upper bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TargetBand {
    pub display: String,
    pub ceiling: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BpTarget {
    pub display: String,
    pub systolic: f64,
    pub diastolic: f64,
    pub description: String,
}

/// Age- and comorbidity-adjusted targets for one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientTargets {
    pub hba1c: TargetBand,
    pub blood_pressure: BpTarget,
    pub ldl: TargetBand,
    pub fasting_glucose: TargetBand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TargetStatus {
    NoReading,
    AtTarget,
    NearTarget,
    NeedsImprovement,
}
