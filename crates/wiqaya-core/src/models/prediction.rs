use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Triage tier. Declaration order is the sort order: `Routine` is lowest,
/// `ConsultantPlusEducator` highest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PriorityLevel {
    Routine,
    HighPriority,
    ConsultantPlusEducator,
}

impl PriorityLevel {
    pub const ALL: [PriorityLevel; 3] = [
        PriorityLevel::ConsultantPlusEducator,
        PriorityLevel::HighPriority,
        PriorityLevel::Routine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLevel::Routine => "routine",
            PriorityLevel::HighPriority => "high_priority",
            PriorityLevel::ConsultantPlusEducator => "consultant_plus_educator",
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriorityLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "routine" => Ok(PriorityLevel::Routine),
            "high_priority" | "high" => Ok(PriorityLevel::HighPriority),
            "consultant_plus_educator" | "consultant" => Ok(PriorityLevel::ConsultantPlusEducator),
            _ => Err(CoreError::UnknownPriority(s.to_string())),
        }
    }
}

/// Output of the prediction engine for one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PredictionResult {
    pub dm_prediction_index: u8,
    pub htn_prediction_index: u8,
    pub ldl_prediction_index: u8,
    pub overall_prediction_index: u8,
    pub priority_level: PriorityLevel,
    pub priority_reason: String,
    pub suggested_action: String,
    pub confidence_score: u8,
    pub risk_factors: Vec<String>,
}
