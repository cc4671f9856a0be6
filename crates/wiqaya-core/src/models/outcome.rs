use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskClassification {
    #[default]
    Unknown,
    Normal,
    NeedsMonitoring,
    AtRisk,
}

impl RiskClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskClassification::Unknown => "unknown",
            RiskClassification::Normal => "normal",
            RiskClassification::NeedsMonitoring => "needs_monitoring",
            RiskClassification::AtRisk => "at_risk",
        }
    }
}

/// Follow-up outcome for a beneficiary: real call-center data, or a
/// deterministic simulation while the pilot has no real outcomes yet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct PilotOutcomeRecord {
    pub contacted: bool,
    pub contact_date: Option<jiff::civil::Date>,
    pub service_delivered: Option<bool>,
    pub non_delivery_reason: Option<String>,
    pub service_satisfaction: Option<u8>,
    pub staff_satisfaction: Option<u8>,
    pub risk_classification: RiskClassification,
}

/// Where outcome data comes from when a record has none of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DataSource {
    /// Backfill missing outcomes with simulated pilot data.
    #[default]
    Pilot,
    /// Only count outcomes that were actually recorded.
    Live,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Pilot => f.write_str("pilot"),
            DataSource::Live => f.write_str("live"),
        }
    }
}

impl FromStr for DataSource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pilot" | "seeded" => Ok(DataSource::Pilot),
            "live" => Ok(DataSource::Live),
            _ => Err(CoreError::UnknownDataSource(s.to_string())),
        }
    }
}
