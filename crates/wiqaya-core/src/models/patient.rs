use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::derived::Derived;
use super::wire::{count, null_default, optional_count, percent_override};
use super::outcome::PilotOutcomeRecord;
use super::prediction::PriorityLevel;
use super::registration::RegistrationStatus;

/// Accepts English and Arabic spellings; anything unrecognised is `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unknown => "unknown",
        }
    }
}

impl From<Option<String>> for Gender {
    fn from(value: Option<String>) -> Self {
        match value.as_deref().map(|s| s.trim().to_lowercase()).as_deref() {
            Some("male" | "m" | "ذكر") => Gender::Male,
            Some("female" | "f" | "أنثى" | "انثى") => Gender::Female,
            _ => Gender::Unknown,
        }
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        value.as_str().to_string()
    }
}

/// Read-only clinical snapshot of one beneficiary.
///
/// Every field is optional on the wire. Lab values are `None` when unknown,
/// which is never the same as zero. The `Derived` fields carry values that an
/// external import already computed; when present they win over the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct PatientClinicalRecord {
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,

    #[serde(deserialize_with = "optional_count")]
    pub age: Option<i32>,
    #[ts(type = "string")]
    pub gender: Gender,

    #[serde(deserialize_with = "null_default")]
    pub has_diabetes: bool,
    #[serde(deserialize_with = "null_default")]
    pub has_hypertension: bool,
    #[serde(deserialize_with = "null_default")]
    pub has_dyslipidemia: bool,
    #[serde(deserialize_with = "null_default")]
    pub has_ascvd: bool,
    #[serde(deserialize_with = "null_default")]
    pub has_ckd: bool,
    #[serde(deserialize_with = "null_default")]
    pub has_heart_failure: bool,

    pub hba1c_percent: Option<f64>,
    pub ldl_mg_dl: Option<f64>,
    pub systolic_bp: Option<f64>,
    pub diastolic_bp: Option<f64>,
    pub bmi: Option<f64>,
    pub fasting_glucose_mg_dl: Option<f64>,

    #[serde(deserialize_with = "count")]
    pub visit_count: i32,
    #[serde(deserialize_with = "count")]
    pub dm_meds_count: i32,
    #[serde(deserialize_with = "count")]
    pub htn_meds_count: i32,
    #[serde(deserialize_with = "count")]
    pub dlp_meds_count: i32,
    #[ts(type = "string")]
    pub registration_status: RegistrationStatus,

    #[serde(
        skip_serializing_if = "Derived::is_compute",
        deserialize_with = "percent_override"
    )]
    #[ts(type = "number | null")]
    pub dm_prediction_index: Derived<u8>,
    #[serde(
        skip_serializing_if = "Derived::is_compute",
        deserialize_with = "percent_override"
    )]
    #[ts(type = "number | null")]
    pub htn_prediction_index: Derived<u8>,
    #[serde(
        skip_serializing_if = "Derived::is_compute",
        deserialize_with = "percent_override"
    )]
    #[ts(type = "number | null")]
    pub ldl_prediction_index: Derived<u8>,
    #[serde(
        skip_serializing_if = "Derived::is_compute",
        deserialize_with = "percent_override"
    )]
    #[ts(type = "number | null")]
    pub overall_prediction_index: Derived<u8>,
    #[serde(skip_serializing_if = "Derived::is_compute")]
    #[ts(type = "PriorityLevel | null")]
    pub priority_level: Derived<PriorityLevel>,
    #[serde(skip_serializing_if = "Derived::is_compute")]
    #[ts(type = "string | null")]
    pub priority_reason: Derived<String>,
    #[serde(skip_serializing_if = "Derived::is_compute")]
    #[ts(type = "string | null")]
    pub suggested_action: Derived<String>,
    #[serde(
        skip_serializing_if = "Derived::is_compute",
        deserialize_with = "percent_override"
    )]
    #[ts(type = "number | null")]
    pub confidence_score: Derived<u8>,
    #[serde(skip_serializing_if = "Derived::is_compute")]
    #[ts(type = "Array<string> | null")]
    pub risk_factors: Derived<Vec<String>>,

    /// Real follow-up data, when the call center has recorded it.
    pub outcome: Option<PilotOutcomeRecord>,
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn non_negative(value: i32) -> u32 {
    value.max(0) as u32
}

// Out-of-range policy: counts and age clamp at zero, non-finite lab values
// read as absent. Scoring code goes through these accessors only.
impl PatientClinicalRecord {
    pub fn age_years(&self) -> Option<u32> {
        self.age.map(non_negative)
    }

    pub fn visits(&self) -> u32 {
        non_negative(self.visit_count)
    }

    pub fn dm_meds(&self) -> u32 {
        non_negative(self.dm_meds_count)
    }

    pub fn htn_meds(&self) -> u32 {
        non_negative(self.htn_meds_count)
    }

    pub fn dlp_meds(&self) -> u32 {
        non_negative(self.dlp_meds_count)
    }

    pub fn hba1c(&self) -> Option<f64> {
        finite(self.hba1c_percent)
    }

    pub fn ldl(&self) -> Option<f64> {
        finite(self.ldl_mg_dl)
    }

    pub fn systolic(&self) -> Option<f64> {
        finite(self.systolic_bp)
    }

    pub fn diastolic(&self) -> Option<f64> {
        finite(self.diastolic_bp)
    }

    pub fn body_mass_index(&self) -> Option<f64> {
        finite(self.bmi)
    }

    pub fn fasting_glucose(&self) -> Option<f64> {
        finite(self.fasting_glucose_mg_dl)
    }

    /// Number of the three tracked chronic diseases flagged on this record.
    pub fn chronic_condition_count(&self) -> usize {
        [self.has_diabetes, self.has_hypertension, self.has_dyslipidemia]
            .iter()
            .filter(|flag| **flag)
            .count()
    }
}
