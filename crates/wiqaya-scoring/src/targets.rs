use serde::{Deserialize, Serialize};
use ts_rs::TS;
use wiqaya_core::models::{
    BpTarget, PatientClinicalRecord, PatientTargets, TargetBand, TargetStatus,
};

/// The inputs the target tables depend on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct PatientProfile {
    pub age: Option<i32>,
    pub has_diabetes: bool,
    pub has_hypertension: bool,
    pub has_dyslipidemia: bool,
    pub has_ascvd: bool,
    pub has_ckd: bool,
    pub has_heart_failure: bool,
}

impl PatientProfile {
    /// Unknown or negative ages fall into the youngest bracket.
    fn age(&self) -> i32 {
        self.age.unwrap_or(0).max(0)
    }

    /// Comorbidities counted for HbA1c relaxation in older patients.
    fn comorbidity_count(&self) -> usize {
        [
            self.has_hypertension,
            self.has_dyslipidemia,
            self.has_ascvd,
            self.has_ckd,
            self.has_heart_failure,
        ]
        .iter()
        .filter(|flag| **flag)
        .count()
    }

    fn has_cardiorenal_disease(&self) -> bool {
        self.has_ascvd || self.has_ckd || self.has_heart_failure
    }
}

impl From<&PatientClinicalRecord> for PatientProfile {
    fn from(record: &PatientClinicalRecord) -> Self {
        Self {
            age: record.age,
            has_diabetes: record.has_diabetes,
            has_hypertension: record.has_hypertension,
            has_dyslipidemia: record.has_dyslipidemia,
            has_ascvd: record.has_ascvd,
            has_ckd: record.has_ckd,
            has_heart_failure: record.has_heart_failure,
        }
    }
}

fn band(display: &str, ceiling: f64, description: &str) -> TargetBand {
    TargetBand {
        display: display.to_string(),
        ceiling,
        description: description.to_string(),
    }
}

fn bp(systolic: f64, diastolic: f64, description: &str) -> BpTarget {
    BpTarget {
        display: format!("<{systolic}/{diastolic}"),
        systolic,
        diastolic,
        description: description.to_string(),
    }
}

/// Compute the clinical targets for a patient profile. Total: every profile,
/// including one with nothing known, gets a full set of targets.
pub fn compute_targets(profile: &PatientProfile) -> PatientTargets {
    PatientTargets {
        hba1c: hba1c_target(profile),
        blood_pressure: bp_target(profile),
        ldl: ldl_target(profile),
        fasting_glucose: fasting_glucose_target(profile),
    }
}

fn hba1c_target(profile: &PatientProfile) -> TargetBand {
    if !profile.has_diabetes {
        return band("<5.7%", 5.7, "normal (no diabetes)");
    }

    let age = profile.age();
    let multiple = profile.comorbidity_count() >= 2;
    match age {
        a if a < 40 => band("<6.5%", 6.5, "young healthy"),
        a if a < 65 => band("<7%", 7.0, "adult standard"),
        a if a < 70 => {
            if multiple {
                band("<7.7%", 7.7, "elderly + comorbidities")
            } else {
                band("<7.5%", 7.5, "older adult")
            }
        }
        _ => {
            if multiple {
                band("<8%", 8.0, "elderly + multiple conditions")
            } else {
                band("<7.5%", 7.5, "elderly")
            }
        }
    }
}

fn bp_target(profile: &PatientProfile) -> BpTarget {
    let age = profile.age();
    if age < 65 {
        bp(130.0, 80.0, "adult standard")
    } else if age < 75 && profile.has_cardiorenal_disease() {
        bp(120.0, 80.0, "high cardiovascular risk")
    } else if age < 80 {
        bp(140.0, 80.0, "older adult")
    } else {
        bp(150.0, 90.0, "very elderly")
    }
}

fn ldl_target(profile: &PatientProfile) -> TargetBand {
    if profile.has_ascvd {
        band("<55 mg/dL", 55.0, "very high risk (ASCVD)")
    } else if profile.has_diabetes && (profile.has_hypertension || profile.has_dyslipidemia) {
        band("<70 mg/dL", 70.0, "high risk (diabetes + risk factor)")
    } else {
        band("<100 mg/dL", 100.0, "standard")
    }
}

fn fasting_glucose_target(profile: &PatientProfile) -> TargetBand {
    if profile.has_diabetes {
        band("<130 mg/dL", 130.0, "diabetic target")
    } else {
        band("<100 mg/dL", 100.0, "normal")
    }
}

/// Place a reading relative to its target ceiling. Within 10% above the
/// ceiling counts as near target.
pub fn classify_against_target(value: Option<f64>, ceiling: f64) -> TargetStatus {
    match value {
        None => TargetStatus::NoReading,
        Some(v) if v < ceiling => TargetStatus::AtTarget,
        Some(v) if v <= ceiling * 1.1 => TargetStatus::NearTarget,
        Some(_) => TargetStatus::NeedsImprovement,
    }
}

/// Blood pressure needs both readings. At target only when both are under
/// their ceilings; near target when systolic is within +10 mmHg and diastolic
/// within +5 mmHg.
pub fn classify_bp_against_target(
    systolic: Option<f64>,
    diastolic: Option<f64>,
    target: &BpTarget,
) -> TargetStatus {
    let (Some(sys), Some(dia)) = (systolic, diastolic) else {
        return TargetStatus::NoReading;
    };

    if sys < target.systolic && dia < target.diastolic {
        TargetStatus::AtTarget
    } else if sys <= target.systolic + 10.0 && dia <= target.diastolic + 5.0 {
        TargetStatus::NearTarget
    } else {
        TargetStatus::NeedsImprovement
    }
}

/// A record's readings classified against its own targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TargetEvaluation {
    pub targets: PatientTargets,
    pub hba1c: TargetStatus,
    pub blood_pressure: TargetStatus,
    pub ldl: TargetStatus,
    pub fasting_glucose: TargetStatus,
}

impl TargetEvaluation {
    /// Every reading that exists is at target, and at least one exists.
    pub fn all_at_target(&self) -> bool {
        let statuses = [
            self.hba1c,
            self.blood_pressure,
            self.ldl,
            self.fasting_glucose,
        ];
        statuses.iter().any(|s| *s != TargetStatus::NoReading)
            && statuses
                .iter()
                .all(|s| matches!(s, TargetStatus::AtTarget | TargetStatus::NoReading))
    }
}

pub fn evaluate_targets(record: &PatientClinicalRecord) -> TargetEvaluation {
    let targets = compute_targets(&PatientProfile::from(record));
    TargetEvaluation {
        hba1c: classify_against_target(record.hba1c(), targets.hba1c.ceiling),
        blood_pressure: classify_bp_against_target(
            record.systolic(),
            record.diastolic(),
            &targets.blood_pressure,
        ),
        ldl: classify_against_target(record.ldl(), targets.ldl.ceiling),
        fasting_glucose: classify_against_target(
            record.fasting_glucose(),
            targets.fasting_glucose.ceiling,
        ),
        targets,
    }
}
