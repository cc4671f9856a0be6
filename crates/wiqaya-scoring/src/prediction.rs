use wiqaya_core::models::{
    Derived, PatientClinicalRecord, PredictionResult, PriorityLevel, RegistrationStatus,
};

use crate::round_percent;

pub const ACTION_CONSULTANT: &str = "Immediate referral to consultant + health educator session";
pub const ACTION_HIGH_PRIORITY: &str = "Physician follow-up within two weeks";
pub const ACTION_ROUTINE: &str = "Routine follow-up per schedule";
pub const REASON_ROUTINE: &str = "normal indicators";
pub const REASON_IMPORTED: &str = "priority assigned at import";

/// Default suggested action for a priority tier.
pub fn default_action(level: PriorityLevel) -> &'static str {
    match level {
        PriorityLevel::ConsultantPlusEducator => ACTION_CONSULTANT,
        PriorityLevel::HighPriority => ACTION_HIGH_PRIORITY,
        PriorityLevel::Routine => ACTION_ROUTINE,
    }
}

// ── Disease indices ──────────────────────────────────────────────────

fn capped(count: u32, per_unit: u32, cap: u32) -> u32 {
    count.saturating_mul(per_unit).min(cap)
}

pub fn registration_score(status: &RegistrationStatus) -> u32 {
    match status {
        RegistrationStatus::RegisteredEligible => 20,
        RegistrationStatus::Registered => 15,
        RegistrationStatus::TwoVisits => 10,
        RegistrationStatus::OneVisit => 5,
        RegistrationStatus::Other(_) | RegistrationStatus::None => 0,
    }
}

fn hba1c_score(hba1c: Option<f64>) -> u32 {
    match hba1c {
        None => 15,
        Some(v) if v < 7.0 => 30,
        Some(v) if v < 8.0 => 20,
        Some(v) if v < 9.0 => 10,
        Some(_) => 0,
    }
}

/// Diabetes control index: visits (30) + registration (20) + meds (20) + HbA1c (30).
pub fn diabetes_index(record: &PatientClinicalRecord) -> u8 {
    if !record.has_diabetes {
        return 0;
    }
    let score = capped(record.visits(), 5, 30)
        + registration_score(&record.registration_status)
        + capped(record.dm_meds(), 10, 20)
        + hba1c_score(record.hba1c());
    score.min(100) as u8
}

/// Blood pressure stage, mildest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BpStage {
    Normal,
    Elevated,
    Stage1,
    Stage2,
    Crisis,
}

impl BpStage {
    fn from_systolic(sys: f64) -> Self {
        match sys {
            s if s < 120.0 => BpStage::Normal,
            s if s < 130.0 => BpStage::Elevated,
            s if s < 140.0 => BpStage::Stage1,
            s if s < 160.0 => BpStage::Stage2,
            _ => BpStage::Crisis,
        }
    }

    fn from_diastolic(dia: f64) -> Self {
        match dia {
            d if d < 80.0 => BpStage::Normal,
            d if d < 90.0 => BpStage::Stage1,
            d if d < 100.0 => BpStage::Stage2,
            _ => BpStage::Crisis,
        }
    }

    /// The worse of the two stages. A missing side does not contribute;
    /// `None` when neither reading is known.
    pub fn classify(systolic: Option<f64>, diastolic: Option<f64>) -> Option<Self> {
        let sys = systolic.map(Self::from_systolic);
        let dia = diastolic.map(Self::from_diastolic);
        sys.into_iter().chain(dia).max()
    }

    fn score(self) -> u32 {
        match self {
            BpStage::Normal => 50,
            BpStage::Elevated => 40,
            BpStage::Stage1 => 30,
            BpStage::Stage2 => 15,
            BpStage::Crisis => 0,
        }
    }
}

/// Hypertension control index: visits (25) + meds (25) + BP stage (50).
pub fn hypertension_index(record: &PatientClinicalRecord) -> u8 {
    if !record.has_hypertension {
        return 0;
    }
    let bp_score = BpStage::classify(record.systolic(), record.diastolic())
        .map(BpStage::score)
        .unwrap_or(25);
    let score = capped(record.visits(), 5, 25) + capped(record.htn_meds(), 10, 25) + bp_score;
    score.min(100) as u8
}

fn ldl_score(ldl: Option<f64>) -> u32 {
    match ldl {
        None => 25,
        Some(v) if v < 100.0 => 50,
        Some(v) if v < 130.0 => 40,
        Some(v) if v < 160.0 => 25,
        Some(v) if v < 190.0 => 10,
        Some(_) => 0,
    }
}

fn bmi_score(bmi: Option<f64>) -> u32 {
    match bmi {
        None => 10,
        Some(v) if v < 25.0 => 20,
        Some(v) if v < 30.0 => 10,
        Some(_) => 0,
    }
}

/// Dyslipidemia control index: meds (30) + LDL (50) + BMI (20).
pub fn dyslipidemia_index(record: &PatientClinicalRecord) -> u8 {
    if !record.has_dyslipidemia {
        return 0;
    }
    let score = capped(record.dlp_meds(), 15, 30)
        + ldl_score(record.ldl())
        + bmi_score(record.body_mass_index());
    score.min(100) as u8
}

/// Mean of the non-zero indices for diseases the patient has. Absent
/// diseases are left out entirely rather than counted as zero.
pub fn overall_index(record: &PatientClinicalRecord, dm: u8, htn: u8, ldl: u8) -> u8 {
    let present: Vec<f64> = [
        (record.has_diabetes, dm),
        (record.has_hypertension, htn),
        (record.has_dyslipidemia, ldl),
    ]
    .iter()
    .filter(|(has, index)| *has && *index > 0)
    .map(|(_, index)| f64::from(*index))
    .collect();

    if present.is_empty() {
        return 0;
    }
    round_percent(present.iter().sum::<f64>() / present.len() as f64)
}

// ── Priority cascade ─────────────────────────────────────────────────

/// Outcome of the triage cascade.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityAssessment {
    pub level: PriorityLevel,
    pub reason: String,
    pub action: String,
}

struct Tier {
    level: PriorityLevel,
    hba1c: f64,
    ldl: f64,
    systolic: f64,
}

/// Checked top to bottom; the first tier with any firing threshold wins.
const CASCADE: [Tier; 2] = [
    Tier {
        level: PriorityLevel::ConsultantPlusEducator,
        hba1c: 12.0,
        ldl: 190.0,
        systolic: 180.0,
    },
    Tier {
        level: PriorityLevel::HighPriority,
        hba1c: 9.0,
        ldl: 160.0,
        systolic: 160.0,
    },
];

pub fn classify_priority(record: &PatientClinicalRecord) -> PriorityAssessment {
    let hba1c = record.hba1c();
    let ldl = record.ldl();
    let systolic = record.systolic();

    for tier in &CASCADE {
        let mut triggers = Vec::new();
        if let Some(v) = hba1c.filter(|v| *v >= tier.hba1c) {
            triggers.push(format!("HbA1c={v}%"));
        }
        if let Some(v) = ldl.filter(|v| *v >= tier.ldl) {
            triggers.push(format!("LDL={v} mg/dL"));
        }
        if let Some(v) = systolic.filter(|v| *v >= tier.systolic) {
            triggers.push(format!("SBP={v} mmHg"));
        }

        if !triggers.is_empty() {
            return PriorityAssessment {
                level: tier.level,
                reason: triggers.join(", "),
                action: default_action(tier.level).to_string(),
            };
        }
    }

    PriorityAssessment {
        level: PriorityLevel::Routine,
        reason: REASON_ROUTINE.to_string(),
        action: ACTION_ROUTINE.to_string(),
    }
}

// ── Risk factors and confidence ──────────────────────────────────────

pub fn risk_factors(record: &PatientClinicalRecord) -> Vec<String> {
    let mut factors = Vec::new();
    if let Some(v) = record.hba1c().filter(|v| *v >= 7.0) {
        factors.push(format!("HbA1c elevated ({v}%)"));
    }
    if let Some(v) = record.ldl().filter(|v| *v >= 130.0) {
        factors.push(format!("LDL elevated ({v} mg/dL)"));
    }
    if let Some(v) = record.systolic().filter(|v| *v >= 140.0) {
        factors.push(format!("High blood pressure ({v} mmHg)"));
    }
    if let Some(v) = record.body_mass_index().filter(|v| *v >= 30.0) {
        factors.push(format!("Obesity (BMI {v})"));
    }
    if let Some(age) = record.age_years().filter(|a| *a >= 65) {
        factors.push(format!("Age {age} years"));
    }
    let conditions = record.chronic_condition_count();
    if conditions >= 3 {
        factors.push(format!("Multiple chronic conditions ({conditions})"));
    }
    factors
}

/// Weighted data completeness, as a percentage.
pub fn confidence_score(record: &PatientClinicalRecord) -> u8 {
    let any_meds = [record.dm_meds(), record.htn_meds(), record.dlp_meds()]
        .iter()
        .any(|count| *count > 0);
    let signals = [
        (record.hba1c().is_some(), 20.0),
        (record.ldl().is_some(), 15.0),
        (record.systolic().is_some(), 15.0),
        (record.body_mass_index().is_some(), 10.0),
        (record.visits() > 0, 20.0),
        (any_meds, 20.0),
    ];

    let total: f64 = signals.iter().map(|(_, w)| w).sum();
    let present: f64 = signals.iter().filter(|(p, _)| *p).map(|(_, w)| w).sum();
    round_percent(present / total * 100.0)
}

// ── Entry point ──────────────────────────────────────────────────────

/// Score one record. Any field the record already carries as `Provided` is
/// returned as-is instead of being recomputed.
pub fn generate_prediction(record: &PatientClinicalRecord) -> PredictionResult {
    let dm = resolve_index(&record.dm_prediction_index, || diabetes_index(record));
    let htn = resolve_index(&record.htn_prediction_index, || hypertension_index(record));
    let ldl = resolve_index(&record.ldl_prediction_index, || dyslipidemia_index(record));
    let overall = resolve_index(&record.overall_prediction_index, || {
        overall_index(record, dm, htn, ldl)
    });

    let PriorityAssessment {
        level,
        reason,
        action,
    } = match &record.priority_level {
        Derived::Provided(level) => PriorityAssessment {
            level: *level,
            reason: REASON_IMPORTED.to_string(),
            action: default_action(*level).to_string(),
        },
        Derived::Compute => classify_priority(record),
    };
    let reason = record.priority_reason.clone().resolve(|| reason);
    let action = record.suggested_action.clone().resolve(|| action);

    let confidence = resolve_index(&record.confidence_score, || confidence_score(record));
    let factors = record.risk_factors.clone().resolve(|| risk_factors(record));

    tracing::debug!(
        patient_id = %record.id,
        dm,
        htn,
        ldl,
        overall,
        priority = %level,
        confidence,
        "generated prediction"
    );

    PredictionResult {
        dm_prediction_index: dm,
        htn_prediction_index: htn,
        ldl_prediction_index: ldl,
        overall_prediction_index: overall,
        priority_level: level,
        priority_reason: reason,
        suggested_action: action,
        confidence_score: confidence,
        risk_factors: factors,
    }
}

fn resolve_index(provided: &Derived<u8>, compute: impl FnOnce() -> u8) -> u8 {
    provided.clone().resolve(compute).min(100)
}
