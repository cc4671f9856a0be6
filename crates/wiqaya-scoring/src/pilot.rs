//! Seeded simulation of follow-up outcomes for the pilot phase.
//!
//! Until the call center records real outcomes, the dashboard backfills
//! contact/service/satisfaction fields from a hash of the patient ID. The
//! generator is a pure function of its seed, so the same patient always gets
//! the same simulated outcome across reloads and processes.

use jiff::Span;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use wiqaya_core::models::{
    DataSource, PatientClinicalRecord, PilotOutcomeRecord, RiskClassification,
};

const CONTACT_RATE: f64 = 0.61;
const DELIVERY_RATE: f64 = 0.81;
const CONTACT_WINDOW_DAYS: f64 = 90.0;

pub const NON_DELIVERY_REASONS: [&str; 5] = [
    "Patient traveling",
    "Unable to reach by phone",
    "Patient declined service",
    "Scheduling conflict",
    "Receiving care at another facility",
];

/// Rolling `h * 31 + c` hash over UTF-16 code units with 32-bit wraparound,
/// returned as an absolute value.
pub fn hash_patient_id(id: &str) -> u32 {
    let hash = id
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)));
    hash.unsigned_abs()
}

/// Fractional part of `sin(seed) * 10000`, in `[0, 1)`.
pub fn seeded_random(seed: u64) -> f64 {
    let x = (seed as f64).sin() * 10000.0;
    x - x.floor()
}

/// Lab inputs to the risk classification. Blood pressure is the
/// `"systolic/diastolic"` string the screening sheet records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct PilotLabs {
    pub fasting_glucose: Option<f64>,
    pub hba1c: Option<f64>,
    pub ldl: Option<f64>,
    pub blood_pressure: Option<String>,
}

impl From<&PatientClinicalRecord> for PilotLabs {
    fn from(record: &PatientClinicalRecord) -> Self {
        let blood_pressure = match (record.systolic(), record.diastolic()) {
            (Some(sys), Some(dia)) => Some(format!("{sys}/{dia}")),
            _ => None,
        };
        Self {
            fasting_glucose: record.fasting_glucose(),
            hba1c: record.hba1c(),
            ldl: record.ldl(),
            blood_pressure,
        }
    }
}

/// Parse `"sys/dia"`. Returns `None` for anything else.
pub fn parse_blood_pressure(raw: &str) -> Option<(f64, f64)> {
    let (sys, dia) = raw.split_once('/')?;
    let sys = sys.trim().parse::<f64>().ok()?;
    let dia = dia.trim().parse::<f64>().ok()?;
    (sys.is_finite() && dia.is_finite()).then_some((sys, dia))
}

fn tiered(value: f64, high: f64, borderline: f64) -> u32 {
    if value >= high {
        2
    } else if value >= borderline {
        1
    } else {
        0
    }
}

/// Classify screening risk from up to four lab signals.
pub fn classify_risk(labs: &PilotLabs) -> RiskClassification {
    let mut score = 0;
    let mut signals = 0;

    if let Some(fbg) = labs.fasting_glucose.filter(|v| v.is_finite()) {
        score += tiered(fbg, 126.0, 100.0);
        signals += 1;
    }
    if let Some(a1c) = labs.hba1c.filter(|v| v.is_finite()) {
        score += tiered(a1c, 6.5, 5.7);
        signals += 1;
    }
    if let Some(ldl) = labs.ldl.filter(|v| v.is_finite()) {
        score += tiered(ldl, 160.0, 130.0);
        signals += 1;
    }
    if let Some(raw) = labs.blood_pressure.as_deref() {
        match parse_blood_pressure(raw) {
            Some((sys, dia)) => {
                score += if sys >= 140.0 || dia >= 90.0 {
                    2
                } else if sys >= 130.0 || dia >= 80.0 {
                    1
                } else {
                    0
                };
                signals += 1;
            }
            None => tracing::warn!(blood_pressure = raw, "unparseable blood pressure reading"),
        }
    }

    match (signals, score) {
        (0, _) => RiskClassification::Unknown,
        (_, s) if s >= 4 => RiskClassification::AtRisk,
        (_, s) if s >= 2 => RiskClassification::NeedsMonitoring,
        _ => RiskClassification::Normal,
    }
}

/// Simulate a follow-up outcome from a patient hash.
///
/// Four draws at seeds `hash..hash+3` decide contact, delivery, contact date
/// and non-delivery reason; satisfaction scores use `hash+4` and `hash+5`.
/// `reference_date` anchors the 90-day contact window so the result does not
/// depend on the wall clock.
pub fn generate_pilot_outcome(
    hash: u32,
    age: Option<u32>,
    labs: &PilotLabs,
    reference_date: Date,
) -> PilotOutcomeRecord {
    let seed = u64::from(hash);
    let risk_classification = classify_risk(labs);

    let contacted = seeded_random(seed) < CONTACT_RATE;
    if !contacted {
        tracing::debug!(hash, ?age, "pilot outcome: not contacted");
        return PilotOutcomeRecord {
            contacted: false,
            risk_classification,
            ..Default::default()
        };
    }

    let delivered = seeded_random(seed + 1) < DELIVERY_RATE;
    let days_ago = (seeded_random(seed + 2) * CONTACT_WINDOW_DAYS).floor() as i64;
    let contact_date = reference_date.checked_sub(Span::new().days(days_ago)).ok();

    let non_delivery_reason = (!delivered).then(|| {
        let idx = (seeded_random(seed + 3) * NON_DELIVERY_REASONS.len() as f64).floor() as usize;
        NON_DELIVERY_REASONS[idx.min(NON_DELIVERY_REASONS.len() - 1)].to_string()
    });
    let satisfaction =
        |offset: u64| delivered.then(|| 3 + (seeded_random(seed + offset) * 3.0).floor() as u8);

    tracing::debug!(hash, ?age, delivered, days_ago, "pilot outcome: contacted");

    PilotOutcomeRecord {
        contacted: true,
        contact_date,
        service_delivered: Some(delivered),
        non_delivery_reason,
        service_satisfaction: satisfaction(4),
        staff_satisfaction: satisfaction(5),
        risk_classification,
    }
}

/// The outcome to report for a record: real data when recorded, otherwise a
/// simulated one under [`DataSource::Pilot`] and nothing under
/// [`DataSource::Live`].
pub fn outcome_for(
    record: &PatientClinicalRecord,
    source: DataSource,
    reference_date: Date,
) -> Option<PilotOutcomeRecord> {
    match (&record.outcome, source) {
        (Some(outcome), _) => Some(outcome.clone()),
        (None, DataSource::Pilot) => Some(generate_pilot_outcome(
            hash_patient_id(&record.id),
            record.age_years(),
            &PilotLabs::from(record),
            reference_date,
        )),
        (None, DataSource::Live) => None,
    }
}
