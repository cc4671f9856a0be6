use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use wiqaya_core::models::{
    DataSource, PatientClinicalRecord, PilotOutcomeRecord, PredictionResult, PriorityLevel,
    RiskClassification,
};

use crate::pilot::outcome_for;
use crate::prediction::generate_prediction;
use crate::round_percent;

/// Injected at construction; the aggregator never reads the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AggregatorConfig {
    pub data_source: DataSource,
    /// Anchor for simulated contact dates.
    pub reference_date: Date,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriorityDistribution {
    pub consultant_plus_educator: u32,
    pub high_priority: u32,
    pub routine: u32,
}

impl PriorityDistribution {
    fn record(&mut self, level: PriorityLevel) {
        match level {
            PriorityLevel::ConsultantPlusEducator => self.consultant_plus_educator += 1,
            PriorityLevel::HighPriority => self.high_priority += 1,
            PriorityLevel::Routine => self.routine += 1,
        }
    }

    pub fn get(&self, level: PriorityLevel) -> u32 {
        match level {
            PriorityLevel::ConsultantPlusEducator => self.consultant_plus_educator,
            PriorityLevel::HighPriority => self.high_priority,
            PriorityLevel::Routine => self.routine,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskDistribution {
    pub unknown: u32,
    pub normal: u32,
    pub needs_monitoring: u32,
    pub at_risk: u32,
}

impl RiskDistribution {
    fn record(&mut self, class: RiskClassification) {
        match class {
            RiskClassification::Unknown => self.unknown += 1,
            RiskClassification::Normal => self.normal += 1,
            RiskClassification::NeedsMonitoring => self.needs_monitoring += 1,
            RiskClassification::AtRisk => self.at_risk += 1,
        }
    }
}

/// Follow-up funnel over every record that has (real or simulated) outcome data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OutcomeStatistics {
    pub with_outcome: u32,
    pub contacted: u32,
    pub service_delivered: u32,
    /// Percent of records with outcome data that were contacted.
    pub contact_rate: u8,
    /// Percent of contacted records that received the service.
    pub delivery_rate: u8,
    pub avg_service_satisfaction: f64,
    pub avg_staff_satisfaction: f64,
    pub risk_distribution: RiskDistribution,
    pub non_delivery_reasons: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AggregateStatistics {
    pub patient_count: u32,
    pub avg_dm_index: u8,
    pub avg_htn_index: u8,
    pub avg_ldl_index: u8,
    pub avg_confidence: u8,
    pub priority_distribution: PriorityDistribution,
    pub outcomes: OutcomeStatistics,
}

/// A record's prediction, for the triage worklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RankedPatient {
    pub id: String,
    pub name: String,
    pub prediction: PredictionResult,
}

#[derive(Debug, Default, Clone, Copy)]
struct Mean {
    sum: f64,
    count: u32,
}

impl Mean {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn value(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / f64::from(self.count))
    }

    fn percent(&self) -> u8 {
        self.value().map(round_percent).unwrap_or(0)
    }

    fn one_decimal(&self) -> f64 {
        self.value()
            .map(|v| (v * 10.0).round() / 10.0)
            .unwrap_or(0.0)
    }
}

fn rate(part: u32, whole: u32) -> u8 {
    if whole == 0 {
        return 0;
    }
    round_percent(f64::from(part) / f64::from(whole) * 100.0)
}

#[derive(Debug, Clone)]
pub struct Aggregator {
    config: AggregatorConfig,
}

impl Aggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Score every record once and reduce to dashboard aggregates.
    pub fn aggregate(&self, records: &[PatientClinicalRecord]) -> AggregateStatistics {
        let mut dm = Mean::default();
        let mut htn = Mean::default();
        let mut ldl = Mean::default();
        let mut confidence = Mean::default();
        let mut priorities = PriorityDistribution::default();
        let mut outcomes = OutcomeAccumulator::default();

        for record in records {
            let prediction = generate_prediction(record);

            if record.has_diabetes && prediction.dm_prediction_index > 0 {
                dm.add(f64::from(prediction.dm_prediction_index));
            }
            if record.has_hypertension && prediction.htn_prediction_index > 0 {
                htn.add(f64::from(prediction.htn_prediction_index));
            }
            if record.has_dyslipidemia && prediction.ldl_prediction_index > 0 {
                ldl.add(f64::from(prediction.ldl_prediction_index));
            }
            if prediction.confidence_score > 0 {
                confidence.add(f64::from(prediction.confidence_score));
            }
            priorities.record(prediction.priority_level);

            if let Some(outcome) =
                outcome_for(record, self.config.data_source, self.config.reference_date)
            {
                outcomes.add(&outcome);
            }
        }

        let stats = AggregateStatistics {
            patient_count: records.len() as u32,
            avg_dm_index: dm.percent(),
            avg_htn_index: htn.percent(),
            avg_ldl_index: ldl.percent(),
            avg_confidence: confidence.percent(),
            priority_distribution: priorities,
            outcomes: outcomes.finish(),
        };

        tracing::info!(
            patients = stats.patient_count,
            data_source = %self.config.data_source,
            consultant = stats.priority_distribution.consultant_plus_educator,
            high = stats.priority_distribution.high_priority,
            routine = stats.priority_distribution.routine,
            "aggregated statistics"
        );

        stats
    }

    /// Predictions ordered for the triage worklist: highest priority first,
    /// then highest overall index, then patient ID.
    pub fn prioritize(&self, records: &[PatientClinicalRecord]) -> Vec<RankedPatient> {
        let mut ranked: Vec<RankedPatient> = records
            .iter()
            .map(|record| RankedPatient {
                id: record.id.clone(),
                name: record.name.clone(),
                prediction: generate_prediction(record),
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.prediction
                .priority_level
                .cmp(&a.prediction.priority_level)
                .then_with(|| {
                    b.prediction
                        .overall_prediction_index
                        .cmp(&a.prediction.overall_prediction_index)
                })
                .then_with(|| a.id.cmp(&b.id))
        });
        ranked
    }
}

#[derive(Debug, Default)]
struct OutcomeAccumulator {
    with_outcome: u32,
    contacted: u32,
    delivered: u32,
    service_satisfaction: Mean,
    staff_satisfaction: Mean,
    risk: RiskDistribution,
    reasons: BTreeMap<String, u32>,
}

impl OutcomeAccumulator {
    fn add(&mut self, outcome: &PilotOutcomeRecord) {
        self.with_outcome += 1;
        self.risk.record(outcome.risk_classification);

        if !outcome.contacted {
            return;
        }
        self.contacted += 1;
        if outcome.service_delivered == Some(true) {
            self.delivered += 1;
        }
        if let Some(score) = outcome.service_satisfaction {
            self.service_satisfaction.add(f64::from(score));
        }
        if let Some(score) = outcome.staff_satisfaction {
            self.staff_satisfaction.add(f64::from(score));
        }
        if let Some(reason) = &outcome.non_delivery_reason {
            *self.reasons.entry(reason.clone()).or_insert(0) += 1;
        }
    }

    fn finish(self) -> OutcomeStatistics {
        OutcomeStatistics {
            with_outcome: self.with_outcome,
            contacted: self.contacted,
            service_delivered: self.delivered,
            contact_rate: rate(self.contacted, self.with_outcome),
            delivery_rate: rate(self.delivered, self.contacted),
            avg_service_satisfaction: self.service_satisfaction.one_decimal(),
            avg_staff_satisfaction: self.staff_satisfaction.one_decimal(),
            risk_distribution: self.risk,
            non_delivery_reasons: self.reasons,
        }
    }
}
