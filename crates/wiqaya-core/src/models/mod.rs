pub mod derived;
pub mod outcome;
pub mod patient;
pub mod prediction;
pub mod registration;
pub mod targets;
pub mod wire;

pub use derived::Derived;
pub use outcome::{DataSource, PilotOutcomeRecord, RiskClassification};
pub use patient::{Gender, PatientClinicalRecord};
pub use prediction::{PredictionResult, PriorityLevel};
pub use registration::RegistrationStatus;
pub use targets::{BpTarget, PatientTargets, TargetBand, TargetStatus};
