//! # PTUI Models
//!
//! Wire and domain models for the patient-treatment UI core.
//!
//! This crate contains pure data types shared by every controller:
//! - The [`PatientStatusCriteria`] record and its closed category enumerations
//! - Patient and treatment records with their paginated wrappers
//! - Service health and metadata models
//!
//! **No behaviour**: controllers live in `ptui-core`, collaborator seams in
//! `ptui-api`. Everything here serialises to the exact wire tokens of the
//! backing API.

pub mod criteria;
pub mod health;
pub mod patient;
pub mod treatment;

pub use criteria::{
    AgeRangeOption, BarthelIndex, ClinicalRiskGroupOption, CognitiveImpairmentLevel,
    DiscomfortDegree, LawtonIndex, NitLevel, PatientStatusCriteria, SpictScale, SurvivalOption,
    YesNoUnknownOption,
};
pub use health::{HealthCheck, HealthInfo, HealthStatus, Info};
pub use patient::{MinPatient, MinPatientPage, Patient};
pub use treatment::{
    MinTreatment, MinTreatmentPage, Treatment, TreatmentAction, TreatmentActionFeedback,
    TreatmentActionWithFeedback, TreatmentToAdd, TreatmentValue,
};

/// Errors that can occur when parsing wire tokens into model enumerations.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The token does not name any member of the target enumeration.
    #[error("unknown wire token: {0}")]
    Unknown(String),
}
