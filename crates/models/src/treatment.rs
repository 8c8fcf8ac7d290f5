//! Treatment records: actions, feedback, alignment values and pages.

use crate::criteria::PatientStatusCriteria;
use crate::patient::MinPatient;
use crate::TokenError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An action that can be applied to a patient as part of a treatment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TreatmentAction {
    Cpr,
    Transplant,
    Icu,
    Nimv,
    VasoactiveDrugs,
    Dialysis,
    SimpleClinicalTrial,
    MediumClinicalTrial,
    AdvancedClinicalTrial,
    PalliativeSurgery,
    CureSurgery,
}

impl TreatmentAction {
    /// The ordered member list, as rendered in the treatment wizard toggles.
    pub const ALL: [Self; 11] = [
        Self::Cpr,
        Self::Transplant,
        Self::Icu,
        Self::Nimv,
        Self::VasoactiveDrugs,
        Self::Dialysis,
        Self::SimpleClinicalTrial,
        Self::MediumClinicalTrial,
        Self::AdvancedClinicalTrial,
        Self::PalliativeSurgery,
        Self::CureSurgery,
    ];

    /// The wire token for this action.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cpr => "CPR",
            Self::Transplant => "TRANSPLANT",
            Self::Icu => "ICU",
            Self::Nimv => "NIMV",
            Self::VasoactiveDrugs => "VASOACTIVE_DRUGS",
            Self::Dialysis => "DIALYSIS",
            Self::SimpleClinicalTrial => "SIMPLE_CLINICAL_TRIAL",
            Self::MediumClinicalTrial => "MEDIUM_CLINICAL_TRIAL",
            Self::AdvancedClinicalTrial => "ADVANCED_CLINICAL_TRIAL",
            Self::PalliativeSurgery => "PALLIATIVE_SURGERY",
            Self::CureSurgery => "CURE_SURGERY",
        }
    }

    /// The human-readable name of the action.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cpr => "Cardiopulmonary resuscitation (CPR)",
            Self::Transplant => "Transplant",
            Self::Icu => "Intense care unit (ICU)",
            Self::Nimv => "Non-invasive mechanical ventilation (NIMV)",
            Self::VasoactiveDrugs => "Vasoactive drugs",
            Self::Dialysis => "Dialysis",
            Self::SimpleClinicalTrial => {
                "Simple clinical trials: X-rays / Analytics / Cultures / Antibodies"
            }
            Self::MediumClinicalTrial => {
                "Medium clinical trials: Computed tomography / Transfusion / Peripherally placed central catheter / Enteral administration"
            }
            Self::AdvancedClinicalTrial => {
                "Advanced clinical trials: MRI / Endoscopy / Parenteral nutrition"
            }
            Self::PalliativeSurgery => "Palliative surgery",
            Self::CureSurgery => "Cure surgery",
        }
    }
}

impl FromStr for TreatmentAction {
    type Err = TokenError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|action| action.as_str() == token)
            .ok_or_else(|| TokenError::Unknown(token.to_owned()))
    }
}

/// The outcome reported for a treatment action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TreatmentActionFeedback {
    Allow,
    Deny,
    Unknown,
}

impl TreatmentActionFeedback {
    pub const ALL: [Self; 3] = [Self::Allow, Self::Deny, Self::Unknown];
}

/// A treatment action paired with the feedback reported for it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentActionWithFeedback {
    /// The action to do over the patient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<TreatmentAction>,

    /// The feedback associated to the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<TreatmentActionFeedback>,

    /// The epoch time, in seconds, when this action was updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<i64>,
}

/// The alignment of a treatment with a named ethical value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentValue {
    /// The name of the value.
    #[serde(default)]
    pub name: String,

    /// How well the treatment aligns with the value, conceptually in [-1, 1].
    #[serde(default)]
    pub alignment: f64,

    /// The epoch time, in seconds, when this value was updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<i64>,
}

impl TreatmentValue {
    /// The human-readable name of the value. Unrecognised names pass through
    /// unchanged.
    pub fn label(&self) -> &str {
        match self.name.as_str() {
            "beneficence" => "Beneficence",
            "nonmaleficence" => "Nonmaleficence",
            "autonomy" => "Autonomy",
            "justice" => "Justice",
            other => other,
        }
    }
}

/// The minimal information of a treatment, as listed in search results.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinTreatment {
    /// The identifier of the treatment, or `None` if it is not stored yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// The patient the treatment is applied to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<MinPatient>,
}

/// One page of treatments that satisfy a search query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinTreatmentPage {
    /// The number of treatments that satisfy the query, across all pages.
    #[serde(default)]
    pub total: u64,

    /// The treatments on the requested page.
    #[serde(default)]
    pub treatments: Vec<MinTreatment>,
}

/// A treatment applied to a patient, bracketed by its before and expected
/// status.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    /// The identifier of the treatment, or `None` if it is not stored yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// The epoch time, in seconds, when the treatment was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<i64>,

    /// The patient the treatment is applied to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<MinPatient>,

    /// The status of the patient before applying the treatment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_status: Option<PatientStatusCriteria>,

    /// The actions to apply over the patient, with any reported feedback.
    #[serde(default)]
    pub actions: Vec<TreatmentActionWithFeedback>,

    /// The alignment of the treatment with the known ethical values.
    #[serde(default)]
    pub values: Vec<TreatmentValue>,

    /// The expected status of the patient after applying the treatment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_status: Option<PatientStatusCriteria>,
}

/// The payload to create a new treatment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentToAdd {
    /// The identifier of the patient the treatment has to be applied to.
    pub patient_id: i64,

    /// The status of the patient before applying the treatment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_status: Option<PatientStatusCriteria>,

    /// The actions to apply over the patient, in declaration order.
    pub actions: Vec<TreatmentAction>,

    /// The expected status of the patient after applying the treatment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_status: Option<PatientStatusCriteria>,
}
