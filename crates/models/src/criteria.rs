//! The patient status criteria record and its category enumerations.
//!
//! Every category is a closed enumeration with an explicit `Unknown` member
//! where the clinical form offers one (the therapeutic-intensity level does
//! not). Each enumeration carries its ordered member list (`ALL`) and a
//! human-readable option label; the label lookup is an exhaustive `match`, so
//! adding a member without a label fails to compile instead of rendering an
//! empty radio option.

use serde::{Deserialize, Serialize};

/// The range of age of a patient status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeRangeOption {
    #[serde(rename = "AGE_BETWEEN_0_AND_19")]
    AgeBetween0And19,
    #[serde(rename = "AGE_BETWEEN_20_AND_29")]
    AgeBetween20And29,
    #[serde(rename = "AGE_BETWEEN_30_AND_39")]
    AgeBetween30And39,
    #[serde(rename = "AGE_BETWEEN_40_AND_49")]
    AgeBetween40And49,
    #[serde(rename = "AGE_BETWEEN_50_AND_59")]
    AgeBetween50And59,
    #[serde(rename = "AGE_BETWEEN_60_AND_69")]
    AgeBetween60And69,
    #[serde(rename = "AGE_BETWEEN_70_AND_79")]
    AgeBetween70And79,
    #[serde(rename = "AGE_BETWEEN_80_AND_89")]
    AgeBetween80And89,
    #[serde(rename = "AGE_BETWEEN_90_AND_99")]
    AgeBetween90And99,
    #[serde(rename = "AGE_MORE_THAN_99")]
    AgeMoreThan99,
}

impl AgeRangeOption {
    /// The ordered member list, as rendered in the age range radio group.
    pub const ALL: [Self; 10] = [
        Self::AgeBetween0And19,
        Self::AgeBetween20And29,
        Self::AgeBetween30And39,
        Self::AgeBetween40And49,
        Self::AgeBetween50And59,
        Self::AgeBetween60And69,
        Self::AgeBetween70And79,
        Self::AgeBetween80And89,
        Self::AgeBetween90And99,
        Self::AgeMoreThan99,
    ];

    /// The human-readable option name.
    pub fn label(self) -> &'static str {
        match self {
            Self::AgeBetween0And19 => "0 - 19",
            Self::AgeBetween20And29 => "20 - 29",
            Self::AgeBetween30And39 => "30 - 39",
            Self::AgeBetween40And49 => "40 - 49",
            Self::AgeBetween50And59 => "50 - 59",
            Self::AgeBetween60And69 => "60 - 69",
            Self::AgeBetween70And79 => "70 - 79",
            Self::AgeBetween80And89 => "80 - 89",
            Self::AgeBetween90And99 => "90 - 99",
            Self::AgeMoreThan99 => "+99",
        }
    }
}

/// The answer to a yes/no clinical question where the answer may be unknown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum YesNoUnknownOption {
    Yes,
    No,
    Unknown,
}

impl YesNoUnknownOption {
    pub const ALL: [Self; 3] = [Self::Yes, Self::No, Self::Unknown];

    /// The human-readable option name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Unknown => "Unknown",
        }
    }
}

/// The expected survival time for a patient status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurvivalOption {
    #[serde(rename = "LESS_THAN_12_MONTHS")]
    LessThan12Months,
    #[serde(rename = "MORE_THAN_12_MONTHS")]
    MoreThan12Months,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl SurvivalOption {
    pub const ALL: [Self; 3] = [Self::LessThan12Months, Self::MoreThan12Months, Self::Unknown];

    /// The human-readable option name.
    pub fn label(self) -> &'static str {
        match self {
            Self::LessThan12Months => "< 12 months",
            Self::MoreThan12Months => "> 12 months",
            Self::Unknown => "Unknown",
        }
    }
}

/// The SPICT frailty scale of a patient status (the `frailVIG` criterion).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpictScale {
    Low,
    Moderate,
    High,
    Unknown,
}

impl SpictScale {
    pub const ALL: [Self; 4] = [Self::Low, Self::Moderate, Self::High, Self::Unknown];

    /// The human-readable option name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::Unknown => "Unknown",
        }
    }
}

/// The clinical risk group classification of a patient status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClinicalRiskGroupOption {
    PromotionAndPrevention,
    SelfManagementSupport,
    IllnessManagement,
    CaseManagement,
    Unknown,
}

impl ClinicalRiskGroupOption {
    pub const ALL: [Self; 5] = [
        Self::PromotionAndPrevention,
        Self::SelfManagementSupport,
        Self::IllnessManagement,
        Self::CaseManagement,
        Self::Unknown,
    ];

    /// The human-readable option name.
    pub fn label(self) -> &'static str {
        match self {
            Self::PromotionAndPrevention => "0 Promotion & Prevention",
            Self::SelfManagementSupport => "1 Self-management support",
            Self::IllnessManagement => "2 Illness management",
            Self::CaseManagement => "3 Case management",
            Self::Unknown => "Unknown",
        }
    }
}

/// The Barthel index: independence for basic activities of daily living.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BarthelIndex {
    Total,
    Severe,
    Moderate,
    Mild,
    Independent,
    Unknown,
}

impl BarthelIndex {
    pub const ALL: [Self; 6] = [
        Self::Total,
        Self::Severe,
        Self::Moderate,
        Self::Mild,
        Self::Independent,
        Self::Unknown,
    ];

    /// The human-readable option name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Total => "0 - 20% Total",
            Self::Severe => "21 - 60% Severe",
            Self::Moderate => "61 - 90% Moderate",
            Self::Mild => "91 - 99% Mild",
            Self::Independent => "100% Independent",
            Self::Unknown => "Unknown",
        }
    }
}

/// The Lawton index: independence for instrumental activities, in points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LawtonIndex {
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Unknown,
}

impl LawtonIndex {
    pub const ALL: [Self; 10] = [
        Self::Zero,
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Unknown,
    ];

    /// The human-readable option name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Zero => "0 points",
            Self::One => "1 point",
            Self::Two => "2 points",
            Self::Three => "3 points",
            Self::Four => "4 points",
            Self::Five => "5 points",
            Self::Six => "6 points",
            Self::Seven => "7 points",
            Self::Eight => "8 points",
            Self::Unknown => "Unknown",
        }
    }
}

/// The level of cognitive impairment of a patient status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CognitiveImpairmentLevel {
    Absent,
    MildModerate,
    Severe,
    Unknown,
}

impl CognitiveImpairmentLevel {
    pub const ALL: [Self; 4] = [Self::Absent, Self::MildModerate, Self::Severe, Self::Unknown];

    /// The human-readable option name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Absent => "Absent",
            Self::MildModerate => "Mild moderate",
            Self::Severe => "Severe",
            Self::Unknown => "Unknown",
        }
    }
}

/// The degree of discomfort of a patient status before applying any action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscomfortDegree {
    Low,
    Medium,
    High,
    Unknown,
}

impl DiscomfortDegree {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Unknown];

    /// The human-readable option name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Unknown => "Unknown",
        }
    }
}

/// The level of therapeutic intensity (NIT). This scale has no unknown member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NitLevel {
    /// All possible measures to prolong survival.
    One,
    /// All possible measures except CPR.
    TwoA,
    /// All possible measures except CPR and ICU.
    TwoB,
    /// Complementary scans and non-invasive treatments.
    Three,
    /// Empiric symptomatic treatments according to clinical suspicion.
    Four,
    /// Only treatments for comfort.
    Five,
}

impl NitLevel {
    pub const ALL: [Self; 6] = [
        Self::One,
        Self::TwoA,
        Self::TwoB,
        Self::Three,
        Self::Four,
        Self::Five,
    ];

    /// The human-readable option name.
    pub fn label(self) -> &'static str {
        match self {
            Self::One => "1 Treatment without limits",
            Self::TwoA => "2A Intense treatment",
            Self::TwoB => "2B Intense treatment",
            Self::Three => "3 Treatment of intermediate intensity",
            Self::Four => "4 Symptomatic conservative treatment",
            Self::Five => "5 Exclusively comfort measures",
        }
    }
}

/// The status of a patient across its independent clinical criteria.
///
/// Every field is independently nullable; `None` means the criterion has not
/// been assessed. The record enforces no cross-field constraints and is only
/// ever replaced wholesale, never partially patched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientStatusCriteria {
    /// The range of age of the patient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<AgeRangeOption>,

    /// Whether the patient has a complex chronic disease (CCD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ccd: Option<YesNoUnknownOption>,

    /// A MACA patient has answered no to the question: would you be surprised
    /// if this patient died in less than 12 months?
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maca: Option<YesNoUnknownOption>,

    /// The expected survival time for the patient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_survival: Option<SurvivalOption>,

    /// The frailty index of the patient.
    #[serde(rename = "frailVIG", default, skip_serializing_if = "Option::is_none")]
    pub frail_vig: Option<SpictScale>,

    /// The clinical risk group of the patient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_risk_group: Option<ClinicalRiskGroupOption>,

    /// Whether the patient has social support.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_social_support: Option<YesNoUnknownOption>,

    /// The independence for basic activities of daily living at admission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub independence_at_admission: Option<BarthelIndex>,

    /// The independence for instrumental activities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub independence_instrumental_activities: Option<LawtonIndex>,

    /// Whether the patient has advance directives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_advance_directives: Option<YesNoUnknownOption>,

    /// Whether the patient is competent to understand the instructions of
    /// health personnel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_competent: Option<YesNoUnknownOption>,

    /// Whether the patient or an authorized referent has been informed of the
    /// possible treatments and their consequences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_been_informed: Option<YesNoUnknownOption>,

    /// Whether the patient has been detected as coerced or pressured by third
    /// parties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_coerced: Option<YesNoUnknownOption>,

    /// The level of cognitive impairment of the patient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_cognitive_impairment: Option<CognitiveImpairmentLevel>,

    /// Whether the patient has emotional pain. The wire name keeps the
    /// misspelling of the backing API.
    #[serde(
        rename = "hasEmocionalPain",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub has_emotional_pain: Option<YesNoUnknownOption>,

    /// The degree of discomfort of the patient before applying any action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discomfort_degree: Option<DiscomfortDegree>,

    /// The therapeutic intensity level. The criteria editor does not track
    /// this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nit_level: Option<NitLevel>,
}
