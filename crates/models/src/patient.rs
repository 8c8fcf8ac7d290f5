//! Patient records and their paginated wrapper.

use crate::criteria::PatientStatusCriteria;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The minimal information of a patient, as listed in search results.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinPatient {
    /// The identifier of the patient, or `None` if it is not stored yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// The name of the patient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The full information of a patient.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// The identifier of the patient, or `None` if it is not stored yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// The name of the patient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The epoch time, in seconds, when the patient information was last
    /// updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<i64>,

    /// The current status of the patient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PatientStatusCriteria>,
}

impl Patient {
    /// The last-update instant, when the record carries one.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.update_time.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Reduce to the minimal listing model.
    pub fn to_min(&self) -> MinPatient {
        MinPatient {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// One page of patients that satisfy a search query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinPatientPage {
    /// The number of patients that satisfy the query, across all pages.
    #[serde(default)]
    pub total: u64,

    /// The patients on the requested page.
    #[serde(default)]
    pub patients: Vec<MinPatient>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_serialises_with_camel_case_wire_names() {
        let patient = Patient {
            id: Some(7),
            name: Some("Jane Doe".into()),
            update_time: Some(1_700_000_000),
            status: Some(PatientStatusCriteria::default()),
        };

        let json = serde_json::to_value(&patient).expect("patient should serialise");
        assert_eq!(json["id"], 7);
        assert_eq!(json["updateTime"], 1_700_000_000i64);
        assert!(json.get("update_time").is_none());
    }

    #[test]
    fn test_updated_at_converts_epoch_seconds() {
        let patient = Patient {
            update_time: Some(0),
            ..Default::default()
        };
        let updated = patient.updated_at().expect("epoch 0 should convert");
        assert_eq!(updated.timestamp(), 0);

        assert!(Patient::default().updated_at().is_none());
    }
}
