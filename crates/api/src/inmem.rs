//! An in-memory reference implementation of the API collaborator.
//!
//! Backs the demo binary and the controller tests. Behaviour mirrors the
//! remote service: sequential identifier allocation, `*`-glob name filtering,
//! `+`/`-` field sorting and offset/limit paging with the total count taken
//! over the whole filtered result set.

use crate::error::{ApiError, ApiResult};
use crate::query::{NamePattern, SortDirection, SortOrder};
use crate::service::PatientTreatmentApi;
use async_trait::async_trait;
use chrono::Utc;
use ptui_models::{
    HealthInfo, HealthStatus, Info, MinPatient, MinPatientPage, MinTreatment, MinTreatmentPage,
    Patient, Treatment, TreatmentAction, TreatmentActionFeedback, TreatmentActionWithFeedback,
    TreatmentToAdd,
};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct InMemState {
    patients: BTreeMap<i64, Patient>,
    treatments: BTreeMap<i64, Treatment>,
    next_patient_id: i64,
    next_treatment_id: i64,
    info: Info,
    health: HealthInfo,
    health_calls: u64,
    treatment_calls: u64,
}

/// An in-process [`PatientTreatmentApi`] over mutex-protected maps.
#[derive(Debug)]
pub struct InMemoryApi {
    state: Mutex<InMemState>,
}

impl InMemoryApi {
    /// Create an empty service reporting `UP` with no checks.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(InMemState {
                patients: BTreeMap::new(),
                treatments: BTreeMap::new(),
                next_patient_id: 1,
                next_treatment_id: 1,
                info: Info {
                    version: env!("CARGO_PKG_VERSION").to_owned(),
                    profile: "in-memory".to_owned(),
                },
                health: HealthInfo {
                    status: HealthStatus::Up,
                    checks: vec![],
                },
                health_calls: 0,
                treatment_calls: 0,
            }),
        }
    }

    /// Replace the served metadata.
    pub fn set_info(&self, info: Info) {
        self.state().info = info;
    }

    /// Replace the served health report.
    pub fn set_health(&self, health: HealthInfo) {
        self.state().health = health;
    }

    /// Seed a patient and return its identifier.
    pub fn seed_patient(&self, name: &str) -> i64 {
        let mut state = self.state();
        let id = state.next_patient_id;
        state.next_patient_id += 1;
        state.patients.insert(
            id,
            Patient {
                id: Some(id),
                name: Some(name.to_owned()),
                update_time: Some(Utc::now().timestamp()),
                status: None,
            },
        );
        id
    }

    /// Record backend feedback for one action of a stored treatment, as the
    /// remote component would. No-op when the treatment or action is absent.
    pub fn set_action_feedback(
        &self,
        treatment_id: i64,
        action: TreatmentAction,
        feedback: TreatmentActionFeedback,
    ) {
        let mut state = self.state();
        if let Some(treatment) = state.treatments.get_mut(&treatment_id) {
            for with_feedback in &mut treatment.actions {
                if with_feedback.action == Some(action) {
                    with_feedback.feedback = Some(feedback);
                    with_feedback.updated_time = Some(Utc::now().timestamp());
                }
            }
        }
    }

    /// How many times `health` has been asked. Lets tests observe the poll
    /// cadence.
    pub fn health_calls(&self) -> u64 {
        self.state().health_calls
    }

    /// How many times `treatment` has been asked. Lets tests observe the
    /// refresh cadence.
    pub fn treatment_calls(&self) -> u64 {
        self.state().treatment_calls
    }

    fn state(&self) -> MutexGuard<'_, InMemState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for InMemoryApi {
    fn default() -> Self {
        Self::new()
    }
}

/// Order `(name, id, item)` entries and cut the requested page.
fn page_of<T>(
    mut entries: Vec<(String, i64, T)>,
    order: &SortOrder,
    offset: u64,
    limit: u64,
) -> (u64, Vec<T>) {
    // Only name ordering is meaningful here; anything else falls back to the
    // identifier, which is also the tie-breaker.
    if order.field() == "name" {
        entries.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
    } else {
        entries.sort_by(|a, b| a.1.cmp(&b.1));
    }
    if order.direction() == SortDirection::Descending {
        entries.reverse();
    }

    let total = entries.len() as u64;
    let items = entries
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .map(|(_, _, item)| item)
        .collect();
    (total, items)
}

#[async_trait]
impl PatientTreatmentApi for InMemoryApi {
    async fn patients_page(
        &self,
        pattern: &NamePattern,
        order: &SortOrder,
        offset: u64,
        limit: u64,
    ) -> ApiResult<MinPatientPage> {
        let state = self.state();
        let matches: Vec<(String, i64, MinPatient)> = state
            .patients
            .values()
            .filter(|patient| pattern.matches(patient.name.as_deref().unwrap_or_default()))
            .map(|patient| {
                (
                    patient.name.clone().unwrap_or_default(),
                    patient.id.unwrap_or_default(),
                    patient.to_min(),
                )
            })
            .collect();

        let (total, patients) = page_of(matches, order, offset, limit);
        Ok(MinPatientPage { total, patients })
    }

    async fn patient(&self, id: i64) -> ApiResult<Patient> {
        self.state()
            .patients
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("patient {id}")))
    }

    async fn create_patient(&self, patient: &Patient) -> ApiResult<Patient> {
        let mut state = self.state();
        let id = state.next_patient_id;
        state.next_patient_id += 1;

        let stored = Patient {
            id: Some(id),
            name: patient.name.clone(),
            update_time: Some(Utc::now().timestamp()),
            status: patient.status.clone(),
        };
        state.patients.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_patient(&self, id: i64, changes: &Patient) -> ApiResult<Patient> {
        let mut state = self.state();
        let patient = state
            .patients
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("patient {id}")))?;

        if let Some(name) = &changes.name {
            patient.name = Some(name.clone());
        }
        if let Some(status) = &changes.status {
            patient.status = Some(status.clone());
        }
        patient.update_time = Some(Utc::now().timestamp());
        Ok(patient.clone())
    }

    async fn delete_patient(&self, id: i64) -> ApiResult<()> {
        self.state()
            .patients
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound(format!("patient {id}")))
    }

    async fn treatments_page(
        &self,
        pattern: &NamePattern,
        order: &SortOrder,
        offset: u64,
        limit: u64,
    ) -> ApiResult<MinTreatmentPage> {
        let state = self.state();
        let matches: Vec<(String, i64, MinTreatment)> = state
            .treatments
            .values()
            .filter(|treatment| {
                let name = treatment
                    .patient
                    .as_ref()
                    .and_then(|p| p.name.as_deref())
                    .unwrap_or_default();
                pattern.matches(name)
            })
            .map(|treatment| {
                let name = treatment
                    .patient
                    .as_ref()
                    .and_then(|p| p.name.clone())
                    .unwrap_or_default();
                (
                    name,
                    treatment.id.unwrap_or_default(),
                    MinTreatment {
                        id: treatment.id,
                        patient: treatment.patient.clone(),
                    },
                )
            })
            .collect();

        let (total, treatments) = page_of(matches, order, offset, limit);
        Ok(MinTreatmentPage { total, treatments })
    }

    async fn treatment(&self, id: i64) -> ApiResult<Treatment> {
        let mut state = self.state();
        state.treatment_calls += 1;
        state
            .treatments
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("treatment {id}")))
    }

    async fn create_treatment(&self, to_add: &TreatmentToAdd) -> ApiResult<Treatment> {
        let mut state = self.state();
        let patient = state
            .patients
            .get(&to_add.patient_id)
            .map(Patient::to_min)
            .ok_or_else(|| ApiError::NotFound(format!("patient {}", to_add.patient_id)))?;

        let now = Utc::now().timestamp();
        let id = state.next_treatment_id;
        state.next_treatment_id += 1;

        let stored = Treatment {
            id: Some(id),
            created_time: Some(now),
            patient: Some(patient),
            before_status: to_add.before_status.clone(),
            actions: to_add
                .actions
                .iter()
                .map(|&action| TreatmentActionWithFeedback {
                    action: Some(action),
                    feedback: Some(TreatmentActionFeedback::Unknown),
                    updated_time: Some(now),
                })
                .collect(),
            values: vec![],
            expected_status: to_add.expected_status.clone(),
        };
        state.treatments.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete_treatment(&self, id: i64) -> ApiResult<()> {
        self.state()
            .treatments
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound(format!("treatment {id}")))
    }

    async fn redo_treatment(&self, treatment: &Treatment) -> ApiResult<Treatment> {
        let patient_id = treatment
            .patient
            .as_ref()
            .and_then(|p| p.id)
            .ok_or_else(|| ApiError::NotFound("treatment without a stored patient".to_owned()))?;

        let to_add = TreatmentToAdd {
            patient_id,
            before_status: treatment.before_status.clone(),
            actions: treatment
                .actions
                .iter()
                .filter_map(|with_feedback| with_feedback.action)
                .collect(),
            expected_status: treatment.expected_status.clone(),
        };
        self.create_treatment(&to_add).await
    }

    async fn info(&self) -> ApiResult<Info> {
        Ok(self.state().info.clone())
    }

    async fn health(&self) -> ApiResult<HealthInfo> {
        let mut state = self.state();
        state.health_calls += 1;
        Ok(state.health.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_with_patients(names: &[&str]) -> InMemoryApi {
        let api = InMemoryApi::new();
        for name in names {
            api.seed_patient(name);
        }
        api
    }

    #[tokio::test]
    async fn test_patients_page_filters_sorts_and_counts() {
        let api = api_with_patients(&["Charlie", "alice", "Bob", "Alicia"]);

        let page = api
            .patients_page(
                &NamePattern::from_input(Some("ali")),
                &SortOrder::ascending("name"),
                0,
                10,
            )
            .await
            .expect("page should be listed");

        assert_eq!(page.total, 2);
        let names: Vec<_> = page
            .patients
            .iter()
            .map(|p| p.name.clone().unwrap_or_default())
            .collect();
        assert_eq!(names, vec!["Alicia", "alice"]);
    }

    #[tokio::test]
    async fn test_patients_page_respects_offset_and_limit() {
        let api = api_with_patients(&["a", "b", "c", "d", "e"]);

        let page = api
            .patients_page(&NamePattern::match_all(), &SortOrder::ascending("name"), 2, 2)
            .await
            .expect("page should be listed");

        assert_eq!(page.total, 5, "total counts every match, not the page");
        assert!(page.patients.len() <= 2);
        let names: Vec<_> = page
            .patients
            .iter()
            .map(|p| p.name.clone().unwrap_or_default())
            .collect();
        assert_eq!(names, vec!["c", "d"]);
    }

    #[tokio::test]
    async fn test_patient_lookup_reports_not_found() {
        let api = InMemoryApi::new();
        let err = api.patient(99).await.expect_err("missing patient");
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_treatment_attaches_patient_and_unknown_feedback() {
        let api = InMemoryApi::new();
        let patient_id = api.seed_patient("Jane Doe");

        let created = api
            .create_treatment(&TreatmentToAdd {
                patient_id,
                before_status: Some(Default::default()),
                actions: vec![TreatmentAction::Icu, TreatmentAction::Dialysis],
                expected_status: Some(Default::default()),
            })
            .await
            .expect("treatment should be created");

        assert!(created.id.is_some());
        assert_eq!(
            created.patient.as_ref().and_then(|p| p.id),
            Some(patient_id)
        );
        assert_eq!(created.actions.len(), 2);
        assert!(created
            .actions
            .iter()
            .all(|a| a.feedback == Some(TreatmentActionFeedback::Unknown)));
    }

    #[tokio::test]
    async fn test_redo_treatment_creates_a_fresh_record() {
        let api = InMemoryApi::new();
        let patient_id = api.seed_patient("Jane Doe");
        let first = api
            .create_treatment(&TreatmentToAdd {
                patient_id,
                before_status: None,
                actions: vec![TreatmentAction::Cpr],
                expected_status: None,
            })
            .await
            .expect("treatment should be created");

        let again = api
            .redo_treatment(&first)
            .await
            .expect("redo should create a treatment");

        assert_ne!(again.id, first.id);
        assert_eq!(
            again.actions.iter().filter_map(|a| a.action).collect::<Vec<_>>(),
            vec![TreatmentAction::Cpr]
        );
    }

    #[tokio::test]
    async fn test_update_patient_applies_only_present_fields() {
        let api = InMemoryApi::new();
        let id = api.seed_patient("Jane");

        let updated = api
            .update_patient(
                id,
                &Patient {
                    status: Some(Default::default()),
                    ..Default::default()
                },
            )
            .await
            .expect("update should succeed");

        assert_eq!(updated.name.as_deref(), Some("Jane"), "name left untouched");
        assert!(updated.status.is_some());
    }
}
