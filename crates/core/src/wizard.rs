//! The add-treatment wizard.
//!
//! A multi-step form composing two status criteria editors (the before and
//! expected status of the patient) and one independent toggle per treatment
//! action, gated by the at-least-one-action rule.

use crate::editor::{CriteriaEdit, StatusCriteriaEditor};
use crate::error::{FormError, SubmitError};
use ptui_api::{PageTitle, PatientTreatmentApi, UserNotifier};
use ptui_models::{Patient, PatientStatusCriteria, Treatment, TreatmentAction, TreatmentToAdd};
use std::sync::Arc;

/// The controller of the add-treatment page.
pub struct TreatmentWizard {
    api: Arc<dyn PatientTreatmentApi>,
    notifier: Arc<dyn UserNotifier>,
    patient_id: i64,
    patient: Option<Patient>,
    before: StatusCriteriaEditor,
    expected: StatusCriteriaEditor,
    before_status: Option<PatientStatusCriteria>,
    expected_status: Option<PatientStatusCriteria>,
    toggles: [bool; TreatmentAction::ALL.len()],
    touched: bool,
}

impl TreatmentWizard {
    /// Open the wizard for a patient.
    ///
    /// Sets the page title and fetches the patient; both embedded editors
    /// start from the patient's current status with the criteria a treatment
    /// cannot affect locked. A failed patient fetch is logged and leaves the
    /// statuses unset, as for any read failure.
    pub async fn open(
        api: Arc<dyn PatientTreatmentApi>,
        notifier: Arc<dyn UserNotifier>,
        title: &dyn PageTitle,
        patient_id: i64,
    ) -> Self {
        title.set_page_title("Add treatment to a patient");

        let mut wizard = Self {
            api,
            notifier,
            patient_id,
            patient: None,
            before: StatusCriteriaEditor::new(),
            expected: StatusCriteriaEditor::new(),
            before_status: None,
            expected_status: None,
            toggles: [false; TreatmentAction::ALL.len()],
            touched: false,
        };
        wizard.before.lock_treatment_invariants(true);
        wizard.expected.lock_treatment_invariants(true);

        match wizard.api.patient(patient_id).await {
            Ok(patient) => {
                wizard.before_status = patient.status.clone();
                wizard.expected_status = patient.status.clone();
                wizard.before.load(patient.status.as_ref());
                wizard.expected.load(patient.status.as_ref());
                wizard.patient = Some(patient);
            }
            Err(error) => {
                tracing::error!(%error, patient_id, "cannot get the patient to treat");
            }
        }

        wizard
    }

    /// The fetched patient, when the read succeeded.
    pub fn patient(&self) -> Option<&Patient> {
        self.patient.as_ref()
    }

    /// Toggle a treatment action.
    pub fn set_action(&mut self, action: TreatmentAction, selected: bool) {
        self.toggles[action as usize] = selected;
    }

    /// Whether an action toggle is on.
    pub fn is_action_selected(&self, action: TreatmentAction) -> bool {
        self.toggles[action as usize]
    }

    /// The selected actions, in declaration order.
    pub fn selected_actions(&self) -> Vec<TreatmentAction> {
        TreatmentAction::ALL
            .into_iter()
            .filter(|&action| self.toggles[action as usize])
            .collect()
    }

    /// Route a user edit to the before-status editor.
    pub fn edit_before(&mut self, edit: CriteriaEdit) {
        if let Some(status) = self.before.apply(edit) {
            self.before_status = Some(status);
        }
    }

    /// Route a user edit to the expected-status editor.
    pub fn edit_expected(&mut self, edit: CriteriaEdit) {
        if let Some(status) = self.expected.apply(edit) {
            self.expected_status = Some(status);
        }
    }

    /// The captured before status.
    pub fn before_status(&self) -> Option<&PatientStatusCriteria> {
        self.before_status.as_ref()
    }

    /// The captured expected status.
    pub fn expected_status(&self) -> Option<&PatientStatusCriteria> {
        self.expected_status.as_ref()
    }

    /// Validate the composed form.
    ///
    /// The action rule is a single group-level check: the toggle group is
    /// invalid unless at least one toggle is on.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.before_status.is_none() {
            return Err(FormError::MissingBeforeStatus);
        }
        if !self.toggles.iter().any(|&selected| selected) {
            return Err(FormError::NoActionSelected);
        }
        if self.expected_status.is_none() {
            return Err(FormError::MissingExpectedStatus);
        }
        Ok(())
    }

    /// Whether the composed form can be submitted.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Whether a failed submission has marked the controls as touched, so
    /// the validation messages render.
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Submit the treatment.
    ///
    /// An invalid form marks every control as touched and submits nothing.
    /// On success the created treatment (with its identifier) is handed back
    /// for navigation; on an API failure an error notification is shown and
    /// the entered state is left as-is for correction.
    pub async fn add_treatment(&mut self) -> Result<Treatment, SubmitError> {
        if let Err(invalid) = self.validate() {
            self.touched = true;
            return Err(invalid.into());
        }

        let to_add = TreatmentToAdd {
            patient_id: self.patient_id,
            before_status: self.before_status.clone(),
            actions: self.selected_actions(),
            expected_status: self.expected_status.clone(),
        };

        match self.api.create_treatment(&to_add).await {
            Ok(created) => Ok(created),
            Err(error) => {
                tracing::error!(%error, "cannot add the treatment");
                self.notifier.show_error("Cannot add the treatment");
                Err(error.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptui_api::{ApiError, InMemoryApi, LogNotifier, LogPageTitle};
    use ptui_models::YesNoUnknownOption;

    async fn wizard_for_patient(api: &Arc<InMemoryApi>, name: &str) -> TreatmentWizard {
        let patient_id = api.seed_patient(name);
        let status = PatientStatusCriteria {
            ccd: Some(YesNoUnknownOption::Yes),
            ..Default::default()
        };
        api.update_patient(
            patient_id,
            &Patient {
                status: Some(status),
                ..Default::default()
            },
        )
        .await
        .expect("seeding the status should succeed");

        TreatmentWizard::open(
            Arc::clone(api) as Arc<dyn PatientTreatmentApi>,
            Arc::new(LogNotifier),
            &LogPageTitle,
            patient_id,
        )
        .await
    }

    #[tokio::test]
    async fn test_open_populates_both_statuses_from_the_patient() {
        let api = Arc::new(InMemoryApi::new());
        let wizard = wizard_for_patient(&api, "Jane Doe").await;

        let before = wizard.before_status().expect("before status populated");
        let expected = wizard.expected_status().expect("expected status populated");
        assert_eq!(before.ccd, Some(YesNoUnknownOption::Yes));
        assert_eq!(before, expected);
    }

    #[tokio::test]
    async fn test_submission_without_actions_is_blocked_locally() {
        let api = Arc::new(InMemoryApi::new());
        let mut wizard = wizard_for_patient(&api, "Jane Doe").await;

        assert!(!wizard.is_valid());
        let err = wizard
            .add_treatment()
            .await
            .expect_err("no action selected must fail validation");
        assert!(matches!(
            err,
            SubmitError::Form(FormError::NoActionSelected)
        ));
        assert!(wizard.is_touched(), "controls are marked for messages");

        // The collaborator was never called.
        let page = api
            .treatments_page(
                &Default::default(),
                &ptui_api::SortOrder::ascending("name"),
                0,
                10,
            )
            .await
            .expect("listing should succeed");
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_submission_with_one_action_sends_exactly_that_action() {
        let api = Arc::new(InMemoryApi::new());
        let mut wizard = wizard_for_patient(&api, "Jane Doe").await;

        wizard.set_action(TreatmentAction::Icu, true);
        let created = wizard
            .add_treatment()
            .await
            .expect("a valid form should submit");

        assert!(created.id.is_some(), "the stored treatment carries its id");
        let actions: Vec<_> = created
            .actions
            .iter()
            .filter_map(|with_feedback| with_feedback.action)
            .collect();
        assert_eq!(actions, vec![TreatmentAction::Icu]);
    }

    #[tokio::test]
    async fn test_selected_actions_keep_declaration_order() {
        let api = Arc::new(InMemoryApi::new());
        let mut wizard = wizard_for_patient(&api, "Jane Doe").await;

        wizard.set_action(TreatmentAction::CureSurgery, true);
        wizard.set_action(TreatmentAction::Cpr, true);
        wizard.set_action(TreatmentAction::Dialysis, true);

        assert_eq!(
            wizard.selected_actions(),
            vec![
                TreatmentAction::Cpr,
                TreatmentAction::Dialysis,
                TreatmentAction::CureSurgery
            ]
        );
    }

    #[tokio::test]
    async fn test_locked_criteria_are_not_editable_in_the_wizard() {
        let api = Arc::new(InMemoryApi::new());
        let mut wizard = wizard_for_patient(&api, "Jane Doe").await;

        let before = wizard.before_status().cloned();
        wizard.edit_before(CriteriaEdit::IsCoerced(Some(YesNoUnknownOption::Yes)));
        assert_eq!(
            wizard.before_status().cloned(),
            before,
            "a locked criterion must not change the captured status"
        );

        wizard.edit_before(CriteriaEdit::Ccd(Some(YesNoUnknownOption::No)));
        assert_eq!(
            wizard.before_status().and_then(|status| status.ccd),
            Some(YesNoUnknownOption::No)
        );
    }

    #[tokio::test]
    async fn test_api_failure_keeps_the_entered_state() {
        let api = Arc::new(InMemoryApi::new());
        let mut wizard = wizard_for_patient(&api, "Jane Doe").await;
        wizard.set_action(TreatmentAction::Nimv, true);

        // Deleting the patient makes the create call fail server-side.
        api.delete_patient(wizard.patient_id)
            .await
            .expect("delete should succeed");

        let err = wizard
            .add_treatment()
            .await
            .expect_err("the write must fail");
        assert!(matches!(err, SubmitError::Api(ApiError::NotFound(_))));
        assert!(
            wizard.is_action_selected(TreatmentAction::Nimv),
            "no state rollback on failure"
        );
        assert!(wizard.before_status().is_some());
    }
}
