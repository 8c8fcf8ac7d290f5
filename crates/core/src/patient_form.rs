//! The add/edit patient form controller.
//!
//! One controller serves both pages: add mode creates the patient on save,
//! edit mode loads an existing patient and updates it. The only local
//! validation is the name (required, bounded length); the status criteria
//! come from an embedded editor and need no checks of their own.

use crate::editor::{CriteriaEdit, StatusCriteriaEditor};
use crate::error::{FormError, SubmitError};
use ptui_api::{ApiError, PageTitle, PatientTreatmentApi, UserNotifier};
use ptui_models::{Patient, PatientStatusCriteria};
use std::sync::Arc;

/// The maximum accepted patient name length.
pub const MAX_NAME_LEN: usize = 1024;

/// The controller of the add-patient and edit-patient pages.
pub struct PatientForm {
    api: Arc<dyn PatientTreatmentApi>,
    notifier: Arc<dyn UserNotifier>,
    /// `None` in add mode; the patient identifier in edit mode.
    patient_id: Option<i64>,
    name: Option<String>,
    status: Option<PatientStatusCriteria>,
    editor: StatusCriteriaEditor,
    touched: bool,
}

impl PatientForm {
    /// Open the form in add mode, optionally pre-filling the name from a
    /// route query parameter.
    pub fn open_new(
        api: Arc<dyn PatientTreatmentApi>,
        notifier: Arc<dyn UserNotifier>,
        title: &dyn PageTitle,
        prefill_name: Option<&str>,
    ) -> Self {
        title.set_page_title("Add patient");

        Self {
            api,
            notifier,
            patient_id: None,
            name: prefill_name.map(str::to_owned),
            status: None,
            editor: StatusCriteriaEditor::new(),
            touched: false,
        }
    }

    /// Open the form in edit mode for an existing patient.
    ///
    /// A failed patient fetch is logged and leaves the form empty, as for any
    /// read failure.
    pub async fn open(
        api: Arc<dyn PatientTreatmentApi>,
        notifier: Arc<dyn UserNotifier>,
        title: &dyn PageTitle,
        patient_id: i64,
    ) -> Self {
        title.set_page_title("Edit patient information");

        let mut form = Self {
            api,
            notifier,
            patient_id: Some(patient_id),
            name: None,
            status: None,
            editor: StatusCriteriaEditor::new(),
            touched: false,
        };

        match form.api.patient(patient_id).await {
            Ok(patient) => {
                form.name = patient.name.clone();
                form.editor.load(patient.status.as_ref());
                form.status = patient.status;
            }
            Err(error) => {
                tracing::error!(%error, patient_id, "cannot get the patient to edit");
            }
        }

        form
    }

    /// The current name control value.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the name control.
    pub fn set_name(&mut self, raw: &str) {
        self.name = Some(raw.to_owned());
    }

    /// Route a user edit to the embedded status editor.
    pub fn edit_status(&mut self, edit: CriteriaEdit) {
        if let Some(status) = self.editor.apply(edit) {
            self.status = Some(status);
        }
    }

    /// The captured status.
    pub fn status(&self) -> Option<&PatientStatusCriteria> {
        self.status.as_ref()
    }

    /// Validate the name control: required, at most [`MAX_NAME_LEN`]
    /// characters.
    pub fn validate(&self) -> Result<(), FormError> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(FormError::MissingName)?;
        if name.chars().count() > MAX_NAME_LEN {
            return Err(FormError::NameTooLong { max: MAX_NAME_LEN });
        }
        Ok(())
    }

    /// Whether a failed submission has marked the controls as touched.
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Save the form.
    ///
    /// An invalid name marks the controls as touched and submits nothing. In
    /// add mode the created patient (with its identifier) is handed back for
    /// navigation; in edit mode the updated record is returned. An API
    /// failure surfaces an error notification and keeps the form populated
    /// for correction.
    pub async fn save(&mut self) -> Result<Patient, SubmitError> {
        if let Err(invalid) = self.validate() {
            self.touched = true;
            return Err(invalid.into());
        }

        let payload = Patient {
            id: None,
            name: self.name.clone(),
            update_time: None,
            status: self.status.clone(),
        };

        let outcome = match self.patient_id {
            None => self.api.create_patient(&payload).await,
            Some(patient_id) => self.api.update_patient(patient_id, &payload).await,
        };

        match outcome {
            Ok(stored) => {
                let text = if self.patient_id.is_none() {
                    "Patient has been added"
                } else {
                    "Updated patient"
                };
                self.notifier.show_success(text);
                Ok(stored)
            }
            Err(error) => {
                let text = if self.patient_id.is_none() {
                    "Cannot add the patient"
                } else {
                    "Patient not updated"
                };
                tracing::error!(%error, "{text}");
                self.notifier.show_error(text);
                Err(error.into())
            }
        }
    }
}

/// Delete a patient, with user feedback on the outcome.
pub async fn delete_patient(
    api: &dyn PatientTreatmentApi,
    notifier: &dyn UserNotifier,
    patient_id: i64,
) -> Result<(), ApiError> {
    match api.delete_patient(patient_id).await {
        Ok(()) => {
            notifier.show_success("The patient has been deleted");
            Ok(())
        }
        Err(error) => {
            tracing::error!(%error, patient_id, "cannot delete the patient");
            notifier.show_error("Cannot delete the patient");
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptui_api::{InMemoryApi, LogNotifier, LogPageTitle};
    use ptui_models::YesNoUnknownOption;

    fn new_form(api: &Arc<InMemoryApi>, prefill: Option<&str>) -> PatientForm {
        PatientForm::open_new(
            Arc::clone(api) as Arc<dyn PatientTreatmentApi>,
            Arc::new(LogNotifier),
            &LogPageTitle,
            prefill,
        )
    }

    #[tokio::test]
    async fn test_add_mode_creates_the_patient_with_its_status() {
        let api = Arc::new(InMemoryApi::new());
        let mut form = new_form(&api, None);

        form.set_name("Jane Doe");
        form.edit_status(CriteriaEdit::Ccd(Some(YesNoUnknownOption::Yes)));

        let stored = form.save().await.expect("a valid form should save");
        let id = stored.id.expect("the stored patient carries its id");

        let fetched = api.patient(id).await.expect("patient should exist");
        assert_eq!(fetched.name.as_deref(), Some("Jane Doe"));
        assert_eq!(
            fetched.status.and_then(|status| status.ccd),
            Some(YesNoUnknownOption::Yes)
        );
    }

    #[tokio::test]
    async fn test_missing_name_blocks_the_save_locally() {
        let api = Arc::new(InMemoryApi::new());
        let mut form = new_form(&api, None);

        let err = form.save().await.expect_err("an empty name must not save");
        assert!(matches!(err, SubmitError::Form(FormError::MissingName)));
        assert!(form.is_touched());

        let page = api
            .patients_page(
                &Default::default(),
                &ptui_api::SortOrder::ascending("name"),
                0,
                10,
            )
            .await
            .expect("listing should succeed");
        assert_eq!(page.total, 0, "nothing was created");
    }

    #[tokio::test]
    async fn test_overlong_name_is_rejected() {
        let api = Arc::new(InMemoryApi::new());
        let mut form = new_form(&api, None);

        form.set_name(&"x".repeat(MAX_NAME_LEN + 1));
        let err = form.save().await.expect_err("overlong name must not save");
        assert!(matches!(
            err,
            SubmitError::Form(FormError::NameTooLong { .. })
        ));
    }

    #[tokio::test]
    async fn test_prefilled_name_comes_from_the_query_parameter() {
        let api = Arc::new(InMemoryApi::new());
        let form = new_form(&api, Some("Jane"));
        assert_eq!(form.name(), Some("Jane"));
    }

    #[tokio::test]
    async fn test_edit_mode_loads_and_updates_the_patient() {
        let api = Arc::new(InMemoryApi::new());
        let patient_id = api.seed_patient("Jane");

        let mut form = PatientForm::open(
            Arc::clone(&api) as Arc<dyn PatientTreatmentApi>,
            Arc::new(LogNotifier),
            &LogPageTitle,
            patient_id,
        )
        .await;
        assert_eq!(form.name(), Some("Jane"));

        form.set_name("Jane Doe");
        form.edit_status(CriteriaEdit::Maca(Some(YesNoUnknownOption::No)));
        form.save().await.expect("the update should save");

        let fetched = api.patient(patient_id).await.expect("patient exists");
        assert_eq!(fetched.name.as_deref(), Some("Jane Doe"));
        assert_eq!(
            fetched.status.and_then(|status| status.maca),
            Some(YesNoUnknownOption::No)
        );
    }

    #[tokio::test]
    async fn test_delete_patient_reports_not_found() {
        let api = Arc::new(InMemoryApi::new());
        let err = delete_patient(api.as_ref(), &LogNotifier, 404)
            .await
            .expect_err("missing patient");
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
