//! The collaborator traits consumed by the controllers.

use crate::error::ApiResult;
use crate::query::{NamePattern, SortOrder};
use async_trait::async_trait;
use ptui_models::{
    HealthInfo, Info, MinPatientPage, MinTreatmentPage, Patient, Treatment, TreatmentToAdd,
};

/// The remote patient-treatment service, one method per operation.
///
/// Controllers hold this behind `Arc<dyn PatientTreatmentApi>`; the concrete
/// transport (HTTP client, in-memory double) is decided at wiring time.
#[async_trait]
pub trait PatientTreatmentApi: Send + Sync {
    /// List one page of patients whose name satisfies `pattern`.
    async fn patients_page(
        &self,
        pattern: &NamePattern,
        order: &SortOrder,
        offset: u64,
        limit: u64,
    ) -> ApiResult<MinPatientPage>;

    /// Get the full information of a patient.
    async fn patient(&self, id: i64) -> ApiResult<Patient>;

    /// Create a patient; the returned record carries the assigned identifier.
    async fn create_patient(&self, patient: &Patient) -> ApiResult<Patient>;

    /// Update a patient; only the present fields of `changes` are applied.
    async fn update_patient(&self, id: i64, changes: &Patient) -> ApiResult<Patient>;

    /// Delete a patient.
    async fn delete_patient(&self, id: i64) -> ApiResult<()>;

    /// List one page of treatments whose patient name satisfies `pattern`.
    async fn treatments_page(
        &self,
        pattern: &NamePattern,
        order: &SortOrder,
        offset: u64,
        limit: u64,
    ) -> ApiResult<MinTreatmentPage>;

    /// Get the full information of a treatment.
    async fn treatment(&self, id: i64) -> ApiResult<Treatment>;

    /// Create a treatment; the returned record carries the assigned
    /// identifier.
    async fn create_treatment(&self, to_add: &TreatmentToAdd) -> ApiResult<Treatment>;

    /// Delete a treatment.
    async fn delete_treatment(&self, id: i64) -> ApiResult<()>;

    /// Apply an existing treatment again, producing a fresh treatment.
    async fn redo_treatment(&self, treatment: &Treatment) -> ApiResult<Treatment>;

    /// Get the free-form service metadata.
    async fn info(&self) -> ApiResult<Info>;

    /// Get the service health report.
    async fn health(&self) -> ApiResult<HealthInfo>;
}

/// Transient user feedback after an action outcome. Fire-and-forget.
pub trait UserNotifier: Send + Sync {
    /// Show a success message.
    fn show_success(&self, text: &str);

    /// Show an error message.
    fn show_error(&self, text: &str);

    /// Show an informative message.
    fn show_info(&self, text: &str);
}

/// The page header title, set once per page activation.
pub trait PageTitle: Send + Sync {
    /// Change the header title.
    fn set_page_title(&self, text: &str);
}

/// A [`UserNotifier`] that forwards every notification to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl UserNotifier for LogNotifier {
    fn show_success(&self, text: &str) {
        tracing::info!(notification = "success", "{text}");
    }

    fn show_error(&self, text: &str) {
        tracing::error!(notification = "error", "{text}");
    }

    fn show_info(&self, text: &str) {
        tracing::info!(notification = "info", "{text}");
    }
}

/// A [`PageTitle`] that records title changes in the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogPageTitle;

impl PageTitle for LogPageTitle {
    fn set_page_title(&self, text: &str) {
        tracing::info!(page_title = text, "page activated");
    }
}
