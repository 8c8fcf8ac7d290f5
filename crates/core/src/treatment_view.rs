//! The treatment view controller.
//!
//! Shows one treatment and keeps it fresh: the backend fills in action
//! feedback and alignment values asynchronously, so the record is re-fetched
//! on a short fixed cadence while the view is open. Teardown cancels the
//! refresh task; no fetch may update the view after that.

use crate::config::UiConfig;
use crate::task::ScheduledTask;
use ptui_api::{ApiError, PageTitle, PatientTreatmentApi, UserNotifier};
use ptui_models::Treatment;
use std::sync::{Arc, Mutex, Weak};
use tokio::sync::watch;

/// The controller of the view-treatment page.
pub struct TreatmentView {
    api: Arc<dyn PatientTreatmentApi>,
    notifier: Arc<dyn UserNotifier>,
    treatment_id: i64,
    current: watch::Receiver<Option<Treatment>>,
    refresh: Mutex<Option<ScheduledTask>>,
}

impl TreatmentView {
    /// Open the view for a treatment.
    ///
    /// Sets the page title, fetches the treatment once, then re-fetches on
    /// the configured cadence. A failed read is logged and leaves the last
    /// fetched record visible.
    pub async fn open(
        api: Arc<dyn PatientTreatmentApi>,
        notifier: Arc<dyn UserNotifier>,
        title: &dyn PageTitle,
        treatment_id: i64,
        config: &UiConfig,
    ) -> Arc<Self> {
        title.set_page_title("View treatment information");

        let (sender, receiver) = watch::channel(None);
        match api.treatment(treatment_id).await {
            Ok(treatment) => {
                let _ = sender.send(Some(treatment));
            }
            Err(error) => {
                tracing::error!(%error, treatment_id, "cannot get the treatment");
            }
        }

        let view = Arc::new(Self {
            api: Arc::clone(&api),
            notifier,
            treatment_id,
            current: receiver,
            refresh: Mutex::new(None),
        });

        let weak: Weak<Self> = Arc::downgrade(&view);
        let interval = config.treatment_refresh_interval();
        let task = ScheduledTask::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                // The view owns this task, so an upgrade failure means the
                // page is gone and the chain must end.
                let Some(_view) = weak.upgrade() else {
                    return;
                };
                match api.treatment(treatment_id).await {
                    Ok(treatment) => {
                        let _ = sender.send(Some(treatment));
                    }
                    Err(error) => {
                        tracing::error!(%error, treatment_id, "cannot refresh the treatment");
                    }
                }
            }
        });
        *view.lock_refresh() = Some(task);

        view
    }

    /// The last fetched treatment, if any.
    pub fn current(&self) -> Option<Treatment> {
        self.current.borrow().clone()
    }

    /// A receiver of the fetched treatment; changes whenever a refresh
    /// applies.
    pub fn subscribe(&self) -> watch::Receiver<Option<Treatment>> {
        self.current.clone()
    }

    /// Cancel the refresh cadence. Idempotent; also happens on drop.
    pub fn stop(&self) {
        if let Some(task) = self.lock_refresh().take() {
            task.cancel();
        }
    }

    /// Delete the shown treatment, with user feedback on the outcome.
    pub async fn delete(&self) -> Result<(), ApiError> {
        match self.api.delete_treatment(self.treatment_id).await {
            Ok(()) => {
                self.notifier.show_success("The treatment has been deleted");
                self.stop();
                Ok(())
            }
            Err(error) => {
                tracing::error!(%error, treatment_id = self.treatment_id, "cannot delete the treatment");
                self.notifier.show_error("Cannot delete the treatment");
                Err(error)
            }
        }
    }

    /// Apply the shown treatment again, handing back the fresh treatment for
    /// navigation.
    pub async fn do_again(&self) -> Result<Treatment, ApiError> {
        let Some(treatment) = self.current() else {
            return Err(ApiError::NotFound(format!(
                "treatment {} is not loaded",
                self.treatment_id
            )));
        };

        match self.api.redo_treatment(&treatment).await {
            Ok(created) => {
                self.notifier
                    .show_success("The treatment has been applied again");
                Ok(created)
            }
            Err(error) => {
                tracing::error!(%error, treatment_id = self.treatment_id, "cannot redo the treatment");
                self.notifier.show_error("Cannot apply the treatment again");
                Err(error)
            }
        }
    }

    fn lock_refresh(&self) -> std::sync::MutexGuard<'_, Option<ScheduledTask>> {
        self.refresh
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for TreatmentView {
    fn drop(&mut self) {
        self.stop();
    }
}
