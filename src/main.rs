//! Demo harness: drives every controller against the in-memory service.
//!
//! This binary exists to exercise the controllers end to end without a
//! running backend: it seeds a few patients, searches them, creates a
//! patient through the form, walks the treatment wizard, watches the
//! treatment view pick up backend feedback and polls the service health.

use anyhow::Context;
use clap::Parser;
use ptui_api::{
    InMemoryApi, LogNotifier, LogPageTitle, PageTitle, PatientTreatmentApi, UserNotifier,
};
use ptui_core::{
    CriteriaEdit, PagedSearch, PatientForm, StatusPoller, TreatmentView, TreatmentWizard, UiConfig,
};
use ptui_models::{
    AgeRangeOption, DiscomfortDegree, TreatmentAction, TreatmentActionFeedback, YesNoUnknownOption,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "ptui-run",
    about = "Drive the patient-treatment UI controllers against the in-memory service"
)]
struct Args {
    /// Name filter applied to the patients list.
    #[arg(long)]
    pattern: Option<String>,

    /// Items per page for the list controllers.
    #[arg(long)]
    page_size: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::level_filters::LevelFilter::INFO.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let page_size = args
        .page_size
        .map(|size| size.to_string())
        .or_else(|| std::env::var("PTUI_PAGE_SIZE").ok());
    let poll_interval = std::env::var("PTUI_HEALTH_POLL_INTERVAL_MS").ok();
    let config = UiConfig::from_env_values(page_size, poll_interval)?;

    let api = Arc::new(InMemoryApi::new());
    for name in ["Joan Serra", "Montserrat Vila", "Pere Costa", "Anna Puig"] {
        api.seed_patient(name);
    }
    let service: Arc<dyn PatientTreatmentApi> = api.clone();
    let notifier: Arc<dyn UserNotifier> = Arc::new(LogNotifier);
    let title = LogPageTitle;

    // Service status page.
    let poller = StatusPoller::start(Arc::clone(&service), &config);
    let mut health = poller.subscribe_health();
    health.wait_for(Option::is_some).await?;
    tracing::info!(up = poller.is_up(), "service health report received");

    // Patients list with the requested filter.
    title.set_page_title("Patients");
    let patients = PagedSearch::patients(Arc::clone(&service), &config);
    patients.set_name_filter(args.pattern.as_deref());
    wait_until_settled(&patients).await?;
    if let Some(page) = patients.page() {
        tracing::info!(total = page.total, "patients matching the filter");
        for patient in &page.patients {
            tracing::info!(id = patient.id, name = patient.name.as_deref(), "patient");
        }
    }

    // Add a patient through the form.
    let mut form = PatientForm::open_new(
        Arc::clone(&service),
        Arc::clone(&notifier),
        &title,
        Some("Rosa Maria Ferrer"),
    );
    form.edit_status(CriteriaEdit::AgeRange(Some(AgeRangeOption::AgeBetween80And89)));
    form.edit_status(CriteriaEdit::Ccd(Some(YesNoUnknownOption::Yes)));
    let rosa = form.save().await?;
    let rosa_id = rosa.id.context("the stored patient should carry an id")?;

    // Walk the treatment wizard for the new patient.
    let mut wizard = TreatmentWizard::open(
        Arc::clone(&service),
        Arc::clone(&notifier),
        &title,
        rosa_id,
    )
    .await;
    wizard.set_action(TreatmentAction::Icu, true);
    wizard.set_action(TreatmentAction::Nimv, true);
    wizard.edit_expected(CriteriaEdit::DiscomfortDegree(Some(DiscomfortDegree::Low)));
    let treatment = wizard.add_treatment().await?;
    let treatment_id = treatment
        .id
        .context("the stored treatment should carry an id")?;
    tracing::info!(treatment_id, "treatment created");

    // Open the treatment view and let it pick up backend feedback.
    let view = TreatmentView::open(
        Arc::clone(&service),
        Arc::clone(&notifier),
        &title,
        treatment_id,
        &config,
    )
    .await;
    api.set_action_feedback(treatment_id, TreatmentAction::Icu, TreatmentActionFeedback::Allow);
    tokio::time::sleep(2 * config.treatment_refresh_interval()).await;
    if let Some(current) = view.current() {
        for action in &current.actions {
            tracing::info!(
                action = ?action.action,
                feedback = ?action.feedback,
                "treatment action"
            );
        }
    }
    view.stop();

    // Treatments list.
    title.set_page_title("Treatments");
    let treatments = PagedSearch::treatments(Arc::clone(&service), &config);
    treatments.set_name_filter(Some("rosa"));
    wait_until_settled(&treatments).await?;
    if let Some(page) = treatments.page() {
        tracing::info!(total = page.total, "treatments for the new patient");
    }

    Ok(())
}

/// Await the controller's next quiescent state.
async fn wait_until_settled<S: ptui_core::PageSource>(
    controller: &Arc<PagedSearch<S>>,
) -> anyhow::Result<()> {
    let mut revisions = controller.subscribe();
    let watched = Arc::clone(controller);
    revisions.wait_for(move |_| !watched.is_updating()).await?;
    Ok(())
}
