//! The service status poller.
//!
//! Fetches the static service metadata once at activation. Independently,
//! polls the health report on a fixed cadence: each successful fetch
//! schedules the next one; a failure logs and ends the chain, as for any
//! read. There is no in-flight guard because the cadence is far longer than
//! any realistic round trip. Exactly one timer is outstanding while the
//! poller is active, and teardown cancels it.

use crate::config::UiConfig;
use crate::task::ScheduledTask;
use ptui_api::PatientTreatmentApi;
use ptui_models::{HealthInfo, HealthStatus, Info};
use std::sync::Arc;
use tokio::sync::watch;

/// The controller of the service status page.
pub struct StatusPoller {
    info: watch::Receiver<Option<Info>>,
    health: watch::Receiver<Option<HealthInfo>>,
    info_task: Option<ScheduledTask>,
    poll_task: Option<ScheduledTask>,
}

impl StatusPoller {
    /// Start polling: one metadata fetch now, health on the configured
    /// cadence.
    pub fn start(api: Arc<dyn PatientTreatmentApi>, config: &UiConfig) -> Self {
        let (info_sender, info_receiver) = watch::channel(None);
        let (health_sender, health_receiver) = watch::channel(None);

        let info_api = Arc::clone(&api);
        let info_task = ScheduledTask::spawn(async move {
            match info_api.info().await {
                Ok(info) => {
                    let _ = info_sender.send(Some(info));
                }
                Err(error) => {
                    tracing::error!(%error, "cannot get the service information");
                }
            }
        });

        let interval = config.health_poll_interval();
        let poll_task = ScheduledTask::spawn(async move {
            loop {
                match api.health().await {
                    Ok(health) => {
                        let _ = health_sender.send(Some(health));
                    }
                    Err(error) => {
                        // Only a successful fetch schedules the next one.
                        tracing::error!(%error, "cannot get the service health");
                        return;
                    }
                }
                tokio::time::sleep(interval).await;
            }
        });

        Self {
            info: info_receiver,
            health: health_receiver,
            info_task: Some(info_task),
            poll_task: Some(poll_task),
        }
    }

    /// The fetched service metadata, if any.
    pub fn info(&self) -> Option<Info> {
        self.info.borrow().clone()
    }

    /// The last fetched health report, if any.
    pub fn health(&self) -> Option<HealthInfo> {
        self.health.borrow().clone()
    }

    /// A receiver of the health report; changes on each applied poll.
    pub fn subscribe_health(&self) -> watch::Receiver<Option<HealthInfo>> {
        self.health.clone()
    }

    /// Whether the last health report says the service is running.
    pub fn is_up(&self) -> bool {
        self.health()
            .map(|health| health.status == HealthStatus::Up)
            .unwrap_or(false)
    }

    /// Cancel the polling chain. Idempotent; also happens on drop.
    pub fn stop(&mut self) {
        if let Some(task) = self.poll_task.take() {
            task.cancel();
        }
        if let Some(task) = self.info_task.take() {
            task.cancel();
        }
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptui_api::InMemoryApi;
    use ptui_models::HealthCheck;
    use std::time::Duration;

    fn up_with_database() -> HealthInfo {
        HealthInfo {
            status: HealthStatus::Up,
            checks: vec![HealthCheck {
                name: "Database connections health check".into(),
                status: HealthStatus::Up,
                data: None,
            }],
        }
    }

    async fn wait_for_first_report(poller: &StatusPoller) {
        let mut health = poller.subscribe_health();
        health
            .wait_for(Option::is_some)
            .await
            .expect("a health report should arrive");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetches_info_once_and_health_immediately() {
        let api = Arc::new(InMemoryApi::new());
        api.set_health(up_with_database());

        let poller = StatusPoller::start(Arc::clone(&api) as _, &UiConfig::default());
        wait_for_first_report(&poller).await;

        assert!(poller.is_up());
        assert_eq!(poller.health().expect("report").checks.len(), 1);

        let mut info = poller.info.clone();
        info.wait_for(Option::is_some)
            .await
            .expect("the metadata should arrive");
        assert_eq!(poller.info().expect("info").profile, "in-memory");
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_fetch_waits_the_full_interval() {
        let api = Arc::new(InMemoryApi::new());
        let poller = StatusPoller::start(Arc::clone(&api) as _, &UiConfig::default());
        wait_for_first_report(&poller).await;
        assert_eq!(api.health_calls(), 1);

        // Just under the cadence: still a single fetch.
        tokio::time::sleep(Duration::from_millis(29_000)).await;
        assert_eq!(api.health_calls(), 1, "no fetch before 30000 ms elapse");

        tokio::time::sleep(Duration::from_millis(2_000)).await;
        assert_eq!(api.health_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_the_pending_timer() {
        let api = Arc::new(InMemoryApi::new());
        let poller = StatusPoller::start(Arc::clone(&api) as _, &UiConfig::default());
        wait_for_first_report(&poller).await;
        drop(poller);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(
            api.health_calls(),
            1,
            "no fetch may run after the component is torn down"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_idempotent() {
        let api = Arc::new(InMemoryApi::new());
        let mut poller = StatusPoller::start(Arc::clone(&api) as _, &UiConfig::default());
        wait_for_first_report(&poller).await;

        poller.stop();
        poller.stop();

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(api.health_calls(), 1);
    }
}
