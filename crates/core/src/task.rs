//! A single-handle cancellable scheduled task.
//!
//! Every timer in this crate (list busy-retry, health poll, treatment view
//! refresh) is owned through one of these handles, so component teardown
//! releases its pending work deterministically: dropping the handle aborts
//! the task.

use std::future::Future;
use tokio::task::JoinHandle;

/// A handle to a spawned background task that is aborted on drop.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    /// Spawn `future` and own its handle.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: Some(tokio::spawn(future)),
        }
    }

    /// Abort the task now.
    pub fn cancel(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Release the handle without aborting the task.
    ///
    /// Used when the running task takes its own handle out of the owning
    /// state and must not cancel itself.
    pub fn detach(mut self) {
        self.handle.take();
    }

    /// Whether the task has already run to completion.
    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .map(JoinHandle::is_finished)
            .unwrap_or(true)
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_dropping_the_handle_cancels_the_task() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);

        let task = ScheduledTask::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            flag.store(true, Ordering::SeqCst);
        });
        drop(task);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!fired.load(Ordering::SeqCst), "aborted task must not fire");
    }

    #[tokio::test(start_paused = true)]
    async fn test_detached_task_keeps_running() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);

        let task = ScheduledTask::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            flag.store(true, Ordering::SeqCst);
        });
        task.detach();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(fired.load(Ordering::SeqCst), "detached task should fire");
    }
}
