//! The paginated search controller.
//!
//! One instance per list page (patients, treatments). Owns the name-pattern
//! filter, the page-index/page-size reconciliation and the busy-retry rule:
//! while a fetch is in flight, further fetch requests coalesce into a single
//! armed retry timer with a randomised delay, instead of each spawning its
//! own rescheduling chain. A fetch that fails leaves the previously fetched
//! page in place.

use crate::config::UiConfig;
use crate::task::ScheduledTask;
use async_trait::async_trait;
use ptui_api::{ApiError, NamePattern, PatientTreatmentApi, SortOrder};
use ptui_models::{MinPatientPage, MinTreatmentPage};
use rand::Rng;
use std::ops::Range;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;
use tokio::sync::watch;

/// A source of entity pages for one controller instantiation.
#[async_trait]
pub trait PageSource: Send + Sync + 'static {
    /// The page model this source produces.
    type Page: Clone + Send + Sync + 'static;

    /// Fetch one page of entities whose name satisfies `pattern`.
    async fn fetch_page(
        &self,
        pattern: &NamePattern,
        order: &SortOrder,
        offset: u64,
        limit: u64,
    ) -> Result<Self::Page, ApiError>;
}

/// The patients instantiation of the list controller.
pub struct PatientPages {
    api: Arc<dyn PatientTreatmentApi>,
}

impl PatientPages {
    pub fn new(api: Arc<dyn PatientTreatmentApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PageSource for PatientPages {
    type Page = MinPatientPage;

    async fn fetch_page(
        &self,
        pattern: &NamePattern,
        order: &SortOrder,
        offset: u64,
        limit: u64,
    ) -> Result<Self::Page, ApiError> {
        self.api.patients_page(pattern, order, offset, limit).await
    }
}

/// The treatments instantiation of the list controller.
pub struct TreatmentPages {
    api: Arc<dyn PatientTreatmentApi>,
}

impl TreatmentPages {
    pub fn new(api: Arc<dyn PatientTreatmentApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PageSource for TreatmentPages {
    type Page = MinTreatmentPage;

    async fn fetch_page(
        &self,
        pattern: &NamePattern,
        order: &SortOrder,
        offset: u64,
        limit: u64,
    ) -> Result<Self::Page, ApiError> {
        self.api.treatments_page(pattern, order, offset, limit).await
    }
}

struct PagerState<P> {
    /// The pattern derived from the current filter input.
    pattern: NamePattern,
    /// The pattern of the last applied fetch; `None` forces the next refetch.
    last_pattern: Option<NamePattern>,
    /// Zero-based page index.
    page_index: u64,
    page_size: u64,
    /// The last fetched page, kept across failed refetches.
    page: Option<P>,
    /// Busy flag: a fetch is in flight.
    updating: bool,
    /// Monotonic fetch counter; a response from an older fetch is discarded.
    generation: u64,
    /// The armed busy-retry, at most one at a time.
    retry: Option<ScheduledTask>,
}

/// The paginated search controller, generic over the entity page source.
pub struct PagedSearch<S: PageSource> {
    source: Arc<S>,
    order: SortOrder,
    retry_window_ms: Range<u64>,
    state: Mutex<PagerState<S::Page>>,
    revision: watch::Sender<u64>,
}

impl PagedSearch<PatientPages> {
    /// The patients list controller, sorted ascending by name.
    pub fn patients(api: Arc<dyn PatientTreatmentApi>, config: &UiConfig) -> Arc<Self> {
        Self::new(PatientPages::new(api), config)
    }
}

impl PagedSearch<TreatmentPages> {
    /// The treatments list controller, sorted ascending by name.
    pub fn treatments(api: Arc<dyn PatientTreatmentApi>, config: &UiConfig) -> Arc<Self> {
        Self::new(TreatmentPages::new(api), config)
    }
}

impl<S: PageSource> PagedSearch<S> {
    /// Create a controller over `source` with the configured page size.
    pub fn new(source: S, config: &UiConfig) -> Arc<Self> {
        let (revision, _) = watch::channel(0);
        Arc::new(Self {
            source: Arc::new(source),
            order: SortOrder::ascending("name"),
            retry_window_ms: config.retry_window_ms(),
            state: Mutex::new(PagerState {
                pattern: NamePattern::match_all(),
                last_pattern: None,
                page_index: 0,
                page_size: config.page_size(),
                page: None,
                updating: false,
                generation: 0,
                retry: None,
            }),
            revision,
        })
    }

    /// Derive the pattern for a raw filter input and refetch when it differs
    /// from the last fetched one, resetting to the first page.
    pub fn set_name_filter(self: &Arc<Self>, raw: Option<&str>) {
        let pattern = NamePattern::from_input(raw);
        let changed = {
            let mut state = self.lock_state();
            if state.last_pattern.as_ref() == Some(&pattern) {
                false
            } else {
                state.pattern = pattern;
                state.page_index = 0;
                true
            }
        };
        if changed {
            self.refetch();
        }
    }

    /// Reconcile a paginator event with the controller state.
    ///
    /// A page-size change recomputes the index so the previous first visible
    /// item stays on the shown page; any accepted change invalidates the last
    /// fetched pattern so the refetch is not elided.
    pub fn handle_page_event(self: &Arc<Self>, new_page_size: u64, new_page_index: u64) {
        if new_page_size == 0 {
            tracing::warn!("ignoring a paginator event with a zero page size");
            return;
        }

        let changed = {
            let mut state = self.lock_state();
            if new_page_size != state.page_size {
                let old_offset = state.page_size * state.page_index;
                state.page_index = old_offset / new_page_size;
                state.page_size = new_page_size;
                state.last_pattern = None;
                true
            } else if new_page_index != state.page_index {
                state.page_index = new_page_index;
                state.last_pattern = None;
                true
            } else {
                false
            }
        };
        if changed {
            self.refetch();
        }
    }

    /// Fetch the page for the current pattern, index and size.
    ///
    /// While a fetch is in flight the request is deferred: a single retry
    /// timer is armed with a delay drawn uniformly from the configured
    /// window, and re-evaluates the busy rule when it fires. Requests
    /// arriving while the timer is armed coalesce into it.
    pub fn refetch(self: &Arc<Self>) {
        let mut state = self.lock_state();
        if state.updating {
            if state.retry.is_none() {
                let delay = self.retry_delay();
                let weak = Arc::downgrade(self);
                state.retry = Some(ScheduledTask::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let Some(controller) = weak.upgrade() else {
                        return;
                    };
                    // This task owns itself through the armed slot; release
                    // the handle without aborting before re-evaluating.
                    if let Some(task) = controller.lock_state().retry.take() {
                        task.detach();
                    }
                    controller.refetch();
                }));
            }
            return;
        }

        // This fetch satisfies any deferred request as well.
        if let Some(task) = state.retry.take() {
            task.cancel();
        }

        state.updating = true;
        state.generation += 1;
        let generation = state.generation;
        let pattern = state.pattern.clone();
        let offset = state.page_index * state.page_size;
        let limit = state.page_size;
        drop(state);
        self.bump_revision();

        let weak = Arc::downgrade(self);
        let source = Arc::clone(&self.source);
        let order = self.order.clone();
        tokio::spawn(async move {
            let result = source.fetch_page(&pattern, &order, offset, limit).await;

            // A controller torn down while the request was in flight simply
            // drops the response.
            let Some(controller) = weak.upgrade() else {
                return;
            };
            let mut state = controller.lock_state();
            if state.generation != generation {
                tracing::debug!("discarding a stale page response");
                return;
            }
            match result {
                Ok(page) => {
                    state.page = Some(page);
                    state.last_pattern = Some(pattern);
                }
                Err(error) => {
                    tracing::error!(%error, "cannot fetch the page");
                }
            }
            state.updating = false;
            drop(state);
            controller.bump_revision();
        });
    }

    /// The last fetched page, if any.
    pub fn page(&self) -> Option<S::Page> {
        self.lock_state().page.clone()
    }

    /// The pattern derived from the current filter input.
    pub fn pattern(&self) -> NamePattern {
        self.lock_state().pattern.clone()
    }

    /// The pattern of the last applied fetch.
    pub fn last_pattern(&self) -> Option<NamePattern> {
        self.lock_state().last_pattern.clone()
    }

    pub fn page_index(&self) -> u64 {
        self.lock_state().page_index
    }

    pub fn page_size(&self) -> u64 {
        self.lock_state().page_size
    }

    /// Whether a fetch is in flight.
    pub fn is_updating(&self) -> bool {
        self.lock_state().updating
    }

    /// A receiver bumped whenever the controller state changes; lets a view
    /// or a test await quiescence instead of polling.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn retry_delay(&self) -> Duration {
        let millis = rand::thread_rng().gen_range(self.retry_window_ms.clone());
        Duration::from_millis(millis)
    }

    fn lock_state(&self) -> MutexGuard<'_, PagerState<S::Page>> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn bump_revision(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}
