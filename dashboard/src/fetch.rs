use crate::config::DashboardConfig;
use crate::store::SnapshotStore;
use fuelmap_owner_api::ApiError;
use fuelmap_owner_api::DashboardTransport;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::debug;
use tracing::warn;

/// Load status of the canonical dashboard read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// Nothing loaded and nothing in flight.
    Idle,
    /// Initial load in flight, no data to display yet.
    Loading,
    Success,
    Error,
}

/// Coordinates the canonical read of the dashboard state.
///
/// At most one fetch is in flight at a time. A completed fetch stays fresh
/// for the configured window; after that `ensure_fresh` revalidates in the
/// background while the stale value remains on display. A failed fetch is
/// retried automatically (once, by default) before surfacing an error, and
/// the previously displayed data is never dropped on failure.
///
/// Cancellation is cheap and idempotent. Every fetch carries a generation;
/// a cancelled or superseded fetch finds its generation retired and writes
/// nothing, even if the task abort loses the race with completion.
#[derive(Clone)]
pub struct FetchCoordinator {
    inner: Arc<CoordinatorInner>,
}

struct CoordinatorInner {
    store: SnapshotStore,
    transport: Arc<dyn DashboardTransport>,
    config: DashboardConfig,
    state: Mutex<FetchState>,
    /// Highest generation that has settled (written, failed, or cancelled).
    /// `refresh` and `settled` park on this channel.
    done_tx: watch::Sender<u64>,
}

struct FetchState {
    status: FetchStatus,
    is_refetching: bool,
    last_error: Option<ApiError>,
    fetched_at: Option<Instant>,
    stale: bool,
    in_flight: Option<InFlightFetch>,
    next_generation: u64,
}

struct InFlightFetch {
    generation: u64,
    abort: AbortHandle,
}

impl FetchCoordinator {
    pub fn new(
        store: SnapshotStore,
        transport: Arc<dyn DashboardTransport>,
        config: DashboardConfig,
    ) -> Self {
        let (done_tx, _done_rx) = watch::channel(0);
        Self {
            inner: Arc::new(CoordinatorInner {
                store,
                transport,
                config,
                state: Mutex::new(FetchState {
                    status: FetchStatus::Idle,
                    is_refetching: false,
                    last_error: None,
                    fetched_at: None,
                    stale: false,
                    in_flight: None,
                    next_generation: 1,
                }),
                done_tx,
            }),
        }
    }

    pub fn status(&self) -> FetchStatus {
        self.inner.state().status
    }

    pub fn is_refetching(&self) -> bool {
        self.inner.state().is_refetching
    }

    pub fn last_error(&self) -> Option<ApiError> {
        self.inner.state().last_error.clone()
    }

    pub fn last_fetched_at(&self) -> Option<Instant> {
        self.inner.state().fetched_at
    }

    /// Whether the current data is within the freshness window and not
    /// explicitly invalidated.
    pub fn is_fresh(&self) -> bool {
        self.inner.is_fresh(&self.inner.state())
    }

    /// Start a fetch unless the data is fresh or one is already in flight.
    /// Returns immediately; the read runs in the background.
    pub fn ensure_fresh(&self) {
        let mut state = self.inner.state();
        if state.in_flight.is_some() || self.inner.is_fresh(&state) {
            return;
        }
        self.start_fetch(&mut state);
    }

    /// Like [`Self::ensure_fresh`], but waits for the joined fetch to settle
    /// and reports the coordinator's outcome. Resolves `Ok` immediately when
    /// the data is already fresh.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let target = {
            let mut state = self.inner.state();
            match &state.in_flight {
                Some(in_flight) => in_flight.generation,
                None if self.inner.is_fresh(&state) => return Ok(()),
                None => self.start_fetch(&mut state),
            }
        };
        self.wait_done(target).await;

        let state = self.inner.state();
        match (&state.status, &state.last_error) {
            (FetchStatus::Error, Some(error)) => Err(error.clone()),
            _ => Ok(()),
        }
    }

    /// Mark the data stale, cancel any in-flight read, and start a fresh
    /// one. The stale value stays on display until the new read lands.
    pub fn invalidate(&self) {
        debug!("Invalidating dashboard data");
        let cancelled = {
            let mut state = self.inner.state();
            let cancelled = state.in_flight.take().map(|in_flight| {
                in_flight.abort.abort();
                in_flight.generation
            });
            state.stale = true;
            self.start_fetch(&mut state);
            cancelled
        };
        if let Some(generation) = cancelled {
            debug!(generation, "Cancelled in-flight dashboard fetch");
            self.inner.mark_done(generation);
        }
    }

    /// Abort the in-flight fetch, if any. Idempotent; the aborted fetch's
    /// result is guaranteed never to reach the store.
    pub fn cancel_in_flight(&self) {
        let cancelled = {
            let mut state = self.inner.state();
            match state.in_flight.take() {
                Some(in_flight) => {
                    in_flight.abort.abort();
                    state.is_refetching = false;
                    if state.status == FetchStatus::Loading {
                        state.status = FetchStatus::Idle;
                    }
                    Some(in_flight.generation)
                }
                None => None,
            }
        };
        if let Some(generation) = cancelled {
            debug!(generation, "Cancelled in-flight dashboard fetch");
            self.inner.mark_done(generation);
        }
    }

    /// Wait until no fetch is in flight.
    pub async fn settled(&self) {
        loop {
            let target = match &self.inner.state().in_flight {
                Some(in_flight) => in_flight.generation,
                None => return,
            };
            self.wait_done(target).await;
        }
    }

    async fn wait_done(&self, target: u64) {
        let mut rx = self.inner.done_tx.subscribe();
        while *rx.borrow_and_update() < target {
            if rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// Spawn the read task and register it as the in-flight fetch. The
    /// caller holds the state lock, so the task cannot settle before its
    /// generation is recorded.
    fn start_fetch(&self, state: &mut FetchState) -> u64 {
        let generation = state.next_generation;
        state.next_generation += 1;

        if self.inner.store.is_present() {
            state.is_refetching = true;
        } else {
            state.status = FetchStatus::Loading;
            state.is_refetching = false;
        }
        debug!(
            generation,
            refetching = state.is_refetching,
            "Starting dashboard fetch"
        );

        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            inner.run_fetch(generation).await;
        });
        state.in_flight = Some(InFlightFetch {
            generation,
            abort: handle.abort_handle(),
        });
        generation
    }
}

impl CoordinatorInner {
    fn state(&self) -> MutexGuard<'_, FetchState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn is_fresh(&self, state: &FetchState) -> bool {
        if state.stale {
            return false;
        }
        match state.fetched_at {
            Some(fetched_at) => fetched_at.elapsed() < self.config.freshness_window(),
            None => false,
        }
    }

    async fn run_fetch(self: Arc<Self>, generation: u64) {
        let mut attempt = 0;
        let result = loop {
            match self.transport.fetch_dashboard().await {
                Ok(snapshot) => break Ok(snapshot),
                Err(error) => {
                    if attempt < self.config.fetch_retry_limit {
                        attempt += 1;
                        warn!(error = %error, attempt, "Dashboard fetch failed, retrying");
                        continue;
                    }
                    break Err(error);
                }
            }
        };

        {
            let mut state = self.state();
            let current = state
                .in_flight
                .as_ref()
                .is_some_and(|in_flight| in_flight.generation == generation);
            if !current {
                // Cancelled or superseded while the response was in the air.
                debug!(generation, "Dropping result of retired dashboard fetch");
                drop(state);
                self.mark_done(generation);
                return;
            }
            state.in_flight = None;
            state.is_refetching = false;
            match result {
                Ok(snapshot) => {
                    // Written under the state lock so a cancel-then-mutate
                    // sequence can never interleave with this commit.
                    self.store.replace(snapshot);
                    state.status = FetchStatus::Success;
                    state.last_error = None;
                    state.fetched_at = Some(Instant::now());
                    state.stale = false;
                    debug!(generation, "Dashboard fetch settled");
                }
                Err(error) => {
                    warn!(generation, error = %error, "Dashboard fetch failed");
                    state.status = FetchStatus::Error;
                    state.last_error = Some(error);
                }
            }
        }
        self.mark_done(generation);
    }

    /// Retire `generation`; the counter never moves backwards even if an
    /// old fetch settles after a newer one.
    fn mark_done(&self, generation: u64) {
        self.done_tx
            .send_modify(|done| *done = (*done).max(generation));
    }
}
