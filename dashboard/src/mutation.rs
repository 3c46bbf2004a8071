use crate::fetch::FetchCoordinator;
use crate::rollback::MutationScope;
use crate::rollback::RowPreImage;
use crate::store::SnapshotStore;
use fuelmap_owner_api::ApiError;
use fuelmap_owner_api::ApiResult;
use fuelmap_owner_api::DashboardSnapshot;
use fuelmap_owner_api::DashboardTransport;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use tracing::debug;
use tracing::warn;

/// Identifies one of the dashboard mutations for per-operation bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    ClaimStation,
    UnclaimStation,
    UpdateStation,
    CreateBroadcast,
    UpdateBroadcast,
    DeleteBroadcast,
    SendBroadcast,
    ScheduleBroadcast,
    CancelBroadcast,
    DuplicateBroadcast,
    UpdateProfile,
}

/// How a mutation reconciles the local state with server truth once its
/// request settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlePolicy {
    /// Refetch after success and failure alike.
    Invalidate,
    /// Trust the merged server response; no refetch.
    None,
    /// Refetch only after failure.
    InvalidateOnFailure,
}

/// Issues the operation's request against the injected transport.
pub type RequestFn<A, R> =
    for<'t> fn(&'t dyn DashboardTransport, A) -> BoxFuture<'t, ApiResult<R>>;

/// The optimistic half of a mutation: a preview of the expected server
/// outcome plus a declaration of the single row the preview touches.
pub struct OptimisticSpec<A> {
    pub apply: fn(&mut DashboardSnapshot, &A),
    /// Which row `apply` edits; rollback restores exactly this row.
    pub scope: fn(&A) -> MutationScope,
}

/// Everything that distinguishes one mutation from another. The execution
/// protocol itself is uniform; see [`MutationEngine::execute`].
pub struct MutationSpec<A, R> {
    pub kind: MutationKind,
    pub request: RequestFn<A, R>,
    pub optimistic: Option<OptimisticSpec<A>>,
    /// Merge of the server's authoritative response into the local state.
    pub on_success: Option<fn(&mut DashboardSnapshot, &R)>,
    pub settle: SettlePolicy,
}

/// Runs every dashboard write through the same optimistic protocol:
///
/// 1. mark the operation pending and clear its previous error;
/// 2. if an optimistic transform exists, cancel any in-flight fetch, then
///    capture the scoped row's pre-image and apply the transform in one
///    atomic store commit (skipped entirely before the first load);
/// 3. await the request;
/// 4. on success, merge the server response if the entry defines one, then
///    settle; on failure, restore the captured row, record the error on the
///    operation's channel, then settle;
/// 5. resolve the caller with the operation's own result.
///
/// Requests are never retried or cancelled here; only the local optimistic
/// effect is rolled back.
#[derive(Clone)]
pub struct MutationEngine {
    store: SnapshotStore,
    coordinator: FetchCoordinator,
    transport: Arc<dyn DashboardTransport>,
    ops: Arc<Mutex<HashMap<MutationKind, OpState>>>,
}

#[derive(Default)]
struct OpState {
    in_flight: usize,
    last_error: Option<ApiError>,
}

impl MutationEngine {
    pub fn new(
        store: SnapshotStore,
        coordinator: FetchCoordinator,
        transport: Arc<dyn DashboardTransport>,
    ) -> Self {
        Self {
            store,
            coordinator,
            transport,
            ops: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Whether at least one invocation of `kind` is currently in flight.
    pub fn pending(&self, kind: MutationKind) -> bool {
        self.ops().get(&kind).is_some_and(|op| op.in_flight > 0)
    }

    /// The error of the most recent failed invocation of `kind`, cleared
    /// when the next invocation of the same kind begins.
    pub fn last_error(&self, kind: MutationKind) -> Option<ApiError> {
        self.ops().get(&kind).and_then(|op| op.last_error.clone())
    }

    pub async fn execute<A, R>(&self, spec: MutationSpec<A, R>, args: A) -> ApiResult<R> {
        self.begin(spec.kind);
        debug!(
            kind = ?spec.kind,
            optimistic = spec.optimistic.is_some(),
            "Executing dashboard mutation"
        );

        let pre_image = match &spec.optimistic {
            Some(optimistic) => {
                // A fetch started before this mutation could land after the
                // optimistic write and clobber it with pre-mutation data.
                self.coordinator.cancel_in_flight();
                let scope = (optimistic.scope)(&args);
                self.store.update_if_present_with(|snapshot| {
                    let pre_image = RowPreImage::capture(snapshot, &scope);
                    (optimistic.apply)(snapshot, &args);
                    pre_image
                })
            }
            None => None,
        };

        let result = (spec.request)(self.transport.as_ref(), args).await;

        match &result {
            Ok(output) => {
                if let Some(merge) = spec.on_success {
                    self.store.update_if_present(|snapshot| merge(snapshot, output));
                }
                if spec.settle == SettlePolicy::Invalidate {
                    self.coordinator.invalidate();
                }
                self.finish(spec.kind, None);
            }
            Err(error) => {
                warn!(kind = ?spec.kind, error = %error, "Dashboard mutation failed");
                if let Some(pre_image) = pre_image {
                    self.store
                        .update_if_present(|snapshot| pre_image.restore(snapshot));
                }
                if matches!(
                    spec.settle,
                    SettlePolicy::Invalidate | SettlePolicy::InvalidateOnFailure
                ) {
                    self.coordinator.invalidate();
                }
                self.finish(spec.kind, Some(error.clone()));
            }
        }
        result
    }

    fn begin(&self, kind: MutationKind) {
        let mut ops = self.ops();
        let op = ops.entry(kind).or_default();
        op.in_flight += 1;
        op.last_error = None;
    }

    fn finish(&self, kind: MutationKind, error: Option<ApiError>) {
        let mut ops = self.ops();
        let op = ops.entry(kind).or_default();
        op.in_flight = op.in_flight.saturating_sub(1);
        // A success does not clear an error a concurrent sibling recorded.
        if error.is_some() {
            op.last_error = error;
        }
    }

    fn ops(&self) -> MutexGuard<'_, HashMap<MutationKind, OpState>> {
        match self.ops.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
