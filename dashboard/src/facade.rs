use crate::catalog;
use crate::config::DashboardConfig;
use crate::fetch::FetchCoordinator;
use crate::fetch::FetchStatus;
use crate::mutation::MutationEngine;
use crate::mutation::MutationKind;
use crate::store::SnapshotStore;
use fuelmap_owner_api::ApiError;
use fuelmap_owner_api::ApiResult;
use fuelmap_owner_api::Broadcast;
use fuelmap_owner_api::ClaimStationRequest;
use fuelmap_owner_api::CreateBroadcastRequest;
use fuelmap_owner_api::DashboardSnapshot;
use fuelmap_owner_api::DashboardTransport;
use fuelmap_owner_api::ProfilePatch;
use fuelmap_owner_api::ScheduleBroadcastRequest;
use fuelmap_owner_api::StationOwner;
use fuelmap_owner_api::UpdateBroadcastRequest;
use fuelmap_owner_api::UpdateStationRequest;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::Instant;

/// The surface dashboard screens consume.
///
/// One value per signed-in owner session, cheaply cloneable; clones share
/// the same state. The transport is injected at construction and there is
/// no global state anywhere, so independent instances (and tests) never
/// interfere with each other.
///
/// Reads never block and never fail: [`Self::data`] returns the current
/// composite state, or an empty default before the first load. Writes go
/// through the optimistic mutation engine and resolve with their own
/// result; displayed state is kept consistent throughout, including
/// rollback of the optimistic preview when a request fails.
#[derive(Clone)]
pub struct OwnerDashboard {
    store: SnapshotStore,
    coordinator: FetchCoordinator,
    engine: MutationEngine,
}

impl OwnerDashboard {
    pub fn new(transport: Arc<dyn DashboardTransport>) -> Self {
        Self::with_config(transport, DashboardConfig::default())
    }

    pub fn with_config(transport: Arc<dyn DashboardTransport>, config: DashboardConfig) -> Self {
        let store = SnapshotStore::new();
        let coordinator = FetchCoordinator::new(store.clone(), Arc::clone(&transport), config);
        let engine = MutationEngine::new(store.clone(), coordinator.clone(), transport);
        Self {
            store,
            coordinator,
            engine,
        }
    }

    /// Current dashboard state; an empty default while nothing is loaded.
    pub fn data(&self) -> DashboardSnapshot {
        self.store.read().unwrap_or_default()
    }

    /// Change notification for the dashboard state. The receiver observes
    /// every committed write: fetch results, optimistic previews,
    /// rollbacks, and success merges.
    pub fn subscribe(&self) -> watch::Receiver<Option<DashboardSnapshot>> {
        self.store.subscribe()
    }

    /// Kick off a background fetch unless the data is fresh. Call on
    /// screen entry; within the freshness window it does nothing.
    pub fn ensure_fresh(&self) {
        self.coordinator.ensure_fresh();
    }

    /// Awaitable [`Self::ensure_fresh`]; resolves once the joined fetch
    /// settles. Suits initial mounts that want to block on data.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        self.coordinator.refresh().await
    }

    /// Drop freshness and refetch now, keeping the stale value on display
    /// until the new one lands. Suits pull-to-refresh.
    pub fn invalidate(&self) {
        self.coordinator.invalidate();
    }

    /// Wait until no fetch is in flight.
    pub async fn settled(&self) {
        self.coordinator.settled().await;
    }

    pub fn fetch_status(&self) -> FetchStatus {
        self.coordinator.status()
    }

    pub fn is_refetching(&self) -> bool {
        self.coordinator.is_refetching()
    }

    pub fn last_fetch_error(&self) -> Option<ApiError> {
        self.coordinator.last_error()
    }

    pub fn last_fetched_at(&self) -> Option<Instant> {
        self.coordinator.last_fetched_at()
    }

    /// Whether at least one invocation of `kind` is in flight. Drives
    /// per-button spinners and double-submit guards.
    pub fn pending(&self, kind: MutationKind) -> bool {
        self.engine.pending(kind)
    }

    /// The most recent failure of `kind`, cleared when the next invocation
    /// of the same kind begins.
    pub fn last_mutation_error(&self, kind: MutationKind) -> Option<ApiError> {
        self.engine.last_error(kind)
    }

    pub async fn claim_station(&self, request: ClaimStationRequest) -> ApiResult<()> {
        self.engine.execute(catalog::claim_station(), request).await
    }

    pub async fn unclaim_station(&self, station_id: impl Into<String>) -> ApiResult<()> {
        self.engine
            .execute(catalog::unclaim_station(), station_id.into())
            .await
    }

    pub async fn update_station(&self, request: UpdateStationRequest) -> ApiResult<()> {
        self.engine.execute(catalog::update_station(), request).await
    }

    pub async fn create_broadcast(&self, request: CreateBroadcastRequest) -> ApiResult<Broadcast> {
        self.engine
            .execute(catalog::create_broadcast(), request)
            .await
    }

    pub async fn update_broadcast(&self, request: UpdateBroadcastRequest) -> ApiResult<()> {
        self.engine
            .execute(catalog::update_broadcast(), request)
            .await
    }

    pub async fn delete_broadcast(&self, broadcast_id: impl Into<String>) -> ApiResult<()> {
        self.engine
            .execute(catalog::delete_broadcast(), broadcast_id.into())
            .await
    }

    pub async fn send_broadcast(&self, broadcast_id: impl Into<String>) -> ApiResult<()> {
        self.engine
            .execute(catalog::send_broadcast(), broadcast_id.into())
            .await
    }

    pub async fn schedule_broadcast(&self, request: ScheduleBroadcastRequest) -> ApiResult<()> {
        self.engine
            .execute(catalog::schedule_broadcast(), request)
            .await
    }

    pub async fn cancel_broadcast(&self, broadcast_id: impl Into<String>) -> ApiResult<()> {
        self.engine
            .execute(catalog::cancel_broadcast(), broadcast_id.into())
            .await
    }

    pub async fn duplicate_broadcast(&self, broadcast_id: impl Into<String>) -> ApiResult<Broadcast> {
        self.engine
            .execute(catalog::duplicate_broadcast(), broadcast_id.into())
            .await
    }

    pub async fn update_profile(&self, patch: ProfilePatch) -> ApiResult<StationOwner> {
        self.engine.execute(catalog::update_profile(), patch).await
    }
}
