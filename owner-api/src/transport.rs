use crate::error::ApiResult;
use crate::model::Broadcast;
use crate::model::DashboardSnapshot;
use crate::model::StationOwner;
use crate::requests::ClaimStationRequest;
use crate::requests::CreateBroadcastRequest;
use crate::requests::ProfilePatch;
use crate::requests::ScheduleBroadcastRequest;
use crate::requests::UpdateBroadcastRequest;
use crate::requests::UpdateStationRequest;
use async_trait::async_trait;

/// The wire boundary the dashboard engine talks through.
///
/// Implementations map HTTP (or any other substrate) onto the closed
/// [`crate::ApiError`] taxonomy; the engine consumes the trait as
/// `Arc<dyn DashboardTransport>` and never sees raw transport failures.
/// Methods correspond one-to-one with the dashboard endpoints.
#[async_trait]
pub trait DashboardTransport: Send + Sync {
    /// Canonical read of the whole composite dashboard state.
    async fn fetch_dashboard(&self) -> ApiResult<DashboardSnapshot>;

    async fn claim_station(&self, request: ClaimStationRequest) -> ApiResult<()>;

    async fn unclaim_station(&self, station_id: String) -> ApiResult<()>;

    async fn update_station(&self, request: UpdateStationRequest) -> ApiResult<()>;

    /// Returns the created broadcast in `Draft` status with its server id.
    async fn create_broadcast(&self, request: CreateBroadcastRequest) -> ApiResult<Broadcast>;

    async fn update_broadcast(&self, request: UpdateBroadcastRequest) -> ApiResult<()>;

    async fn delete_broadcast(&self, broadcast_id: String) -> ApiResult<()>;

    async fn send_broadcast(&self, broadcast_id: String) -> ApiResult<()>;

    async fn schedule_broadcast(&self, request: ScheduleBroadcastRequest) -> ApiResult<()>;

    async fn cancel_broadcast(&self, broadcast_id: String) -> ApiResult<()>;

    /// Returns the copy in `Draft` status with a fresh server id.
    async fn duplicate_broadcast(&self, broadcast_id: String) -> ApiResult<Broadcast>;

    /// Returns the updated owner record as confirmed by the server.
    async fn update_profile(&self, patch: ProfilePatch) -> ApiResult<StationOwner>;
}
