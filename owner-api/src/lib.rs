/*!
# Fuelmap Owner API

Wire-facing types for the station-owner dashboard: the composite dashboard
read-model, the request payloads of the mutation endpoints, the closed
[`ApiError`] taxonomy, and the [`DashboardTransport`] trait the
synchronization engine consumes.

This crate is deliberately transport-agnostic. An HTTP client implements
[`DashboardTransport`] and classifies raw failures with
[`ApiError::from_response`]; tests implement it in memory.
*/

mod error;
mod model;
mod requests;
mod transport;

pub use error::{ApiError, ApiResult};
pub use model::{
    Broadcast, BroadcastStatus, ClaimStatus, ClaimedStation, DashboardSnapshot, DashboardStats,
    FuelPrice, FuelType, StationOwner,
};
pub use requests::{
    BroadcastPatch, ClaimStationRequest, CreateBroadcastRequest, ProfilePatch,
    ScheduleBroadcastRequest, StationPatch, UpdateBroadcastRequest, UpdateStationRequest,
};
pub use transport::DashboardTransport;
