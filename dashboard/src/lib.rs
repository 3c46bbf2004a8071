//! # Fuelmap Dashboard
//!
//! Data synchronization and optimistic mutations for the station-owner
//! dashboard. One composite read-model backs every screen; this crate keeps
//! it fresh in the background and consistent under concurrent,
//! possibly-failing writes.
//!
//! ## Features
//!
//! - Single snapshot store with change subscription
//! - Stale-while-revalidate fetching with a configurable freshness window
//! - Automatic single retry for failed fetches, never for mutations
//! - Optimistic previews with row-scoped rollback on failure
//! - Per-operation pending and error bookkeeping
//! - Constructor-injected transport; no global state
//!
//! ## Example
//!
//! ```no_run
//! use fuelmap_dashboard::OwnerDashboard;
//! use fuelmap_owner_api::{ApiError, CreateBroadcastRequest, DashboardTransport};
//! use std::sync::Arc;
//!
//! # async fn run(transport: Arc<dyn DashboardTransport>) -> Result<(), ApiError> {
//! let dashboard = OwnerDashboard::new(transport);
//! dashboard.refresh().await?;
//!
//! let created = dashboard
//!     .create_broadcast(CreateBroadcastRequest {
//!         title: "Weekend discount".to_string(),
//!         message: "Diesel -5c/L until Sunday".to_string(),
//!         station_id: None,
//!         radius_km: Some(10.0),
//!     })
//!     .await?;
//! dashboard.send_broadcast(created.id).await?;
//!
//! println!("{} broadcasts", dashboard.data().broadcasts.len());
//! # Ok(())
//! # }
//! ```

mod catalog;
mod config;
mod facade;
mod fetch;
mod mutation;
mod rollback;
mod store;

pub use config::DashboardConfig;
pub use facade::OwnerDashboard;
pub use fetch::{FetchCoordinator, FetchStatus};
pub use mutation::{
    MutationEngine, MutationKind, MutationSpec, OptimisticSpec, RequestFn, SettlePolicy,
};
pub use rollback::MutationScope;
pub use store::SnapshotStore;
