//! Shared fixtures and the scripted in-memory transport the integration
//! tests drive the engine against.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use fuelmap_owner_api::{
    ApiError, ApiResult, Broadcast, BroadcastStatus, ClaimStationRequest, ClaimStatus,
    ClaimedStation, CreateBroadcastRequest, DashboardSnapshot, DashboardStats, DashboardTransport,
    FuelType, ProfilePatch, ScheduleBroadcastRequest, StationOwner, UpdateBroadcastRequest,
    UpdateStationRequest,
};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;
use tokio::time::{Duration, timeout};

pub async fn await_with_timeout<F, T>(duration: Duration, future: F, context: &str) -> T
where
    F: Future<Output = T>,
{
    timeout(duration, future)
        .await
        .unwrap_or_else(|_| panic!("{context} timed out after {duration:?}"))
}

/// Holds one scripted response in flight until the test releases it.
///
/// The transport signals `entered` when it reaches the gate and then parks
/// on `release`. Single use: one request per gate.
pub struct Gate {
    entered: Notify,
    release: Notify,
}

impl Gate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            entered: Notify::new(),
            release: Notify::new(),
        })
    }

    /// Wait until the transport is parked on this gate.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let the parked request complete.
    pub fn release(&self) {
        self.release.notify_one();
    }

    async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

struct Step<T> {
    gate: Option<Arc<Gate>>,
    result: ApiResult<T>,
}

/// Scripted responses for one transport operation, consumed in order.
/// When the script runs dry the operation falls back to its default
/// behavior (succeed, or serve the fake's current dashboard state).
pub struct OpScript<T> {
    calls: AtomicUsize,
    plan: Mutex<VecDeque<Step<T>>>,
}

impl<T> OpScript<T> {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            plan: Mutex::new(VecDeque::new()),
        }
    }

    pub fn push_ok(&self, value: T) {
        self.push_step(None, Ok(value));
    }

    pub fn push_err(&self, error: ApiError) {
        self.push_step(None, Err(error));
    }

    pub fn push_gated_ok(&self, gate: &Arc<Gate>, value: T) {
        self.push_step(Some(Arc::clone(gate)), Ok(value));
    }

    pub fn push_gated_err(&self, gate: &Arc<Gate>, error: ApiError) {
        self.push_step(Some(Arc::clone(gate)), Err(error));
    }

    /// How many times the operation has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn push_step(&self, gate: Option<Arc<Gate>>, result: ApiResult<T>) {
        self.plan
            .lock()
            .expect("script lock")
            .push_back(Step { gate, result });
    }

    async fn next(&self, fallback: impl FnOnce() -> ApiResult<T>) -> ApiResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.plan.lock().expect("script lock").pop_front();
        match step {
            Some(step) => {
                if let Some(gate) = step.gate {
                    gate.pass().await;
                }
                step.result
            }
            None => fallback(),
        }
    }
}

/// In-memory [`DashboardTransport`] with per-operation scripting.
///
/// `dashboard` is the server truth `fetch_dashboard` serves when not
/// scripted; tests mutate it to simulate what the backend would persist.
pub struct FakeTransport {
    pub dashboard: Mutex<DashboardSnapshot>,
    pub fetch: OpScript<DashboardSnapshot>,
    pub claim: OpScript<()>,
    pub unclaim: OpScript<()>,
    pub update_station: OpScript<()>,
    pub create_broadcast: OpScript<Broadcast>,
    pub update_broadcast: OpScript<()>,
    pub delete_broadcast: OpScript<()>,
    pub send_broadcast: OpScript<()>,
    pub schedule_broadcast: OpScript<()>,
    pub cancel_broadcast: OpScript<()>,
    pub duplicate_broadcast: OpScript<Broadcast>,
    pub update_profile: OpScript<StationOwner>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Self::with_dashboard(dashboard_fixture())
    }

    pub fn with_dashboard(dashboard: DashboardSnapshot) -> Arc<Self> {
        Arc::new(Self {
            dashboard: Mutex::new(dashboard),
            fetch: OpScript::new(),
            claim: OpScript::new(),
            unclaim: OpScript::new(),
            update_station: OpScript::new(),
            create_broadcast: OpScript::new(),
            update_broadcast: OpScript::new(),
            delete_broadcast: OpScript::new(),
            send_broadcast: OpScript::new(),
            schedule_broadcast: OpScript::new(),
            cancel_broadcast: OpScript::new(),
            duplicate_broadcast: OpScript::new(),
            update_profile: OpScript::new(),
        })
    }

    /// Mutate the server truth served by unscripted fetches.
    pub fn set_dashboard(&self, mutate: impl FnOnce(&mut DashboardSnapshot)) {
        mutate(&mut self.dashboard.lock().expect("dashboard lock"));
    }

    fn serve_dashboard(&self) -> DashboardSnapshot {
        self.dashboard.lock().expect("dashboard lock").clone()
    }
}

#[async_trait]
impl DashboardTransport for FakeTransport {
    async fn fetch_dashboard(&self) -> ApiResult<DashboardSnapshot> {
        self.fetch.next(|| Ok(self.serve_dashboard())).await
    }

    async fn claim_station(&self, _request: ClaimStationRequest) -> ApiResult<()> {
        self.claim.next(|| Ok(())).await
    }

    async fn unclaim_station(&self, _station_id: String) -> ApiResult<()> {
        self.unclaim.next(|| Ok(())).await
    }

    async fn update_station(&self, _request: UpdateStationRequest) -> ApiResult<()> {
        self.update_station.next(|| Ok(())).await
    }

    async fn create_broadcast(&self, request: CreateBroadcastRequest) -> ApiResult<Broadcast> {
        let fallback = || {
            Ok(Broadcast {
                id: format!("b-created-{}", self.create_broadcast.calls()),
                title: request.title.clone(),
                message: request.message.clone(),
                status: BroadcastStatus::Draft,
                station_id: request.station_id.clone(),
                radius_km: request.radius_km,
                scheduled_for: None,
                views: 0,
                clicks: 0,
                created_at: Utc::now(),
            })
        };
        self.create_broadcast.next(fallback).await
    }

    async fn update_broadcast(&self, _request: UpdateBroadcastRequest) -> ApiResult<()> {
        self.update_broadcast.next(|| Ok(())).await
    }

    async fn delete_broadcast(&self, _broadcast_id: String) -> ApiResult<()> {
        self.delete_broadcast.next(|| Ok(())).await
    }

    async fn send_broadcast(&self, _broadcast_id: String) -> ApiResult<()> {
        self.send_broadcast.next(|| Ok(())).await
    }

    async fn schedule_broadcast(&self, _request: ScheduleBroadcastRequest) -> ApiResult<()> {
        self.schedule_broadcast.next(|| Ok(())).await
    }

    async fn cancel_broadcast(&self, _broadcast_id: String) -> ApiResult<()> {
        self.cancel_broadcast.next(|| Ok(())).await
    }

    async fn duplicate_broadcast(&self, broadcast_id: String) -> ApiResult<Broadcast> {
        let fallback = || {
            let source = self
                .serve_dashboard()
                .broadcast(&broadcast_id)
                .cloned()
                .unwrap_or_else(|| broadcast_fixture(&broadcast_id, BroadcastStatus::Draft));
            Ok(Broadcast {
                id: format!("{broadcast_id}-copy"),
                status: BroadcastStatus::Draft,
                scheduled_for: None,
                views: 0,
                clicks: 0,
                created_at: Utc::now(),
                ..source
            })
        };
        self.duplicate_broadcast.next(fallback).await
    }

    async fn update_profile(&self, patch: ProfilePatch) -> ApiResult<StationOwner> {
        let fallback = || {
            let mut owner = self
                .serve_dashboard()
                .owner
                .unwrap_or_else(owner_fixture);
            if let Some(business_name) = patch.business_name.clone() {
                owner.business_name = business_name;
            }
            if let Some(contact_email) = patch.contact_email.clone() {
                owner.contact_email = contact_email;
            }
            if let Some(contact_phone) = patch.contact_phone.clone() {
                owner.contact_phone = Some(contact_phone);
            }
            Ok(owner)
        };
        self.update_profile.next(fallback).await
    }
}

pub fn owner_fixture() -> StationOwner {
    StationOwner {
        id: "owner-1".to_string(),
        business_name: "Kowalski Fuels".to_string(),
        contact_email: "office@kowalskifuels.example".to_string(),
        contact_phone: Some("+48 600 100 200".to_string()),
        verified: true,
        plan: "pro".to_string(),
        broadcasts_used_this_week: 1,
        weekly_broadcast_quota: 5,
    }
}

pub fn station_fixture(id: &str) -> ClaimedStation {
    ClaimedStation {
        id: id.to_string(),
        name: format!("Station {id}"),
        address: "1 Main St".to_string(),
        brand: Some("Orlen".to_string()),
        claim_status: ClaimStatus::Verified,
        opening_hours: Some("Mon-Sun 06:00-22:00".to_string()),
        phone: None,
        latitude: 52.23,
        longitude: 21.01,
    }
}

pub fn broadcast_fixture(id: &str, status: BroadcastStatus) -> Broadcast {
    Broadcast {
        id: id.to_string(),
        title: format!("Broadcast {id}"),
        message: "Diesel -5c/L this weekend".to_string(),
        status,
        station_id: Some("st-1".to_string()),
        radius_km: Some(5.0),
        scheduled_for: None,
        views: 12,
        clicks: 3,
        created_at: Utc::now(),
    }
}

pub fn dashboard_fixture() -> DashboardSnapshot {
    DashboardSnapshot {
        owner: Some(owner_fixture()),
        stations: vec![station_fixture("st-1"), station_fixture("st-2")],
        broadcasts: vec![
            broadcast_fixture("b-1", BroadcastStatus::Draft),
            broadcast_fixture("b-2", BroadcastStatus::Active),
        ],
        stats: DashboardStats {
            total_stations: 2,
            active_broadcasts: 1,
            total_views: 120,
            total_clicks: 30,
            price_reports_this_week: 8,
        },
        fuel_types: vec![
            FuelType {
                id: "diesel".to_string(),
                label: "Diesel".to_string(),
            },
            FuelType {
                id: "pb95".to_string(),
                label: "Unleaded 95".to_string(),
            },
        ],
        current_fuel_prices: Default::default(),
    }
}
