use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;

/// Publication state of a broadcast. Expiry is decided server-side and only
/// ever observed through a refetch; the client never writes `Expired`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastStatus {
    #[default]
    Draft,
    Scheduled,
    Active,
    Expired,
}

/// Review state of a station claim.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

/// The station owner's account record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StationOwner {
    pub id: String,

    /// Registered business name shown on the dashboard header.
    pub business_name: String,

    pub contact_email: String,

    pub contact_phone: Option<String>,

    /// Whether the business passed identity verification.
    pub verified: bool,

    /// Subscription plan identifier, e.g. `"free"` or `"pro"`.
    pub plan: String,

    /// Broadcasts sent in the current quota week.
    #[serde(default)]
    pub broadcasts_used_this_week: u32,

    /// Weekly broadcast allowance for the current plan.
    #[serde(default)]
    pub weekly_broadcast_quota: u32,
}

/// A fuel station claimed by the owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClaimedStation {
    pub id: String,

    pub name: String,

    pub address: String,

    pub brand: Option<String>,

    #[serde(default)]
    pub claim_status: ClaimStatus,

    /// Free-form opening hours, e.g. `"Mon-Fri 06:00-22:00"`.
    pub opening_hours: Option<String>,

    pub phone: Option<String>,

    pub latitude: f64,

    pub longitude: f64,
}

/// An owner broadcast: a short message pushed to drivers near a station.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Broadcast {
    pub id: String,

    pub title: String,

    pub message: String,

    #[serde(default)]
    pub status: BroadcastStatus,

    /// Station the broadcast is targeted at; `None` means all owned stations.
    pub station_id: Option<String>,

    /// Targeting radius around the station, in kilometres.
    pub radius_km: Option<f64>,

    /// Delivery time for scheduled broadcasts; set iff status is `Scheduled`.
    pub scheduled_for: Option<DateTime<Utc>>,

    #[serde(default)]
    pub views: u64,

    #[serde(default)]
    pub clicks: u64,

    pub created_at: DateTime<Utc>,
}

impl Broadcast {
    /// Transition into `Active`, as produced by the send operation.
    pub fn mark_sent(&mut self) {
        self.status = BroadcastStatus::Active;
    }

    /// Transition into `Scheduled` with a delivery time.
    pub fn mark_scheduled(&mut self, scheduled_for: DateTime<Utc>) {
        self.status = BroadcastStatus::Scheduled;
        self.scheduled_for = Some(scheduled_for);
    }

    /// Transition back into `Draft`, clearing any delivery time.
    pub fn mark_cancelled(&mut self) {
        self.status = BroadcastStatus::Draft;
        self.scheduled_for = None;
    }
}

/// Aggregate counters computed server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_stations: u32,
    pub active_broadcasts: u32,
    pub total_views: u64,
    pub total_clicks: u64,
    pub price_reports_this_week: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FuelType {
    pub id: String,
    pub label: String,
}

/// A crowdsourced price report for one fuel type at one station.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FuelPrice {
    pub fuel_type_id: String,
    pub price: f64,
    pub currency: String,
    pub reported_at: DateTime<Utc>,
}

/// The composite dashboard read-model.
///
/// One instance of this value (or none, before the first load) backs every
/// dashboard screen. `Default` is the safe empty view rendered while the
/// first fetch is still in flight.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSnapshot {
    pub owner: Option<StationOwner>,

    pub stations: Vec<ClaimedStation>,

    /// Newest-first, matching the server's ordering.
    pub broadcasts: Vec<Broadcast>,

    pub stats: DashboardStats,

    pub fuel_types: Vec<FuelType>,

    /// Latest reported prices keyed by station id.
    pub current_fuel_prices: HashMap<String, Vec<FuelPrice>>,
}

impl DashboardSnapshot {
    pub fn station(&self, id: &str) -> Option<&ClaimedStation> {
        self.stations.iter().find(|s| s.id == id)
    }

    pub fn station_mut(&mut self, id: &str) -> Option<&mut ClaimedStation> {
        self.stations.iter_mut().find(|s| s.id == id)
    }

    pub fn broadcast(&self, id: &str) -> Option<&Broadcast> {
        self.broadcasts.iter().find(|b| b.id == id)
    }

    pub fn broadcast_mut(&mut self, id: &str) -> Option<&mut Broadcast> {
        self.broadcasts.iter_mut().find(|b| b.id == id)
    }
}
