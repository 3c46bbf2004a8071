//! Request payloads for the dashboard mutation endpoints.
//!
//! Patch types carry only the fields being changed; a `None` field leaves the
//! target value untouched (clearing a value is not expressible here).

use crate::model::Broadcast;
use crate::model::ClaimedStation;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClaimStationRequest {
    /// Id of the public station being claimed.
    pub station_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,

    /// Link to ownership proof uploaded out of band.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl StationPatch {
    /// Merge the set fields into `station`.
    pub fn apply_to(&self, station: &mut ClaimedStation) {
        if let Some(name) = &self.name {
            station.name = name.clone();
        }
        if let Some(address) = &self.address {
            station.address = address.clone();
        }
        if let Some(brand) = &self.brand {
            station.brand = Some(brand.clone());
        }
        if let Some(opening_hours) = &self.opening_hours {
            station.opening_hours = Some(opening_hours.clone());
        }
        if let Some(phone) = &self.phone {
            station.phone = Some(phone.clone());
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStationRequest {
    pub station_id: String,

    #[serde(flatten)]
    pub patch: StationPatch,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateBroadcastRequest {
    pub title: String,

    pub message: String,

    /// Target station; `None` targets all owned stations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_km: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_km: Option<f64>,
}

impl BroadcastPatch {
    /// Merge the set fields into `broadcast`.
    pub fn apply_to(&self, broadcast: &mut Broadcast) {
        if let Some(title) = &self.title {
            broadcast.title = title.clone();
        }
        if let Some(message) = &self.message {
            broadcast.message = message.clone();
        }
        if let Some(radius_km) = self.radius_km {
            broadcast.radius_km = Some(radius_km);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBroadcastRequest {
    pub broadcast_id: String,

    #[serde(flatten)]
    pub patch: BroadcastPatch,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleBroadcastRequest {
    pub broadcast_id: String,

    pub scheduled_for: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}
