use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::geo::GeoPoint;

/// Admin moderation state of a courier's profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    Pending,
    Approved,
    Rejected,
    Suspended,
}

impl ProfileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileStatus::Pending => "pending",
            ProfileStatus::Approved => "approved",
            ProfileStatus::Rejected => "rejected",
            ProfileStatus::Suspended => "suspended",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ProfileStatus::Pending),
            "approved" => Some(ProfileStatus::Approved),
            "rejected" => Some(ProfileStatus::Rejected),
            "suspended" => Some(ProfileStatus::Suspended),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Online,
    Offline,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Online => "online",
            Availability::Offline => "offline",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "online" => Some(Availability::Online),
            "offline" => Some(Availability::Offline),
            _ => None,
        }
    }
}

/// One profile per courier user. `location` is the last-known position,
/// pushed by the courier out-of-band; no freshness bound is asserted.
#[derive(Debug, Clone)]
pub struct CourierProfile {
    pub user_id: Uuid,
    pub vehicle_type: String,
    pub plate_number: String,
    pub license_number: String,
    pub national_id: String,
    /// Stored image paths; uploads themselves are handled out-of-band.
    pub profile_image: Option<String>,
    pub id_card_image: Option<String>,
    pub status: ProfileStatus,
    pub availability: Availability,
    pub location: Option<GeoPoint>,
    pub updated_at: DateTime<Utc>,
}
