use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::geo::GeoPoint;
use super::lifecycle::{LifecycleState, OrderStatus, PaymentStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CashOnDelivery,
    Telebirr,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "cash_on_delivery",
            PaymentMethod::Telebirr => "telebirr",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cash_on_delivery" => Some(PaymentMethod::CashOnDelivery),
            "telebirr" => Some(PaymentMethod::Telebirr),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewOrderInput {
    pub product_id: Uuid,
    pub buyer_id: Uuid,
    pub quantity: i32,
    pub dropoff: GeoPoint,
    pub payment_method: PaymentMethod,
    pub telebirr_txn_number: Option<String>,
    pub telebirr_screenshot: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub product_id: Uuid,
    pub seller_id: Uuid,
    pub buyer_id: Uuid,
    pub quantity: i32,
    pub total_price: BigDecimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub telebirr_txn_number: Option<String>,
    pub telebirr_screenshot: Option<String>,
    pub delivery_id: Option<Uuid>,
    pub dropoff: GeoPoint,
    pub created_at: DateTime<Utc>,
}

impl OrderView {
    pub fn lifecycle_state(&self) -> LifecycleState {
        LifecycleState {
            status: self.status,
            payment_status: self.payment_status,
            has_courier: self.delivery_id.is_some(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListResult {
    pub items: Vec<OrderView>,
    pub total: i64,
}

/// A candidate order for a courier, with the great-circle distance from the
/// courier's last-known position.
#[derive(Debug, Clone)]
pub struct NearbyOrder {
    pub order: OrderView,
    pub distance_km: f64,
}

/// What `GET /delivery/assignments` returns: the courier's stored location,
/// the fixed radius, and the in-range orders ascending by distance.
#[derive(Debug, Clone)]
pub struct AssignmentFeed {
    pub delivery_location: GeoPoint,
    pub max_distance_km: f64,
    pub orders: Vec<NearbyOrder>,
}
