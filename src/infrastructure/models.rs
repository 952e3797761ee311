use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::courier::{Availability, CourierProfile, ProfileStatus};
use crate::domain::errors::DomainError;
use crate::domain::geo::GeoPoint;
use crate::domain::lifecycle::{OrderStatus, PaymentStatus};
use crate::domain::order::{OrderView, PaymentMethod};
use crate::schema::{delivery_profiles, orders, products};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub seller_id: Uuid,
    pub buyer_id: Uuid,
    pub quantity: i32,
    pub total_price: BigDecimal,
    pub status: String,
    pub payment_status: String,
    pub payment_method: String,
    pub telebirr_txn_number: Option<String>,
    pub telebirr_screenshot: Option<String>,
    pub delivery_id: Option<Uuid>,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub seller_id: Uuid,
    pub buyer_id: Uuid,
    pub quantity: i32,
    pub total_price: BigDecimal,
    pub status: String,
    pub payment_status: String,
    pub payment_method: String,
    pub telebirr_txn_number: Option<String>,
    pub telebirr_screenshot: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl TryFrom<OrderRow> for OrderView {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, DomainError> {
        let status = OrderStatus::parse(&row.status).ok_or_else(|| {
            DomainError::Internal(format!("unknown order status '{}' in row {}", row.status, row.id))
        })?;
        let payment_status = PaymentStatus::parse(&row.payment_status).ok_or_else(|| {
            DomainError::Internal(format!(
                "unknown payment status '{}' in row {}",
                row.payment_status, row.id
            ))
        })?;
        let payment_method = PaymentMethod::parse(&row.payment_method).ok_or_else(|| {
            DomainError::Internal(format!(
                "unknown payment method '{}' in row {}",
                row.payment_method, row.id
            ))
        })?;
        Ok(OrderView {
            id: row.id,
            product_id: row.product_id,
            seller_id: row.seller_id,
            buyer_id: row.buyer_id,
            quantity: row.quantity,
            total_price: row.total_price,
            status,
            payment_status,
            payment_method,
            telebirr_txn_number: row.telebirr_txn_number,
            telebirr_screenshot: row.telebirr_screenshot,
            delivery_id: row.delivery_id,
            dropoff: GeoPoint {
                latitude: row.latitude,
                longitude: row.longitude,
            },
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub name: String,
    pub price: BigDecimal,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = delivery_profiles)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DeliveryProfileRow {
    pub user_id: Uuid,
    pub vehicle_type: String,
    pub plate_number: String,
    pub license_number: String,
    pub national_id: String,
    pub profile_image: Option<String>,
    pub id_card_image: Option<String>,
    pub status: String,
    pub availability_status: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DeliveryProfileRow> for CourierProfile {
    type Error = DomainError;

    fn try_from(row: DeliveryProfileRow) -> Result<Self, DomainError> {
        let status = ProfileStatus::parse(&row.status).ok_or_else(|| {
            DomainError::Internal(format!(
                "unknown profile status '{}' for courier {}",
                row.status, row.user_id
            ))
        })?;
        let availability = Availability::parse(&row.availability_status).ok_or_else(|| {
            DomainError::Internal(format!(
                "unknown availability '{}' for courier {}",
                row.availability_status, row.user_id
            ))
        })?;
        // A half-written position is treated as no position at all.
        let location = match (row.latitude, row.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint { latitude, longitude }),
            _ => None,
        };
        Ok(CourierProfile {
            user_id: row.user_id,
            vehicle_type: row.vehicle_type,
            plate_number: row.plate_number,
            license_number: row.license_number,
            national_id: row.national_id,
            profile_image: row.profile_image,
            id_card_image: row.id_card_image,
            status,
            availability,
            location,
            updated_at: row.updated_at,
        })
    }
}
