use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::{AuthUser, Role};
use crate::domain::courier::{Availability, CourierProfile, ProfileStatus};
use crate::domain::geo::GeoPoint;
use crate::domain::order::AssignmentFeed;
use crate::errors::AppError;
use crate::AppAssignmentService;

use super::orders::OrderResponse;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct NearbyOrderResponse {
    /// Great-circle distance from the courier's stored position, km.
    pub distance_km: f64,
    pub order: OrderResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssignmentFeedResponse {
    pub delivery_location: GeoPoint,
    pub max_distance_km: f64,
    /// In-range unassigned orders, ascending by distance.
    pub orders: Vec<NearbyOrderResponse>,
}

impl From<AssignmentFeed> for AssignmentFeedResponse {
    fn from(feed: AssignmentFeed) -> Self {
        AssignmentFeedResponse {
            delivery_location: feed.delivery_location,
            max_distance_km: feed.max_distance_km,
            orders: feed
                .orders
                .into_iter()
                .map(|n| NearbyOrderResponse {
                    distance_km: n.distance_km,
                    order: n.order.into(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourierProfileResponse {
    pub user_id: Uuid,
    pub vehicle_type: String,
    pub plate_number: String,
    pub license_number: String,
    pub national_id: String,
    pub profile_image: Option<String>,
    pub id_card_image: Option<String>,
    pub status: ProfileStatus,
    pub availability_status: Availability,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub updated_at: String,
}

impl From<CourierProfile> for CourierProfileResponse {
    fn from(profile: CourierProfile) -> Self {
        CourierProfileResponse {
            user_id: profile.user_id,
            vehicle_type: profile.vehicle_type,
            plate_number: profile.plate_number,
            license_number: profile.license_number,
            national_id: profile.national_id,
            profile_image: profile.profile_image,
            id_card_image: profile.id_card_image,
            status: profile.status,
            availability_status: profile.availability,
            latitude: profile.location.map(|l| l.latitude),
            longitude: profile.location.map(|l| l.longitude),
            updated_at: profile.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ClaimRequest {
    pub order_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LocationUpdateRequest {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AvailabilityRequest {
    pub availability_status: Availability,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /delivery/assignments
///
/// Unassigned orders within 10 km of the courier's last-known position,
/// ascending by distance. A courier who has never pushed a position gets a
/// 400, not an empty list.
#[utoipa::path(
    get,
    path = "/delivery/assignments",
    responses(
        (status = 200, description = "Nearby unassigned orders", body = AssignmentFeedResponse),
        (status = 400, description = "Courier has no stored location"),
        (status = 404, description = "No delivery profile for this courier"),
    ),
    tag = "delivery"
)]
pub async fn assignments(
    svc: web::Data<AppAssignmentService>,
    user: AuthUser,
) -> Result<HttpResponse, AppError> {
    user.require(&[Role::Delivery])?;
    let courier_id = user.id;

    let svc = svc.into_inner();
    let feed = web::block(move || svc.assignments_for(courier_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(AssignmentFeedResponse::from(feed)))
}

/// PATCH /delivery/assign
///
/// Optimistic claim of one order. Exactly one of any number of concurrent
/// claimants wins; the rest get a 409.
#[utoipa::path(
    patch,
    path = "/delivery/assign",
    request_body = ClaimRequest,
    responses(
        (status = 200, description = "Order claimed", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order already assigned"),
    ),
    tag = "delivery"
)]
pub async fn assign(
    svc: web::Data<AppAssignmentService>,
    user: AuthUser,
    body: web::Json<ClaimRequest>,
) -> Result<HttpResponse, AppError> {
    user.require(&[Role::Delivery])?;
    let courier_id = user.id;
    let order_id = body.into_inner().order_id;

    let svc = svc.into_inner();
    let order = web::block(move || svc.claim(courier_id, order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// PATCH /delivery/location
///
/// Out-of-band update of the courier's last-known position.
#[utoipa::path(
    patch,
    path = "/delivery/location",
    request_body = LocationUpdateRequest,
    responses(
        (status = 200, description = "Location updated", body = CourierProfileResponse),
        (status = 400, description = "Coordinates out of range"),
    ),
    tag = "delivery"
)]
pub async fn update_location(
    svc: web::Data<AppAssignmentService>,
    user: AuthUser,
    body: web::Json<LocationUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    user.require(&[Role::Delivery])?;
    let courier_id = user.id;
    let body = body.into_inner();

    let svc = svc.into_inner();
    let profile = web::block(move || svc.update_location(courier_id, body.latitude, body.longitude))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CourierProfileResponse::from(profile)))
}

/// PATCH /delivery/availability
#[utoipa::path(
    patch,
    path = "/delivery/availability",
    request_body = AvailabilityRequest,
    responses(
        (status = 200, description = "Availability updated", body = CourierProfileResponse),
    ),
    tag = "delivery"
)]
pub async fn set_availability(
    svc: web::Data<AppAssignmentService>,
    user: AuthUser,
    body: web::Json<AvailabilityRequest>,
) -> Result<HttpResponse, AppError> {
    user.require(&[Role::Delivery])?;
    let courier_id = user.id;
    let availability = body.into_inner().availability_status;

    let svc = svc.into_inner();
    let profile = web::block(move || svc.set_availability(courier_id, availability))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CourierProfileResponse::from(profile)))
}
