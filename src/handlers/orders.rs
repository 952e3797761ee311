use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::{AuthUser, Role};
use crate::domain::geo::GeoPoint;
use crate::domain::lifecycle::{OrderAction, OrderStatus, PaymentStatus};
use crate::domain::order::{NewOrderInput, OrderView, PaymentMethod};
use crate::errors::AppError;
use crate::AppOrderService;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub product_id: Uuid,
    pub quantity: i32,
    /// Drop-off coordinates for delivery matching.
    pub latitude: f64,
    pub longitude: f64,
    pub payment_method: PaymentMethod,
    /// Required when `payment_method` is `telebirr`.
    pub telebirr_txn_number: Option<String>,
    pub telebirr_screenshot: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub seller_id: Uuid,
    pub buyer_id: Uuid,
    pub quantity: i32,
    /// Decimal price as a string to avoid floating-point issues, e.g. "19.98"
    pub total_price: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub telebirr_txn_number: Option<String>,
    pub telebirr_screenshot: Option<String>,
    pub delivery_id: Option<Uuid>,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: String,
}

impl From<OrderView> for OrderResponse {
    fn from(order: OrderView) -> Self {
        OrderResponse {
            id: order.id,
            product_id: order.product_id,
            seller_id: order.seller_id,
            buyer_id: order.buyer_id,
            quantity: order.quantity,
            total_price: order.total_price.to_string(),
            status: order.status,
            payment_status: order.payment_status,
            payment_method: order.payment_method,
            telebirr_txn_number: order.telebirr_txn_number,
            telebirr_screenshot: order.telebirr_screenshot,
            delivery_id: order.delivery_id,
            latitude: order.dropoff.latitude,
            longitude: order.dropoff.longitude,
            created_at: order.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignDeliveryRequest {
    pub delivery_id: Uuid,
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListOrdersParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 20, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// Run one lifecycle action through the transition table and return the
/// updated order. All PATCH status endpoints share this shape.
async fn run_action(
    svc: web::Data<AppOrderService>,
    id: Uuid,
    action: OrderAction,
) -> Result<HttpResponse, AppError> {
    let svc = svc.into_inner();
    let order = web::block(move || svc.apply_action(id, action))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// POST /orders
///
/// Creates an order for the authenticated buyer. The stock decrement, price
/// lookup, and insert run inside one database transaction; `total_price` is
/// `product.price * quantity`, computed once at creation.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Insufficient stock"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    svc: web::Data<AppOrderService>,
    user: AuthUser,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    user.require(&[Role::Buyer])?;
    let body = body.into_inner();
    let dropoff = GeoPoint::validated(body.latitude, body.longitude).map_err(AppError::from)?;

    let input = NewOrderInput {
        product_id: body.product_id,
        buyer_id: user.id,
        quantity: body.quantity,
        dropoff,
        payment_method: body.payment_method,
        telebirr_txn_number: body.telebirr_txn_number,
        telebirr_screenshot: body.telebirr_screenshot,
    };

    let svc = svc.into_inner();
    let order = web::block(move || svc.create_order(input))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(("id" = Uuid, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    svc: web::Data<AppOrderService>,
    _user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let svc = svc.into_inner();
    let order = web::block(move || svc.get_order(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match order {
        Some(order) => Ok(HttpResponse::Ok().json(OrderResponse::from(order))),
        None => Err(AppError::NotFound),
    }
}

/// GET /orders
///
/// Paginated list of orders, newest first.
#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated list of orders", body = ListOrdersResponse),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    svc: web::Data<AppOrderService>,
    _user: AuthUser,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let page = params.page.max(1);
    let limit = params.limit.clamp(1, 100);

    let svc = svc.into_inner();
    let result = web::block(move || svc.list_orders(page, limit))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        items: result.items.into_iter().map(OrderResponse::from).collect(),
        total: result.total,
        page,
        limit,
    }))
}

/// PATCH /orders/{id}/confirm-payment
#[utoipa::path(
    patch,
    path = "/orders/{id}/confirm-payment",
    params(("id" = Uuid, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Payment confirmed", body = OrderResponse),
        (status = 409, description = "Illegal transition"),
    ),
    tag = "orders"
)]
pub async fn confirm_payment(
    svc: web::Data<AppOrderService>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    user.require(&[Role::Seller, Role::Admin])?;
    run_action(svc, path.into_inner(), OrderAction::ConfirmPayment).await
}

/// PATCH /orders/{id}/undo-payment
///
/// Reverts a confirmed payment. Refused once a courier is assigned or when
/// the payment was never confirmed.
#[utoipa::path(
    patch,
    path = "/orders/{id}/undo-payment",
    params(("id" = Uuid, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Payment reverted", body = OrderResponse),
        (status = 409, description = "Illegal transition"),
    ),
    tag = "orders"
)]
pub async fn undo_payment(
    svc: web::Data<AppOrderService>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    user.require(&[Role::Seller, Role::Admin])?;
    run_action(svc, path.into_inner(), OrderAction::UndoPayment).await
}

/// PATCH /orders/{id}/start-processing
#[utoipa::path(
    patch,
    path = "/orders/{id}/start-processing",
    params(("id" = Uuid, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Order is being processed", body = OrderResponse),
        (status = 409, description = "Illegal transition"),
    ),
    tag = "orders"
)]
pub async fn start_processing(
    svc: web::Data<AppOrderService>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    user.require(&[Role::Seller, Role::Admin])?;
    run_action(svc, path.into_inner(), OrderAction::StartProcessing).await
}

/// PATCH /orders/{id}/assign-delivery
///
/// Admin-side courier assignment. Uses the same conditional claim as the
/// courier self-service endpoint, so a racing self-claim and admin
/// assignment can never both win.
#[utoipa::path(
    patch,
    path = "/orders/{id}/assign-delivery",
    params(("id" = Uuid, Path, description = "Order UUID")),
    request_body = AssignDeliveryRequest,
    responses(
        (status = 200, description = "Courier assigned", body = OrderResponse),
        (status = 409, description = "Already assigned or illegal transition"),
    ),
    tag = "orders"
)]
pub async fn assign_delivery(
    svc: web::Data<AppOrderService>,
    user: AuthUser,
    path: web::Path<Uuid>,
    body: web::Json<AssignDeliveryRequest>,
) -> Result<HttpResponse, AppError> {
    user.require(&[Role::Admin])?;
    let order_id = path.into_inner();
    let courier_id = body.into_inner().delivery_id;

    let svc = svc.into_inner();
    let order = web::block(move || svc.assign_courier(order_id, courier_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// PATCH /orders/{id}/complete
///
/// The courier marks the drop-off done.
#[utoipa::path(
    patch,
    path = "/orders/{id}/complete",
    params(("id" = Uuid, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Order delivered", body = OrderResponse),
        (status = 409, description = "Illegal transition"),
    ),
    tag = "orders"
)]
pub async fn complete(
    svc: web::Data<AppOrderService>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    user.require(&[Role::Delivery])?;
    run_action(svc, path.into_inner(), OrderAction::Complete).await
}

/// PATCH /orders/{id}/confirm-delivery
///
/// The buyer acknowledges receipt.
#[utoipa::path(
    patch,
    path = "/orders/{id}/confirm-delivery",
    params(("id" = Uuid, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Delivery confirmed", body = OrderResponse),
        (status = 409, description = "Illegal transition"),
    ),
    tag = "orders"
)]
pub async fn confirm_delivery(
    svc: web::Data<AppOrderService>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    user.require(&[Role::Buyer])?;
    run_action(svc, path.into_inner(), OrderAction::ConfirmDelivery).await
}

/// PATCH /orders/{id}/cancel
#[utoipa::path(
    patch,
    path = "/orders/{id}/cancel",
    params(("id" = Uuid, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Order cancelled", body = OrderResponse),
        (status = 409, description = "Illegal transition"),
    ),
    tag = "orders"
)]
pub async fn cancel(
    svc: web::Data<AppOrderService>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    user.require(&[Role::Buyer, Role::Admin])?;
    run_action(svc, path.into_inner(), OrderAction::Cancel).await
}
