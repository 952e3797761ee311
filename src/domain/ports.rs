use uuid::Uuid;

use super::courier::{Availability, CourierProfile};
use super::errors::DomainError;
use super::geo::GeoPoint;
use super::lifecycle::{OrderStatus, Transition};
use super::order::{ListResult, NewOrderInput, OrderView};

/// Result of the optimistic delivery claim
/// (`UPDATE ... WHERE id = $1 AND delivery_id IS NULL`).
#[derive(Debug)]
pub enum ClaimOutcome {
    Claimed(OrderView),
    AlreadyAssigned,
    NotFound,
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Create an order inside one transaction: guarded stock decrement, price
    /// lookup, and insert with `total_price = price * quantity` computed once.
    fn create(&self, input: NewOrderInput) -> Result<OrderView, DomainError>;

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError>;

    fn list(&self, page: i64, limit: i64) -> Result<ListResult, DomainError>;

    /// Apply a lifecycle transition guarded by the status it was computed
    /// from. Returns `None` when the guard no longer matched, i.e. the order
    /// changed between read and write.
    fn update_status(
        &self,
        id: Uuid,
        expected: OrderStatus,
        transition: Transition,
    ) -> Result<Option<OrderView>, DomainError>;

    /// Unassigned orders eligible for delivery, with their drop-off points.
    fn assignable_orders(&self) -> Result<Vec<OrderView>, DomainError>;

    /// Atomically claim an order for a courier. At most one caller ever wins.
    fn claim_for_delivery(
        &self,
        order_id: Uuid,
        courier_id: Uuid,
    ) -> Result<ClaimOutcome, DomainError>;
}

pub trait DeliveryRepository: Send + Sync + 'static {
    fn find_profile(&self, courier_id: Uuid) -> Result<Option<CourierProfile>, DomainError>;

    fn update_location(
        &self,
        courier_id: Uuid,
        location: GeoPoint,
    ) -> Result<CourierProfile, DomainError>;

    fn set_availability(
        &self,
        courier_id: Uuid,
        availability: Availability,
    ) -> Result<CourierProfile, DomainError>;
}
