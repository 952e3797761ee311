use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::lifecycle::{self, OrderAction};
use crate::domain::order::{ListResult, NewOrderInput, OrderView, PaymentMethod};
use crate::domain::ports::{ClaimOutcome, OrderRepository};

pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_order(&self, input: NewOrderInput) -> Result<OrderView, DomainError> {
        if input.quantity < 1 {
            return Err(DomainError::InvalidInput(format!(
                "quantity must be at least 1, got {}",
                input.quantity
            )));
        }
        if input.payment_method == PaymentMethod::Telebirr && input.telebirr_txn_number.is_none() {
            return Err(DomainError::InvalidInput(
                "telebirr orders require a transaction number".to_string(),
            ));
        }
        self.repo.create(input)
    }

    pub fn get_order(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        self.repo.find_by_id(id)
    }

    pub fn list_orders(&self, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        self.repo.list(page, limit)
    }

    /// Apply a lifecycle action: read the order, consult the transition
    /// table, then write the new status guarded by the status the transition
    /// was computed from.
    pub fn apply_action(&self, id: Uuid, action: OrderAction) -> Result<OrderView, DomainError> {
        let order = self.repo.find_by_id(id)?.ok_or(DomainError::NotFound("order"))?;
        let transition = lifecycle::apply(order.lifecycle_state(), action)?;
        self.repo
            .update_status(id, order.status, transition)?
            .ok_or(DomainError::ConcurrentUpdate)
    }

    /// Admin-side courier assignment. Legality is checked against the
    /// transition table first; the write itself is the same conditional claim
    /// the courier self-service endpoint uses, so two assigners can never
    /// both win.
    pub fn assign_courier(
        &self,
        order_id: Uuid,
        courier_id: Uuid,
    ) -> Result<OrderView, DomainError> {
        let order = self
            .repo
            .find_by_id(order_id)?
            .ok_or(DomainError::NotFound("order"))?;
        lifecycle::apply(order.lifecycle_state(), OrderAction::AssignDelivery)?;

        match self.repo.claim_for_delivery(order_id, courier_id)? {
            ClaimOutcome::Claimed(order) => Ok(order),
            ClaimOutcome::AlreadyAssigned => Err(DomainError::AlreadyAssigned),
            ClaimOutcome::NotFound => Err(DomainError::NotFound("order")),
        }
    }
}
