//! The order lifecycle as an explicit state machine.
//!
//! Every status-mutating endpoint funnels through [`apply`], so the legality
//! of a transition lives in exactly one transition table instead of being
//! re-checked ad hoc by each handler.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    AssignedForDelivery,
    Delivered,
    BuyerConfirmed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::AssignedForDelivery => "assigned_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::BuyerConfirmed => "buyer_confirmed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "confirmed" => Some(OrderStatus::Confirmed),
            "processing" => Some(OrderStatus::Processing),
            "assigned_for_delivery" => Some(OrderStatus::AssignedForDelivery),
            "delivered" => Some(OrderStatus::Delivered),
            "buyer_confirmed" => Some(OrderStatus::BuyerConfirmed),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    PaymentConfirmed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::PaymentConfirmed => "payment_confirmed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PaymentStatus::Pending),
            "payment_confirmed" => Some(PaymentStatus::PaymentConfirmed),
            _ => None,
        }
    }
}

/// The actions a caller can attempt against an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    ConfirmPayment,
    UndoPayment,
    StartProcessing,
    AssignDelivery,
    Complete,
    ConfirmDelivery,
    Cancel,
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderAction::ConfirmPayment => "confirm-payment",
            OrderAction::UndoPayment => "undo-payment",
            OrderAction::StartProcessing => "start-processing",
            OrderAction::AssignDelivery => "assign-delivery",
            OrderAction::Complete => "complete",
            OrderAction::ConfirmDelivery => "confirm-delivery",
            OrderAction::Cancel => "cancel",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot {action} an order in status '{from}'")]
    IllegalState { from: OrderStatus, action: OrderAction },
    #[error("payment has not been confirmed")]
    PaymentNotConfirmed,
    #[error("a courier is already assigned to this order")]
    CourierAssigned,
}

/// Snapshot of the columns the transition table keys on.
#[derive(Debug, Clone, Copy)]
pub struct LifecycleState {
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub has_courier: bool,
}

/// The writes a legal transition produces. `delivery_id` is never set here;
/// assignment goes through the conditional claim in the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub status: OrderStatus,
    pub payment_status: Option<PaymentStatus>,
}

/// The transition table. Anything not matched below is illegal from that
/// state and yields a typed error rather than a silent write.
pub fn apply(state: LifecycleState, action: OrderAction) -> Result<Transition, TransitionError> {
    use OrderAction as A;
    use OrderStatus as S;

    match (state.status, action) {
        (S::Pending, A::ConfirmPayment) => Ok(Transition {
            status: S::Confirmed,
            payment_status: Some(PaymentStatus::PaymentConfirmed),
        }),
        (S::Confirmed, A::UndoPayment) => {
            if state.payment_status != PaymentStatus::PaymentConfirmed {
                return Err(TransitionError::PaymentNotConfirmed);
            }
            if state.has_courier {
                return Err(TransitionError::CourierAssigned);
            }
            Ok(Transition {
                status: S::Pending,
                payment_status: Some(PaymentStatus::Pending),
            })
        }
        (S::Confirmed, A::StartProcessing) => Ok(Transition {
            status: S::Processing,
            payment_status: None,
        }),
        (S::Confirmed | S::Processing, A::AssignDelivery) => {
            if state.has_courier {
                return Err(TransitionError::CourierAssigned);
            }
            Ok(Transition {
                status: S::AssignedForDelivery,
                payment_status: None,
            })
        }
        (S::AssignedForDelivery, A::Complete) => Ok(Transition {
            status: S::Delivered,
            payment_status: None,
        }),
        (S::Delivered, A::ConfirmDelivery) => Ok(Transition {
            status: S::BuyerConfirmed,
            payment_status: None,
        }),
        (S::Pending | S::Confirmed | S::Processing, A::Cancel) => {
            if state.has_courier {
                return Err(TransitionError::CourierAssigned);
            }
            Ok(Transition {
                status: S::Cancelled,
                payment_status: None,
            })
        }
        (from, action) => Err(TransitionError::IllegalState { from, action }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(status: OrderStatus) -> LifecycleState {
        LifecycleState {
            status,
            payment_status: match status {
                OrderStatus::Pending => PaymentStatus::Pending,
                _ => PaymentStatus::PaymentConfirmed,
            },
            has_courier: matches!(
                status,
                OrderStatus::AssignedForDelivery
                    | OrderStatus::Delivered
                    | OrderStatus::BuyerConfirmed
            ),
        }
    }

    #[test]
    fn happy_path_walks_the_full_lifecycle() {
        let steps = [
            (OrderStatus::Pending, OrderAction::ConfirmPayment, OrderStatus::Confirmed),
            (OrderStatus::Confirmed, OrderAction::StartProcessing, OrderStatus::Processing),
            (
                OrderStatus::Processing,
                OrderAction::AssignDelivery,
                OrderStatus::AssignedForDelivery,
            ),
            (OrderStatus::AssignedForDelivery, OrderAction::Complete, OrderStatus::Delivered),
            (OrderStatus::Delivered, OrderAction::ConfirmDelivery, OrderStatus::BuyerConfirmed),
        ];
        for (from, action, to) in steps {
            let mut s = state(from);
            // assignment requires no courier yet
            if action == OrderAction::AssignDelivery {
                s.has_courier = false;
            }
            let t = apply(s, action).expect("legal transition");
            assert_eq!(t.status, to, "{from} --{action}--> should be {to}");
        }
    }

    #[test]
    fn confirm_payment_sets_payment_status() {
        let t = apply(state(OrderStatus::Pending), OrderAction::ConfirmPayment).unwrap();
        assert_eq!(t.payment_status, Some(PaymentStatus::PaymentConfirmed));
    }

    #[test]
    fn undo_payment_requires_confirmed_payment() {
        let s = LifecycleState {
            status: OrderStatus::Confirmed,
            payment_status: PaymentStatus::Pending,
            has_courier: false,
        };
        assert_eq!(
            apply(s, OrderAction::UndoPayment),
            Err(TransitionError::PaymentNotConfirmed)
        );
    }

    #[test]
    fn undo_payment_on_pending_order_is_illegal() {
        assert_eq!(
            apply(state(OrderStatus::Pending), OrderAction::UndoPayment),
            Err(TransitionError::IllegalState {
                from: OrderStatus::Pending,
                action: OrderAction::UndoPayment,
            })
        );
    }

    #[test]
    fn undo_payment_blocked_once_courier_assigned() {
        let s = LifecycleState {
            status: OrderStatus::Confirmed,
            payment_status: PaymentStatus::PaymentConfirmed,
            has_courier: true,
        };
        assert_eq!(apply(s, OrderAction::UndoPayment), Err(TransitionError::CourierAssigned));
    }

    #[test]
    fn undo_payment_reverts_both_statuses() {
        let s = LifecycleState {
            status: OrderStatus::Confirmed,
            payment_status: PaymentStatus::PaymentConfirmed,
            has_courier: false,
        };
        let t = apply(s, OrderAction::UndoPayment).unwrap();
        assert_eq!(t.status, OrderStatus::Pending);
        assert_eq!(t.payment_status, Some(PaymentStatus::Pending));
    }

    #[test]
    fn assign_delivery_legal_from_confirmed_and_processing_only() {
        for status in [OrderStatus::Confirmed, OrderStatus::Processing] {
            let mut s = state(status);
            s.has_courier = false;
            assert!(apply(s, OrderAction::AssignDelivery).is_ok());
        }
        for status in [
            OrderStatus::Pending,
            OrderStatus::Delivered,
            OrderStatus::BuyerConfirmed,
            OrderStatus::Cancelled,
        ] {
            assert!(matches!(
                apply(state(status), OrderAction::AssignDelivery),
                Err(TransitionError::IllegalState { .. })
            ));
        }
    }

    #[test]
    fn assign_delivery_blocked_when_courier_already_set() {
        let s = LifecycleState {
            status: OrderStatus::Confirmed,
            payment_status: PaymentStatus::PaymentConfirmed,
            has_courier: true,
        };
        assert_eq!(apply(s, OrderAction::AssignDelivery), Err(TransitionError::CourierAssigned));
    }

    #[test]
    fn cancel_is_blocked_after_assignment() {
        for status in [
            OrderStatus::AssignedForDelivery,
            OrderStatus::Delivered,
            OrderStatus::BuyerConfirmed,
            OrderStatus::Cancelled,
        ] {
            assert!(apply(state(status), OrderAction::Cancel).is_err());
        }
        for status in [OrderStatus::Pending, OrderStatus::Confirmed, OrderStatus::Processing] {
            let mut s = state(status);
            s.has_courier = false;
            let t = apply(s, OrderAction::Cancel).unwrap();
            assert_eq!(t.status, OrderStatus::Cancelled);
        }
    }

    #[test]
    fn terminal_states_accept_no_actions() {
        for status in [OrderStatus::BuyerConfirmed, OrderStatus::Cancelled] {
            for action in [
                OrderAction::ConfirmPayment,
                OrderAction::UndoPayment,
                OrderAction::StartProcessing,
                OrderAction::AssignDelivery,
                OrderAction::Complete,
                OrderAction::ConfirmDelivery,
                OrderAction::Cancel,
            ] {
                assert!(apply(state(status), action).is_err(), "{status} should reject {action}");
            }
        }
    }

    #[test]
    fn status_strings_round_trip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Processing,
            OrderStatus::AssignedForDelivery,
            OrderStatus::Delivered,
            OrderStatus::BuyerConfirmed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("assigned"), None);
    }
}
