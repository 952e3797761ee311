//! Conditional single-row updates used as optimistic concurrency guards.
//!
//! The pattern is an `UPDATE ... WHERE <precondition>` whose affected-row
//! count tells the caller whether the precondition still held at execution
//! time. It guards the two races this service cares about: claiming an order
//! for delivery (`WHERE delivery_id IS NULL`) and decrementing product stock
//! (`WHERE stock >= quantity`).

/// Outcome of a guarded single-row update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasOutcome {
    /// The precondition held and the row was updated.
    Applied,
    /// The precondition no longer held; nothing was written.
    PreconditionFailed,
}

impl CasOutcome {
    pub fn from_rows(affected: usize) -> Self {
        if affected == 0 {
            CasOutcome::PreconditionFailed
        } else {
            CasOutcome::Applied
        }
    }
}
