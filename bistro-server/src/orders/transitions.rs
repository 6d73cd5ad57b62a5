//! Order state machine
//!
//! The transition table below is the only place that decides which status
//! changes are legal.

use shared::models::{OrderStatus, Role};

/// Allowed next states for each state
pub const fn allowed_next(from: OrderStatus) -> &'static [OrderStatus] {
    use OrderStatus::*;
    match from {
        New => &[Accepted, Cancelled],
        Accepted => &[Preparing, Cancelled],
        Preparing => &[Ready, Cancelled],
        Ready => &[Served, Cancelled],
        Served => &[Completed],
        Completed | Cancelled => &[],
    }
}

pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    allowed_next(from).contains(&to)
}

/// The one transition reserved for the kitchen
pub fn is_kitchen_transition(from: OrderStatus, to: OrderStatus) -> bool {
    from == OrderStatus::Preparing && to == OrderStatus::Ready
}

/// Whether `role` may request an already-legal transition
///
/// Cooks only mark food ready; waiters do everything else; managers and
/// admins may request any legal transition; cashiers none.
pub fn role_may_request(role: Role, from: OrderStatus, to: OrderStatus) -> bool {
    match role {
        Role::Admin | Role::Manager => true,
        Role::Waiter => !is_kitchen_transition(from, to),
        Role::Cook => is_kitchen_transition(from, to),
        Role::Cashier => false,
    }
}
