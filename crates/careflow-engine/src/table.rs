//! # Transition Table
//!
//! The static, per-kind map of legal state transitions. A pure,
//! side-effect-free lookup: no I/O, no locking, safely shared across all
//! concurrent callers.
//!
//! ## Transition graphs
//!
//! ```text
//! EQUIPMENT:
//!   Available ──▶ InUse | Maintenance | Damaged | Retired
//!   InUse ──▶ Available | Maintenance | Damaged
//!   Maintenance ──▶ Available | Damaged | Retired
//!   Damaged ──▶ Maintenance | Retired
//!   Retired ──▶ (terminal)
//!
//! SERVICE_REQUEST:
//!   Pending ──▶ Accepted | Cancelled
//!   Accepted ──▶ InProgress | Cancelled
//!   InProgress ──▶ Completed | Cancelled
//!   Completed, Cancelled ──▶ (terminal)
//!
//! SUPPORT_TICKET:
//!   Open ──▶ InProgress | Closed
//!   InProgress ──▶ Resolved | Closed
//!   Resolved ──▶ InProgress | Closed
//!   Closed ──▶ (terminal)
//!
//! SUBSCRIPTION:
//!   Trial ──▶ Active | Suspended | Cancelled
//!   Active ──▶ Suspended | Cancelled
//!   GracePeriod ──▶ Active | Cancelled
//!   Expired ──▶ Active | Cancelled
//!   Suspended ──▶ Active | Cancelled
//!   Cancelled ──▶ (terminal)
//! ```
//!
//! Self-transitions are never legal — recording no-op progress is an
//! "update fields" path, not a transition.

use careflow_core::EngineError;

use crate::state::{ResourceKind, State};

/// The states that participate in a kind's lifecycle, initial state first.
pub fn states(kind: ResourceKind) -> &'static [State] {
    match kind {
        ResourceKind::Equipment => &[
            State::Available,
            State::InUse,
            State::Maintenance,
            State::Damaged,
            State::Retired,
        ],
        ResourceKind::ServiceRequest => &[
            State::Pending,
            State::Accepted,
            State::InProgress,
            State::Completed,
            State::Cancelled,
        ],
        ResourceKind::SupportTicket => &[
            State::Open,
            State::InProgress,
            State::Resolved,
            State::Closed,
        ],
        ResourceKind::Subscription => &[
            State::Trial,
            State::Active,
            State::GracePeriod,
            State::Expired,
            State::Suspended,
            State::Cancelled,
        ],
    }
}

/// The designated initial state for a kind. New resources are created in
/// this state by their owning domain module.
pub fn initial_state(kind: ResourceKind) -> State {
    states(kind)[0]
}

/// The set of states reachable from `from` in one legal transition.
///
/// Empty for terminal states and for states that do not belong to the
/// kind's lifecycle at all.
pub fn valid_transitions(kind: ResourceKind, from: State) -> &'static [State] {
    match (kind, from) {
        (ResourceKind::Equipment, State::Available) => &[
            State::InUse,
            State::Maintenance,
            State::Damaged,
            State::Retired,
        ],
        (ResourceKind::Equipment, State::InUse) => {
            &[State::Available, State::Maintenance, State::Damaged]
        }
        (ResourceKind::Equipment, State::Maintenance) => {
            &[State::Available, State::Damaged, State::Retired]
        }
        (ResourceKind::Equipment, State::Damaged) => &[State::Maintenance, State::Retired],

        (ResourceKind::ServiceRequest, State::Pending) => &[State::Accepted, State::Cancelled],
        (ResourceKind::ServiceRequest, State::Accepted) => {
            &[State::InProgress, State::Cancelled]
        }
        (ResourceKind::ServiceRequest, State::InProgress) => {
            &[State::Completed, State::Cancelled]
        }

        (ResourceKind::SupportTicket, State::Open) => &[State::InProgress, State::Closed],
        (ResourceKind::SupportTicket, State::InProgress) => &[State::Resolved, State::Closed],
        (ResourceKind::SupportTicket, State::Resolved) => &[State::InProgress, State::Closed],

        (ResourceKind::Subscription, State::Trial) => {
            &[State::Active, State::Suspended, State::Cancelled]
        }
        (ResourceKind::Subscription, State::Active) => &[State::Suspended, State::Cancelled],
        (ResourceKind::Subscription, State::GracePeriod) => {
            &[State::Active, State::Cancelled]
        }
        (ResourceKind::Subscription, State::Expired) => &[State::Active, State::Cancelled],
        (ResourceKind::Subscription, State::Suspended) => &[State::Active, State::Cancelled],

        // Terminal states and states foreign to the kind.
        _ => &[],
    }
}

/// Whether moving `from -> to` is legal for the kind.
pub fn can_transition(kind: ResourceKind, from: State, to: State) -> bool {
    from != to && valid_transitions(kind, from).contains(&to)
}

/// Whether the state is terminal for the kind: it belongs to the kind's
/// lifecycle and has no outgoing transitions.
pub fn is_terminal(kind: ResourceKind, state: State) -> bool {
    states(kind).contains(&state) && valid_transitions(kind, state).is_empty()
}

/// Validate a transition, failing with a structured
/// [`EngineError::InvalidTransition`] carrying the kind and both state
/// names.
pub fn assert_transition(kind: ResourceKind, from: State, to: State) -> Result<(), EngineError> {
    if can_transition(kind, from, to) {
        Ok(())
    } else {
        Err(EngineError::InvalidTransition {
            kind: kind.as_str().to_string(),
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
        })
    }
}
