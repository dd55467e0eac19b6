//! Exhaustive NxN transition-matrix tests for every resource kind.
//! Valid moves are asserted legal, everything else (self-transitions,
//! terminal exits, foreign states) illegal.

use careflow_engine::state::{ResourceKind, State};
use careflow_engine::table;

/// The expected transition sets, spelled out independently of the table
/// encoding.
fn expected_valid(kind: ResourceKind) -> Vec<(State, State)> {
    use State::*;
    match kind {
        ResourceKind::Equipment => vec![
            (Available, InUse),
            (Available, Maintenance),
            (Available, Damaged),
            (Available, Retired),
            (InUse, Available),
            (InUse, Maintenance),
            (InUse, Damaged),
            (Maintenance, Available),
            (Maintenance, Damaged),
            (Maintenance, Retired),
            (Damaged, Maintenance),
            (Damaged, Retired),
        ],
        ResourceKind::ServiceRequest => vec![
            (Pending, Accepted),
            (Pending, Cancelled),
            (Accepted, InProgress),
            (Accepted, Cancelled),
            (InProgress, Completed),
            (InProgress, Cancelled),
        ],
        ResourceKind::SupportTicket => vec![
            (Open, InProgress),
            (Open, Closed),
            (InProgress, Resolved),
            (InProgress, Closed),
            (Resolved, InProgress),
            (Resolved, Closed),
        ],
        ResourceKind::Subscription => vec![
            (Trial, Active),
            (Trial, Suspended),
            (Trial, Cancelled),
            (Active, Suspended),
            (Active, Cancelled),
            (GracePeriod, Active),
            (GracePeriod, Cancelled),
            (Expired, Active),
            (Expired, Cancelled),
            (Suspended, Active),
            (Suspended, Cancelled),
        ],
    }
}

#[test]
fn transition_matrix_exhaustive() {
    for kind in ResourceKind::ALL {
        let expected = expected_valid(kind);
        for from in table::states(kind) {
            for to in table::states(kind) {
                let actual = table::can_transition(kind, *from, *to);
                let want = expected.contains(&(*from, *to));
                assert_eq!(
                    actual, want,
                    "{kind} transition {from} -> {to}: expected valid={want}, got valid={actual}"
                );
            }
        }
    }
}

#[test]
fn valid_transitions_agrees_with_can_transition() {
    for kind in ResourceKind::ALL {
        for from in table::states(kind) {
            let listed = table::valid_transitions(kind, *from);
            for to in table::states(kind) {
                assert_eq!(
                    listed.contains(to),
                    table::can_transition(kind, *from, *to),
                    "{kind}: valid_transitions and can_transition disagree on {from} -> {to}"
                );
            }
            assert!(
                !listed.contains(from),
                "{kind}: valid_transitions({from}) must not include {from} itself"
            );
        }
    }
}

#[test]
fn terminal_states_reject_every_exit() {
    for kind in ResourceKind::ALL {
        for from in table::states(kind) {
            if !table::is_terminal(kind, *from) {
                continue;
            }
            assert!(table::valid_transitions(kind, *from).is_empty());
            for to in table::states(kind) {
                let err = table::assert_transition(kind, *from, *to).unwrap_err();
                assert_eq!(err.code(), "INVALID_TRANSITION");
            }
        }
    }
}

#[test]
fn every_kind_has_at_least_one_terminal_state() {
    for kind in ResourceKind::ALL {
        assert!(
            table::states(kind)
                .iter()
                .any(|s| table::is_terminal(kind, *s)),
            "{kind} has no terminal state"
        );
    }
}

#[test]
fn assert_transition_error_carries_structured_fields() {
    let err =
        table::assert_transition(ResourceKind::ServiceRequest, State::Completed, State::InProgress)
            .unwrap_err();
    assert_eq!(
        err,
        careflow_core::EngineError::InvalidTransition {
            kind: "SERVICE_REQUEST".into(),
            from: "COMPLETED".into(),
            to: "IN_PROGRESS".into(),
        }
    );
}
