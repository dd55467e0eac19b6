//! # Resource Kinds and Lifecycle States
//!
//! The state vocabulary of every record under lifecycle control. Each
//! resource kind draws its states from the shared [`State`] enum; which
//! states apply to which kind, and which moves between them are legal, is
//! defined by the transition table (`table.rs`).
//!
//! State names are serialized in `snake_case` and displayed in
//! SCREAMING_SNAKE — both are stable identifiers the presentation layer
//! maps to bilingual labels.

use serde::{Deserialize, Serialize};

/// Which lifecycle domain a resource belongs to.
///
/// The kind discriminates which transition table applies. Adding a kind
/// means adding a new table arm, never mutating an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A piece of healthcare equipment in a tenant's inventory.
    Equipment,
    /// A request for equipment service/repair.
    ServiceRequest,
    /// A customer support ticket.
    SupportTicket,
    /// An organization's subscription to the platform.
    Subscription,
}

impl ResourceKind {
    /// All kinds, for exhaustive table checks.
    pub const ALL: [ResourceKind; 4] = [
        Self::Equipment,
        Self::ServiceRequest,
        Self::SupportTicket,
        Self::Subscription,
    ];

    /// Whether this kind's true status depends on wall-clock comparisons
    /// against stored timestamps (expiry / grace window).
    pub fn has_expiry(&self) -> bool {
        matches!(self, Self::Subscription)
    }

    /// The canonical string name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equipment => "EQUIPMENT",
            Self::ServiceRequest => "SERVICE_REQUEST",
            Self::SupportTicket => "SUPPORT_TICKET",
            Self::Subscription => "SUBSCRIPTION",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lifecycle state.
///
/// The full vocabulary across all kinds. A given kind only ever uses the
/// subset its transition table names; `table::states(kind)` enumerates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    // Equipment
    /// Equipment is available for assignment.
    Available,
    /// Equipment is assigned and in use.
    InUse,
    /// Equipment is undergoing maintenance.
    Maintenance,
    /// Equipment is damaged and out of rotation.
    Damaged,
    /// Equipment has been soft-retired (terminal).
    Retired,

    // Service requests
    /// Request submitted, awaiting acceptance.
    Pending,
    /// Request accepted by a technician.
    Accepted,
    /// Work underway (service requests and support tickets).
    InProgress,
    /// Work completed (terminal).
    Completed,
    /// Abandoned by the requester or the provider (terminal).
    Cancelled,

    // Support tickets
    /// Ticket opened, not yet picked up.
    Open,
    /// Ticket resolved, awaiting confirmation.
    Resolved,
    /// Ticket closed (terminal).
    Closed,

    // Subscriptions
    /// Trial period, full access.
    Trial,
    /// Paid and current.
    Active,
    /// Past expiry but inside the read-only grace window (time-derived).
    GracePeriod,
    /// Past the grace window (time-derived).
    Expired,
    /// Administratively suspended. Always overrides time-derived states.
    Suspended,
}

impl State {
    /// The canonical string name of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::InUse => "IN_USE",
            Self::Maintenance => "MAINTENANCE",
            Self::Damaged => "DAMAGED",
            Self::Retired => "RETIRED",
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::Open => "OPEN",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
            Self::Trial => "TRIAL",
            Self::Active => "ACTIVE",
            Self::GracePeriod => "GRACE_PERIOD",
            Self::Expired => "EXPIRED",
            Self::Suspended => "SUSPENDED",
        }
    }

    /// Recover a state from its canonical name.
    pub fn from_name(name: &str) -> Option<State> {
        let s = match name {
            "AVAILABLE" => Self::Available,
            "IN_USE" => Self::InUse,
            "MAINTENANCE" => Self::Maintenance,
            "DAMAGED" => Self::Damaged,
            "RETIRED" => Self::Retired,
            "PENDING" => Self::Pending,
            "ACCEPTED" => Self::Accepted,
            "IN_PROGRESS" => Self::InProgress,
            "COMPLETED" => Self::Completed,
            "CANCELLED" => Self::Cancelled,
            "OPEN" => Self::Open,
            "RESOLVED" => Self::Resolved,
            "CLOSED" => Self::Closed,
            "TRIAL" => Self::Trial,
            "ACTIVE" => Self::Active,
            "GRACE_PERIOD" => Self::GracePeriod,
            "EXPIRED" => Self::Expired,
            "SUSPENDED" => Self::Suspended,
            _ => return None,
        };
        Some(s)
    }

    /// Whether a transition *into* this state is destructive and therefore
    /// restricted to owner/admin membership roles within the tenant.
    pub fn is_destructive_target(&self) -> bool {
        matches!(self, Self::Suspended | Self::Retired | Self::Cancelled)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(ResourceKind::Equipment.to_string(), "EQUIPMENT");
        assert_eq!(ResourceKind::ServiceRequest.to_string(), "SERVICE_REQUEST");
        assert_eq!(ResourceKind::Subscription.to_string(), "SUBSCRIPTION");
    }

    #[test]
    fn test_only_subscriptions_have_expiry() {
        assert!(ResourceKind::Subscription.has_expiry());
        assert!(!ResourceKind::Equipment.has_expiry());
        assert!(!ResourceKind::ServiceRequest.has_expiry());
        assert!(!ResourceKind::SupportTicket.has_expiry());
    }

    #[test]
    fn test_state_round_trip_via_name() {
        let states = [
            State::Available,
            State::InUse,
            State::Maintenance,
            State::Damaged,
            State::Retired,
            State::Pending,
            State::Accepted,
            State::InProgress,
            State::Completed,
            State::Cancelled,
            State::Open,
            State::Resolved,
            State::Closed,
            State::Trial,
            State::Active,
            State::GracePeriod,
            State::Expired,
            State::Suspended,
        ];
        for state in &states {
            assert_eq!(State::from_name(state.as_str()), Some(*state));
        }
        assert_eq!(State::from_name("NOT_A_STATE"), None);
    }

    #[test]
    fn test_destructive_targets() {
        assert!(State::Suspended.is_destructive_target());
        assert!(State::Retired.is_destructive_target());
        assert!(State::Cancelled.is_destructive_target());
        assert!(!State::InUse.is_destructive_target());
        assert!(!State::Completed.is_destructive_target());
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(serde_json::to_string(&State::InUse).unwrap(), "\"in_use\"");
        assert_eq!(
            serde_json::to_string(&State::GracePeriod).unwrap(),
            "\"grace_period\""
        );
        assert_eq!(
            serde_json::to_string(&ResourceKind::ServiceRequest).unwrap(),
            "\"service_request\""
        );
    }
}
