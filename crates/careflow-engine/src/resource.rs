//! # Resource — The Record Under Lifecycle Control
//!
//! A `Resource` is the engine's view of any long-lived domain record
//! (equipment, service request, support ticket, subscription): its tenant,
//! kind, stored status, concurrency version, and the timestamps the
//! time-derived status resolver reads.
//!
//! The owning domain module creates resources in their kind's initial
//! state; thereafter, state changes only through the transition executor.
//! Resources are never deleted here — soft-retirement is itself a terminal
//! state.

use serde::{Deserialize, Serialize};

use careflow_core::{ResourceId, TenantId, Timestamp};

use crate::state::{ResourceKind, State};
use crate::table;

/// An entity under lifecycle control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: ResourceId,
    /// The tenant that owns this resource.
    pub tenant_id: TenantId,
    /// Which transition table applies.
    pub kind: ResourceKind,
    /// The explicitly stored status. `None` for legacy records that
    /// predate the lifecycle feature — those resolve to the active
    /// equivalent, never to a blocked state.
    pub stored_status: Option<State>,
    /// Optimistic-concurrency token, bumped on every committed write.
    pub version: u64,
    /// When work on this resource is scheduled to begin.
    pub scheduled_at: Option<Timestamp>,
    /// When work on this resource completed.
    pub completed_at: Option<Timestamp>,
    /// When the subscription expires. Only meaningful for kinds with
    /// expiry semantics.
    pub expires_at: Option<Timestamp>,
    /// End of the read-only grace window after expiry. Absent means a
    /// zero-length window.
    pub grace_period_ends_at: Option<Timestamp>,
    /// Whether the resource is on a trial plan.
    pub trial: bool,
    /// When the resource was created.
    pub created_at: Timestamp,
    /// When the resource was last written.
    pub updated_at: Timestamp,
}

impl Resource {
    /// Create a resource in its kind's designated initial state.
    pub fn new(kind: ResourceKind, tenant_id: TenantId) -> Self {
        let now = Timestamp::now();
        Self {
            id: ResourceId::new(),
            tenant_id,
            kind,
            stored_status: Some(table::initial_state(kind)),
            version: 0,
            scheduled_at: None,
            completed_at: None,
            expires_at: None,
            grace_period_ends_at: None,
            trial: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// The stored status, or the kind's initial state for legacy records
    /// with no stored status. Used as the transition "from" state for
    /// kinds without expiry semantics.
    pub fn stored_or_initial(&self) -> State {
        self.stored_status
            .unwrap_or_else(|| table::initial_state(self.kind))
    }

    /// Whether the stored status is terminal for this kind.
    pub fn is_terminal(&self) -> bool {
        self.stored_status
            .map(|s| table::is_terminal(self.kind, s))
            .unwrap_or(false)
    }

    /// Set the stored status (builder style, for seeding stores).
    pub fn with_status(mut self, status: State) -> Self {
        self.stored_status = Some(status);
        self
    }

    /// Set the expiry timestamp (builder style).
    pub fn with_expiry(mut self, expires_at: Timestamp) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Set the grace-window end timestamp (builder style).
    pub fn with_grace_end(mut self, grace_period_ends_at: Timestamp) -> Self {
        self.grace_period_ends_at = Some(grace_period_ends_at);
        self
    }

    /// Mark the resource as a trial plan (builder style).
    pub fn with_trial(mut self) -> Self {
        self.trial = true;
        self
    }
}
