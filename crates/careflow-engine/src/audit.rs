//! # Audit Log Contract
//!
//! Every accepted transition produces exactly one immutable audit entry:
//! who did what to which resource, when, with before/after state. The
//! entry is created by the transition executor and owned by the audit
//! store — no other component writes to it, and nothing ever mutates or
//! deletes one.

use serde::{Deserialize, Serialize};

use careflow_core::{ActorId, EngineError, ResourceId, Timestamp};

use crate::state::{ResourceKind, State};

/// An immutable record of one accepted transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// The kind of the resource that changed.
    pub resource_kind: ResourceKind,
    /// The resource that changed.
    pub resource_id: ResourceId,
    /// What was done. For lifecycle changes this is `"transition"`.
    pub action: String,
    /// Who did it. Elevated cross-tenant callers are recorded the same way
    /// as tenant members.
    pub actor_id: ActorId,
    /// State before the transition (the effective "from" the legality
    /// check used).
    pub from_state: State,
    /// State after the transition.
    pub to_state: State,
    /// When the transition committed.
    pub timestamp: Timestamp,
}

impl AuditEntry {
    /// Build the entry for an accepted transition.
    pub fn transition(
        resource_kind: ResourceKind,
        resource_id: ResourceId,
        actor_id: ActorId,
        from_state: State,
        to_state: State,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            resource_kind,
            resource_id,
            action: "transition".to_string(),
            actor_id,
            from_state,
            to_state,
            timestamp,
        }
    }
}

/// Append-only sink for audit entries.
///
/// No update or delete operation exists. Queries must never block appends
/// for long — the append path is the priority path. Concurrent appends for
/// the same resource must preserve the order in which their corresponding
/// state writes committed.
pub trait AuditSink: Send + Sync {
    /// Append one entry. Implementations must make the entry durable
    /// before returning `Ok`.
    fn append(&self, entry: AuditEntry) -> Result<(), EngineError>;

    /// All entries for one resource, append order, oldest first.
    fn query_by_resource(&self, kind: ResourceKind, id: ResourceId) -> Vec<AuditEntry>;
}
