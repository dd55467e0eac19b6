//! # careflow-store — In-Memory Reference Collaborators
//!
//! The engine treats persistence and audit storage as external
//! collaborators behind the `ResourceStore` and `AuditSink` traits. This
//! crate ships the in-memory implementations: a versioned resource store
//! whose compare-and-swap write is the serialization point for concurrent
//! transitions, and an append-only audit log.
//!
//! Both are `Send + Sync` and safe to share behind an `Arc`. The store is
//! read-after-write consistent — a committed save is visible to the next
//! `load` with no propagation delay.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use careflow_core::EngineError;
use careflow_core::ResourceId;
use careflow_engine::audit::{AuditEntry, AuditSink};
use careflow_engine::executor::ResourceStore;
use careflow_engine::resource::Resource;
use careflow_engine::state::ResourceKind;

/// In-memory versioned resource store.
///
/// `save_if_version_matches` is an atomic compare-and-swap under the write
/// lock: of two concurrent writers that loaded the same version, exactly
/// one commits and the other receives `Conflict`.
#[derive(Default)]
pub struct MemoryResourceStore {
    resources: RwLock<HashMap<ResourceId, Resource>>,
}

impl MemoryResourceStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a resource, replacing any record with the same id. This is the
    /// domain module's "create in initial state" path; it does not go
    /// through the transition executor.
    pub fn insert(&self, resource: Resource) {
        self.resources
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(resource.id, resource);
    }

    /// Number of stored resources.
    pub fn len(&self) -> usize {
        self.resources
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceStore for MemoryResourceStore {
    fn load(&self, id: ResourceId) -> Result<Resource, EngineError> {
        self.resources
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::NotFound {
                kind: "RESOURCE".to_string(),
                id: id.to_string(),
            })
    }

    fn save_if_version_matches(
        &self,
        mut resource: Resource,
        expected_version: u64,
    ) -> Result<Resource, EngineError> {
        let mut map = self
            .resources
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let current = map.get(&resource.id).ok_or_else(|| EngineError::NotFound {
            kind: resource.kind.as_str().to_string(),
            id: resource.id.to_string(),
        })?;
        if current.version != expected_version {
            return Err(EngineError::Conflict {
                kind: resource.kind.as_str().to_string(),
                id: resource.id.to_string(),
            });
        }
        resource.version = expected_version + 1;
        map.insert(resource.id, resource.clone());
        Ok(resource)
    }
}

/// In-memory append-only audit log.
///
/// Appends take a short `Mutex` hold; queries clone the matching entries
/// out so readers never sit on the append path. No update or delete
/// surface exists.
#[derive(Default)]
pub struct MemoryAuditLog {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryAuditLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of entries across all resources.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for MemoryAuditLog {
    fn append(&self, entry: AuditEntry) -> Result<(), EngineError> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(entry);
        Ok(())
    }

    fn query_by_resource(&self, kind: ResourceKind, id: ResourceId) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .filter(|e| e.resource_kind == kind && e.resource_id == id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use careflow_core::{ActorId, TenantId, Timestamp};
    use careflow_engine::state::State;

    #[test]
    fn test_load_missing_is_not_found() {
        let store = MemoryResourceStore::new();
        let err = store.load(ResourceId::new()).unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn test_read_after_write() {
        let store = MemoryResourceStore::new();
        let r = Resource::new(ResourceKind::Equipment, TenantId::new());
        let id = r.id;
        store.insert(r);

        let mut loaded = store.load(id).unwrap();
        loaded.stored_status = Some(State::InUse);
        let saved = store.save_if_version_matches(loaded, 0).unwrap();
        assert_eq!(saved.version, 1);

        let reloaded = store.load(id).unwrap();
        assert_eq!(reloaded.stored_status, Some(State::InUse));
        assert_eq!(reloaded.version, 1);
    }

    #[test]
    fn test_version_mismatch_is_conflict() {
        let store = MemoryResourceStore::new();
        let r = Resource::new(ResourceKind::Equipment, TenantId::new());
        let id = r.id;
        store.insert(r);

        let first = store.load(id).unwrap();
        let second = store.load(id).unwrap();

        store.save_if_version_matches(first, 0).unwrap();
        let err = store.save_if_version_matches(second, 0).unwrap_err();
        assert_eq!(err.code(), "CONFLICT");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_audit_append_order_preserved() {
        let log = MemoryAuditLog::new();
        let id = ResourceId::new();
        let actor = ActorId::new();
        let t0 = Timestamp::now();

        log.append(AuditEntry::transition(
            ResourceKind::Equipment,
            id,
            actor,
            State::Available,
            State::InUse,
            t0,
        ))
        .unwrap();
        log.append(AuditEntry::transition(
            ResourceKind::Equipment,
            id,
            actor,
            State::InUse,
            State::Maintenance,
            t0,
        ))
        .unwrap();

        let trail = log.query_by_resource(ResourceKind::Equipment, id);
        assert_eq!(trail.len(), 2);
        assert_eq!(trail[0].to_state, State::InUse);
        assert_eq!(trail[1].to_state, State::Maintenance);
    }

    #[test]
    fn test_audit_query_filters_by_resource() {
        let log = MemoryAuditLog::new();
        let a = ResourceId::new();
        let b = ResourceId::new();
        let actor = ActorId::new();
        let now = Timestamp::now();

        log.append(AuditEntry::transition(
            ResourceKind::Equipment,
            a,
            actor,
            State::Available,
            State::InUse,
            now,
        ))
        .unwrap();
        log.append(AuditEntry::transition(
            ResourceKind::SupportTicket,
            b,
            actor,
            State::Open,
            State::InProgress,
            now,
        ))
        .unwrap();

        assert_eq!(log.query_by_resource(ResourceKind::Equipment, a).len(), 1);
        assert_eq!(log.query_by_resource(ResourceKind::Equipment, b).len(), 0);
        assert_eq!(log.len(), 2);
    }
}
