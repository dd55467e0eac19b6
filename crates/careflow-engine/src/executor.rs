//! # Transition Executor
//!
//! The single choke point through which every state change passes. The
//! executor loads the resource, consults the access gate, resolves the
//! effective "from" state for time-derived kinds, validates the move
//! against the transition table, runs caller-injected preconditions,
//! commits the write with an optimistic version check, and appends exactly
//! one audit entry.
//!
//! ## Atomicity
//!
//! Any failure before the versioned save leaves no observable change; a
//! caller-side timeout before the save is safe to retry. Once the save
//! commits, the audit append runs to completion — it is retried until
//! durable rather than dropped, because audit completeness is a hard
//! invariant, not best-effort.
//!
//! ## Concurrency
//!
//! Two concurrent transitions against the same resource are serialized: a
//! per-resource lock covers the commit + audit-append window, and the
//! version check rejects the loser with `Conflict`. Exactly one of two
//! racing callers succeeds; the audit log gains exactly one entry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use careflow_core::{EngineError, PreconditionCode, Principal, ResourceId, Timestamp};

use crate::audit::{AuditEntry, AuditSink};
use crate::gate::{self, Action};
use crate::resolver;
use crate::resource::Resource;
use crate::state::State;
use crate::table;

/// Backoff between audit append retries, capped exponential.
const AUDIT_RETRY_INITIAL_BACKOFF: Duration = Duration::from_millis(10);
const AUDIT_RETRY_MAX_BACKOFF: Duration = Duration::from_secs(1);

/// The persistence collaborator. Read-after-write consistent: a committed
/// save is visible to the next `load`.
pub trait ResourceStore: Send + Sync {
    /// Load a resource by id. Absence is [`EngineError::NotFound`].
    fn load(&self, id: ResourceId) -> Result<Resource, EngineError>;

    /// Persist `resource` only if the stored version still equals
    /// `expected_version`; bump the version and return the stored copy.
    /// A mismatch is [`EngineError::Conflict`].
    fn save_if_version_matches(
        &self,
        resource: Resource,
        expected_version: u64,
    ) -> Result<Resource, EngineError>;
}

/// A domain-supplied validation injected at the call site (e.g., "a
/// completion report needs a description of minimum length"). The engine
/// runs these after the legality check and before the write; it never
/// hard-codes domain rules itself.
pub trait Precondition {
    /// Check the precondition against the loaded resource.
    fn check(&self, resource: &Resource) -> Result<(), PreconditionCode>;
}

impl<F> Precondition for F
where
    F: Fn(&Resource) -> Result<(), PreconditionCode>,
{
    fn check(&self, resource: &Resource) -> Result<(), PreconditionCode> {
        self(resource)
    }
}

/// The transition executor, generic over its persistence and audit
/// collaborators.
pub struct TransitionExecutor<S, A> {
    store: S,
    audit: A,
    // Serializes the commit + audit-append window per resource so that
    // audit submission order matches state-write commit order. Entries
    // are pruned once no caller holds them.
    commit_locks: Mutex<HashMap<ResourceId, Arc<Mutex<()>>>>,
}

impl<S: ResourceStore, A: AuditSink> TransitionExecutor<S, A> {
    /// Create an executor over the given collaborators.
    pub fn new(store: S, audit: A) -> Self {
        Self {
            store,
            audit,
            commit_locks: Mutex::new(HashMap::new()),
        }
    }

    /// The persistence collaborator.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The audit collaborator.
    pub fn audit(&self) -> &A {
        &self.audit
    }

    /// Execute a transition at the current wall-clock time.
    pub fn execute(
        &self,
        caller: &Principal,
        resource_id: ResourceId,
        to: State,
        preconditions: &[&dyn Precondition],
    ) -> Result<Resource, EngineError> {
        self.execute_at(caller, resource_id, to, preconditions, Timestamp::now())
    }

    /// Execute a transition with an explicit `now`, for deterministic
    /// boundary behavior (and tests).
    pub fn execute_at(
        &self,
        caller: &Principal,
        resource_id: ResourceId,
        to: State,
        preconditions: &[&dyn Precondition],
        now: Timestamp,
    ) -> Result<Resource, EngineError> {
        // 1. Load. Absence propagates as NotFound.
        let resource = self.store.load(resource_id)?;

        // 2. Authorize. On denial nothing else happens.
        gate::authorize(caller, &resource, Action::Transition { to }).into_result()?;

        // 3. The "from" state is the effective status for time-derived
        //    kinds, so a silently lapsed status cannot be transitioned out
        //    of as if it were still current.
        let from = resolver::transition_from_state(&resource, now);

        // 4. Legality.
        table::assert_transition(resource.kind, from, to)?;

        // 5. Injected domain preconditions.
        for precondition in preconditions {
            precondition
                .check(&resource)
                .map_err(|code| EngineError::PreconditionFailed { code })?;
        }

        // 6 + 7. Versioned commit and audit append, serialized per
        // resource so append order matches commit order.
        let expected_version = resource.version;
        let mut updated = resource;
        updated.stored_status = Some(to);
        updated.updated_at = now;
        if to == State::Completed {
            updated.completed_at = Some(now);
        }

        let lock = self.commit_lock_for(resource_id);
        let committed = {
            let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            match self.store.save_if_version_matches(updated, expected_version) {
                Ok(saved) => {
                    debug!(
                        resource = %resource_id,
                        kind = %saved.kind,
                        from = %from,
                        to = %to,
                        actor = %caller.actor_id,
                        "transition committed"
                    );
                    self.append_audit(AuditEntry::transition(
                        saved.kind,
                        saved.id,
                        caller.actor_id,
                        from,
                        to,
                        now,
                    ));
                    Ok(saved)
                }
                Err(e) => Err(e),
            }
        };
        self.release_commit_lock(resource_id, &lock);
        committed
    }

    /// Authorized read path for cross-tenant-sensitive detail views.
    pub fn view(&self, caller: &Principal, resource_id: ResourceId) -> Result<Resource, EngineError> {
        let resource = self.store.load(resource_id)?;
        gate::authorize(caller, &resource, Action::View).into_result()?;
        Ok(resource)
    }

    /// Effective status of a resource, through the authorized read path.
    pub fn effective_status(
        &self,
        caller: &Principal,
        resource_id: ResourceId,
        now: Timestamp,
    ) -> Result<State, EngineError> {
        let resource = self.view(caller, resource_id)?;
        Ok(resolver::resolve_effective_status(&resource, now))
    }

    fn commit_lock_for(&self, id: ResourceId) -> Arc<Mutex<()>> {
        let mut locks = self
            .commit_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.entry(id).or_default().clone()
    }

    fn release_commit_lock(&self, id: ResourceId, lock: &Arc<Mutex<()>>) {
        let mut locks = self
            .commit_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // Two strong refs are the map's entry and our own clone: no other
        // caller is waiting, so the entry can be pruned. A waiter holds a
        // third ref and keeps the entry alive.
        if Arc::strong_count(lock) == 2 {
            locks.remove(&id);
        }
    }

    // The state write has committed by the time this runs; dropping the
    // entry would break audit completeness. The append retries until the
    // sink accepts it, with capped exponential backoff between attempts.
    fn append_audit(&self, entry: AuditEntry) {
        let mut backoff = AUDIT_RETRY_INITIAL_BACKOFF;
        let mut attempt: u64 = 1;
        loop {
            match self.audit.append(entry.clone()) {
                Ok(()) => return,
                Err(e) => {
                    warn!(
                        resource = %entry.resource_id,
                        attempt,
                        error = %e,
                        "audit append failed, retrying until durable"
                    );
                    thread::sleep(backoff);
                    backoff = (backoff * 2).min(AUDIT_RETRY_MAX_BACKOFF);
                    attempt += 1;
                }
            }
        }
    }
}
