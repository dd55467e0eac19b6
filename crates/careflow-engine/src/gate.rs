//! # Tenant/Role Access Gate
//!
//! Decides whether a caller may read or mutate a resource. Consulted on
//! every cross-tenant-sensitive read and every mutation — this is not
//! optional middleware.
//!
//! ## Rules, in order
//!
//! 1. Unauthenticated callers are always denied.
//! 2. An elevated (platform) role is allowed for any tenant; the decision
//!    still carries the caller's identity so the action is attributable.
//! 3. A tenant mismatch is denied.
//! 4. Within the tenant, destructive transitions (suspend / retire /
//!    cancel) require an owner or admin membership role.
//!
//! Any denial is a terminal `Forbidden` outcome — never silently
//! downgraded to a partial or read-only result.

use serde::{Deserialize, Serialize};

use careflow_core::{DenialReason, EngineError, Principal};

use crate::resource::Resource;
use crate::state::State;

/// What the caller wants to do with the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Read the resource's detail view.
    View,
    /// Update non-lifecycle fields.
    Update,
    /// Move the resource to a new lifecycle state.
    Transition {
        /// The requested target state.
        to: State,
    },
}

impl Action {
    /// Whether the action is destructive and therefore restricted to
    /// owner/admin membership roles within the tenant.
    pub fn is_destructive(&self) -> bool {
        matches!(self, Self::Transition { to } if to.is_destructive_target())
    }
}

/// The gate's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    /// Whether the caller may proceed.
    pub allowed: bool,
    /// Why the caller was denied, when `allowed` is false.
    pub reason: Option<DenialReason>,
}

impl AccessDecision {
    /// An allowing decision.
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    /// A denying decision with its structured reason.
    pub fn deny(reason: DenialReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }

    /// Convert to a `Result`, mapping denial to [`EngineError::Forbidden`].
    pub fn into_result(self) -> Result<(), EngineError> {
        if self.allowed {
            Ok(())
        } else {
            Err(EngineError::Forbidden {
                reason: self.reason.unwrap_or(DenialReason::Unauthenticated),
            })
        }
    }
}

/// Authorize a caller's action against a resource.
pub fn authorize(caller: &Principal, resource: &Resource, action: Action) -> AccessDecision {
    let Some(role) = caller.role else {
        return AccessDecision::deny(DenialReason::Unauthenticated);
    };

    // Platform roles cross tenant boundaries; the caller's actor_id still
    // flows into the audit entry downstream.
    if role.is_elevated() {
        return AccessDecision::allow();
    }

    if caller.tenant_id != Some(resource.tenant_id) {
        return AccessDecision::deny(DenialReason::TenantMismatch);
    }

    if action.is_destructive() && !role.can_execute_destructive() {
        return AccessDecision::deny(DenialReason::InsufficientRole);
    }

    AccessDecision::allow()
}
