//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the identifier namespaces of the lifecycle engine.
//! These prevent accidental identifier confusion — you cannot pass a
//! `TenantId` where a `ResourceId` is expected.
//!
//! ## Security Invariant
//!
//! Tenant isolation hinges on comparing the right identifiers. Type-level
//! distinction between namespaces means a caller cannot smuggle a resource
//! identifier into a tenant comparison, or vice versa.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tenant (an organization whose resources are
/// isolated from every other organization's).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(pub Uuid);

/// Unique identifier for a resource under lifecycle control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(pub Uuid);

/// Unique identifier for an actor (a human or service caller).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl TenantId {
    /// Generate a new random tenant identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl ResourceId {
    /// Generate a new random resource identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl ActorId {
    /// Generate a new random actor identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TenantId {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for ResourceId {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tenant:{}", self.0)
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "resource:{}", self.0)
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "actor:{}", self.0)
    }
}

// ─── Roles ───────────────────────────────────────────────────────────

/// The role a caller holds.
///
/// Tenant-scoped roles (`Member`, `Admin`, `Owner`) act only within their
/// own tenant. Platform roles (`PlatformSupport`, `PlatformAdmin`) are
/// elevated — they may act across tenant boundaries, and every such action
/// still carries the caller's identity into the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Ordinary tenant membership.
    Member,
    /// Tenant administrator.
    Admin,
    /// Tenant owner.
    Owner,
    /// Platform-level support staff (elevated, cross-tenant).
    PlatformSupport,
    /// Platform-level administrator (elevated, cross-tenant).
    PlatformAdmin,
}

impl Role {
    /// Whether this role may act across tenant boundaries.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Self::PlatformSupport | Self::PlatformAdmin)
    }

    /// Whether this role may execute destructive transitions
    /// (suspend, retire, cancel).
    pub fn can_execute_destructive(&self) -> bool {
        matches!(
            self,
            Self::Admin | Self::Owner | Self::PlatformSupport | Self::PlatformAdmin
        )
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Member => "MEMBER",
            Self::Admin => "ADMIN",
            Self::Owner => "OWNER",
            Self::PlatformSupport => "PLATFORM_SUPPORT",
            Self::PlatformAdmin => "PLATFORM_ADMIN",
        };
        f.write_str(s)
    }
}

// ─── Principal ───────────────────────────────────────────────────────

/// The authenticated (or anonymous) caller of an engine operation.
///
/// An anonymous principal has no tenant and no role and is denied by the
/// access gate unconditionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The caller's identity. Present even for elevated cross-tenant
    /// callers so that every action can be attributed in the audit log.
    pub actor_id: ActorId,
    /// The tenant the caller belongs to. `None` for anonymous callers and
    /// for platform-level service identities.
    pub tenant_id: Option<TenantId>,
    /// The caller's role. `None` means unauthenticated.
    pub role: Option<Role>,
}

impl Principal {
    /// An authenticated tenant member with the given role.
    pub fn member_of(actor_id: ActorId, tenant_id: TenantId, role: Role) -> Self {
        Self {
            actor_id,
            tenant_id: Some(tenant_id),
            role: Some(role),
        }
    }

    /// A platform-level caller with an elevated role.
    pub fn platform(actor_id: ActorId, role: Role) -> Self {
        Self {
            actor_id,
            tenant_id: None,
            role: Some(role),
        }
    }

    /// An unauthenticated caller. Always denied by the access gate.
    pub fn anonymous() -> Self {
        Self {
            actor_id: ActorId(Uuid::nil()),
            tenant_id: None,
            role: None,
        }
    }

    /// Whether the caller is authenticated at all.
    pub fn is_authenticated(&self) -> bool {
        self.role.is_some()
    }

    /// Whether the caller holds an elevated (cross-tenant) role.
    pub fn is_elevated(&self) -> bool {
        self.role.map(|r| r.is_elevated()).unwrap_or(false)
    }
}
