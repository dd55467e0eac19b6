//! # careflow-engine — Tenant-Scoped Lifecycle Engine
//!
//! Every long-lived record in the surrounding platform (equipment, service
//! requests, support tickets, subscriptions) moves through a constrained
//! set of states. This crate is the engine that governs those moves:
//!
//! - **Transition table** (`table.rs`): static per-kind maps of legal
//!   `(from -> {to...})` moves; terminal states map to the empty set.
//! - **Time-derived status resolver** (`resolver.rs`): computes the
//!   *effective* status for kinds whose true state depends on wall-clock
//!   comparisons (subscription expiry, grace windows), plus the
//!   remaining-days countdown.
//! - **Access gate** (`gate.rs`): same-tenant ownership or an elevated
//!   cross-tenant role; destructive transitions need owner/admin.
//! - **Transition executor** (`executor.rs`): the single choke point —
//!   authorize, validate against the effective state, run injected domain
//!   preconditions, commit with an optimistic version check, append
//!   exactly one audit entry.
//! - **Audit contract** (`audit.rs`): immutable entries, append-only sink.
//!
//! The engine is a synchronous library. Persistence and audit storage are
//! external collaborators behind the [`ResourceStore`] and [`AuditSink`]
//! traits; `careflow-store` ships in-memory reference implementations.
//!
//! All statuses and failure reasons surface as locale-agnostic enums and
//! codes — rendering into bilingual copy belongs to the presentation
//! layer.

pub mod audit;
pub mod executor;
pub mod gate;
pub mod resolver;
pub mod resource;
pub mod state;
pub mod table;

// ─── State vocabulary re-exports ────────────────────────────────────

pub use state::{ResourceKind, State};

// ─── Resource re-exports ────────────────────────────────────────────

pub use resource::Resource;

// ─── Resolver re-exports ────────────────────────────────────────────

pub use resolver::{days_remaining, is_lapsed, resolve_effective_status};

// ─── Gate re-exports ────────────────────────────────────────────────

pub use gate::{authorize, AccessDecision, Action};

// ─── Executor re-exports ────────────────────────────────────────────

pub use executor::{Precondition, ResourceStore, TransitionExecutor};

// ─── Audit re-exports ───────────────────────────────────────────────

pub use audit::{AuditEntry, AuditSink};
