//! # careflow-core — Foundational Types
//!
//! Shared vocabulary for the Careflow lifecycle engine:
//!
//! - **Identity** (`identity.rs`): newtype identifiers for tenants,
//!   resources, and actors; caller roles and principals.
//! - **Temporal** (`temporal.rs`): UTC-only millisecond-precision
//!   timestamps with strict parsing.
//! - **Error** (`error.rs`): the five-kind failure taxonomy
//!   (NotFound / Forbidden / InvalidTransition / PreconditionFailed /
//!   Conflict) with stable machine codes.
//!
//! Everything here is locale-agnostic. Bilingual rendering of statuses and
//! failure codes is the presentation layer's job, not this crate's.

pub mod error;
pub mod identity;
pub mod temporal;

pub use error::{DenialReason, EngineError, PreconditionCode};
pub use identity::{ActorId, Principal, ResourceId, Role, TenantId};
pub use temporal::{Timestamp, TimestampError};
