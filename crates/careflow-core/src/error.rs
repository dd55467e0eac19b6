//! # Error Types — Structured Failure Taxonomy
//!
//! The complete failure vocabulary of the lifecycle engine. All five kinds
//! are terminal, non-retryable-as-is outcomes surfaced to the caller with a
//! structured code; none are silently swallowed. `Conflict` is the one kind
//! a caller may safely retry by reloading and re-attempting.
//!
//! ## Design
//!
//! Errors carry locale-agnostic structured data only. The surrounding
//! application renders each [`EngineError::code()`] into bilingual copy at
//! the presentation boundary; no Vietnamese or English text lives here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why the access gate denied a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// The caller is not authenticated at all.
    Unauthenticated,
    /// The caller belongs to a different tenant and holds no elevated role.
    TenantMismatch,
    /// The caller is in the right tenant but their role does not permit
    /// the requested action.
    InsufficientRole,
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::TenantMismatch => "TENANT_MISMATCH",
            Self::InsufficientRole => "INSUFFICIENT_ROLE",
        };
        f.write_str(s)
    }
}

/// A domain-supplied precondition code.
///
/// Domain modules inject validations into the transition executor (e.g., a
/// completion report needs a minimum-length description). When one fails,
/// its code is surfaced untouched so the presentation layer can render the
/// matching bilingual message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreconditionCode(String);

impl PreconditionCode {
    /// Create a precondition code. Codes are stable machine identifiers,
    /// conventionally SCREAMING_SNAKE (e.g., `DESCRIPTION_TOO_SHORT`).
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The code as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PreconditionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Top-level error type for the lifecycle engine.
///
/// State names and resource kinds appear as their canonical
/// SCREAMING_SNAKE strings so the error is self-describing without
/// depending on the state vocabulary crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The resource does not exist (or is not visible to the store).
    #[error("{kind} {id} not found")]
    NotFound {
        /// The resource kind that was requested.
        kind: String,
        /// The identifier that failed to resolve.
        id: String,
    },

    /// The access gate denied the caller.
    #[error("forbidden: {reason}")]
    Forbidden {
        /// Why the caller was denied.
        reason: DenialReason,
    },

    /// The requested move is not in the transition table. Covers
    /// self-transitions and moves out of terminal states.
    #[error("invalid {kind} transition: {from} -> {to}")]
    InvalidTransition {
        /// The resource kind whose table rejected the move.
        kind: String,
        /// Current (effective) state.
        from: String,
        /// Attempted target state.
        to: String,
    },

    /// A domain-supplied validation failed.
    #[error("precondition failed: {code}")]
    PreconditionFailed {
        /// The injected validation's stable code.
        code: PreconditionCode,
    },

    /// Optimistic-concurrency version mismatch: another writer committed
    /// first. Safe to retry by reloading.
    #[error("conflict: {kind} {id} was modified concurrently")]
    Conflict {
        /// The resource kind.
        kind: String,
        /// The contested resource.
        id: String,
    },
}

impl EngineError {
    /// Stable machine code for the presentation layer to map to bilingual
    /// copy.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::PreconditionFailed { .. } => "PRECONDITION_FAILED",
            Self::Conflict { .. } => "CONFLICT",
        }
    }

    /// Whether a caller may retry the operation after reloading.
    /// True only for [`EngineError::Conflict`].
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
