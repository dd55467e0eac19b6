//! # Temporal Types — UTC-Only Timestamps
//!
//! Defines `Timestamp`, a UTC-only timestamp truncated to millisecond
//! precision. The engine's expiry boundaries and remaining-days countdown
//! are defined on millisecond deltas, so sub-millisecond components are
//! discarded at construction.
//!
//! ## Invariant
//!
//! Timestamps are UTC with the `Z` suffix. Local timezone offsets would make
//! boundary comparisons (`now > expires_at`) ambiguous across callers, so
//! non-UTC inputs are rejected by the strict parser rather than silently
//! converted.

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// A UTC-only timestamp, truncated to millisecond precision.
///
/// # Construction
///
/// - [`Timestamp::now()`] — current UTC time, truncated.
/// - [`Timestamp::from_utc()`] — from a `DateTime<Utc>`, truncating.
/// - [`Timestamp::from_epoch_millis()`] — from Unix epoch milliseconds.
/// - [`Timestamp::parse()`] — from an RFC 3339 string, rejecting non-UTC
///   offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

/// Error produced when a timestamp cannot be constructed or parsed.
#[derive(Debug, thiserror::Error)]
#[error("invalid timestamp: {0}")]
pub struct TimestampError(String);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to
    /// milliseconds.
    pub fn now() -> Self {
        Self(truncate_to_millis(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating
    /// sub-millisecond components.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_millis(dt))
    }

    /// Create a timestamp from a Unix epoch timestamp in milliseconds.
    pub fn from_epoch_millis(millis: i64) -> Result<Self, TimestampError> {
        let dt = DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| TimestampError(format!("epoch millis out of range: {millis}")))?;
        Ok(Self(dt))
    }

    /// Parse a timestamp from an RFC 3339 string.
    ///
    /// **Rejects non-UTC inputs.** Only the `Z` suffix is accepted; explicit
    /// offsets like `+00:00` or `+07:00` are rejected even when semantically
    /// equivalent to UTC.
    pub fn parse(s: &str) -> Result<Self, TimestampError> {
        if !s.ends_with('Z') {
            return Err(TimestampError(format!(
                "timestamp must use Z suffix (UTC only), got: {s:?}"
            )));
        }
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| TimestampError(format!("invalid RFC 3339 timestamp {s:?}: {e}")))?;
        Ok(Self(truncate_to_millis(dt.with_timezone(&Utc))))
    }

    /// Parse a timestamp from an RFC 3339 string, accepting any timezone
    /// offset and converting to UTC. Lenient path for ingesting external
    /// data; comparison paths should prefer [`Timestamp::parse()`].
    pub fn parse_lenient(s: &str) -> Result<Self, TimestampError> {
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| TimestampError(format!("invalid RFC 3339 timestamp {s:?}: {e}")))?;
        Ok(Self(truncate_to_millis(dt.with_timezone(&Utc))))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// The Unix epoch timestamp in milliseconds.
    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Signed millisecond delta from `self` to `later`.
    ///
    /// Positive when `later` is in the future relative to `self`.
    pub fn millis_until(&self, later: Timestamp) -> i64 {
        later.epoch_millis() - self.epoch_millis()
    }

    /// A timestamp `millis` milliseconds after this one.
    pub fn plus_millis(&self, millis: i64) -> Self {
        Self(truncate_to_millis(self.0 + Duration::milliseconds(millis)))
    }

    /// A timestamp `days` whole days after this one.
    pub fn plus_days(&self, days: i64) -> Self {
        Self(truncate_to_millis(self.0 + Duration::days(days)))
    }

    /// Render as RFC 3339 with millisecond precision and Z suffix
    /// (e.g., `2026-01-15T12:00:00.000Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Truncate a `DateTime<Utc>` to millisecond precision.
fn truncate_to_millis(dt: DateTime<Utc>) -> DateTime<Utc> {
    let millis = dt.nanosecond() / 1_000_000;
    dt.with_nanosecond(millis * 1_000_000).unwrap_or(dt)
}
