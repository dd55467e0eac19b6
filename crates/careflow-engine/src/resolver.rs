//! # Time-Derived Status Resolver
//!
//! Computes the *effective* status of a resource — the status it is treated
//! as right now, which may differ from its stored status because time has
//! passed. Pure and deterministic given `(stored status, now, timestamps)`;
//! callers supply `now` explicitly so boundary behavior is testable.
//!
//! ## Precedence
//!
//! An explicitly stored blocking or terminal state always wins over time:
//! administrative suspension of a subscription is never "overwritten" by an
//! expiry computation. Time derivation only happens when the stored status
//! is a normal one (`Active` or `Trial`).
//!
//! ## Boundaries
//!
//! Expiry is strict: `now == expires_at` is *not yet* expired. Staying in
//! grace is also strict: `now == grace_period_ends_at` is already expired.
//! A missing grace timestamp is a zero-length window.

use careflow_core::Timestamp;

use crate::resource::Resource;
use crate::state::State;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Resolve the effective status of a resource at `now`.
///
/// For kinds without expiry semantics this is the stored status (legacy
/// records resolve to the kind's initial state). For expiring kinds, the
/// expiry and grace-window timestamps are consulted per the precedence and
/// boundary rules above. Legacy records with no stored status and records
/// with no expiry timestamp at all default to the active equivalent —
/// never to a blocked state, so established tenants are not retroactively
/// locked out.
pub fn resolve_effective_status(resource: &Resource, now: Timestamp) -> State {
    if !resource.kind.has_expiry() {
        return resource.stored_or_initial();
    }

    // Legacy subscriptions with no stored status default to active.
    let stored = resource.stored_status.unwrap_or(State::Active);

    // Explicit administrative action always wins over time.
    if !matches!(stored, State::Active | State::Trial) {
        return stored;
    }

    let Some(expires_at) = resource.expires_at else {
        // Record predates the lifecycle feature: default to active.
        return normal_status(resource);
    };

    if now > expires_at {
        // Past expiry. In grace only while strictly before the window end.
        match resource.grace_period_ends_at {
            Some(grace_end) if grace_end > now => State::GracePeriod,
            _ => State::Expired,
        }
    } else {
        normal_status(resource)
    }
}

/// Whether the effective status blocks mutation (read-only grace window or
/// full expiry).
pub fn is_lapsed(resource: &Resource, now: Timestamp) -> bool {
    matches!(
        resolve_effective_status(resource, now),
        State::GracePeriod | State::Expired
    )
}

/// Whole days remaining until expiry, by ceiling division on the
/// millisecond delta: 3.01 days left reports as 4. Past or absent expiry
/// clamps to 0 — never a negative countdown.
pub fn days_remaining(resource: &Resource, now: Timestamp) -> u32 {
    let Some(expires_at) = resource.expires_at else {
        return 0;
    };
    let delta = now.millis_until(expires_at);
    if delta <= 0 {
        return 0;
    }
    ((delta + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY) as u32
}

fn normal_status(resource: &Resource) -> State {
    if resource.trial {
        State::Trial
    } else {
        State::Active
    }
}

/// The state to use as the transition "from" when checking legality:
/// the effective status for expiring kinds, the stored status otherwise.
/// Prevents transitioning out of a status that has silently expired
/// underneath the stored value.
pub fn transition_from_state(resource: &Resource, now: Timestamp) -> State {
    if resource.kind.has_expiry() {
        resolve_effective_status(resource, now)
    } else {
        resource.stored_or_initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ResourceKind;
    use careflow_core::TenantId;

    fn subscription() -> Resource {
        Resource::new(ResourceKind::Subscription, TenantId::new()).with_status(State::Active)
    }

    fn at(s: &str) -> Timestamp {
        Timestamp::parse(s).expect("test timestamp")
    }

    #[test]
    fn test_boundary_equal_expiry_is_not_expired() {
        let now = at("2026-03-01T00:00:00Z");
        let sub = subscription().with_expiry(now);
        assert_eq!(resolve_effective_status(&sub, now), State::Active);
    }

    #[test]
    fn test_one_milli_past_expiry_zero_grace_is_expired() {
        let expires = at("2026-03-01T00:00:00Z");
        let sub = subscription().with_expiry(expires);
        let now = expires.plus_millis(1);
        assert_eq!(resolve_effective_status(&sub, now), State::Expired);
    }

    #[test]
    fn test_within_grace_window() {
        let expires = at("2026-03-01T00:00:00Z");
        let grace_end = expires.plus_days(7);
        let sub = subscription().with_expiry(expires).with_grace_end(grace_end);
        let now = expires.plus_days(3);
        assert_eq!(resolve_effective_status(&sub, now), State::GracePeriod);
        assert!(is_lapsed(&sub, now));
    }

    #[test]
    fn test_boundary_equal_grace_end_is_expired() {
        let expires = at("2026-03-01T00:00:00Z");
        let grace_end = expires.plus_days(7);
        let sub = subscription().with_expiry(expires).with_grace_end(grace_end);
        assert_eq!(resolve_effective_status(&sub, grace_end), State::Expired);
        assert_eq!(
            resolve_effective_status(&sub, grace_end.plus_millis(-1)),
            State::GracePeriod
        );
    }

    #[test]
    fn test_suspended_overrides_expiry() {
        let expires = at("2026-03-01T00:00:00Z");
        let sub = subscription()
            .with_status(State::Suspended)
            .with_expiry(expires);
        let now = expires.plus_days(30);
        assert_eq!(resolve_effective_status(&sub, now), State::Suspended);
    }

    #[test]
    fn test_cancelled_overrides_expiry() {
        let expires = at("2026-03-01T00:00:00Z");
        let sub = subscription()
            .with_status(State::Cancelled)
            .with_expiry(expires);
        assert_eq!(
            resolve_effective_status(&sub, expires.plus_days(1)),
            State::Cancelled
        );
    }

    #[test]
    fn test_trial_flag_before_expiry() {
        let now = at("2026-03-01T00:00:00Z");
        let sub = subscription().with_trial().with_expiry(now.plus_days(10));
        assert_eq!(resolve_effective_status(&sub, now), State::Trial);
    }

    #[test]
    fn test_legacy_no_expiry_defaults_to_active() {
        let sub = subscription();
        let now = at("2026-03-01T00:00:00Z");
        assert_eq!(resolve_effective_status(&sub, now), State::Active);
        assert!(!is_lapsed(&sub, now));
    }

    #[test]
    fn test_legacy_no_stored_status_defaults_to_active() {
        let mut sub = subscription();
        sub.stored_status = None;
        let now = at("2026-03-01T00:00:00Z");
        assert_eq!(resolve_effective_status(&sub, now), State::Active);
    }

    #[test]
    fn test_non_expiring_kind_uses_stored_status() {
        let eq = Resource::new(ResourceKind::Equipment, TenantId::new())
            .with_status(State::Maintenance);
        let now = at("2026-03-01T00:00:00Z");
        assert_eq!(resolve_effective_status(&eq, now), State::Maintenance);
    }

    #[test]
    fn test_determinism() {
        let expires = at("2026-03-01T00:00:00Z");
        let sub = subscription().with_expiry(expires);
        let now = expires.plus_days(2);
        let first = resolve_effective_status(&sub, now);
        for _ in 0..10 {
            assert_eq!(resolve_effective_status(&sub, now), first);
        }
    }

    // ── days_remaining ───────────────────────────────────────────────

    #[test]
    fn test_days_remaining_ceiling() {
        let now = at("2026-03-01T00:00:00Z");
        // 3 days + 1 hour left reports as 4.
        let sub = subscription().with_expiry(now.plus_days(3).plus_millis(3_600_000));
        assert_eq!(days_remaining(&sub, now), 4);
    }

    #[test]
    fn test_days_remaining_exact_days() {
        let now = at("2026-03-01T00:00:00Z");
        let sub = subscription().with_expiry(now.plus_days(3));
        assert_eq!(days_remaining(&sub, now), 3);
    }

    #[test]
    fn test_days_remaining_never_negative() {
        let now = at("2026-03-01T00:00:00Z");
        let sub = subscription().with_expiry(now.plus_days(-5));
        assert_eq!(days_remaining(&sub, now), 0);

        let at_boundary = subscription().with_expiry(now);
        assert_eq!(days_remaining(&at_boundary, now), 0);
    }

    #[test]
    fn test_days_remaining_no_expiry() {
        let now = at("2026-03-01T00:00:00Z");
        assert_eq!(days_remaining(&subscription(), now), 0);
    }
}
