use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use std::sync::Arc;
use summabot::core::models::UserId;
use summabot::core::usage::UsageLimiter;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
}

#[test]
fn test_limit_plus_one_is_denied() {
    let limiter = UsageLimiter::new(20, TimeDelta::hours(24));
    let user = UserId(1);

    for i in 0..20 {
        assert!(
            limiter.allow(user, t0() + TimeDelta::minutes(i)),
            "call {i}"
        );
    }
    assert!(!limiter.allow(user, t0() + TimeDelta::hours(1)));
    // Denials do not count.
    assert_eq!(limiter.snapshot(user).unwrap().count, 20);
}

#[test]
fn test_window_reset_allows_again_and_restarts_count() {
    let limiter = UsageLimiter::new(2, TimeDelta::hours(24));
    let user = UserId(7);

    assert!(limiter.allow(user, t0()));
    assert!(limiter.allow(user, t0()));
    assert!(!limiter.allow(user, t0() + TimeDelta::hours(23)));

    let later = t0() + TimeDelta::hours(24);
    assert!(limiter.allow(user, later));
    let record = limiter.snapshot(user).unwrap();
    assert_eq!(record.count, 1);
    assert_eq!(record.reset_at, later + TimeDelta::hours(24));
}

#[test]
fn test_first_sight_creates_record_with_deadline() {
    let limiter = UsageLimiter::new(5, TimeDelta::hours(24));
    let user = UserId(3);
    assert!(limiter.snapshot(user).is_none());

    assert!(limiter.allow(user, t0()));
    let record = limiter.snapshot(user).unwrap();
    assert_eq!(record.count, 1);
    assert_eq!(record.reset_at, t0() + TimeDelta::hours(24));
}

#[test]
fn test_users_are_independent() {
    let limiter = UsageLimiter::new(1, TimeDelta::hours(24));
    assert!(limiter.allow(UserId(1), t0()));
    assert!(!limiter.allow(UserId(1), t0()));
    assert!(limiter.allow(UserId(2), t0()));
}

#[test]
fn test_remaining_is_read_only() {
    let limiter = UsageLimiter::new(3, TimeDelta::hours(24));
    let user = UserId(9);
    assert_eq!(limiter.remaining(user, t0()), 3);
    assert!(limiter.snapshot(user).is_none());

    limiter.allow(user, t0());
    assert_eq!(limiter.remaining(user, t0()), 2);
    assert_eq!(limiter.remaining(user, t0() + TimeDelta::days(2)), 3);
}

#[test]
fn test_concurrent_callers_never_exceed_limit() {
    let limiter = Arc::new(UsageLimiter::new(20, TimeDelta::hours(24)));
    let user = UserId(42);

    let handles: Vec<_> = (0..64)
        .map(|_| {
            let limiter = Arc::clone(&limiter);
            std::thread::spawn(move || limiter.allow(user, t0()))
        })
        .collect();

    let allowed = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(allowed, 20);
    assert_eq!(limiter.snapshot(user).unwrap().count, 20);
}

#[test]
fn test_refund_returns_one_request() {
    let limiter = UsageLimiter::new(1, TimeDelta::hours(24));
    let user = UserId(5);

    assert!(limiter.allow(user, t0()));
    assert!(!limiter.allow(user, t0()));
    limiter.refund(user);
    assert_eq!(limiter.remaining(user, t0()), 1);
    assert!(limiter.allow(user, t0()));
}

#[test]
fn test_refund_never_goes_below_zero() {
    let limiter = UsageLimiter::new(2, TimeDelta::hours(24));
    let user = UserId(6);

    // Unknown users have nothing to refund.
    limiter.refund(user);
    assert!(limiter.snapshot(user).is_none());

    limiter.allow(user, t0());
    limiter.refund(user);
    limiter.refund(user);
    assert_eq!(limiter.snapshot(user).unwrap().count, 0);
}
