//! Wall-clock sources.
//!
//! Token issue and validation read the current time through [`Clock`] so
//! tests can pin it.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Utc};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A manually driven clock with millisecond resolution.
///
/// Interior mutability lets tests move time while an issuer borrows it.
#[derive(Debug)]
pub struct FixedClock {
    millis: AtomicI64,
}

impl FixedClock {
    /// Clock pinned at `unix_secs`.
    pub fn at(unix_secs: i64) -> Self {
        Self {
            millis: AtomicI64::new(unix_secs.saturating_mul(1000)),
        }
    }

    /// Pin the clock at an exact instant.
    pub fn set(&self, at: DateTime<Utc>) {
        self.millis.store(at.timestamp_millis(), Ordering::SeqCst);
    }

    /// Move the clock forward (or backward, for negative durations).
    pub fn advance(&self, by: Duration) {
        self.millis
            .fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.millis.load(Ordering::SeqCst);
        DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_advances() {
        let clock = FixedClock::at(1_700_000_000);
        assert_eq!(clock.now().timestamp(), 1_700_000_000);

        clock.advance(Duration::milliseconds(4_999));
        assert_eq!(clock.now().timestamp(), 1_700_000_004);
        assert_eq!(clock.now().timestamp_subsec_millis(), 999);
    }

    #[test]
    fn test_system_clock_is_recent() {
        // 2023-11-14 or later
        assert!(SystemClock.now().timestamp() > 1_700_000_000);
    }
}
