//! Creation clock and workout id generation

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// Number of trailing epoch-millisecond digits kept in an id.
pub const ID_DIGITS: u32 = 10;

/// Source of creation timestamps.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    /// Start the clock at `at` (millisecond precision).
    #[must_use]
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            millis: AtomicI64::new(at.timestamp_millis()),
        }
    }

    /// Move the clock forward by `millis`.
    pub fn advance(&self, millis: i64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.millis.load(Ordering::SeqCst)).unwrap_or_default()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Mints workout ids.
pub trait IdGenerator: Send {
    /// Id for a workout created at `at`. Never repeats within one generator.
    fn next_id(&mut self, at: DateTime<Utc>) -> String;
}

/// Time-based ids: the last [`ID_DIGITS`] digits of the creation instant in
/// epoch milliseconds.
///
/// When two workouts land in the same millisecond (or the clock steps
/// back) the generator bumps forward by one millisecond, so ids from one
/// generator are strictly increasing until the 10-digit window wraps.
#[derive(Debug, Default)]
pub struct TimestampIdGenerator {
    last: Option<i64>,
}

impl TimestampIdGenerator {
    /// Create a generator with no history.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }
}

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&mut self, at: DateTime<Utc>) -> String {
        let mut millis = at.timestamp_millis();
        if let Some(last) = self.last {
            if millis <= last {
                millis = last + 1;
            }
        }
        self.last = Some(millis);

        let window = 10_i64.pow(ID_DIGITS);
        format!("{:0width$}", millis.rem_euclid(window), width = ID_DIGITS as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_millis(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn test_id_is_last_ten_digits() {
        let mut ids = TimestampIdGenerator::new();
        assert_eq!(ids.next_id(at_millis(1_760_781_234_567)), "0781234567");
    }

    #[test]
    fn test_same_millisecond_bumps() {
        let mut ids = TimestampIdGenerator::new();
        let at = at_millis(1_000);

        let a = ids.next_id(at);
        let b = ids.next_id(at);
        let c = ids.next_id(at_millis(999));

        assert_eq!(a, "0000001000");
        assert_eq!(b, "0000001001");
        assert_eq!(c, "0000001002");
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new(at_millis(5_000));
        assert_eq!(clock.now().timestamp_millis(), 5_000);

        clock.advance(250);
        assert_eq!(clock.now().timestamp_millis(), 5_250);
    }
}
