//! Time abstraction traits for platform-agnostic timing.
//!
//! The controller never sleeps. Every wait is stored as a [`Deadline`] and
//! compared against the clock once per tick.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;

    /// Saturating subtraction (returns ZERO on underflow).
    fn saturating_sub(self, other: Self) -> Self;
}

/// Trait abstraction for instant types.
///
/// Instants may wrap (e.g. a 32-bit millisecond counter); `duration_since`
/// is expected to handle that.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// A point in time expressed as a start instant plus a wait.
///
/// Expiry is decided with `duration_since`, never by comparing instants
/// directly, so deadlines survive counter wrap-around.
#[derive(Clone, Copy, PartialEq)]
pub struct Deadline<I: TimeInstant> {
    start: I,
    wait: I::Duration,
}

impl<I: TimeInstant> Deadline<I> {
    /// Creates a deadline `wait` after `start`.
    #[inline]
    pub fn new(start: I, wait: I::Duration) -> Self {
        Self { start, wait }
    }

    /// Returns true once `now` is at or past the deadline.
    pub fn expired(&self, now: I) -> bool {
        now.duration_since(self.start).as_millis() >= self.wait.as_millis()
    }

    /// Time left until the deadline, `ZERO` once expired.
    pub fn remaining(&self, now: I) -> I::Duration {
        self.wait.saturating_sub(now.duration_since(self.start))
    }

    /// Instant the deadline was armed at.
    pub fn start(&self) -> I {
        self.start
    }

    /// Length of the wait.
    pub fn wait(&self) -> I::Duration {
        self.wait
    }
}

impl<I: TimeInstant + core::fmt::Debug> core::fmt::Debug for Deadline<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Deadline")
            .field("start", &self.start)
            .field("wait_ms", &self.wait.as_millis())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Millis(u64);

    impl TimeDuration for Millis {
        const ZERO: Self = Millis(0);

        fn as_millis(&self) -> u64 {
            self.0
        }

        fn from_millis(millis: u64) -> Self {
            Millis(millis)
        }

        fn saturating_sub(self, other: Self) -> Self {
            Millis(self.0.saturating_sub(other.0))
        }
    }

    // Wrapping 32-bit counter, like a SysTick millisecond counter
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Tick(u32);

    impl TimeInstant for Tick {
        type Duration = Millis;

        fn duration_since(&self, earlier: Self) -> Self::Duration {
            Millis(self.0.wrapping_sub(earlier.0) as u64)
        }
    }

    #[test]
    fn deadline_expires_exactly_at_wait() {
        let deadline = Deadline::new(Tick(1000), Millis(2000));

        assert!(!deadline.expired(Tick(1000)));
        assert!(!deadline.expired(Tick(2999)));
        assert!(deadline.expired(Tick(3000)));
        assert!(deadline.expired(Tick(5000)));
    }

    #[test]
    fn deadline_survives_counter_wrap() {
        let start = Tick(u32::MAX - 100);
        let deadline = Deadline::new(start, Millis(300));

        assert!(!deadline.expired(Tick(50)));
        assert_eq!(deadline.remaining(Tick(50)), Millis(149));
        assert!(deadline.expired(Tick(199)));
    }

    #[test]
    fn remaining_saturates_at_zero() {
        let deadline = Deadline::new(Tick(0), Millis(100));

        assert_eq!(deadline.remaining(Tick(40)), Millis(60));
        assert_eq!(deadline.remaining(Tick(400)), Millis::ZERO);
    }
}
