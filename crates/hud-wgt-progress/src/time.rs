//! Overlay timeline types.
//!
//! The shell owns the clock. It samples time once per event-loop pass and
//! hands the same [`UiInstant`] to every signal handler and frame callback in
//! that pass, so one pass observes one consistent time. Tests drive the
//! timeline with plain values.

use std::{fmt, ops, time::Duration};

/// An instant in the overlay timeline.
///
/// Is the duration elapsed since the shell defined epoch, usually the moment
/// the overlay layer was mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UiInstant(Duration);
impl UiInstant {
    /// Earliest instant.
    pub const EPOCH: UiInstant = UiInstant(Duration::ZERO);

    /// New instant from the duration elapsed since the epoch.
    pub const fn from_epoch(elapsed: Duration) -> Self {
        UiInstant(elapsed)
    }

    /// New instant from milliseconds elapsed since the epoch.
    pub const fn from_millis(ms: u64) -> Self {
        UiInstant(Duration::from_millis(ms))
    }

    /// Time elapsed from `earlier` to this instant, or zero if `earlier` is later.
    pub fn saturating_duration_since(self, earlier: UiInstant) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}
impl ops::Add<Duration> for UiInstant {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self {
        Self(self.0.saturating_add(rhs))
    }
}
impl ops::AddAssign<Duration> for UiInstant {
    fn add_assign(&mut self, rhs: Duration) {
        self.0 = self.0.saturating_add(rhs);
    }
}
impl ops::Sub<Duration> for UiInstant {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self {
        Self(self.0.saturating_sub(rhs))
    }
}
impl ops::Sub for UiInstant {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Duration {
        self.0.saturating_sub(rhs.0)
    }
}
impl fmt::Display for UiInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} since epoch", self.0)
    }
}

/// A point in the overlay timeline after which something happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline(pub UiInstant);
impl Deadline {
    /// New deadline at `now + dur`.
    pub fn after(now: UiInstant, dur: Duration) -> Self {
        Deadline(now + dur)
    }

    /// Returns `true` if the deadline was reached at `now`.
    pub fn has_elapsed(self, now: UiInstant) -> bool {
        self.0 <= now
    }

    /// Time left until the deadline is reached, `None` if it already elapsed.
    pub fn time_left(self, now: UiInstant) -> Option<Duration> {
        if self.has_elapsed(now) { None } else { Some(self.0 - now) }
    }
}
impl From<UiInstant> for Deadline {
    fn from(value: UiInstant) -> Self {
        Deadline(value)
    }
}

/// Extension methods for initializing [`Duration`] values.
pub trait TimeUnits {
    /// Milliseconds.
    fn ms(self) -> Duration;
    /// Seconds.
    fn secs(self) -> Duration;
}
impl TimeUnits for u64 {
    fn ms(self) -> Duration {
        Duration::from_millis(self)
    }

    fn secs(self) -> Duration {
        Duration::from_secs(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instant_arithmetic_saturates() {
        let t = UiInstant::from_millis(100);
        assert_eq!(t - 500.ms(), UiInstant::EPOCH);
        assert_eq!(UiInstant::EPOCH - t, Duration::ZERO);
        assert_eq!(t.saturating_duration_since(UiInstant::from_millis(500)), Duration::ZERO);
        assert_eq!(UiInstant::from_millis(500).saturating_duration_since(t), 400.ms());
    }

    #[test]
    fn deadline_elapses() {
        let now = UiInstant::from_millis(1000);
        let deadline = Deadline::after(now, 300.ms());

        assert!(!deadline.has_elapsed(now));
        assert_eq!(deadline.time_left(now), Some(300.ms()));

        let later = now + 300.ms();
        assert!(deadline.has_elapsed(later));
        assert_eq!(deadline.time_left(later), None);
    }
}
