//! # Clock
//! The wall clock of the appliance, derived from a monotonic reference point plus an offset.
//!
//! Current time is `(base_offset + whole seconds elapsed since reference) mod 86_400`. Setting the
//! clock or nudging it by an hour/minute rebases both fields to "now", so repeated adjustments compose
//! correctly no matter how much real time passed between them.
use crate::time_of_day::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE, TimeOfDay};
use embassy_time::Instant;

/// A source of monotonic timestamps
pub trait MonotonicSource {
    /// The current instant
    fn now(&self) -> Instant;
}

/// The embassy time driver as monotonic source
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMonotonic;

impl MonotonicSource for SystemMonotonic {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<M: MonotonicSource + ?Sized> MonotonicSource for &M {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// The wall clock, seconds since midnight on top of a monotonic source
#[derive(Debug)]
pub struct Clock<M> {
    /// Where timestamps come from
    source: M,
    /// The instant `base_offset` was valid at
    reference_instant: Instant,
    /// The time of day at `reference_instant`
    base_offset: TimeOfDay,
}

impl<M: MonotonicSource> Clock<M> {
    /// Create a new `Clock` showing `initial` right now
    pub fn new(source: M, initial: TimeOfDay) -> Self {
        let reference_instant = source.now();
        Self {
            source,
            reference_instant,
            base_offset: initial,
        }
    }

    /// The current time of day
    pub fn current_time(&self) -> TimeOfDay {
        self.time_at(self.source.now())
    }

    /// The time of day the clock shows at `instant`.
    /// Instants before the reference point count as no time elapsed.
    pub fn time_at(&self, instant: Instant) -> TimeOfDay {
        let elapsed = instant
            .checked_duration_since(self.reference_instant)
            .map_or(0, |d| d.as_secs());
        // fold first, the sum below can then never overflow
        #[allow(clippy::cast_possible_truncation)]
        let elapsed = (elapsed % u64::from(SECONDS_PER_DAY)) as u32;
        self.base_offset.wrapping_add_seconds(elapsed)
    }

    /// The current monotonic instant of the underlying source
    pub fn now(&self) -> Instant {
        self.source.now()
    }

    /// Set the clock, coercing each component into range. Returns the new time.
    pub fn set(&mut self, hour: i32, minute: i32, second: i32) -> TimeOfDay {
        let time = TimeOfDay::from_hms(hour, minute, second);
        self.set_time(time);
        time
    }

    /// Set the clock to an already normalized time of day
    pub fn set_time(&mut self, time: TimeOfDay) {
        self.reference_instant = self.source.now();
        self.base_offset = time;
    }

    /// Advance the clock by one hour. Returns the new time.
    pub fn increment_hour(&mut self) -> TimeOfDay {
        self.advance(SECONDS_PER_HOUR)
    }

    /// Advance the clock by one minute. Returns the new time.
    pub fn increment_minute(&mut self) -> TimeOfDay {
        self.advance(SECONDS_PER_MINUTE)
    }

    /// Add to the current derived time (not to the stored offset) and rebase
    fn advance(&mut self, seconds: u32) -> TimeOfDay {
        let now = self.source.now();
        let time = self.time_at(now).wrapping_add_seconds(seconds);
        self.reference_instant = now;
        self.base_offset = time;
        time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ManualMonotonic;
    use embassy_time::Duration;

    #[test]
    fn set_reads_back_immediately() {
        let time = ManualMonotonic::new();
        let mut clock = Clock::new(&time, TimeOfDay::MIDNIGHT);
        time.advance(Duration::from_secs(1234));
        clock.set(6, 29, 59);
        assert_eq!(clock.current_time(), TimeOfDay::from_hms(6, 29, 59));
    }

    #[test]
    fn time_advances_with_the_monotonic_source() {
        let time = ManualMonotonic::new();
        let clock = Clock::new(&time, TimeOfDay::from_hms(12, 0, 0));
        time.advance(Duration::from_millis(1_999));
        // whole seconds only
        assert_eq!(clock.current_time(), TimeOfDay::from_hms(12, 0, 1));
        time.advance(Duration::from_secs(3_600));
        assert_eq!(clock.current_time(), TimeOfDay::from_hms(13, 0, 1));
    }

    #[test]
    fn wraps_past_midnight() {
        let time = ManualMonotonic::new();
        let clock = Clock::new(&time, TimeOfDay::from_hms(23, 59, 59));
        time.advance(Duration::from_secs(2));
        assert_eq!(clock.current_time(), TimeOfDay::from_hms(0, 0, 1));
        time.advance(Duration::from_secs(u64::from(SECONDS_PER_DAY) * 3));
        assert_eq!(clock.current_time(), TimeOfDay::from_hms(0, 0, 1));
    }

    #[test]
    fn increments_compose_across_elapsed_time() {
        let time = ManualMonotonic::new();
        let mut clock = Clock::new(&time, TimeOfDay::from_hms(7, 0, 0));
        time.advance(Duration::from_secs(30));
        assert_eq!(clock.increment_hour(), TimeOfDay::from_hms(8, 0, 30));
        time.advance(Duration::from_secs(30));
        assert_eq!(clock.increment_minute(), TimeOfDay::from_hms(8, 2, 0));
        assert_eq!(clock.current_time(), TimeOfDay::from_hms(8, 2, 0));
    }

    #[test]
    fn increment_hour_wraps() {
        let time = ManualMonotonic::new();
        let mut clock = Clock::new(&time, TimeOfDay::from_hms(23, 15, 0));
        assert_eq!(clock.increment_hour(), TimeOfDay::from_hms(0, 15, 0));
    }
}
