//! # Day rollover
//! Detects the wrap of the seconds-since-midnight counter, the only "new day" signal the appliance has.
use crate::time_of_day::TimeOfDay;

/// Watches successive clock readings for a wrap to a smaller value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DayRollover {
    /// The reading of the previous tick, `None` before the first tick
    last_observed: Option<TimeOfDay>,
}

impl DayRollover {
    /// Create a new `DayRollover` that has not seen any reading yet
    pub const fn new() -> Self {
        Self {
            last_observed: None,
        }
    }

    /// Feed the current reading. Returns `true` when it is smaller than the previous one.
    ///
    /// The very first reading never counts as a rollover. A clock that is set backwards looks exactly
    /// like a new day and is reported as one.
    pub fn observe(&mut self, now: TimeOfDay) -> bool {
        let rolled_over = self.last_observed.is_some_and(|last| now < last);
        self.last_observed = Some(now);
        rolled_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_of_day::SECONDS_PER_DAY;

    #[test]
    fn first_reading_is_not_a_rollover() {
        let mut rollover = DayRollover::new();
        assert!(!rollover.observe(TimeOfDay::MIDNIGHT));
        assert!(!rollover.observe(TimeOfDay::MIDNIGHT));
    }

    #[test]
    fn fires_once_per_day_at_two_hertz() {
        let mut rollover = DayRollover::new();
        let start = TimeOfDay::from_hms(12, 0, 0);
        let mut fired = 0;
        // two days worth of ticks, each second observed twice
        for tick in 0..(2 * SECONDS_PER_DAY * 2) {
            if rollover.observe(start.wrapping_add_seconds(tick / 2)) {
                fired += 1;
            }
        }
        assert_eq!(fired, 2);
    }

    #[test]
    fn wrap_is_reported_on_the_first_tick_after_midnight() {
        let mut rollover = DayRollover::new();
        assert!(!rollover.observe(TimeOfDay::from_hms(23, 59, 59)));
        assert!(rollover.observe(TimeOfDay::from_hms(0, 0, 0)));
        assert!(!rollover.observe(TimeOfDay::from_hms(0, 0, 1)));
    }
}
