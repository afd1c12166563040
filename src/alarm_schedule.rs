//! # Alarm schedule
//! The single alarm slot. A bare time of day, independent of whether the alarm is armed.
use crate::time_of_day::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE, TimeOfDay};

/// The time of day the alarm rings at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmSchedule {
    /// The alarm target
    target: TimeOfDay,
}

impl AlarmSchedule {
    /// Create a new `AlarmSchedule` ringing at `target`
    pub const fn new(target: TimeOfDay) -> Self {
        Self { target }
    }

    /// The alarm target
    pub const fn target(&self) -> TimeOfDay {
        self.target
    }

    /// Set the alarm target, coercing each component into range. Returns the new target.
    pub const fn set(&mut self, hour: i32, minute: i32, second: i32) -> TimeOfDay {
        self.target = TimeOfDay::from_hms(hour, minute, second);
        self.target
    }

    /// Move the alarm one hour later, wrapping at midnight
    pub const fn increment_hour(&mut self) -> TimeOfDay {
        self.target = self.target.wrapping_add_seconds(SECONDS_PER_HOUR);
        self.target
    }

    /// Move the alarm one minute later, wrapping at midnight
    pub const fn increment_minute(&mut self) -> TimeOfDay {
        self.target = self.target.wrapping_add_seconds(SECONDS_PER_MINUTE);
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_normalizes() {
        let mut alarm = AlarmSchedule::new(TimeOfDay::MIDNIGHT);
        assert_eq!(alarm.set(30, 75, 0), TimeOfDay::from_hms(6, 15, 0));
        assert_eq!(alarm.target(), TimeOfDay::from_hms(6, 15, 0));
    }

    #[test]
    fn increments_carry_and_wrap() {
        let mut alarm = AlarmSchedule::new(TimeOfDay::from_hms(23, 59, 0));
        // the minute carries into the hour, unlike a per-field increment
        assert_eq!(alarm.increment_minute(), TimeOfDay::MIDNIGHT);
        assert_eq!(alarm.increment_hour(), TimeOfDay::from_hms(1, 0, 0));
    }
}
