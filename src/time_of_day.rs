//! # Time of day
//! Seconds since local midnight, the only notion of time the appliance has.
//!
//! There is no calendar, no timezone and no DST. Every constructor and every arithmetic
//! operation folds the value back into `0..86_400`.
use serde::Serialize;

/// Number of seconds in one day
pub const SECONDS_PER_DAY: u32 = 86_400;

/// Number of seconds in one hour
pub const SECONDS_PER_HOUR: u32 = 3_600;

/// Number of seconds in one minute
pub const SECONDS_PER_MINUTE: u32 = 60;

/// A time of day as seconds since midnight, always within `0..86_400`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    /// Midnight, `00:00:00`
    pub const MIDNIGHT: Self = Self(0);

    /// Create a time of day from a raw seconds count, wrapping at the day boundary
    pub const fn from_seconds(seconds: u32) -> Self {
        Self(seconds % SECONDS_PER_DAY)
    }

    /// Create a time of day from hour, minute and second.
    ///
    /// Each component is coerced into its range first (hour modulo 24, minute and second modulo 60),
    /// negative values included, so `-1` hours is 23 o'clock. Input is never rejected here.
    pub const fn from_hms(hour: i32, minute: i32, second: i32) -> Self {
        // rem_euclid never returns a negative value, the casts are lossless
        let hour = hour.rem_euclid(24) as u32;
        let minute = minute.rem_euclid(60) as u32;
        let second = second.rem_euclid(60) as u32;
        Self(hour * SECONDS_PER_HOUR + minute * SECONDS_PER_MINUTE + second)
    }

    /// Seconds since midnight
    pub const fn seconds(self) -> u32 {
        self.0
    }

    /// Hour component, 0-23
    #[allow(clippy::cast_possible_truncation)]
    pub const fn hour(self) -> u8 {
        (self.0 / SECONDS_PER_HOUR) as u8
    }

    /// Minute component, 0-59
    #[allow(clippy::cast_possible_truncation)]
    pub const fn minute(self) -> u8 {
        ((self.0 % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE) as u8
    }

    /// Second component, 0-59
    #[allow(clippy::cast_possible_truncation)]
    pub const fn second(self) -> u8 {
        (self.0 % SECONDS_PER_MINUTE) as u8
    }

    /// Minutes since midnight, the granularity the alarm matches at
    pub const fn minute_of_day(self) -> u32 {
        self.0 / SECONDS_PER_MINUTE
    }

    /// Whether both times fall into the same minute of the day, seconds ignored
    pub const fn same_minute(self, other: Self) -> bool {
        self.minute_of_day() == other.minute_of_day()
    }

    /// Add a number of seconds, wrapping past midnight
    pub const fn wrapping_add_seconds(self, seconds: u32) -> Self {
        Self((self.0 + seconds % SECONDS_PER_DAY) % SECONDS_PER_DAY)
    }
}

impl core::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_hour_and_minute_reads_back_unchanged() {
        for hour in 0..24 {
            for minute in 0..60 {
                let t = TimeOfDay::from_hms(hour, minute, 0);
                assert_eq!(i32::from(t.hour()), hour);
                assert_eq!(i32::from(t.minute()), minute);
                assert_eq!(t.second(), 0);
            }
        }
    }

    #[test]
    fn components_are_coerced_into_range() {
        assert_eq!(TimeOfDay::from_hms(25, 61, 75), TimeOfDay::from_hms(1, 1, 15));
        assert_eq!(TimeOfDay::from_hms(-1, 0, 0), TimeOfDay::from_hms(23, 0, 0));
        assert_eq!(TimeOfDay::from_hms(0, -1, -1).seconds(), 59 * 60 + 59);
    }

    #[test]
    fn addition_wraps_at_midnight() {
        let t = TimeOfDay::from_hms(23, 59, 30);
        assert_eq!(t.wrapping_add_seconds(45), TimeOfDay::from_hms(0, 0, 15));
        assert_eq!(t.wrapping_add_seconds(SECONDS_PER_DAY), t);
        assert_eq!(TimeOfDay::from_seconds(SECONDS_PER_DAY + 5).seconds(), 5);
    }

    #[test]
    fn minute_matching_ignores_seconds() {
        let alarm = TimeOfDay::from_hms(6, 30, 0);
        assert!(TimeOfDay::from_hms(6, 30, 59).same_minute(alarm));
        assert!(!TimeOfDay::from_hms(6, 29, 59).same_minute(alarm));
        assert!(!TimeOfDay::from_hms(6, 31, 0).same_minute(alarm));
    }

    #[test]
    fn displays_as_hh_mm_ss() {
        assert_eq!(TimeOfDay::from_hms(6, 5, 9).to_string(), "06:05:09");
    }
}
