//! # Display frame
//! What the four-digit seven-segment display shows, computed from a status snapshot.
//!
//! In clock view the current time is shown, as 12-hour time with the colon doubling as PM indicator, or
//! as 24-hour time with a colon blinking once per second. In alarm view the alarm target is shown in
//! 24-hour form with a steady colon. Brightness follows the arming switch.
use crate::snapshot::StatusSnapshot;
use core::fmt::Write;
use heapless::String;

/// How the display renders times and how bright it is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplaySettings {
    /// Show 12-hour instead of 24-hour time in clock view
    pub use_12_hour: bool,
    /// Brightness in percent while the alarm is armed
    pub brightness_armed: u8,
    /// Brightness in percent while the alarm is disarmed
    pub brightness_disarmed: u8,
}

/// One frame for the display driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayFrame {
    /// The four digits, left to right, each 0-9
    pub digits: [u8; 4],
    /// Whether the colon is lit
    pub colon: bool,
    /// Brightness in percent
    pub brightness: u8,
}

impl DisplayFrame {
    /// Compose the frame for `snapshot`. `alarm_view` is the position of the alarm view switch.
    pub const fn compose(
        snapshot: &StatusSnapshot,
        alarm_view: bool,
        settings: &DisplaySettings,
    ) -> Self {
        let brightness = if snapshot.armed {
            settings.brightness_armed
        } else {
            settings.brightness_disarmed
        };

        if alarm_view {
            let alarm = snapshot.alarm_target;
            return Self {
                digits: split_digits(alarm.hour(), alarm.minute()),
                colon: true,
                brightness,
            };
        }

        let now = snapshot.current_time;
        let is_pm = now.hour() >= 12;
        let (hour, colon) = if settings.use_12_hour {
            let hour = match now.hour() % 12 {
                0 => 12,
                h => h,
            };
            // the colon marks the afternoon, blinking only in the morning
            (hour, is_pm || now.second() % 2 == 0)
        } else {
            (now.hour(), now.second() % 2 == 0)
        };

        Self {
            digits: split_digits(hour, now.minute()),
            colon,
            brightness,
        }
    }

    /// The digits as text, e.g. `"0630"`
    pub fn text(&self) -> String<4> {
        let mut text = String::new();
        for digit in self.digits {
            // four single digits always fit
            let _ = write!(text, "{digit}");
        }
        text
    }
}

/// Split hour and minute into four display digits
const fn split_digits(hour: u8, minute: u8) -> [u8; 4] {
    [hour / 10, hour % 10, minute / 10, minute % 10]
}

/// Shows frames on the physical display. Implemented by the board.
pub trait FrameSink {
    /// Driver error, only ever logged through its `Debug` impl
    type Error: core::fmt::Debug;

    /// Show one frame
    fn show(&mut self, frame: &DisplayFrame) -> Result<(), Self::Error>;
}
