//! # Configuration
//! Power-up defaults and timing of the appliance.
//!
//! The defaults come from `config/clock_radio.json`, which `build.rs` bakes into constants at compile
//! time. There is no persistence: every power cycle starts from these values.
//!
//! ```json
//! {
//!     "clock": { "hour": 12, "minute": 0, "second": 0, "use_12_hour": true },
//!     "alarm": { "hour": 6, "minute": 30, "second": 0 },
//!     "radio": { "station_mhz": 99.9 },
//!     "display": { "brightness_armed": 60, "brightness_disarmed": 10 },
//!     "timing": { "tick_ms": 500, "button_cooldown_ms": 250, "button_repeat_ms": 500 }
//! }
//! ```
use crate::display::DisplaySettings;
use crate::station::Station;
use crate::time_of_day::TimeOfDay;
use embassy_time::Duration;

/// Constants generated by `build.rs`
mod generated {
    include!(concat!(env!("OUT_DIR"), "/clock_radio_config.rs"));
}

/// Runtime configuration of the core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Clock time at power-up
    pub initial_clock: TimeOfDay,
    /// Alarm target at power-up
    pub initial_alarm: TimeOfDay,
    /// Station at power-up
    pub initial_station: Station,
    /// Display rendering
    pub display: DisplaySettings,
    /// Period of the polling loop
    pub tick_interval: Duration,
    /// Minimum time between two accepted presses of the same button
    pub button_cooldown: Duration,
    /// Repeat interval of held adjustment buttons
    pub button_repeat: Duration,
}

impl Config {
    /// The configuration baked in at build time
    pub const fn from_build() -> Self {
        let (clock_h, clock_m, clock_s) = generated::DEFAULT_CLOCK;
        let (alarm_h, alarm_m, alarm_s) = generated::DEFAULT_ALARM;
        Self {
            initial_clock: TimeOfDay::from_hms(clock_h, clock_m, clock_s),
            initial_alarm: TimeOfDay::from_hms(alarm_h, alarm_m, alarm_s),
            initial_station: Station::from_tenths(generated::DEFAULT_STATION_TENTHS),
            display: DisplaySettings {
                use_12_hour: generated::USE_12_HOUR,
                brightness_armed: generated::BRIGHTNESS_ARMED,
                brightness_disarmed: generated::BRIGHTNESS_DISARMED,
            },
            tick_interval: Duration::from_millis(generated::TICK_MILLIS),
            button_cooldown: Duration::from_millis(generated::BUTTON_COOLDOWN_MILLIS),
            button_repeat: Duration::from_millis(generated::BUTTON_REPEAT_MILLIS),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_defaults_are_sane() {
        let config = Config::default();
        assert!(config.initial_station >= Station::MIN && config.initial_station <= Station::MAX);
        assert!(config.display.brightness_armed <= 100);
        assert!(config.tick_interval > Duration::from_ticks(0));
        // a 60 s alarm window must be observable
        assert!(config.tick_interval < Duration::from_secs(60));
    }
}
