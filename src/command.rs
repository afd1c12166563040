//! # Commands
//! The control surface: one command per user action, identical for the button panel and the network.
//!
//! Both input channels wrap their commands in a [`Request`] that records the origin. The orchestrator
//! logs the origin and then drops it, so the state machine never knows where a mute came from.
pub use crate::station::StepDirection;
use crate::error::Error;

/// Where a request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Origin {
    /// A physical button on the appliance
    Button,
    /// The network API
    Network,
}

/// A user action.
///
/// Set-commands carry the raw integers the user supplied; they are coerced into range when executed.
/// Only malformed input, caught while parsing, is ever rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Mute toggle. Snoozes or dismisses a ringing alarm, flips the audio mute otherwise.
    MuteToggle,
    /// Step the station by 0.1 MHz
    StationStep(StepDirection),
    /// Set the clock
    SetClock {
        /// Hour, taken modulo 24
        hour: i32,
        /// Minute, taken modulo 60
        minute: i32,
        /// Second, taken modulo 60
        second: i32,
    },
    /// Set the alarm target
    SetAlarm {
        /// Hour, taken modulo 24
        hour: i32,
        /// Minute, taken modulo 60
        minute: i32,
        /// Second, taken modulo 60
        second: i32,
    },
    /// Clock one hour later
    IncrementClockHour,
    /// Clock one minute later
    IncrementClockMinute,
    /// Alarm one hour later
    IncrementAlarmHour,
    /// Alarm one minute later
    IncrementAlarmMinute,
}

/// A command together with its origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Request {
    /// Which input channel produced the command
    pub origin: Origin,
    /// The command itself
    pub command: Command,
}

impl Request {
    /// A request from the button panel
    pub const fn button(command: Command) -> Self {
        Self {
            origin: Origin::Button,
            command,
        }
    }

    /// A request from the network
    pub const fn network(command: Command) -> Self {
        Self {
            origin: Origin::Network,
            command,
        }
    }
}

impl Command {
    /// Whether this is the mute/snooze action
    pub const fn is_mute(&self) -> bool {
        matches!(self, Self::MuteToggle)
    }

    /// Map an HTTP route of the appliance's web API to a command.
    ///
    /// `path` is the request path (e.g. `/set_clock`), `query` the raw query string without the leading
    /// `?` (e.g. `hh=6&mm=30`). `hh` and `mm` are required for the set routes, `ss` defaults to 0.
    pub fn from_route(path: &str, query: &str) -> Result<Self, Error> {
        let command = match path.trim_end_matches('/') {
            "/mute_toggle" => Self::MuteToggle,
            "/station_up" => Self::StationStep(StepDirection::Up),
            "/station_down" => Self::StationStep(StepDirection::Down),
            "/clock_plus_hour" => Self::IncrementClockHour,
            "/clock_plus_min" => Self::IncrementClockMinute,
            "/alarm_plus_hour" => Self::IncrementAlarmHour,
            "/alarm_plus_min" => Self::IncrementAlarmMinute,
            "/set_clock" => {
                let (hour, minute, second) = parse_hms(query)?;
                Self::SetClock {
                    hour,
                    minute,
                    second,
                }
            }
            "/set_alarm" => {
                let (hour, minute, second) = parse_hms(query)?;
                Self::SetAlarm {
                    hour,
                    minute,
                    second,
                }
            }
            _ => return Err(Error::UnknownCommand),
        };
        Ok(command)
    }
}

/// Extract `hh`, `mm` and the optional `ss` from a query string
fn parse_hms(query: &str) -> Result<(i32, i32, i32), Error> {
    let hour = query_param(query, "hh").ok_or(Error::MissingField("hh"))?;
    let minute = query_param(query, "mm").ok_or(Error::MissingField("mm"))?;
    let second = query_param(query, "ss");
    Ok((
        parse_field(hour, "hh")?,
        parse_field(minute, "mm")?,
        second.map_or(Ok(0), |s| parse_field(s, "ss"))?,
    ))
}

/// Find the value of `key` in a `k=v&k=v` query string. The first occurrence wins.
fn query_param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find_map(|(k, v)| (k == key).then_some(v))
}

/// Parse one numeric field. Anything that is not an integer fitting `i32` is rejected.
fn parse_field(value: &str, field: &'static str) -> Result<i32, Error> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| Error::MalformedNumber(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_routes() {
        assert_eq!(Command::from_route("/mute_toggle", ""), Ok(Command::MuteToggle));
        assert_eq!(
            Command::from_route("/station_down", ""),
            Ok(Command::StationStep(StepDirection::Down))
        );
        assert_eq!(
            Command::from_route("/alarm_plus_min/", ""),
            Ok(Command::IncrementAlarmMinute)
        );
    }

    #[test]
    fn set_clock_with_optional_seconds() {
        assert_eq!(
            Command::from_route("/set_clock", "hh=06&mm=29"),
            Ok(Command::SetClock {
                hour: 6,
                minute: 29,
                second: 0
            })
        );
        assert_eq!(
            Command::from_route("/set_alarm", "mm=30&ss=15&hh=7"),
            Ok(Command::SetAlarm {
                hour: 7,
                minute: 30,
                second: 15
            })
        );
    }

    #[test]
    fn out_of_range_integers_are_accepted_for_coercion() {
        assert_eq!(
            Command::from_route("/set_alarm", "hh=-1&mm=75"),
            Ok(Command::SetAlarm {
                hour: -1,
                minute: 75,
                second: 0
            })
        );
    }

    #[test]
    fn missing_fields_are_rejected() {
        assert_eq!(
            Command::from_route("/set_clock", "mm=30"),
            Err(Error::MissingField("hh"))
        );
        assert_eq!(
            Command::from_route("/set_alarm", "hh=6"),
            Err(Error::MissingField("mm"))
        );
    }

    #[test]
    fn malformed_numbers_are_rejected_not_zeroed() {
        assert_eq!(
            Command::from_route("/set_clock", "hh=six&mm=30"),
            Err(Error::MalformedNumber("hh"))
        );
        assert_eq!(
            Command::from_route("/set_clock", "hh=6&mm=30.5"),
            Err(Error::MalformedNumber("mm"))
        );
        assert_eq!(
            Command::from_route("/set_clock", "hh=6&mm=30&ss="),
            Err(Error::MalformedNumber("ss"))
        );
        assert_eq!(
            Command::from_route("/set_clock", "hh=99999999999&mm=0"),
            Err(Error::MalformedNumber("hh"))
        );
    }

    #[test]
    fn unknown_route() {
        assert_eq!(Command::from_route("/reboot", ""), Err(Error::UnknownCommand));
    }

    #[test]
    fn only_mute_toggle_is_a_mute() {
        assert!(Command::MuteToggle.is_mute());
        assert!(!Command::IncrementClockHour.is_mute());
    }
}
