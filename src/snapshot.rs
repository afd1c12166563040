//! # Status snapshot
//! Read-only projection of the core state for the display and the network status endpoint.
use crate::error::Error;
use crate::station::Station;
use crate::time_of_day::TimeOfDay;
use core::cell::Cell;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use heapless::String;
use serde::Serialize;

/// Buffer size that always fits a serialized [`StatusSnapshot`]
pub const STATUS_JSON_CAPACITY: usize = 192;

/// Everything a consumer may know about the core at one instant.
///
/// Serializes to the keys the web front end polls: `current_seconds`, `alarm_seconds`, `alarm_enabled`,
/// `mute_state`, `station_mhz`, `alarm_ringing` and `snooze_count`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusSnapshot {
    /// Current time of day
    #[serde(rename = "current_seconds")]
    pub current_time: TimeOfDay,
    /// Alarm target
    #[serde(rename = "alarm_seconds")]
    pub alarm_target: TimeOfDay,
    /// Arming switch as seen on the last tick
    #[serde(rename = "alarm_enabled")]
    pub armed: bool,
    /// Audio mute state
    #[serde(rename = "mute_state")]
    pub muted: bool,
    /// Whether the alarm is sounding
    #[serde(rename = "alarm_ringing")]
    pub ringing: bool,
    /// Snoozes used today
    pub snooze_count: u8,
    /// Tuned station
    #[serde(rename = "station_mhz")]
    pub station: Station,
}

impl StatusSnapshot {
    /// Serialize to JSON into a fixed-capacity string
    pub fn to_json<const N: usize>(&self) -> Result<String<N>, Error> {
        serde_json_core::to_string(self).map_err(|_| Error::BufferTooSmall)
    }
}

/// Latest published snapshot, readable from any task at any time
pub struct StatusBoard {
    /// The snapshot, `None` until the first tick
    latest: Mutex<CriticalSectionRawMutex, Cell<Option<StatusSnapshot>>>,
}

impl StatusBoard {
    /// Create a new, empty `StatusBoard`. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            latest: Mutex::new(Cell::new(None)),
        }
    }

    /// Replace the published snapshot
    pub fn publish(&self, snapshot: StatusSnapshot) {
        self.latest.lock(|cell| cell.set(Some(snapshot)));
    }

    /// The latest snapshot, `None` before the first tick
    pub fn latest(&self) -> Option<StatusSnapshot> {
        self.latest.lock(Cell::get)
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StatusSnapshot {
        StatusSnapshot {
            current_time: TimeOfDay::from_hms(6, 30, 5),
            alarm_target: TimeOfDay::from_hms(6, 30, 0),
            armed: true,
            muted: false,
            ringing: true,
            snooze_count: 1,
            station: Station::from_tenths(1000),
        }
    }

    #[test]
    fn json_uses_the_front_end_keys() {
        let json: String<STATUS_JSON_CAPACITY> = sample().to_json().unwrap();
        assert!(json.starts_with("{\"current_seconds\":23405,\"alarm_seconds\":23400,"));
        assert!(json.contains("\"alarm_enabled\":true"));
        assert!(json.contains("\"mute_state\":false"));
        assert!(json.contains("\"alarm_ringing\":true"));
        assert!(json.contains("\"snooze_count\":1"));
        assert!(json.contains("\"station_mhz\":100"));
    }

    #[test]
    fn small_buffer_is_reported() {
        assert_eq!(sample().to_json::<16>(), Err(Error::BufferTooSmall));
    }

    #[test]
    fn board_keeps_the_latest_snapshot() {
        let board = StatusBoard::new();
        assert_eq!(board.latest(), None);
        board.publish(sample());
        let newer = StatusSnapshot {
            snooze_count: 2,
            ..sample()
        };
        board.publish(newer);
        assert_eq!(board.latest(), Some(newer));
    }
}
