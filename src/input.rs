//! # Button panel
//! Turns sampled switch and button levels into requests, without ever blocking the polling loop.
//!
//! Each button gets an [`EdgeDetector`] that remembers the previous level. A press edge yields an event,
//! after which new presses are ignored until a cooldown timestamp has passed. Adjustment buttons
//! additionally repeat while held, the way holding a clock button keeps advancing the time.
use crate::command::{Command, Request, StepDirection};
use embassy_time::{Duration, Instant};
use heapless::Vec;

/// Logical levels read from the panel in one tick, `true` meaning pressed / switched on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelSample {
    /// Mute / snooze button
    pub mute: bool,
    /// Station up button
    pub station_up: bool,
    /// Station down button
    pub station_down: bool,
    /// Hours button
    pub hours: bool,
    /// Minutes button
    pub minutes: bool,
    /// Alarm enable switch, the arming signal
    pub alarm_enabled: bool,
    /// Alarm view switch: show the alarm time and route the hour/minute buttons to the alarm
    pub alarm_view: bool,
}

/// Reads the physical panel. Implemented by the board.
pub trait Panel {
    /// Sample all buttons and switches once
    fn sample(&mut self) -> PanelSample;
}

/// An event derived from a button's level history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// The button went down
    Pressed,
    /// The button is still held and the repeat interval elapsed
    Repeated,
    /// The button went up
    Released,
}

/// Edge detection for one button with a cooldown and optional hold-to-repeat
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeDetector {
    /// Level seen on the previous update
    last_level: bool,
    /// Presses before this instant are ignored
    rearm_at: Instant,
    /// Minimum time between two accepted presses
    cooldown: Duration,
    /// Repeat interval while held, `None` for no repeat
    repeat: Option<Duration>,
    /// When the next repeat event is due while held
    next_repeat: Option<Instant>,
    /// Whether the current press was accepted, releases of ignored presses are swallowed
    accepted: bool,
}

impl EdgeDetector {
    /// Create a new `EdgeDetector` for a released button
    pub const fn new(cooldown: Duration, repeat: Option<Duration>) -> Self {
        Self {
            last_level: false,
            rearm_at: Instant::MIN,
            cooldown,
            repeat,
            next_repeat: None,
            accepted: false,
        }
    }

    /// Feed the level sampled at `now`
    pub fn update(&mut self, pressed: bool, now: Instant) -> Option<ButtonEvent> {
        let previous = core::mem::replace(&mut self.last_level, pressed);
        match (previous, pressed) {
            (false, true) => {
                if now < self.rearm_at {
                    trace!("press ignored during cooldown");
                    self.accepted = false;
                    return None;
                }
                self.accepted = true;
                self.rearm_at = now + self.cooldown;
                self.next_repeat = self.repeat.map(|interval| now + interval);
                Some(ButtonEvent::Pressed)
            }
            (true, true) => {
                let due = self.next_repeat.filter(|due| self.accepted && now >= *due)?;
                self.next_repeat = self.repeat.map(|interval| due + interval);
                Some(ButtonEvent::Repeated)
            }
            (true, false) => {
                self.next_repeat = None;
                core::mem::take(&mut self.accepted).then_some(ButtonEvent::Released)
            }
            (false, false) => None,
        }
    }
}

/// Maximum number of requests one panel sample can produce
pub const MAX_PANEL_REQUESTS: usize = 5;

/// The five buttons of the appliance with their edge detectors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonPanel {
    /// Mute / snooze, never repeats
    mute: EdgeDetector,
    /// Station up, repeats while held
    station_up: EdgeDetector,
    /// Station down, repeats while held
    station_down: EdgeDetector,
    /// Hours, repeats while held
    hours: EdgeDetector,
    /// Minutes, repeats while held
    minutes: EdgeDetector,
}

impl ButtonPanel {
    /// Create a new `ButtonPanel`
    pub const fn new(cooldown: Duration, repeat: Duration) -> Self {
        Self {
            mute: EdgeDetector::new(cooldown, None),
            station_up: EdgeDetector::new(cooldown, Some(repeat)),
            station_down: EdgeDetector::new(cooldown, Some(repeat)),
            hours: EdgeDetector::new(cooldown, Some(repeat)),
            minutes: EdgeDetector::new(cooldown, Some(repeat)),
        }
    }

    /// Turn one panel sample into button requests.
    ///
    /// The hours and minutes buttons adjust the alarm while the alarm view switch is on and the clock
    /// otherwise.
    pub fn sample(
        &mut self,
        sample: PanelSample,
        now: Instant,
    ) -> Vec<Request, MAX_PANEL_REQUESTS> {
        let (hour_command, minute_command) = if sample.alarm_view {
            (Command::IncrementAlarmHour, Command::IncrementAlarmMinute)
        } else {
            (Command::IncrementClockHour, Command::IncrementClockMinute)
        };

        let buttons = [
            (&mut self.mute, sample.mute, Command::MuteToggle),
            (
                &mut self.station_up,
                sample.station_up,
                Command::StationStep(StepDirection::Up),
            ),
            (
                &mut self.station_down,
                sample.station_down,
                Command::StationStep(StepDirection::Down),
            ),
            (&mut self.hours, sample.hours, hour_command),
            (&mut self.minutes, sample.minutes, minute_command),
        ];

        let mut requests = Vec::new();
        for (detector, pressed, command) in buttons {
            if matches!(
                detector.update(pressed, now),
                Some(ButtonEvent::Pressed | ButtonEvent::Repeated)
            ) {
                // at most one request per button, the capacity always suffices
                let _ = requests.push(Request::button(command));
            }
        }
        requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 250 ms
    const COOLDOWN: Duration = Duration::from_millis(250);
    /// 500 ms
    const REPEAT: Duration = Duration::from_millis(500);

    fn at(millis: u64) -> Instant {
        Instant::from_millis(10_000 + millis)
    }

    #[test]
    fn press_is_reported_once() {
        let mut button = EdgeDetector::new(COOLDOWN, None);
        assert_eq!(button.update(true, at(0)), Some(ButtonEvent::Pressed));
        assert_eq!(button.update(true, at(500)), None);
        assert_eq!(button.update(true, at(5_000)), None);
        assert_eq!(button.update(false, at(5_500)), Some(ButtonEvent::Released));
        assert_eq!(button.update(false, at(6_000)), None);
    }

    #[test]
    fn bounce_within_cooldown_is_ignored() {
        let mut button = EdgeDetector::new(COOLDOWN, None);
        assert_eq!(button.update(true, at(0)), Some(ButtonEvent::Pressed));
        assert_eq!(button.update(false, at(50)), Some(ButtonEvent::Released));
        assert_eq!(button.update(true, at(100)), None);
        assert_eq!(button.update(false, at(150)), None);
        assert_eq!(button.update(true, at(300)), Some(ButtonEvent::Pressed));
    }

    #[test]
    fn held_button_repeats() {
        let mut button = EdgeDetector::new(COOLDOWN, Some(REPEAT));
        assert_eq!(button.update(true, at(0)), Some(ButtonEvent::Pressed));
        assert_eq!(button.update(true, at(250)), None);
        assert_eq!(button.update(true, at(500)), Some(ButtonEvent::Repeated));
        assert_eq!(button.update(true, at(750)), None);
        assert_eq!(button.update(true, at(1_000)), Some(ButtonEvent::Repeated));
        assert_eq!(button.update(false, at(1_100)), Some(ButtonEvent::Released));
    }

    #[test]
    fn hour_and_minute_follow_the_alarm_view_switch() {
        let mut panel = ButtonPanel::new(COOLDOWN, REPEAT);
        let clock = panel.sample(
            PanelSample {
                hours: true,
                ..PanelSample::default()
            },
            at(0),
        );
        assert_eq!(clock.as_slice(), [Request::button(Command::IncrementClockHour)]);

        let alarm = panel.sample(
            PanelSample {
                minutes: true,
                alarm_view: true,
                ..PanelSample::default()
            },
            at(1_000),
        );
        assert_eq!(alarm.as_slice(), [Request::button(Command::IncrementAlarmMinute)]);
    }

    #[test]
    fn simultaneous_presses_all_come_through() {
        let mut panel = ButtonPanel::new(COOLDOWN, REPEAT);
        let requests = panel.sample(
            PanelSample {
                mute: true,
                station_up: true,
                ..PanelSample::default()
            },
            at(0),
        );
        assert_eq!(
            requests.as_slice(),
            [
                Request::button(Command::MuteToggle),
                Request::button(Command::StationStep(StepDirection::Up))
            ]
        );
        // the mute button does not repeat while held
        let held = panel.sample(
            PanelSample {
                mute: true,
                ..PanelSample::default()
            },
            at(2_000),
        );
        assert!(held.is_empty());
    }
}
