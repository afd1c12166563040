//! # Ring cycle
//! The daily alarm lifecycle: first ring, up to two snoozes, then dismissal until the next day.
//!
//! ```text
//!            minute == alarm target          mute, snoozes left
//!  Idle ─────────────────────────► Ringing ─────────────────────► Snoozed { until }
//!   ▲       (once per day)            ▲  │                             │
//!   │                                 │  │ mute, no snoozes left       │ minute == until
//!   │                                 │  ▼                             │
//!   │                                 │ Dismissed                      │
//!   │                                 └────────────────────────────────┘
//!   └──── day rollover / disarm (from any phase)
//! ```
//!
//! Matching works on whole minutes, so the ring window is the full 60 seconds of the target minute and
//! a polling rate of about 2 Hz is enough to observe it. Re-triggering within that minute is prevented
//! by `initial_fired` for the first ring and by consuming the snooze target for snoozed rings.
//!
//! The cycle only decides. Applying audio on/off is the caller's job, guided by the returned values.
use crate::time_of_day::TimeOfDay;

/// Length of one snooze in seconds (9 minutes)
pub const SNOOZE_SECONDS: u32 = 9 * 60;

/// Number of snoozes allowed per day; the next mute dismisses the alarm
pub const MAX_SNOOZES: u8 = 2;

/// Where the daily alarm currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RingPhase {
    /// Nothing pending, waiting for the alarm target (or already rung and reset by a disarm)
    #[default]
    Idle,
    /// The alarm is sounding
    Ringing,
    /// Muted while ringing, rings again at `until`
    Snoozed {
        /// When the snoozed alarm rings again
        until: TimeOfDay,
    },
    /// Muted with no snoozes left, silent until the day rolls over
    Dismissed,
}

/// Why the alarm started ringing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fired {
    /// The alarm target was reached
    Initial,
    /// A snooze ran out
    Snooze,
}

/// What a mute event did to the cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MuteOutcome {
    /// The alarm was not ringing, the mute is an ordinary audio toggle
    NotRinging,
    /// The alarm was snoozed
    Snoozed {
        /// When it rings again
        until: TimeOfDay,
        /// Snoozes used today, including this one
        count: u8,
    },
    /// The alarm is done for the day
    Dismissed,
}

/// The per-day state of the alarm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RingCycle {
    /// Current phase
    phase: RingPhase,
    /// Whether the alarm target already triggered today
    initial_fired: bool,
    /// Snoozes used today, never above `MAX_SNOOZES`
    snooze_count: u8,
}

impl RingCycle {
    /// Create a new `RingCycle` at the start of a day
    pub const fn new() -> Self {
        Self {
            phase: RingPhase::Idle,
            initial_fired: false,
            snooze_count: 0,
        }
    }

    /// The current phase
    pub const fn phase(&self) -> RingPhase {
        self.phase
    }

    /// Whether the alarm is sounding
    pub const fn is_ringing(&self) -> bool {
        matches!(self.phase, RingPhase::Ringing)
    }

    /// Whether the alarm was dismissed for the rest of the day
    pub const fn is_dismissed(&self) -> bool {
        matches!(self.phase, RingPhase::Dismissed)
    }

    /// Whether the alarm target already triggered today
    pub const fn initial_fired(&self) -> bool {
        self.initial_fired
    }

    /// Snoozes used today
    pub const fn snooze_count(&self) -> u8 {
        self.snooze_count
    }

    /// The pending snoozed ring time, if any
    pub const fn snooze_target(&self) -> Option<TimeOfDay> {
        match self.phase {
            RingPhase::Snoozed { until } => Some(until),
            _ => None,
        }
    }

    /// Check whether the alarm starts ringing at `now`.
    ///
    /// Returns what fired, the caller must then force the audio on. Nothing fires while disarmed,
    /// dismissed or already ringing.
    pub fn evaluate(
        &mut self,
        now: TimeOfDay,
        alarm_target: TimeOfDay,
        armed: bool,
    ) -> Option<Fired> {
        if !armed {
            return None;
        }
        match self.phase {
            RingPhase::Ringing | RingPhase::Dismissed => None,
            RingPhase::Idle | RingPhase::Snoozed { .. }
                if !self.initial_fired && now.same_minute(alarm_target) =>
            {
                // a stale snooze target is dropped by moving to Ringing
                self.initial_fired = true;
                self.phase = RingPhase::Ringing;
                info!("alarm ringing at {}", now);
                Some(Fired::Initial)
            }
            RingPhase::Snoozed { until } if now.same_minute(until) => {
                self.phase = RingPhase::Ringing;
                info!("snoozed alarm ringing at {}", now);
                Some(Fired::Snooze)
            }
            RingPhase::Idle | RingPhase::Snoozed { .. } => None,
        }
    }

    /// A mute event arrived at `now`. Snoozes or dismisses a ringing alarm, ignored otherwise.
    ///
    /// On `Snoozed` and `Dismissed` the caller must force the audio off.
    pub fn handle_mute(&mut self, now: TimeOfDay) -> MuteOutcome {
        if !self.is_ringing() {
            return MuteOutcome::NotRinging;
        }
        if self.snooze_count < MAX_SNOOZES {
            self.snooze_count += 1;
            let until = now.wrapping_add_seconds(SNOOZE_SECONDS);
            self.phase = RingPhase::Snoozed { until };
            info!("alarm snoozed until {} ({}/{})", until, self.snooze_count, MAX_SNOOZES);
            MuteOutcome::Snoozed {
                until,
                count: self.snooze_count,
            }
        } else {
            self.phase = RingPhase::Dismissed;
            info!("alarm dismissed for the rest of the day");
            MuteOutcome::Dismissed
        }
    }

    /// The alarm was switched off. Cancels everything, including `initial_fired`, so re-arming later
    /// the same day lets the alarm ring again at the next matching minute.
    ///
    /// Returns whether the alarm was ringing, in which case the caller must force the audio off.
    pub fn disarm(&mut self) -> bool {
        let was_ringing = self.is_ringing();
        if *self != Self::new() {
            debug!("alarm disarmed, ring cycle cleared from {:?}", self.phase);
        }
        *self = Self::new();
        was_ringing
    }

    /// Start a new day
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
