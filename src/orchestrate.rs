//! # Orchestrate
//! The polling core of the appliance. One tick reads the inputs, advances the daily alarm and publishes a
//! status snapshot.
//!
//! Every tick runs the same fixed sequence:
//! 1. read clock, alarm target and arming switch once, these values hold for the whole tick
//! 2. day rollover: a wrapped clock resets the ring cycle and mutes the audio
//! 3. arming override: a disarmed alarm clears the ring cycle, switching it off mutes the audio
//! 4. requests from the button panel and the network, at most one mute per tick
//! 5. ring evaluation: the alarm or a snooze fires and forces the audio on
//! 6. tuner resync for any driver call that failed earlier
//!
//! All state is owned by the [`Orchestrator`]. Producers only ever see requests going in and snapshots
//! coming out.
use crate::alarm_schedule::AlarmSchedule;
use crate::clock::{Clock, MonotonicSource};
use crate::command::{Command, Request, StepDirection};
use crate::config::Config;
use crate::display::{DisplayFrame, FrameSink};
use crate::error::{Error, HardwareOp};
use crate::input::{ButtonPanel, Panel};
use crate::queue::CommandQueue;
use crate::ring_cycle::{MuteOutcome, RingCycle};
use crate::rollover::DayRollover;
use crate::snapshot::{StatusBoard, StatusSnapshot};
use crate::station::Station;
use crate::time_of_day::TimeOfDay;
use crate::tuner::Tuner;
use embassy_time::{Instant, Ticker};

/// Inputs sampled outside the core for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickInputs {
    /// Position of the alarm enable switch
    pub armed: bool,
}

/// Tuner effects that still have to reach the hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct PendingHardware {
    /// The mute state was not applied
    audio: bool,
    /// The station was not applied
    tuning: bool,
}

/// The clock radio core: clock, alarm, ring cycle, audio mute and station
pub struct Orchestrator<M, T> {
    /// Configuration the core was started with
    config: Config,
    /// Wall clock
    clock: Clock<M>,
    /// The single alarm slot
    alarm: AlarmSchedule,
    /// Today's alarm lifecycle
    ring: RingCycle,
    /// Detects the start of a new day
    rollover: DayRollover,
    /// Arming switch as seen on the last tick
    armed: bool,
    /// Audio mute state
    muted: bool,
    /// Tuned station
    station: Station,
    /// Radio driver
    tuner: T,
    /// Driver calls to repeat at the end of each tick
    pending: PendingHardware,
}

impl<M: MonotonicSource, T: Tuner> Orchestrator<M, T> {
    /// Create a new `Orchestrator` from the power-up configuration.
    /// Tunes the configured station and unmutes the radio.
    pub fn new(config: Config, source: M, tuner: T) -> Self {
        let mut orchestrator = Self {
            config,
            clock: Clock::new(source, config.initial_clock),
            alarm: AlarmSchedule::new(config.initial_alarm),
            ring: RingCycle::new(),
            rollover: DayRollover::new(),
            armed: false,
            muted: false,
            station: config.initial_station,
            tuner,
            pending: PendingHardware {
                audio: true,
                tuning: true,
            },
        };
        info!(
            "clock radio starting at {}, alarm {}, station {} MHz",
            config.initial_clock, config.initial_alarm, config.initial_station
        );
        orchestrator.sync_hardware();
        orchestrator
    }

    /// Run one tick with the sampled `inputs` and the requests that arrived since the last tick.
    ///
    /// Never fails: rejected commands and driver errors are logged and the tick carries on.
    pub fn tick(
        &mut self,
        inputs: TickInputs,
        requests: impl IntoIterator<Item = Request>,
    ) -> StatusSnapshot {
        let now = self.clock.current_time();
        let alarm_target = self.alarm.target();
        let armed = inputs.armed;

        if self.rollover.observe(now) {
            info!("new day at {}, resetting the alarm", now);
            self.ring.reset();
            // failure is logged and retried by sync_hardware
            let _ = self.force_audio(true);
        }

        let switched_off = self.armed && !armed;
        if armed != self.armed {
            info!("alarm {}", if armed { "armed" } else { "disarmed" });
        }
        self.armed = armed;
        if !armed {
            let was_ringing = self.ring.disarm();
            // only the switch-off edge mutes, later disarmed ticks keep the user's mute state
            if switched_off || was_ringing {
                info!("alarm switched off, muting");
                let _ = self.force_audio(true);
            }
        }

        let mut mute_seen = false;
        for request in requests {
            if request.command.is_mute() {
                if mute_seen {
                    debug!("mute from {:?} coalesced into this tick's mute", request.origin);
                    continue;
                }
                mute_seen = true;
            }
            if let Err(error) = self.execute(request, now) {
                warn!("{:?} from {:?} failed: {}", request.command, request.origin, error);
            }
        }

        if self.ring.evaluate(now, alarm_target, armed).is_some() {
            let _ = self.force_audio(false);
        }

        self.sync_hardware();
        self.snapshot()
    }

    /// Execute a single request right away, outside of a tick
    pub fn dispatch(&mut self, request: Request) -> Result<(), Error> {
        let now = self.clock.current_time();
        self.execute(request, now)
    }

    /// The shared mute entry point for every input channel.
    ///
    /// While the alarm rings this snoozes or dismisses it, otherwise it flips the audio mute.
    pub fn handle_mute_event(&mut self) -> Result<MuteOutcome, Error> {
        let now = self.clock.current_time();
        self.mute_at(now)
    }

    /// The current state as seen by the display and the network
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            current_time: self.clock.current_time(),
            alarm_target: self.alarm.target(),
            armed: self.armed,
            muted: self.muted,
            ringing: self.ring.is_ringing(),
            snooze_count: self.ring.snooze_count(),
            station: self.station,
        }
    }

    /// The configuration the core was started with
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The wall clock
    pub const fn clock(&self) -> &Clock<M> {
        &self.clock
    }

    /// The alarm slot
    pub const fn alarm(&self) -> &AlarmSchedule {
        &self.alarm
    }

    /// Today's ring cycle
    pub const fn ring_cycle(&self) -> &RingCycle {
        &self.ring
    }

    /// Whether the audio is muted
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    /// The tuned station
    pub const fn station(&self) -> Station {
        self.station
    }

    /// Whether every mute and tune call so far reached the tuner
    pub const fn hardware_in_sync(&self) -> bool {
        !self.pending.audio && !self.pending.tuning
    }

    /// The radio driver
    pub const fn tuner(&self) -> &T {
        &self.tuner
    }

    /// The radio driver, mutably
    pub const fn tuner_mut(&mut self) -> &mut T {
        &mut self.tuner
    }

    /// The monotonic instant the clock is based on
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Execute a request with `now` as the time of the current tick. The origin ends here.
    fn execute(&mut self, request: Request, now: TimeOfDay) -> Result<(), Error> {
        let Request { origin, command } = request;
        debug!("{:?} command {:?}", origin, command);
        match command {
            Command::MuteToggle => self.mute_at(now).map(|_| ()),
            Command::StationStep(direction) => self.step_station(direction),
            Command::SetClock {
                hour,
                minute,
                second,
            } => {
                let time = self.clock.set(hour, minute, second);
                info!("clock set to {}", time);
                Ok(())
            }
            Command::SetAlarm {
                hour,
                minute,
                second,
            } => {
                let target = self.alarm.set(hour, minute, second);
                info!("alarm set to {}", target);
                Ok(())
            }
            Command::IncrementClockHour => {
                let time = self.clock.increment_hour();
                info!("clock advanced to {}", time);
                Ok(())
            }
            Command::IncrementClockMinute => {
                let time = self.clock.increment_minute();
                info!("clock advanced to {}", time);
                Ok(())
            }
            Command::IncrementAlarmHour => {
                let target = self.alarm.increment_hour();
                info!("alarm moved to {}", target);
                Ok(())
            }
            Command::IncrementAlarmMinute => {
                let target = self.alarm.increment_minute();
                info!("alarm moved to {}", target);
                Ok(())
            }
        }
    }

    /// Route a mute event: snooze or dismiss a ringing alarm, toggle the audio otherwise
    fn mute_at(&mut self, now: TimeOfDay) -> Result<MuteOutcome, Error> {
        let outcome = self.ring.handle_mute(now);
        match outcome {
            MuteOutcome::NotRinging => {
                let muted = !self.muted;
                info!("audio {}", if muted { "muted" } else { "unmuted" });
                self.force_audio(muted)?;
            }
            MuteOutcome::Snoozed { .. } | MuteOutcome::Dismissed => self.force_audio(true)?,
        }
        Ok(outcome)
    }

    /// Step the station and retune
    fn step_station(&mut self, direction: StepDirection) -> Result<(), Error> {
        self.station = self.station.step(direction);
        info!("station {} MHz", self.station);
        self.apply_station()
    }

    /// Set the logical mute state, then push it to the tuner
    fn force_audio(&mut self, muted: bool) -> Result<(), Error> {
        self.muted = muted;
        self.apply_audio()
    }

    /// Push the logical mute state to the tuner
    fn apply_audio(&mut self) -> Result<(), Error> {
        match self.tuner.set_muted(self.muted) {
            Ok(()) => {
                self.pending.audio = false;
                Ok(())
            }
            Err(e) => {
                self.pending.audio = true;
                let op = if self.muted {
                    HardwareOp::Mute
                } else {
                    HardwareOp::Unmute
                };
                warn!("tuner rejected {:?}: {:?}", op, debug2format!(e));
                Err(Error::HardwareUnavailable(op))
            }
        }
    }

    /// Push the station to the tuner. A retune resets the chip's mute, so the mute state follows.
    fn apply_station(&mut self) -> Result<(), Error> {
        match self.tuner.tune(self.station) {
            Ok(()) => {
                self.pending.tuning = false;
                self.apply_audio()
            }
            Err(e) => {
                self.pending.tuning = true;
                warn!("tuner rejected {} MHz: {:?}", self.station, debug2format!(e));
                Err(Error::HardwareUnavailable(HardwareOp::Tune))
            }
        }
    }

    /// Retry whatever did not reach the tuner yet
    fn sync_hardware(&mut self) {
        if self.hardware_in_sync() {
            return;
        }
        let result = if self.pending.tuning {
            self.apply_station()
        } else {
            self.apply_audio()
        };
        if result.is_ok() {
            info!("tuner in sync: {} MHz, muted {}", self.station, self.muted);
        }
    }
}

/// Run one full polling cycle: sample the panel, drain the network queue, tick the core, update the
/// display and publish the snapshot.
pub fn step<M, T, P, D, const N: usize>(
    orchestrator: &mut Orchestrator<M, T>,
    buttons: &mut ButtonPanel,
    panel: &mut P,
    display: &mut D,
    queue: &CommandQueue<N>,
    board: &StatusBoard,
) -> StatusSnapshot
where
    M: MonotonicSource,
    T: Tuner,
    P: Panel,
    D: FrameSink,
{
    let sample = panel.sample();
    let button_requests = buttons.sample(sample, orchestrator.now());
    let inputs = TickInputs {
        armed: sample.alarm_enabled,
    };
    let snapshot = orchestrator.tick(inputs, button_requests.into_iter().chain(queue.drain()));

    let frame = DisplayFrame::compose(&snapshot, sample.alarm_view, &orchestrator.config().display);
    if let Err(e) = display.show(&frame) {
        warn!("display update failed: {:?}", debug2format!(e));
    }
    board.publish(snapshot);
    snapshot
}

/// The polling loop. Runs [`step`] once per configured tick interval, forever.
pub async fn run<M, T, P, D, const N: usize>(
    mut orchestrator: Orchestrator<M, T>,
    mut panel: P,
    mut display: D,
    queue: &CommandQueue<N>,
    board: &StatusBoard,
) -> !
where
    M: MonotonicSource,
    T: Tuner,
    P: Panel,
    D: FrameSink,
{
    let config = *orchestrator.config();
    let mut buttons = ButtonPanel::new(config.button_cooldown, config.button_repeat);
    let mut ticker = Ticker::every(config.tick_interval);
    info!(
        "polling loop started, tick every {} ms",
        config.tick_interval.as_millis()
    );

    loop {
        step(
            &mut orchestrator,
            &mut buttons,
            &mut panel,
            &mut display,
            queue,
            board,
        );
        ticker.next().await;
    }
}
