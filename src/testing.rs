//! Test doubles shared by the unit tests.
use crate::clock::MonotonicSource;
use crate::display::{DisplayFrame, FrameSink};
use crate::input::{Panel, PanelSample};
use crate::station::Station;
use crate::tuner::Tuner;
use core::cell::Cell;
use core::convert::Infallible;
use embassy_time::{Duration, Instant};

/// A monotonic source that only moves when told to
pub struct ManualMonotonic {
    /// The instant `now()` returns
    now: Cell<Instant>,
}

impl ManualMonotonic {
    /// Start at an arbitrary non-zero instant
    pub fn new() -> Self {
        Self {
            now: Cell::new(Instant::from_secs(1_000)),
        }
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl MonotonicSource for ManualMonotonic {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Failure reported by [`RecordingTuner`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TunerOffline;

/// A tuner that remembers what it was told and can be switched offline
#[derive(Debug, Default)]
pub struct RecordingTuner {
    /// Last mute state that was applied successfully
    pub muted: Option<bool>,
    /// Last station that was applied successfully
    pub station: Option<Station>,
    /// Number of driver calls, failed ones included
    pub calls: u32,
    /// While true every call fails
    pub offline: bool,
}

impl Tuner for RecordingTuner {
    type Error = TunerOffline;

    fn set_muted(&mut self, muted: bool) -> Result<(), Self::Error> {
        self.calls += 1;
        if self.offline {
            return Err(TunerOffline);
        }
        self.muted = Some(muted);
        Ok(())
    }

    fn tune(&mut self, station: Station) -> Result<(), Self::Error> {
        self.calls += 1;
        if self.offline {
            return Err(TunerOffline);
        }
        self.station = Some(station);
        Ok(())
    }
}

/// A panel whose levels are set by the test
#[derive(Debug, Default)]
pub struct ScriptedPanel {
    /// Returned by every `sample()` call
    pub sample: PanelSample,
}

impl Panel for ScriptedPanel {
    fn sample(&mut self) -> PanelSample {
        self.sample
    }
}

/// A display that keeps the last frame
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    /// Last frame shown
    pub last: Option<DisplayFrame>,
    /// Number of frames shown
    pub frames: u32,
}

impl FrameSink for RecordingDisplay {
    type Error = Infallible;

    fn show(&mut self, frame: &DisplayFrame) -> Result<(), Self::Error> {
        self.last = Some(*frame);
        self.frames += 1;
        Ok(())
    }
}
