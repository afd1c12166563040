//! # Tuner
//! The seam to the radio chip. The core only ever asks for two things: audio on/off and a frequency.
use crate::station::Station;

/// Driver for the FM tuner.
///
/// Errors are never fatal to the core. A failed call is logged, the logical state advances anyway and
/// the call is repeated on the following ticks until the driver accepts it.
pub trait Tuner {
    /// Driver error, only ever logged through its `Debug` impl
    type Error: core::fmt::Debug;

    /// Mute (`true`) or unmute (`false`) the audio output
    fn set_muted(&mut self, muted: bool) -> Result<(), Self::Error>;

    /// Tune to `station`
    fn tune(&mut self, station: Station) -> Result<(), Self::Error>;
}
