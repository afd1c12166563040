//! # Station
//! FM broadcast frequency, kept in tenths of a MHz so stepping never accumulates float error.
use serde::Serialize;

/// Lowest tunable frequency, 88.0 MHz
const MIN_TENTHS: u16 = 880;

/// Highest tunable frequency, 108.0 MHz
const MAX_TENTHS: u16 = 1080;

/// Direction of a 0.1 MHz station step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepDirection {
    /// +0.1 MHz
    Up,
    /// -0.1 MHz
    Down,
}

/// A station frequency within the FM band 88.0 - 108.0 MHz
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Station(u16);

impl Station {
    /// The bottom of the band
    pub const MIN: Self = Self(MIN_TENTHS);
    /// The top of the band
    pub const MAX: Self = Self(MAX_TENTHS);

    /// Create a station from tenths of a MHz, clamped into the band
    pub const fn from_tenths(tenths: u16) -> Self {
        if tenths < MIN_TENTHS {
            Self::MIN
        } else if tenths > MAX_TENTHS {
            Self::MAX
        } else {
            Self(tenths)
        }
    }

    /// Frequency in tenths of a MHz
    pub const fn tenths(self) -> u16 {
        self.0
    }

    /// Frequency in MHz
    pub fn mhz(self) -> f32 {
        f32::from(self.0) / 10.0
    }

    /// Step by 0.1 MHz. Leaving the band on one side wraps around to the other side.
    #[must_use]
    pub const fn step(self, direction: StepDirection) -> Self {
        match direction {
            StepDirection::Up if self.0 >= MAX_TENTHS => Self::MIN,
            StepDirection::Up => Self(self.0 + 1),
            StepDirection::Down if self.0 <= MIN_TENTHS => Self::MAX,
            StepDirection::Down => Self(self.0 - 1),
        }
    }
}

impl core::fmt::Display for Station {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

impl Serialize for Station {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f32(self.mhz())
    }
}
