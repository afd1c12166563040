//! # Errors
//! The error type shared by every fallible operation of the core.
//!
//! Nothing in here is fatal. Input errors reject a single command and leave the state untouched,
//! hardware errors are logged and retried while the logical state keeps advancing.

/// The tuner operation that could not be carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HardwareOp {
    /// Silencing the audio output
    Mute,
    /// Enabling the audio output
    Unmute,
    /// Retuning to a new station
    Tune,
}

/// Errors of the clock radio core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A field a set-command needs was not supplied, the data is the field name
    MissingField(&'static str),
    /// A field was supplied but is not an integer, the data is the field name
    MalformedNumber(&'static str),
    /// The request does not map to any command
    UnknownCommand,
    /// The command queue is full, the request was dropped
    QueueFull,
    /// The tuner driver failed, the logical state advanced anyway
    HardwareUnavailable(HardwareOp),
    /// The serialized status did not fit into the provided buffer
    BufferTooSmall,
}

impl Error {
    /// Whether this error means the caller sent bad input, as opposed to a device or capacity problem
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_) | Self::MalformedNumber(_) | Self::UnknownCommand
        )
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Missing {field}"),
            Self::MalformedNumber(field) => write!(f, "Malformed number for {field}"),
            Self::UnknownCommand => write!(f, "Unknown command"),
            Self::QueueFull => write!(f, "Command queue full"),
            Self::HardwareUnavailable(op) => write!(f, "Hardware unavailable during {op:?}"),
            Self::BufferTooSmall => write!(f, "Buffer too small"),
        }
    }
}

// Implement core::error::Error for no_std compatibility
impl core::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_field() {
        assert_eq!(Error::MissingField("hh").to_string(), "Missing hh");
        assert_eq!(
            Error::MalformedNumber("mm").to_string(),
            "Malformed number for mm"
        );
    }

    #[test]
    fn only_request_problems_count_as_input_errors() {
        assert!(Error::MissingField("hh").is_input_error());
        assert!(Error::UnknownCommand.is_input_error());
        assert!(!Error::QueueFull.is_input_error());
        assert!(!Error::HardwareUnavailable(HardwareOp::Tune).is_input_error());
    }
}
