//! Error types for mcp23s17-core
//!
//! This module provides a no_std compatible error type that can be used
//! throughout the crate.

use core::fmt;

use crate::protocol::Register;

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    // Transport errors
    /// SPI exchange failed at the hardware/OS level
    TransferFailed,
    /// Transmit and receive buffers differ in length
    BufferSizeMismatch,

    // Precondition violations
    /// Pin index outside 0-7
    InvalidPin(i32),
    /// Register address outside 0x00-0x15
    InvalidRegister(u8),
    /// Hardware device address outside 0-7
    InvalidDeviceAddress(u8),
    /// Direction code other than input (1) or output (0)
    InvalidDirection(i32),

    // Initialization errors
    /// A register write of the startup sequence failed
    InitFailed(Register),
}

impl Error {
    /// Returns true for errors raised before any bus traffic took place
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InvalidPin(_)
                | Self::InvalidRegister(_)
                | Self::InvalidDeviceAddress(_)
                | Self::InvalidDirection(_)
        )
    }

    /// Returns true for errors reported by the transport
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::TransferFailed | Self::BufferSizeMismatch
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransferFailed => write!(f, "SPI transfer failed"),
            Self::BufferSizeMismatch => {
                write!(f, "transmit and receive buffers differ in length")
            }
            Self::InvalidPin(pin) => write!(f, "invalid pin {} (must be 0-7)", pin),
            Self::InvalidRegister(reg) => {
                write!(f, "invalid register 0x{:02X} (must be 0x00-0x15)", reg)
            }
            Self::InvalidDeviceAddress(addr) => {
                write!(f, "invalid device address {} (must be 0-7)", addr)
            }
            Self::InvalidDirection(dir) => {
                write!(f, "invalid pin value {} (must be 0 or 1)", dir)
            }
            Self::InitFailed(reg) => {
                write!(f, "initialization failed while writing {}", reg.name())
            }
        }
    }
}

impl From<core::convert::Infallible> for Error {
    fn from(never: core::convert::Infallible) -> Self {
        match never {}
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
