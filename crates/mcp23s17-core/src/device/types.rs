//! Validated value types for device operations

use core::fmt;

use crate::error::Error;
use crate::protocol::{INPUT_PIN, OUTPUT_PIN};

/// Hardware address of one expander, set by its A2..A0 pins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DeviceAddress(u8);

impl DeviceAddress {
    /// Highest hardware address
    pub const MAX: u8 = 7;

    /// Create an address, rejecting values above 7
    pub fn new(addr: u8) -> Result<Self, Error> {
        if addr > Self::MAX {
            return Err(Error::InvalidDeviceAddress(addr));
        }
        Ok(Self(addr))
    }

    /// Keep the low three bits of `bits`
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::MAX)
    }

    /// Numeric address (0-7)
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DeviceAddress {
    type Error = Error;

    fn try_from(addr: u8) -> Result<Self, Self::Error> {
        Self::new(addr)
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One bit position within a port value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pin(u8);

impl Pin {
    /// Highest pin index within a port
    pub const MAX: u8 = 7;

    /// Create a pin selector, rejecting indices above 7
    pub fn new(index: u8) -> Result<Self, Error> {
        if index > Self::MAX {
            return Err(Error::InvalidPin(index as i32));
        }
        Ok(Self(index))
    }

    /// Pin index (0-7)
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Port value with only this pin's bit set
    pub const fn mask(self) -> u8 {
        1 << self.0
    }
}

impl TryFrom<u8> for Pin {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl TryFrom<i32> for Pin {
    type Error = Error;

    fn try_from(index: i32) -> Result<Self, Self::Error> {
        u8::try_from(index)
            .map_err(|_| Error::InvalidPin(index))
            .and_then(Self::new)
    }
}

impl TryFrom<u32> for Pin {
    type Error = Error;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        u8::try_from(index)
            .map_err(|_| Error::InvalidPin(i32::try_from(index).unwrap_or(i32::MAX)))
            .and_then(Self::new)
    }
}

impl TryFrom<usize> for Pin {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        u8::try_from(index)
            .map_err(|_| Error::InvalidPin(i32::try_from(index).unwrap_or(i32::MAX)))
            .and_then(Self::new)
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Value written to a single pin's bit
///
/// Named after the IODIR register, where a set bit makes the pin an input.
/// In other registers `Input` simply sets the bit and `Output` clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Bit clear
    Output,
    /// Bit set
    Input,
}

impl Direction {
    /// Bit value of this direction (0 or 1)
    pub const fn bit(self) -> u8 {
        match self {
            Self::Output => OUTPUT_PIN,
            Self::Input => INPUT_PIN,
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            INPUT_PIN => Ok(Self::Input),
            OUTPUT_PIN => Ok(Self::Output),
            other => Err(Error::InvalidDirection(other as i32)),
        }
    }
}

impl TryFrom<i32> for Direction {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        u8::try_from(code)
            .map_err(|_| Error::InvalidDirection(code))
            .and_then(Self::try_from)
    }
}

impl From<bool> for Direction {
    fn from(set: bool) -> Self {
        if set {
            Self::Input
        } else {
            Self::Output
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output => write!(f, "output"),
            Self::Input => write!(f, "input"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_range() {
        for i in 0..=7u8 {
            assert_eq!(Pin::new(i).unwrap().mask(), 1 << i);
        }
        assert_eq!(Pin::new(8), Err(Error::InvalidPin(8)));
        assert_eq!(Pin::try_from(-1i32), Err(Error::InvalidPin(-1)));
        assert_eq!(Pin::try_from(300i32), Err(Error::InvalidPin(300)));
        assert_eq!(Pin::try_from(7usize).unwrap().index(), 7);
        assert_eq!(Pin::try_from(u32::MAX), Err(Error::InvalidPin(i32::MAX)));
    }

    #[test]
    fn test_device_address_range() {
        assert_eq!(DeviceAddress::new(7).unwrap().value(), 7);
        assert_eq!(
            DeviceAddress::new(8),
            Err(Error::InvalidDeviceAddress(8))
        );
        assert_eq!(DeviceAddress::from_bits_truncate(0x0D).value(), 5);
    }

    #[test]
    fn test_direction_codes() {
        assert_eq!(Direction::try_from(1u8).unwrap(), Direction::Input);
        assert_eq!(Direction::try_from(0u8).unwrap(), Direction::Output);
        assert_eq!(Direction::try_from(2u8), Err(Error::InvalidDirection(2)));
        assert_eq!(Direction::try_from(-1i32), Err(Error::InvalidDirection(-1)));
        assert_eq!(Direction::try_from(1i32).unwrap(), Direction::Input);
        assert_eq!(Direction::from(true).bit(), 1);
        assert_eq!(Direction::from(false).bit(), 0);
    }
}
