//! MCP23S17 register map
//!
//! Addresses are those of the BANK=0 layout, which is the power-on state
//! of the chip and the only layout this driver uses. In this layout the A
//! and B registers of each function are interleaved.

use core::fmt;
use core::str::FromStr;

use crate::error::Error;

// ============================================================================
// Port and pin direction values
// ============================================================================

/// IODIR value making every pin of a port an input
pub const INPUT_PORT: u8 = 0xFF;
/// IODIR value making every pin of a port an output
pub const OUTPUT_PORT: u8 = 0x00;
/// Single pin direction code for an input
pub const INPUT_PIN: u8 = 0x01;
/// Single pin direction code for an output
pub const OUTPUT_PIN: u8 = 0x00;

/// One of the two 8-pin halves of the expander
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    /// Pins GPA0-GPA7
    A,
    /// Pins GPB0-GPB7
    B,
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Register address (BANK=0 layout)
#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Register {
    /// I/O direction A (1 = input, 0 = output)
    IODIRA = 0x00,
    /// I/O direction B
    IODIRB = 0x01,
    /// Input polarity A (1 = inverted)
    IPOLA = 0x02,
    /// Input polarity B
    IPOLB = 0x03,
    /// Interrupt-on-change enable A
    GPINTENA = 0x04,
    /// Interrupt-on-change enable B
    GPINTENB = 0x05,
    /// Default compare value for interrupt-on-change A
    DEFVALA = 0x06,
    /// Default compare value for interrupt-on-change B
    DEFVALB = 0x07,
    /// Interrupt control A (1 = compare against DEFVAL, 0 = previous value)
    INTCONA = 0x08,
    /// Interrupt control B
    INTCONB = 0x09,
    /// I/O configuration, see [`IoconFlags`](super::IoconFlags)
    IOCON = 0x0A,
    /// Second address of IOCON; both addresses reach the same register
    IOCON_ALT = 0x0B,
    /// Pull-up enable A
    GPPUA = 0x0C,
    /// Pull-up enable B
    GPPUB = 0x0D,
    /// Interrupt flags A (which pin raised the interrupt)
    INTFA = 0x0E,
    /// Interrupt flags B
    INTFB = 0x0F,
    /// Interrupt capture A (port value latched at interrupt time)
    INTCAPA = 0x10,
    /// Interrupt capture B
    INTCAPB = 0x11,
    /// Port A pin levels
    GPIOA = 0x12,
    /// Port B pin levels
    GPIOB = 0x13,
    /// Output latch A
    OLATA = 0x14,
    /// Output latch B
    OLATB = 0x15,
}

impl Register {
    /// Number of register addresses
    pub const COUNT: usize = 0x16;

    /// Every register in address order
    pub const ALL: [Register; Self::COUNT] = [
        Self::IODIRA,
        Self::IODIRB,
        Self::IPOLA,
        Self::IPOLB,
        Self::GPINTENA,
        Self::GPINTENB,
        Self::DEFVALA,
        Self::DEFVALB,
        Self::INTCONA,
        Self::INTCONB,
        Self::IOCON,
        Self::IOCON_ALT,
        Self::GPPUA,
        Self::GPPUB,
        Self::INTFA,
        Self::INTFB,
        Self::INTCAPA,
        Self::INTCAPB,
        Self::GPIOA,
        Self::GPIOB,
        Self::OLATA,
        Self::OLATB,
    ];

    /// Register address as sent on the wire
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// Datasheet name of the register
    pub fn name(self) -> &'static str {
        match self {
            Self::IODIRA => "IODIRA",
            Self::IODIRB => "IODIRB",
            Self::IPOLA => "IPOLA",
            Self::IPOLB => "IPOLB",
            Self::GPINTENA => "GPINTENA",
            Self::GPINTENB => "GPINTENB",
            Self::DEFVALA => "DEFVALA",
            Self::DEFVALB => "DEFVALB",
            Self::INTCONA => "INTCONA",
            Self::INTCONB => "INTCONB",
            Self::IOCON => "IOCON",
            Self::IOCON_ALT => "IOCON_ALT",
            Self::GPPUA => "GPPUA",
            Self::GPPUB => "GPPUB",
            Self::INTFA => "INTFA",
            Self::INTFB => "INTFB",
            Self::INTCAPA => "INTCAPA",
            Self::INTCAPB => "INTCAPB",
            Self::GPIOA => "GPIOA",
            Self::GPIOB => "GPIOB",
            Self::OLATA => "OLATA",
            Self::OLATB => "OLATB",
        }
    }

    /// Port this register belongs to, `None` for IOCON
    pub fn port(self) -> Option<Port> {
        match self {
            Self::IOCON | Self::IOCON_ALT => None,
            // Even addresses are port A in the interleaved layout
            r if r.addr() & 1 == 0 => Some(Port::A),
            _ => Some(Port::B),
        }
    }

    /// Power-on reset value of the register
    pub fn reset_value(self) -> u8 {
        match self {
            Self::IODIRA | Self::IODIRB => INPUT_PORT,
            _ => 0x00,
        }
    }
}

impl TryFrom<u8> for Register {
    type Error = Error;

    fn try_from(addr: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(addr as usize)
            .copied()
            .ok_or(Error::InvalidRegister(addr))
    }
}

impl From<Register> for u8 {
    fn from(reg: Register) -> u8 {
        reg.addr()
    }
}

impl FromStr for Register {
    type Err = Error;

    /// Parse a register name (case-insensitive) or a numeric address
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(reg) = Self::ALL.iter().find(|r| r.name().eq_ignore_ascii_case(s)) {
            return Ok(*reg);
        }

        let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            u8::from_str_radix(hex, 16)
        } else {
            s.parse::<u8>()
        };

        match parsed {
            Ok(addr) => Self::try_from(addr),
            Err(_) => Err(Error::InvalidRegister(u8::MAX)),
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:02X})", self.name(), self.addr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_map() {
        assert_eq!(Register::IODIRA.addr(), 0x00);
        assert_eq!(Register::IODIRB.addr(), 0x01);
        assert_eq!(Register::IOCON.addr(), 0x0A);
        assert_eq!(Register::GPPUA.addr(), 0x0C);
        assert_eq!(Register::GPPUB.addr(), 0x0D);
        assert_eq!(Register::GPIOA.addr(), 0x12);
        assert_eq!(Register::OLATB.addr(), 0x15);

        for (i, reg) in Register::ALL.iter().enumerate() {
            assert_eq!(reg.addr() as usize, i);
        }
    }

    #[test]
    fn test_register_from_u8() {
        assert_eq!(Register::try_from(0x13).unwrap(), Register::GPIOB);
        assert_eq!(Register::try_from(0x15).unwrap(), Register::OLATB);
        assert_eq!(Register::try_from(0x16), Err(Error::InvalidRegister(0x16)));
        assert_eq!(Register::try_from(0xFF), Err(Error::InvalidRegister(0xFF)));
    }

    #[test]
    fn test_register_from_str() {
        assert_eq!("gpioa".parse::<Register>().unwrap(), Register::GPIOA);
        assert_eq!("IODIRB".parse::<Register>().unwrap(), Register::IODIRB);
        assert_eq!("0x14".parse::<Register>().unwrap(), Register::OLATA);
        assert_eq!("12".parse::<Register>().unwrap(), Register::GPPUA);
        assert!("0x40".parse::<Register>().is_err());
        assert!("GPIOC".parse::<Register>().is_err());
    }

    #[test]
    fn test_register_port() {
        assert_eq!(Register::IODIRA.port(), Some(Port::A));
        assert_eq!(Register::GPPUB.port(), Some(Port::B));
        assert_eq!(Register::OLATA.port(), Some(Port::A));
        assert_eq!(Register::IOCON.port(), None);
        assert_eq!(Register::IOCON_ALT.port(), None);
    }
}
