//! Port and pin operations
//!
//! The chip has no single-bit access, so pin updates read the whole port
//! register, change one bit and write the result back. The operations work
//! on any register: IODIR for direction, GPPU for pull-ups, OLAT for output
//! levels and so on.

use crate::device::{Direction, Mcp23s17, Pin};
use crate::error::{Error, Result};
use crate::protocol::Register;
use crate::transport::SpiTransport;

/// Set or clear `pin`'s bit in `port`, leaving the other seven bits alone
pub fn apply_pin(port: u8, pin: Pin, direction: Direction) -> u8 {
    match direction {
        Direction::Input => port | pin.mask(),
        Direction::Output => port & !pin.mask(),
    }
}

/// Returns true if `pin`'s bit is set in `port`
pub fn pin_is_set(port: u8, pin: Pin) -> bool {
    port & pin.mask() != 0
}

impl<T: SpiTransport> Mcp23s17<T> {
    /// Read a whole port register
    pub fn get_port(&mut self, reg: Register) -> Result<u8> {
        self.read_register(reg)
    }

    /// Write a whole port register
    pub fn set_port(&mut self, reg: Register, value: u8) -> Result<()> {
        self.write_register(reg, value)
    }

    /// Set (`Input`, 1) or clear (`Output`, 0) one bit of `reg`
    ///
    /// `pin` and `direction` are validated before any bus traffic. The
    /// update is not atomic: a change made to `reg` by someone else between
    /// the read and the write is lost.
    pub fn set_pin<P, D>(&mut self, reg: Register, pin: P, direction: D) -> Result<()>
    where
        P: TryInto<Pin>,
        D: TryInto<Direction>,
        Error: From<P::Error> + From<D::Error>,
    {
        let pin = pin.try_into()?;
        let direction = direction.try_into()?;

        let current = self.read_register(reg)?;
        let updated = apply_pin(current, pin, direction);
        log::debug!(
            "mcp23s17: {} pin {} -> {} (0x{:02X} -> 0x{:02X})",
            reg.name(),
            pin,
            direction,
            current,
            updated
        );
        self.write_register(reg, updated)
    }

    /// Read one bit of `reg`
    pub fn get_pin<P>(&mut self, reg: Register, pin: P) -> Result<bool>
    where
        P: TryInto<Pin>,
        Error: From<P::Error>,
    {
        let pin = pin.try_into()?;
        let port = self.read_register(reg)?;
        Ok(pin_is_set(port, pin))
    }
}
