//! Chip controller: register access and the startup sequence

use crate::device::DeviceAddress;
use crate::error::{Error, Result};
use crate::protocol::{decode_read_result, Frame, IoconFlags, Register, FRAME_LEN};
use crate::transport::SpiTransport;

/// Writes performed by [`Mcp23s17::init`], in order
///
/// IOCON must come first so the pull-up writes already use hardware
/// addressing with sequential mode off.
const INIT_SEQUENCE: [(Register, u8); 3] = [
    (Register::IOCON, IoconFlags::INIT.bits()),
    (Register::GPPUA, 0xFF),
    (Register::GPPUB, 0xFF),
];

/// Handle to one MCP23S17 on an SPI transport
///
/// The handle owns its transport exclusively and performs one blocking
/// transaction at a time. Callers sharing a chip between threads must
/// serialize access themselves, since pin updates are read-modify-write.
pub struct Mcp23s17<T> {
    transport: T,
    address: DeviceAddress,
}

impl<T: SpiTransport> Mcp23s17<T> {
    /// Create a handle for the chip at hardware address `address` (0-7)
    ///
    /// The transport must already be opened and configured.
    pub fn new(transport: T, address: u8) -> Result<Self> {
        let address = DeviceAddress::new(address)?;
        Ok(Self::with_address(transport, address))
    }

    /// Create a handle from an already validated address
    pub fn with_address(transport: T, address: DeviceAddress) -> Self {
        log::debug!("mcp23s17: Handle for device address {}", address);
        Self { transport, address }
    }

    /// Hardware address of this chip
    pub fn address(&self) -> DeviceAddress {
        self.address
    }

    /// Borrow the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutably borrow the underlying transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Close the handle and give the transport back
    pub fn release(self) -> T {
        self.transport
    }

    fn exchange(&mut self, frame: &Frame) -> Result<[u8; FRAME_LEN]> {
        let mut rx = [0u8; FRAME_LEN];
        let tx = frame.as_bytes();
        log::trace!(
            "mcp23s17: tx {:02X} {:02X} {:02X}",
            tx[0],
            tx[1],
            tx[2]
        );
        self.transport.transfer(tx, &mut rx)?;
        log::trace!(
            "mcp23s17: rx {:02X} {:02X} {:02X}",
            rx[0],
            rx[1],
            rx[2]
        );
        Ok(rx)
    }

    /// Write `value` to `reg`
    pub fn write_register(&mut self, reg: Register, value: u8) -> Result<()> {
        let frame = Frame::write(self.address, reg, value);
        self.exchange(&frame)?;
        log::debug!("mcp23s17: {} <- 0x{:02X}", reg.name(), value);
        Ok(())
    }

    /// Read the current value of `reg`
    pub fn read_register(&mut self, reg: Register) -> Result<u8> {
        let frame = Frame::read(self.address, reg);
        let rx = self.exchange(&frame)?;
        let value = decode_read_result(&rx);
        log::debug!("mcp23s17: {} -> 0x{:02X}", reg.name(), value);
        Ok(value)
    }

    /// Run the power-on configuration
    ///
    /// Writes IOCON (hardware addressing on, sequential mode off), then
    /// enables the pull-ups of both ports. The first failing write aborts
    /// the sequence; registers already written are left as they are.
    pub fn init(&mut self) -> Result<()> {
        log::debug!("mcp23s17: Initializing device {}", self.address);

        for (reg, value) in INIT_SEQUENCE {
            if let Err(e) = self.write_register(reg, value) {
                log::error!("mcp23s17: Failed to write {}: {}", reg.name(), e);
                return Err(Error::InitFailed(reg));
            }
        }

        log::info!("mcp23s17: Device {} initialized", self.address);
        Ok(())
    }

    /// Clear all eight bits of `reg`
    pub fn reset_all_pins(&mut self, reg: Register) -> Result<()> {
        self.write_register(reg, 0x00)
    }

    /// Read every register in address order
    pub fn dump_registers(&mut self) -> Result<[u8; Register::COUNT]> {
        let mut values = [0u8; Register::COUNT];
        for reg in Register::ALL {
            values[reg.addr() as usize] = self.read_register(reg)?;
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockTransport;

    #[test]
    fn test_new_rejects_bad_address() {
        assert!(matches!(
            Mcp23s17::new(MockTransport::new(), 8),
            Err(Error::InvalidDeviceAddress(8))
        ));
        let chip = Mcp23s17::new(MockTransport::new(), 7).unwrap();
        assert_eq!(chip.address().value(), 7);
    }

    #[test]
    fn test_write_register_frame() {
        let mut chip = Mcp23s17::new(MockTransport::new(), 2).unwrap();
        chip.write_register(Register::OLATB, 0xA5).unwrap();
        assert_eq!(chip.transport().sent, [[0x44, 0x15, 0xA5]]);
    }

    #[test]
    fn test_read_register_decodes_third_byte() {
        let mock = MockTransport::new().with_reg(Register::GPIOA, 0x3C);
        let mut chip = Mcp23s17::new(mock, 1).unwrap();
        assert_eq!(chip.read_register(Register::GPIOA).unwrap(), 0x3C);
        assert_eq!(chip.transport().sent, [[0x43, 0x12, 0x00]]);
    }

    #[test]
    fn test_read_register_transport_error() {
        let mock = MockTransport::new().failing_at(0);
        let mut chip = Mcp23s17::new(mock, 0).unwrap();
        let err = chip.read_register(Register::GPIOA).unwrap_err();
        assert_eq!(err, Error::TransferFailed);
        assert!(err.is_transport());
        assert!(!err.is_precondition());
    }

    #[test]
    fn test_init_sequence() {
        let mut chip = Mcp23s17::new(MockTransport::new(), 0).unwrap();
        chip.init().unwrap();
        assert_eq!(
            chip.transport().sent,
            [[0x40, 0x0A, 0x28], [0x40, 0x0C, 0xFF], [0x40, 0x0D, 0xFF]]
        );
    }

    #[test]
    fn test_init_aborts_on_second_write() {
        let mock = MockTransport::new().failing_at(1);
        let mut chip = Mcp23s17::new(mock, 0).unwrap();
        assert_eq!(chip.init(), Err(Error::InitFailed(Register::GPPUA)));
        // Only IOCON went out; GPPUB was never attempted
        assert_eq!(chip.transport().sent, [[0x40, 0x0A, 0x28]]);
    }

    #[test]
    fn test_reset_all_pins() {
        let mock = MockTransport::new().with_reg(Register::OLATA, 0xFF);
        let mut chip = Mcp23s17::new(mock, 3).unwrap();
        chip.reset_all_pins(Register::OLATA).unwrap();
        assert_eq!(chip.transport().sent, [[0x46, 0x14, 0x00]]);
        assert_eq!(chip.read_register(Register::OLATA).unwrap(), 0x00);
    }

    #[test]
    fn test_dump_registers() {
        let mock = MockTransport::new()
            .with_reg(Register::IODIRA, 0xFF)
            .with_reg(Register::OLATB, 0x42);
        let mut chip = Mcp23s17::new(mock, 0).unwrap();
        let regs = chip.dump_registers().unwrap();
        assert_eq!(regs[0x00], 0xFF);
        assert_eq!(regs[0x15], 0x42);
        assert_eq!(chip.transport().sent.len(), Register::COUNT);
    }

    #[test]
    fn test_release_returns_transport() {
        let mut chip = Mcp23s17::new(MockTransport::new(), 0).unwrap();
        chip.write_register(Register::GPPUA, 0x0F).unwrap();
        let mock = chip.release();
        assert_eq!(mock.sent.len(), 1);
    }
}
