//! SPI frame codec
//!
//! Every transaction with the MCP23S17 is exactly three bytes in each
//! direction:
//!
//! ```text
//! MOSI: | 0 1 0 0 A2 A1 A0 R/W | register | data or 0x00 |
//! MISO: |      (undriven)      | (undriven)| register data |
//! ```
//!
//! The opcode carries the fixed `0100` device code, the 3-bit hardware
//! address and the read bit. On reads the chip only drives MISO during the
//! third byte, so the first two received bytes are discarded.

use crate::device::DeviceAddress;
use crate::error::Result;
use crate::protocol::Register;

/// Length of every frame in bytes
pub const FRAME_LEN: usize = 3;

/// Device code in the opcode upper nibble
const OPCODE_BASE: u8 = 0x40;
/// Mask selecting the device code
const OPCODE_CODE_MASK: u8 = 0xF0;
/// R/W bit of the opcode (1 = read)
const OPCODE_READ: u8 = 0x01;

/// A single 3-byte request frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame([u8; FRAME_LEN]);

impl Frame {
    /// Encode a register write: `[0x40 | addr << 1, register, value]`
    pub fn write(addr: DeviceAddress, reg: Register, value: u8) -> Self {
        Self([opcode(addr, false), reg.addr(), value])
    }

    /// Encode a register read: `[0x41 | addr << 1, register, 0x00]`
    pub fn read(addr: DeviceAddress, reg: Register) -> Self {
        Self([opcode(addr, true), reg.addr(), 0x00])
    }

    /// Wrap raw bytes received from a bus master
    pub fn from_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw frame bytes in transmission order
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// The opcode byte
    pub fn opcode(&self) -> u8 {
        self.0[0]
    }

    /// Returns true if the opcode carries the MCP23S17 device code
    pub fn has_device_code(&self) -> bool {
        self.0[0] & OPCODE_CODE_MASK == OPCODE_BASE
    }

    /// Returns true for read frames
    pub fn is_read(&self) -> bool {
        self.0[0] & OPCODE_READ != 0
    }

    /// Hardware address carried in opcode bits 1-3
    pub fn device_address(&self) -> DeviceAddress {
        DeviceAddress::from_bits_truncate(self.0[0] >> 1)
    }

    /// Target register, if the address byte names one
    pub fn register(&self) -> Result<Register> {
        Register::try_from(self.0[1])
    }

    /// Data byte (value for writes, placeholder for reads)
    pub fn data(&self) -> u8 {
        self.0[2]
    }
}

fn opcode(addr: DeviceAddress, read: bool) -> u8 {
    let op = OPCODE_BASE | (addr.value() << 1);
    if read {
        op | OPCODE_READ
    } else {
        op
    }
}

/// Extract the register value from the bytes received during a read frame
pub fn decode_read_result(response: &[u8; FRAME_LEN]) -> u8 {
    response[2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_bits_for_all_addresses() {
        for a in 0..=7u8 {
            let addr = DeviceAddress::new(a).unwrap();
            for reg in Register::ALL {
                let w = Frame::write(addr, reg, 0x5A);
                assert_eq!(w.opcode() & 0x01, 0);
                assert_eq!((w.opcode() >> 1) & 0x07, a);
                assert_eq!(w.opcode() & 0xF0, 0x40);
                assert_eq!(w.as_bytes()[1], reg.addr());
                assert_eq!(w.data(), 0x5A);

                let r = Frame::read(addr, reg);
                assert_eq!(r.opcode() & 0x01, 1);
                assert_eq!((r.opcode() >> 1) & 0x07, a);
                assert_eq!(r.as_bytes()[1], reg.addr());
                assert_eq!(r.data(), 0x00);
            }
        }
    }

    #[test]
    fn test_concrete_frames() {
        let addr0 = DeviceAddress::new(0).unwrap();
        let addr5 = DeviceAddress::new(5).unwrap();

        assert_eq!(
            Frame::write(addr0, Register::IODIRA, 0x08).as_bytes(),
            &[0x40, 0x00, 0x08]
        );
        assert_eq!(
            Frame::write(addr0, Register::IOCON, 0x28).as_bytes(),
            &[0x40, 0x0A, 0x28]
        );
        assert_eq!(
            Frame::read(addr5, Register::GPIOB).as_bytes(),
            &[0x4B, 0x13, 0x00]
        );
    }

    #[test]
    fn test_decode_frame_fields() {
        let frame = Frame::from_bytes([0x47, 0x14, 0xA5]);
        assert!(frame.has_device_code());
        assert!(frame.is_read());
        assert_eq!(frame.device_address().value(), 3);
        assert_eq!(frame.register().unwrap(), Register::OLATA);
        assert_eq!(frame.data(), 0xA5);

        let bogus = Frame::from_bytes([0x90, 0x30, 0x00]);
        assert!(!bogus.has_device_code());
        assert!(bogus.register().is_err());
    }

    #[test]
    fn test_decode_read_result_uses_third_byte() {
        assert_eq!(decode_read_result(&[0xFF, 0xFF, 0x3C]), 0x3C);
        assert_eq!(decode_read_result(&[0x12, 0x34, 0x00]), 0x00);
    }
}
