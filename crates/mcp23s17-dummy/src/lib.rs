//! mcp23s17-dummy - In-memory MCP23S17 emulator for testing
//!
//! This crate provides a transport that behaves like an MCP23S17 sitting
//! on the bus. It's useful for testing and development without real
//! hardware.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use mcp23s17_core::device::DeviceAddress;
use mcp23s17_core::error::{Error, Result};
use mcp23s17_core::protocol::{Frame, IoconFlags, Register, FRAME_LEN};
use mcp23s17_core::transport::{check_transfer_len, SpiTransport};

/// Value clocked out while the chip is not driving MISO
const UNDRIVEN: u8 = 0xFF;

/// Configuration for the dummy expander
#[derive(Debug, Clone, Default)]
pub struct DummyConfig {
    /// Level of the A2..A0 address pins
    pub hw_address: DeviceAddress,
}

impl DummyConfig {
    /// Create a configuration for a chip strapped to `hw_address`
    pub fn with_hw_address(hw_address: DeviceAddress) -> Self {
        Self { hw_address }
    }
}

/// Dummy expander
///
/// Emulates the register file of an MCP23S17 in BANK=0 mode. Writes are
/// stored as-is and reads return the stored value; no pin electrical
/// behavior is modeled.
#[cfg(feature = "alloc")]
pub struct DummyExpander {
    config: DummyConfig,
    regs: [u8; Register::COUNT],
    frames: Vec<[u8; FRAME_LEN]>,
    fail_after: Option<usize>,
    exchanges: usize,
}

#[cfg(feature = "alloc")]
impl DummyExpander {
    /// Create a new expander in its power-on state
    pub fn new(config: DummyConfig) -> Self {
        let mut regs = [0u8; Register::COUNT];
        for reg in Register::ALL {
            regs[reg.addr() as usize] = reg.reset_value();
        }
        Self {
            config,
            regs,
            frames: Vec::new(),
            fail_after: None,
            exchanges: 0,
        }
    }

    /// Create a new expander at hardware address 0
    pub fn new_default() -> Self {
        Self::new(DummyConfig::default())
    }

    /// Get the configuration
    pub fn config(&self) -> &DummyConfig {
        &self.config
    }

    /// Current value of a register
    pub fn register(&self, reg: Register) -> u8 {
        self.regs[reg.addr() as usize]
    }

    /// Preload a register, bypassing the bus
    pub fn set_register(&mut self, reg: Register, value: u8) {
        self.store(reg, value);
    }

    /// Every frame received so far, in order
    pub fn frames(&self) -> &[[u8; FRAME_LEN]] {
        &self.frames
    }

    /// Write frames received so far
    pub fn write_frames(&self) -> Vec<[u8; FRAME_LEN]> {
        self.frames
            .iter()
            .filter(|f| !Frame::from_bytes(**f).is_read())
            .copied()
            .collect()
    }

    /// Forget recorded frames
    pub fn clear_frames(&mut self) {
        self.frames.clear();
    }

    /// Let `count` more exchanges succeed, then fail every following one
    pub fn fail_after(&mut self, count: usize) {
        self.fail_after = Some(self.exchanges + count);
    }

    fn iocon(&self) -> IoconFlags {
        IoconFlags::from_bits_truncate(self.register(Register::IOCON))
    }

    /// Whether a frame with this opcode address selects the chip
    fn is_addressed(&self, frame: &Frame) -> bool {
        if !frame.has_device_code() {
            return false;
        }
        // Address pins are only compared once hardware addressing is on
        !self.iocon().contains(IoconFlags::HAEN)
            || frame.device_address() == self.config.hw_address
    }

    fn store(&mut self, reg: Register, value: u8) {
        match reg {
            Register::IOCON | Register::IOCON_ALT => {
                if IoconFlags::from_bits_truncate(value).contains(IoconFlags::BANK) {
                    log::warn!("dummy: BANK=1 register layout is not emulated");
                }
                self.regs[Register::IOCON.addr() as usize] = value;
                self.regs[Register::IOCON_ALT.addr() as usize] = value;
            }
            _ => self.regs[reg.addr() as usize] = value,
        }
    }

    fn handle_frame(&mut self, frame: Frame, rx: &mut [u8]) {
        rx.fill(UNDRIVEN);

        if !self.is_addressed(&frame) {
            log::trace!("dummy: ignoring opcode 0x{:02X}", frame.opcode());
            return;
        }

        let reg = match frame.register() {
            Ok(reg) => reg,
            Err(_) => {
                log::trace!("dummy: ignoring register 0x{:02X}", frame.as_bytes()[1]);
                return;
            }
        };

        if frame.is_read() {
            rx[2] = self.register(reg);
        } else {
            self.store(reg, frame.data());
        }
    }
}

#[cfg(feature = "alloc")]
impl SpiTransport for DummyExpander {
    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()> {
        check_transfer_len(tx, rx)?;

        if self.fail_after.is_some_and(|limit| self.exchanges >= limit) {
            return Err(Error::TransferFailed);
        }
        self.exchanges += 1;

        let bytes: [u8; FRAME_LEN] = match tx.try_into() {
            Ok(bytes) => bytes,
            Err(_) => {
                // Not a register frame; the chip shifts nothing out
                rx.fill(UNDRIVEN);
                return Ok(());
            }
        };
        self.frames.push(bytes);
        self.handle_frame(Frame::from_bytes(bytes), rx);
        Ok(())
    }
}
