//! Test doubles shared by the unit tests

use std::vec::Vec;

use crate::error::{Error, Result};
use crate::protocol::{Frame, Register, FRAME_LEN};
use crate::transport::{check_transfer_len, SpiTransport};

/// Transport that records every frame and answers reads from a register file
pub struct MockTransport {
    /// Frames sent, in order
    pub sent: Vec<[u8; FRAME_LEN]>,
    /// Register file backing read responses
    pub regs: [u8; Register::COUNT],
    /// Index of the exchange that fails, if any
    pub fail_at: Option<usize>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            regs: [0; Register::COUNT],
            fail_at: None,
        }
    }

    pub fn with_reg(mut self, reg: Register, value: u8) -> Self {
        self.regs[reg.addr() as usize] = value;
        self
    }

    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    /// Write frames only
    pub fn writes(&self) -> Vec<[u8; FRAME_LEN]> {
        self.sent
            .iter()
            .filter(|f| f[0] & 0x01 == 0)
            .copied()
            .collect()
    }
}

impl SpiTransport for MockTransport {
    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()> {
        check_transfer_len(tx, rx)?;
        if self.fail_at == Some(self.sent.len()) {
            return Err(Error::TransferFailed);
        }

        let mut bytes = [0u8; FRAME_LEN];
        bytes.copy_from_slice(tx);
        self.sent.push(bytes);

        let frame = Frame::from_bytes(bytes);
        let idx = frame.register()?.addr() as usize;
        rx[0] = 0xFF;
        rx[1] = 0xFF;
        if frame.is_read() {
            rx[2] = self.regs[idx];
        } else {
            rx[2] = 0xFF;
            self.regs[idx] = frame.data();
        }
        Ok(())
    }
}
