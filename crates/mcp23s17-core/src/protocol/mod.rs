//! MCP23S17 wire protocol
//!
//! This module provides the register map, the IOCON configuration bits
//! and the 3-byte SPI frame codec.

pub mod frame;
mod iocon;
mod registers;

pub use frame::{decode_read_result, Frame, FRAME_LEN};
pub use iocon::IoconFlags;
pub use registers::{Port, Register, INPUT_PIN, INPUT_PORT, OUTPUT_PIN, OUTPUT_PORT};
