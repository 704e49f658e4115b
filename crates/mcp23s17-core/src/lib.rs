//! mcp23s17-core - Core library for the MCP23S17 GPIO expander
//!
//! This crate implements the register-level protocol of the MCP23S17, a
//! 16-bit I/O expander with two 8-bit ports behind an SPI interface. It is
//! designed to be `no_std` compatible for use in embedded environments.
//!
//! # Features
//!
//! - `std` - Enable standard library support (includes `alloc`)
//! - `alloc` - Enable boxed transports
//!
//! # Example
//!
//! ```ignore
//! use mcp23s17_core::device::Mcp23s17;
//! use mcp23s17_core::protocol::Register;
//! use mcp23s17_core::transport::SpiTransport;
//!
//! fn blink<T: SpiTransport>(transport: T) -> mcp23s17_core::Result<()> {
//!     let mut chip = Mcp23s17::new(transport, 0)?;
//!     chip.init()?;
//!     chip.set_port(Register::IODIRA, 0x00)?;
//!     chip.set_pin(Register::OLATA, 3, 1)?;
//!     Ok(())
//! }
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod device;
pub mod error;
pub mod protocol;
pub mod transport;

#[cfg(test)]
mod testutil;

pub use error::{Error, Result};
