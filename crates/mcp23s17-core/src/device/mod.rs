//! Expander device handle and operations
//!
//! [`Mcp23s17`] owns a transport and the chip's hardware address. Register
//! access and the startup sequence live in `controller`, single-pin
//! read-modify-write operations in `pins`.

mod controller;
mod pins;
mod types;

pub use controller::Mcp23s17;
pub use pins::{apply_pin, pin_is_set};
pub use types::{DeviceAddress, Direction, Pin};
