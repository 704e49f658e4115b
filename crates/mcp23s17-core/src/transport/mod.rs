//! Transport traits and abstractions
//!
//! This module defines the trait that every SPI backend must implement
//! to carry register frames to the expander.

mod traits;

pub use traits::*;
