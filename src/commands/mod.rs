//! CLI command implementations
//!
//! Commands take an open [`Mcp23s17`](mcp23s17_core::device::Mcp23s17)
//! handle and print their results to stdout. Errors are returned to
//! `main` unchanged; nothing is retried.

mod list;
pub mod pin;
pub mod register;

pub use list::{list_programmers, list_registers};
