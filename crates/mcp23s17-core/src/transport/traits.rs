//! Transport trait definitions
//!
//! The expander only needs one primitive from the bus: a synchronous,
//! full-duplex exchange of a fixed-length buffer. Chip select, clock rate,
//! bit order and word size are fixed when the transport is opened.

use crate::error::Result;

/// Full-duplex SPI transport
///
/// Implementations clock out every byte of `tx` while capturing the same
/// number of bytes into `rx`, with chip select held asserted for the whole
/// exchange. The call blocks until the exchange completes or fails.
///
/// ## Example
///
/// ```ignore
/// impl SpiTransport for MyBus {
///     fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()> {
///         check_transfer_len(tx, rx)?;
///         self.hw.exchange(tx, rx).map_err(|_| Error::TransferFailed)
///     }
/// }
/// ```
pub trait SpiTransport {
    /// Exchange `tx.len()` bytes, filling `rx` with the bytes received
    ///
    /// `rx` must be exactly as long as `tx`.
    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()>;
}

impl<T: SpiTransport + ?Sized> SpiTransport for &mut T {
    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()> {
        (**self).transfer(tx, rx)
    }
}

// Blanket impl for boxed transports to allow trait objects
#[cfg(feature = "alloc")]
impl SpiTransport for alloc::boxed::Box<dyn SpiTransport + Send> {
    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()> {
        (**self).transfer(tx, rx)
    }
}

/// Check the full-duplex length contract of [`SpiTransport::transfer`]
///
/// Transport implementations call this before touching the hardware.
pub fn check_transfer_len(tx: &[u8], rx: &[u8]) -> Result<()> {
    if tx.len() != rx.len() {
        return Err(crate::error::Error::BufferSizeMismatch);
    }
    Ok(())
}
