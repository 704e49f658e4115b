//! mcp23s17-linux-spi - Linux spidev transport
//!
//! This crate carries MCP23S17 register frames over the Linux
//! `/dev/spidevX.Y` character device interface.
//!
//! # Overview
//!
//! The Linux SPI driver exposes SPI controllers through character devices
//! at `/dev/spidevX.Y` where X is the bus number and Y is the chip select.
//! The device is configured for the expander when it is opened: 1 MHz
//! clock, MSB first, 8-bit words, mode 0, chip select enabled and active
//! low.
//!
//! # Example
//!
//! ```no_run
//! use mcp23s17_linux_spi::{LinuxSpi, LinuxSpiConfig};
//! use mcp23s17_core::device::Mcp23s17;
//! use mcp23s17_core::protocol::Register;
//!
//! // Open with default settings (1 MHz, mode 0)
//! let spi = LinuxSpi::open_device("/dev/spidev0.0")?;
//!
//! // Or with custom settings
//! let config = LinuxSpiConfig::new("/dev/spidev0.1")
//!     .with_speed(500_000)
//!     .with_delay_us(10);
//! let _other = LinuxSpi::open(&config)?;
//!
//! let mut chip = Mcp23s17::new(spi, 0)?;
//! chip.init()?;
//! let levels = chip.get_port(Register::GPIOA)?;
//! println!("GPIOA: 0x{:02X}", levels);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Usage with the mcp23s17 CLI
//!
//! ```bash
//! # Initialize the chip at address 0
//! mcp23s17 init -p linux_spi:dev=/dev/spidev0.0
//!
//! # Read port B levels of the chip at address 3, clock at 500 kHz
//! mcp23s17 get-port -p linux_spi:dev=/dev/spidev0.0,spispeed=500 -a 3 -r GPIOB
//! ```
//!
//! # System Requirements
//!
//! - Linux kernel with spidev support enabled (`CONFIG_SPI_SPIDEV`)
//! - Read/write access to `/dev/spidevX.Y` device
//! - May require adding user to `spi` group or using udev rules

pub mod device;
pub mod error;

// Re-exports
pub use device::{mode, parse_options, LinuxSpi, LinuxSpiConfig, MAX_SPEED_HZ};
pub use error::{LinuxSpiError, Result};

/// Open a Linux SPI device and return a boxed SpiTransport
///
/// This is a convenience function for use in the CLI programmer dispatch.
///
/// # Arguments
///
/// * `options` - Slice of (key, value) pairs from programmer string parsing
///
/// # Example Options
///
/// - `dev=/dev/spidev0.0` - Required: device path
/// - `spispeed=1000` - Optional: speed in kHz (default: 1000, max: 10000)
/// - `mode=0` - Optional: SPI mode 0-3 (default: 0)
/// - `delay=0` - Optional: delay after each transfer in microseconds
///   (default: 0). Older drivers for this chip held chip select for
///   3120 µs after every write; pass `delay=3120` on boards that need it.
pub fn open_linux_spi(
    options: &[(&str, &str)],
) -> std::result::Result<
    Box<dyn mcp23s17_core::transport::SpiTransport + Send>,
    Box<dyn std::error::Error>,
> {
    let config = parse_options(options)?;
    let spi = LinuxSpi::open(&config)?;
    Ok(Box::new(spi))
}
