//! Linux SPI device implementation
//!
//! This module provides the `LinuxSpi` struct that implements the
//! `SpiTransport` trait using Linux's spidev interface.

use crate::error::{LinuxSpiError, Result};

use mcp23s17_core::error::{Error as CoreError, Result as CoreResult};
use mcp23s17_core::transport::{check_transfer_len, SpiTransport};

use std::fs::{File, OpenOptions};
use std::os::unix::io::AsRawFd;

/// Default SPI clock speed in Hz (1 MHz)
const DEFAULT_SPEED_HZ: u32 = 1_000_000;

/// Highest SPI clock the MCP23S17 accepts (10 MHz)
pub const MAX_SPEED_HZ: u32 = 10_000_000;

/// Word size used for every transfer
const BITS_PER_WORD: u8 = 8;

/// SPI mode constants
pub mod mode {
    /// SPI mode 0: CPOL=0, CPHA=0
    pub const MODE_0: u8 = 0;
    /// SPI mode 1: CPOL=0, CPHA=1
    pub const MODE_1: u8 = 1;
    /// SPI mode 2: CPOL=1, CPHA=0
    pub const MODE_2: u8 = 2;
    /// SPI mode 3: CPOL=1, CPHA=1
    pub const MODE_3: u8 = 3;

    /// Chip select is active high
    pub const SPI_CS_HIGH: u8 = 0x04;
    /// No chip select line
    pub const SPI_NO_CS: u8 = 0x40;
}

/// Linux spidev ioctl constants
mod ioctl {
    use nix::ioctl_read;
    use nix::ioctl_write_ptr;

    // SPI ioctl magic number
    const SPI_IOC_MAGIC: u8 = b'k';

    // SPI ioctl type numbers
    const SPI_IOC_TYPE_MODE: u8 = 1;
    const SPI_IOC_TYPE_LSB_FIRST: u8 = 2;
    const SPI_IOC_TYPE_BITS_PER_WORD: u8 = 3;
    const SPI_IOC_TYPE_MAX_SPEED_HZ: u8 = 4;

    // Generate ioctl functions
    ioctl_read!(spi_ioc_rd_mode, SPI_IOC_MAGIC, SPI_IOC_TYPE_MODE, u8);
    ioctl_write_ptr!(spi_ioc_wr_mode, SPI_IOC_MAGIC, SPI_IOC_TYPE_MODE, u8);
    ioctl_write_ptr!(
        spi_ioc_wr_lsb_first,
        SPI_IOC_MAGIC,
        SPI_IOC_TYPE_LSB_FIRST,
        u8
    );
    ioctl_write_ptr!(
        spi_ioc_wr_bits_per_word,
        SPI_IOC_MAGIC,
        SPI_IOC_TYPE_BITS_PER_WORD,
        u8
    );
    ioctl_write_ptr!(
        spi_ioc_wr_max_speed_hz,
        SPI_IOC_MAGIC,
        SPI_IOC_TYPE_MAX_SPEED_HZ,
        u32
    );

    // SPI_IOC_MESSAGE(n) = _IOW(SPI_IOC_MAGIC, 0, char[SPI_MSGSIZE(n)])
    // where SPI_MSGSIZE(n) = (n) * sizeof(struct spi_ioc_transfer)

    /// Size of spi_ioc_transfer struct
    pub const SPI_IOC_TRANSFER_SIZE: usize = 32;

    /// Calculate ioctl number for SPI_IOC_MESSAGE(n)
    pub fn spi_ioc_message(n: u8) -> libc::c_ulong {
        let size = (n as usize) * SPI_IOC_TRANSFER_SIZE;
        // _IOC(_IOC_WRITE, type, nr, size) with _IOC_WRITE = 1
        ((1u32 << 30) | ((size as u32) << 16) | ((SPI_IOC_MAGIC as u32) << 8)) as libc::c_ulong
    }
}

/// SPI transfer structure for ioctl
/// This must match the kernel's struct spi_ioc_transfer layout
#[repr(C)]
#[derive(Debug, Default, Clone)]
struct SpiIocTransfer {
    tx_buf: u64,          // __u64 tx_buf
    rx_buf: u64,          // __u64 rx_buf
    len: u32,             // __u32 len
    speed_hz: u32,        // __u32 speed_hz
    delay_usecs: u16,     // __u16 delay_usecs
    bits_per_word: u8,    // __u8 bits_per_word
    cs_change: u8,        // __u8 cs_change
    tx_nbits: u8,         // __u8 tx_nbits
    rx_nbits: u8,         // __u8 rx_nbits
    word_delay_usecs: u8, // __u8 word_delay_usecs
    _pad: u8,             // padding
}

/// Configuration for opening a Linux SPI device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinuxSpiConfig {
    /// Device path (e.g., "/dev/spidev0.0")
    pub device: String,
    /// SPI clock speed in Hz (default: 1 MHz)
    pub speed_hz: u32,
    /// SPI mode (0-3, default: 0)
    pub mode: u8,
    /// Delay after each transfer before chip select is released, in microseconds
    pub delay_us: u16,
}

impl Default for LinuxSpiConfig {
    fn default() -> Self {
        Self {
            device: String::new(),
            speed_hz: DEFAULT_SPEED_HZ,
            mode: mode::MODE_0,
            delay_us: 0,
        }
    }
}

impl LinuxSpiConfig {
    /// Create a new configuration with the given device path
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            ..Default::default()
        }
    }

    /// Set the SPI clock speed in Hz
    pub fn with_speed(mut self, speed_hz: u32) -> Self {
        self.speed_hz = speed_hz;
        self
    }

    /// Set the SPI mode (0-3)
    pub fn with_mode(mut self, mode: u8) -> Self {
        self.mode = mode;
        self
    }

    /// Set the delay inserted after each transfer
    pub fn with_delay_us(mut self, delay_us: u16) -> Self {
        self.delay_us = delay_us;
        self
    }
}

/// Linux SPI transport using the spidev interface
///
/// This struct implements the `SpiTransport` trait for Linux systems using
/// the `/dev/spidevX.Y` device interface. The file is closed on drop.
pub struct LinuxSpi {
    /// File handle for spidev device
    file: File,
    /// Clock speed in Hz, fixed at open
    speed_hz: u32,
    /// Delay after each transfer
    delay_us: u16,
}

impl LinuxSpi {
    /// Open a Linux SPI device with the given configuration
    pub fn open(config: &LinuxSpiConfig) -> Result<Self> {
        if config.device.is_empty() {
            return Err(LinuxSpiError::NoDevice);
        }
        if config.mode > mode::MODE_3 {
            return Err(LinuxSpiError::InvalidParameter(format!(
                "SPI mode {} (must be 0-3)",
                config.mode
            )));
        }
        if config.speed_hz == 0 || config.speed_hz > MAX_SPEED_HZ {
            return Err(LinuxSpiError::InvalidParameter(format!(
                "SPI speed {} Hz (must be 1-{})",
                config.speed_hz, MAX_SPEED_HZ
            )));
        }

        log::debug!("linux_spi: Opening device {}", config.device);

        // Open the device
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&config.device)
            .map_err(|e| LinuxSpiError::OpenFailed {
                path: config.device.clone(),
                source: e,
            })?;

        let fd = file.as_raw_fd();

        // Set clock speed
        let speed = config.speed_hz;
        unsafe {
            ioctl::spi_ioc_wr_max_speed_hz(fd, &speed).map_err(|e| {
                LinuxSpiError::SetSpeedFailed {
                    speed,
                    source: std::io::Error::from_raw_os_error(e as i32),
                }
            })?;
        }

        // MSB first
        let lsb_first: u8 = 0;
        unsafe {
            ioctl::spi_ioc_wr_lsb_first(fd, &lsb_first).map_err(|e| {
                LinuxSpiError::SetBitOrderFailed(std::io::Error::from_raw_os_error(e as i32))
            })?;
        }

        // Set bits per word (always 8)
        let bits = BITS_PER_WORD;
        unsafe {
            ioctl::spi_ioc_wr_bits_per_word(fd, &bits).map_err(|e| {
                LinuxSpiError::SetBitsPerWordFailed {
                    bits,
                    source: std::io::Error::from_raw_os_error(e as i32),
                }
            })?;
        }

        // Set SPI mode
        let requested = config.mode;
        unsafe {
            ioctl::spi_ioc_wr_mode(fd, &requested).map_err(|e| LinuxSpiError::SetModeFailed {
                mode: requested,
                source: std::io::Error::from_raw_os_error(e as i32),
            })?;
        }

        // Chip select active low and enabled
        let mut current: u8 = 0;
        unsafe {
            ioctl::spi_ioc_rd_mode(fd, &mut current).map_err(|e| {
                LinuxSpiError::SetModeFailed {
                    mode: requested,
                    source: std::io::Error::from_raw_os_error(e as i32),
                }
            })?;
        }
        let cs_mode = chip_select_mode(current);
        unsafe {
            ioctl::spi_ioc_wr_mode(fd, &cs_mode).map_err(|e| LinuxSpiError::SetModeFailed {
                mode: cs_mode,
                source: std::io::Error::from_raw_os_error(e as i32),
            })?;
        }

        log::info!(
            "linux_spi: Opened {} (mode={}, speed={} kHz)",
            config.device,
            requested,
            speed / 1000
        );

        Ok(Self {
            file,
            speed_hz: speed,
            delay_us: config.delay_us,
        })
    }

    /// Open a device with default settings
    pub fn open_device(device: &str) -> Result<Self> {
        Self::open(&LinuxSpiConfig::new(device))
    }

    /// Perform a full-duplex SPI transfer
    ///
    /// Issues a single SPI_IOC_MESSAGE(1) so chip select stays asserted for
    /// the whole exchange.
    fn spi_transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()> {
        if tx.is_empty() {
            return Err(LinuxSpiError::InvalidParameter(
                "Write data cannot be empty".into(),
            ));
        }

        let fd = self.file.as_raw_fd();
        let transfer = SpiIocTransfer {
            tx_buf: tx.as_ptr() as u64,
            rx_buf: rx.as_mut_ptr() as u64,
            len: tx.len() as u32,
            speed_hz: self.speed_hz,
            delay_usecs: self.delay_us,
            bits_per_word: BITS_PER_WORD,
            ..Default::default()
        };

        let ioctl_num = ioctl::spi_ioc_message(1);
        let ret = unsafe { libc::ioctl(fd, ioctl_num, &transfer as *const SpiIocTransfer) };

        if ret < 0 {
            return Err(LinuxSpiError::TransferFailed(
                std::io::Error::last_os_error(),
            ));
        }

        Ok(())
    }

}

impl SpiTransport for LinuxSpi {
    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> CoreResult<()> {
        check_transfer_len(tx, rx)?;

        self.spi_transfer(tx, rx).map_err(|e| {
            log::error!("linux_spi: {}", e);
            CoreError::TransferFailed
        })
    }
}

/// Mode byte with chip select enabled and active low
fn chip_select_mode(mode: u8) -> u8 {
    mode & !(mode::SPI_CS_HIGH | mode::SPI_NO_CS)
}

/// Parse programmer options from a list of key-value pairs
pub fn parse_options(options: &[(&str, &str)]) -> std::result::Result<LinuxSpiConfig, String> {
    let mut config = LinuxSpiConfig::default();

    for (key, value) in options {
        match *key {
            "dev" => {
                config.device = value.to_string();
            }
            "spispeed" => {
                // Parse speed in kHz
                let speed_khz: u32 = value
                    .parse()
                    .map_err(|_| format!("Invalid spispeed value: {}", value))?;
                if speed_khz == 0 {
                    return Err("spispeed must be greater than 0".to_string());
                }
                config.speed_hz = speed_khz
                    .checked_mul(1000)
                    .filter(|hz| *hz <= MAX_SPEED_HZ)
                    .ok_or_else(|| {
                        format!(
                            "spispeed {} kHz exceeds the {} kHz maximum",
                            speed_khz,
                            MAX_SPEED_HZ / 1000
                        )
                    })?;
            }
            "mode" => {
                let mode: u8 = value
                    .parse()
                    .map_err(|_| format!("Invalid mode value: {}", value))?;
                if mode > mode::MODE_3 {
                    return Err(format!("Invalid SPI mode: {} (must be 0-3)", mode));
                }
                config.mode = mode;
            }
            "delay" => {
                config.delay_us = value
                    .parse()
                    .map_err(|_| format!("Invalid delay value: {}", value))?;
            }
            _ => {
                log::warn!("linux_spi: Unknown option: {}={}", key, value);
            }
        }
    }

    if config.device.is_empty() {
        return Err("No device specified. Use dev=/dev/spidevX.Y".to_string());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_defaults() {
        let config = parse_options(&[("dev", "/dev/spidev0.0")]).unwrap();
        assert_eq!(config.device, "/dev/spidev0.0");
        assert_eq!(config.speed_hz, 1_000_000);
        assert_eq!(config.mode, mode::MODE_0);
        assert_eq!(config.delay_us, 0);
    }

    #[test]
    fn test_parse_options_all_keys() {
        let config = parse_options(&[
            ("dev", "/dev/spidev1.2"),
            ("spispeed", "500"),
            ("mode", "3"),
            ("delay", "3120"),
        ])
        .unwrap();
        assert_eq!(
            config,
            LinuxSpiConfig::new("/dev/spidev1.2")
                .with_speed(500_000)
                .with_mode(3)
                .with_delay_us(3120)
        );
    }

    #[test]
    fn test_parse_options_errors() {
        assert!(parse_options(&[]).is_err());
        assert!(parse_options(&[("dev", "/dev/spidev0.0"), ("mode", "4")]).is_err());
        assert!(parse_options(&[("dev", "/dev/spidev0.0"), ("spispeed", "fast")]).is_err());
        assert!(parse_options(&[("dev", "/dev/spidev0.0"), ("spispeed", "0")]).is_err());
    }

    #[test]
    fn test_parse_options_speed_limit() {
        let config = parse_options(&[("dev", "/dev/spidev0.0"), ("spispeed", "10000")]).unwrap();
        assert_eq!(config.speed_hz, MAX_SPEED_HZ);

        assert!(parse_options(&[("dev", "/dev/spidev0.0"), ("spispeed", "10001")]).is_err());
        assert!(parse_options(&[("dev", "/dev/spidev0.0"), ("spispeed", "50000")]).is_err());
        // kHz value whose Hz product does not fit in u32
        assert!(parse_options(&[("dev", "/dev/spidev0.0"), ("spispeed", "5000000")]).is_err());
    }

    #[test]
    fn test_open_rejects_speed_above_max() {
        let config = LinuxSpiConfig::new("/dev/spidev0.0").with_speed(MAX_SPEED_HZ + 1);
        assert!(matches!(
            LinuxSpi::open(&config),
            Err(LinuxSpiError::InvalidParameter(_))
        ));
        let config = LinuxSpiConfig::new("/dev/spidev0.0").with_speed(0);
        assert!(matches!(
            LinuxSpi::open(&config),
            Err(LinuxSpiError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_chip_select_mode() {
        assert_eq!(chip_select_mode(0x00), 0x00);
        assert_eq!(chip_select_mode(mode::SPI_CS_HIGH | mode::MODE_0), 0x00);
        assert_eq!(chip_select_mode(mode::SPI_NO_CS | mode::MODE_3), mode::MODE_3);
    }

    #[test]
    fn test_open_without_device() {
        assert!(matches!(
            LinuxSpi::open(&LinuxSpiConfig::default()),
            Err(LinuxSpiError::NoDevice)
        ));
    }

    #[test]
    fn test_transfer_struct_size() {
        assert_eq!(
            std::mem::size_of::<SpiIocTransfer>(),
            ioctl::SPI_IOC_TRANSFER_SIZE
        );
    }
}
