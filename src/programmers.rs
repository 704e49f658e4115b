//! Programmer registration and dispatch
//!
//! This module provides a centralized registry for all SPI programmers, with
//! support for feature-gated inclusion, and opens a transport from a
//! programmer string.

use mcp23s17_core::transport::SpiTransport;
use std::collections::HashMap;

/// Boxed transport returned by [`open_transport`]
pub type BoxedTransport = Box<dyn SpiTransport + Send>;

/// Information about a programmer
pub struct ProgrammerInfo {
    /// Primary name (used for matching)
    pub name: &'static str,
    /// Alternative names/aliases
    pub aliases: &'static [&'static str],
    /// Short description
    pub description: &'static str,
}

/// Get information about all available programmers (enabled at compile time)
#[allow(unused_mut, clippy::vec_init_then_push)]
pub fn available_programmers() -> Vec<ProgrammerInfo> {
    let mut programmers = Vec::new();

    #[cfg(feature = "dummy")]
    programmers.push(ProgrammerInfo {
        name: "dummy",
        aliases: &[],
        description: "In-memory MCP23S17 emulator for testing (hwaddr=<0-7>)",
    });

    #[cfg(feature = "linux-spi")]
    programmers.push(ProgrammerInfo {
        name: "linux_spi",
        aliases: &["linux-spi", "spidev"],
        description:
            "Linux spidev interface (dev=/dev/spidevX.Y,spispeed=<kHz>,mode=<0-3>,delay=<us>)",
    });

    programmers
}

/// Parsed programmer parameters
#[derive(Debug)]
pub struct ProgrammerParams {
    /// Programmer name as given
    pub name: String,
    /// Key-value parameters
    pub params: HashMap<String, String>,
}

impl ProgrammerParams {
    /// Parameters as borrowed key/value pairs
    #[allow(dead_code)]
    fn pairs(&self) -> Vec<(&str, &str)> {
        self.params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

/// Parse a programmer string into name and parameters
///
/// Format: "name" or "name:key1=value1,key2=value2"
pub fn parse_programmer_params(s: &str) -> Result<ProgrammerParams, Box<dyn std::error::Error>> {
    let (name, opts_str) = s.split_once(':').unwrap_or((s, ""));

    if name.is_empty() {
        return Err("Empty programmer name".into());
    }

    let mut params = HashMap::new();
    if !opts_str.is_empty() {
        for opt in opts_str.split(',') {
            if let Some((key, value)) = opt.split_once('=') {
                params.insert(key.to_string(), value.to_string());
            } else {
                return Err(
                    format!("Invalid parameter format: '{}' (expected key=value)", opt).into(),
                );
            }
        }
    }

    Ok(ProgrammerParams {
        name: name.to_string(),
        params,
    })
}

/// Open the transport named by a programmer string
///
/// # Example
/// ```ignore
/// let transport = open_transport("linux_spi:dev=/dev/spidev0.0")?;
/// let mut chip = Mcp23s17::new(transport, 0)?;
/// ```
pub fn open_transport(programmer: &str) -> Result<BoxedTransport, Box<dyn std::error::Error>> {
    let params = parse_programmer_params(programmer)?;

    match params.name.as_str() {
        #[cfg(feature = "dummy")]
        "dummy" => open_dummy(&params),

        #[cfg(feature = "linux-spi")]
        "linux_spi" | "linux-spi" | "spidev" => open_linux_spi(&params),

        _ => Err(format!("Unknown programmer: {}", params.name).into()),
    }
}

#[cfg(feature = "dummy")]
fn open_dummy(params: &ProgrammerParams) -> Result<BoxedTransport, Box<dyn std::error::Error>> {
    use mcp23s17_core::device::DeviceAddress;
    use mcp23s17_dummy::{DummyConfig, DummyExpander};

    let mut config = DummyConfig::default();
    for (key, value) in &params.params {
        match key.as_str() {
            "hwaddr" => {
                let addr: u8 = value
                    .parse()
                    .map_err(|_| format!("Invalid hwaddr value: {}", value))?;
                config.hw_address = DeviceAddress::new(addr)?;
            }
            _ => log::warn!("dummy: Unknown option: {}={}", key, value),
        }
    }

    log::info!(
        "Opening dummy expander (hardware address {})",
        config.hw_address
    );
    Ok(Box::new(DummyExpander::new(config)))
}

#[cfg(feature = "linux-spi")]
fn open_linux_spi(params: &ProgrammerParams) -> Result<BoxedTransport, Box<dyn std::error::Error>> {
    mcp23s17_linux_spi::open_linux_spi(&params.pairs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_programmer_params() {
        let params = parse_programmer_params("linux_spi:dev=/dev/spidev0.1,spispeed=500").unwrap();
        assert_eq!(params.name, "linux_spi");
        assert_eq!(params.params.get("dev").unwrap(), "/dev/spidev0.1");
        assert_eq!(params.params.get("spispeed").unwrap(), "500");

        let params = parse_programmer_params("dummy").unwrap();
        assert_eq!(params.name, "dummy");
        assert!(params.params.is_empty());
    }

    #[test]
    fn test_parse_programmer_params_errors() {
        assert!(parse_programmer_params("linux_spi:dev").is_err());
        assert!(parse_programmer_params(":dev=/dev/spidev0.0").is_err());
    }

    #[test]
    fn test_unknown_programmer() {
        assert!(open_transport("ch341a").is_err());
    }

    #[cfg(feature = "dummy")]
    #[test]
    fn test_open_dummy() {
        use mcp23s17_core::device::Mcp23s17;
        use mcp23s17_core::protocol::Register;

        let transport = open_transport("dummy:hwaddr=2").unwrap();
        let mut chip = Mcp23s17::new(transport, 2).unwrap();
        chip.init().unwrap();
        assert_eq!(chip.get_port(Register::GPPUB).unwrap(), 0xFF);

        assert!(open_transport("dummy:hwaddr=9").is_err());
    }
}
