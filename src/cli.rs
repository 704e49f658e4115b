//! CLI argument parsing

use clap::{Parser, Subcommand};
use mcp23s17_core::protocol::Register;

/// Parse a string as a hex or decimal u8
fn parse_hex_u8(s: &str) -> Result<u8, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
    } else if let Some(bin) = s.strip_prefix("0b") {
        u8::from_str_radix(bin, 2).map_err(|e| format!("Invalid binary value: {}", e))
    } else {
        s.parse::<u8>().map_err(|e| format!("Invalid number: {}", e))
    }
}

/// Parse a register name (e.g. GPIOA) or address (e.g. 0x12)
fn parse_register(s: &str) -> Result<Register, String> {
    s.parse::<Register>()
        .map_err(|_| format!("Unknown register '{}' (see list-registers)", s))
}

#[derive(Parser)]
#[command(name = "mcp23s17")]
#[command(author, version, about = "MCP23S17 SPI GPIO expander tool", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options selecting the chip, shared across commands
#[derive(clap::Args, Debug, Clone)]
pub struct DeviceArgs {
    /// Programmer to use, e.g. linux_spi:dev=/dev/spidev0.0 or dummy
    #[arg(short, long)]
    pub programmer: String,

    /// Hardware address of the chip (A2..A0 pins, 0-7)
    #[arg(short, long, default_value_t = 0)]
    pub address: u8,

    /// Run the power-on configuration (IOCON, pull-ups) first
    #[arg(long)]
    pub init: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure the chip: hardware addressing on, sequential mode off, pull-ups on
    Init {
        #[command(flatten)]
        device: DeviceArgs,
    },

    /// Read a register
    Read {
        #[command(flatten)]
        device: DeviceArgs,

        /// Register name or address
        #[arg(short, long, value_parser = parse_register)]
        register: Register,
    },

    /// Write a register
    Write {
        #[command(flatten)]
        device: DeviceArgs,

        /// Register name or address
        #[arg(short, long, value_parser = parse_register)]
        register: Register,

        /// Value to write (hex, binary or decimal)
        #[arg(long, value_parser = parse_hex_u8)]
        value: u8,
    },

    /// Clear all eight bits of a register
    Reset {
        #[command(flatten)]
        device: DeviceArgs,

        /// Register name or address
        #[arg(short, long, value_parser = parse_register)]
        register: Register,
    },

    /// Show a port register bit by bit
    GetPort {
        #[command(flatten)]
        device: DeviceArgs,

        /// Register name or address
        #[arg(short, long, value_parser = parse_register)]
        register: Register,
    },

    /// Write a whole port register (0xFF = all input, 0x00 = all output for IODIR)
    SetPort {
        #[command(flatten)]
        device: DeviceArgs,

        /// Register name or address
        #[arg(short, long, value_parser = parse_register)]
        register: Register,

        /// Port value (hex, binary or decimal)
        #[arg(long, value_parser = parse_hex_u8)]
        value: u8,
    },

    /// Read one pin's bit of a register
    GetPin {
        #[command(flatten)]
        device: DeviceArgs,

        /// Register name or address
        #[arg(short, long, value_parser = parse_register)]
        register: Register,

        /// Pin within the port (0-7)
        #[arg(long)]
        pin: u8,
    },

    /// Set (1) or clear (0) one pin's bit of a register
    SetPin {
        #[command(flatten)]
        device: DeviceArgs,

        /// Register name or address
        #[arg(short, long, value_parser = parse_register)]
        register: Register,

        /// Pin within the port (0-7)
        #[arg(long)]
        pin: u8,

        /// 1 = input / set, 0 = output / clear
        #[arg(long)]
        value: u8,
    },

    /// Read and print every register
    Dump {
        #[command(flatten)]
        device: DeviceArgs,
    },

    /// List the register map
    ListRegisters,

    /// List supported programmers
    ListProgrammers,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_hex_u8() {
        assert_eq!(parse_hex_u8("0xFF").unwrap(), 0xFF);
        assert_eq!(parse_hex_u8("0b1000").unwrap(), 0x08);
        assert_eq!(parse_hex_u8("40").unwrap(), 40);
        assert!(parse_hex_u8("0x100").is_err());
        assert!(parse_hex_u8("high").is_err());
    }

    #[test]
    fn test_parse_set_pin() {
        let cli = Cli::try_parse_from([
            "mcp23s17", "set-pin", "-p", "dummy", "-a", "3", "-r", "iodira", "--pin", "3",
            "--value", "1",
        ])
        .unwrap();
        match cli.command {
            Commands::SetPin {
                device,
                register,
                pin,
                value,
            } => {
                assert_eq!(device.programmer, "dummy");
                assert_eq!(device.address, 3);
                assert!(!device.init);
                assert_eq!(register, Register::IODIRA);
                assert_eq!(pin, 3);
                assert_eq!(value, 1);
            }
            _ => panic!("expected set-pin"),
        }
    }

    #[test]
    fn test_unknown_register_rejected() {
        assert!(Cli::try_parse_from(["mcp23s17", "read", "-p", "dummy", "-r", "GPIOC"]).is_err());
    }
}
