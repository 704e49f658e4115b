//! mcp23s17 - Command line access to MCP23S17 GPIO expanders
//!
//! Every command opens the selected programmer, creates a handle for the
//! chip at the given hardware address and performs one or more register
//! transactions. The chip holds all state; nothing is cached between runs.

mod cli;
mod commands;
mod programmers;

use clap::Parser;
use cli::{Cli, Commands, DeviceArgs};
use mcp23s17_core::device::Mcp23s17;
use programmers::{open_transport, BoxedTransport};

/// Handle type used by all commands
pub type Expander = Mcp23s17<BoxedTransport>;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Set log level based on verbosity
    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match cli.command {
        Commands::Init { device } => {
            let mut chip = open_expander(&device)?;
            if !device.init {
                chip.init()?;
            }
            Ok(())
        }
        Commands::Read { device, register } => {
            let mut chip = open_expander(&device)?;
            commands::register::cmd_read(&mut chip, register)
        }
        Commands::Write {
            device,
            register,
            value,
        } => {
            let mut chip = open_expander(&device)?;
            commands::register::cmd_write(&mut chip, register, value)
        }
        Commands::Reset { device, register } => {
            let mut chip = open_expander(&device)?;
            commands::register::cmd_reset(&mut chip, register)
        }
        Commands::Dump { device } => {
            let mut chip = open_expander(&device)?;
            commands::register::cmd_dump(&mut chip)
        }
        Commands::GetPort { device, register } => {
            let mut chip = open_expander(&device)?;
            commands::pin::cmd_get_port(&mut chip, register)
        }
        Commands::SetPort {
            device,
            register,
            value,
        } => {
            let mut chip = open_expander(&device)?;
            commands::pin::cmd_set_port(&mut chip, register, value)
        }
        Commands::GetPin {
            device,
            register,
            pin,
        } => {
            let mut chip = open_expander(&device)?;
            commands::pin::cmd_get_pin(&mut chip, register, pin)
        }
        Commands::SetPin {
            device,
            register,
            pin,
            value,
        } => {
            let mut chip = open_expander(&device)?;
            commands::pin::cmd_set_pin(&mut chip, register, pin, value)
        }
        Commands::ListRegisters => {
            commands::list_registers();
            Ok(())
        }
        Commands::ListProgrammers => {
            commands::list_programmers();
            Ok(())
        }
    }
}

/// Open the programmer and create a handle for the selected chip
fn open_expander(args: &DeviceArgs) -> Result<Expander, Box<dyn std::error::Error>> {
    let transport = open_transport(&args.programmer)?;
    let mut chip = Mcp23s17::new(transport, args.address)?;

    if args.init {
        chip.init()?;
    }

    Ok(chip)
}
