//! Whole-register commands

use mcp23s17_core::device::Mcp23s17;
use mcp23s17_core::protocol::{IoconFlags, Register};
use mcp23s17_core::transport::SpiTransport;

/// Read a register and print its value
pub fn cmd_read<T: SpiTransport>(
    chip: &mut Mcp23s17<T>,
    reg: Register,
) -> Result<(), Box<dyn std::error::Error>> {
    let value = chip.read_register(reg)?;
    println!("{} = 0x{:02X}", reg.name(), value);
    Ok(())
}

/// Write a register
pub fn cmd_write<T: SpiTransport>(
    chip: &mut Mcp23s17<T>,
    reg: Register,
    value: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    chip.write_register(reg, value)?;
    log::info!("Wrote 0x{:02X} to {}", value, reg);
    Ok(())
}

/// Clear a register
pub fn cmd_reset<T: SpiTransport>(
    chip: &mut Mcp23s17<T>,
    reg: Register,
) -> Result<(), Box<dyn std::error::Error>> {
    chip.reset_all_pins(reg)?;
    log::info!("Cleared {}", reg);
    Ok(())
}

/// Print every register
pub fn cmd_dump<T: SpiTransport>(
    chip: &mut Mcp23s17<T>,
) -> Result<(), Box<dyn std::error::Error>> {
    let values = chip.dump_registers()?;

    println!("MCP23S17 at address {}", chip.address());
    println!("========================");
    for reg in Register::ALL {
        let value = values[reg.addr() as usize];
        println!("{:<10} 0x{:02X}  {:08b}", reg.name(), value, value);
    }

    let iocon = IoconFlags::from_bits_truncate(values[Register::IOCON.addr() as usize]);
    println!();
    println!("IOCON flags: {:?}", iocon);
    Ok(())
}
