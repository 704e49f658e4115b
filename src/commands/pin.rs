//! Port and pin commands

use mcp23s17_core::device::{Direction, Mcp23s17, Pin};
use mcp23s17_core::protocol::Register;
use mcp23s17_core::transport::SpiTransport;

/// Print a port register with one line per pin
pub fn cmd_get_port<T: SpiTransport>(
    chip: &mut Mcp23s17<T>,
    reg: Register,
) -> Result<(), Box<dyn std::error::Error>> {
    let value = chip.get_port(reg)?;
    let port = reg.port().map(|p| p.to_string()).unwrap_or_default();

    println!("{} = 0x{:02X}", reg.name(), value);
    for i in 0..=Pin::MAX {
        let pin = Pin::new(i)?;
        let bit = u8::from(value & pin.mask() != 0);
        println!("  GP{}{} = {}", port, i, bit);
    }
    Ok(())
}

/// Write a whole port register
pub fn cmd_set_port<T: SpiTransport>(
    chip: &mut Mcp23s17<T>,
    reg: Register,
    value: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    chip.set_port(reg, value)?;
    log::info!("Set {} to 0x{:02X}", reg, value);
    Ok(())
}

/// Print one pin's bit (1 or 0)
pub fn cmd_get_pin<T: SpiTransport>(
    chip: &mut Mcp23s17<T>,
    reg: Register,
    pin: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let set = chip.get_pin(reg, pin)?;
    println!("{}", u8::from(set));
    Ok(())
}

/// Set or clear one pin's bit
pub fn cmd_set_pin<T: SpiTransport>(
    chip: &mut Mcp23s17<T>,
    reg: Register,
    pin: u8,
    value: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let direction = Direction::try_from(value)?;
    chip.set_pin(reg, pin, direction)?;
    log::info!("{} pin {} set to {}", reg, pin, direction.bit());
    Ok(())
}

#[cfg(all(test, feature = "dummy"))]
mod tests {
    use super::*;
    use mcp23s17_dummy::DummyExpander;

    #[test]
    fn test_set_pin_command() {
        let mut chip = Mcp23s17::new(DummyExpander::new_default(), 0).unwrap();
        chip.set_port(Register::IODIRA, 0x00).unwrap();

        cmd_set_pin(&mut chip, Register::IODIRA, 3, 1).unwrap();
        assert_eq!(chip.get_port(Register::IODIRA).unwrap(), 0x08);

        assert!(cmd_set_pin(&mut chip, Register::IODIRA, 3, 2).is_err());
        assert!(cmd_set_pin(&mut chip, Register::IODIRA, 8, 1).is_err());
        assert_eq!(chip.get_port(Register::IODIRA).unwrap(), 0x08);
    }
}
