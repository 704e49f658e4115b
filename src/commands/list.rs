//! List commands implementation

use crate::programmers;
use mcp23s17_core::protocol::Register;

/// List all supported programmers
pub fn list_programmers() {
    let programmers = programmers::available_programmers();

    if programmers.is_empty() {
        println!("No programmers available (recompile with programmer features enabled)");
        return;
    }

    println!("Supported programmers:");
    println!();
    for p in &programmers {
        let aliases = if p.aliases.is_empty() {
            String::new()
        } else {
            format!(" (aliases: {})", p.aliases.join(", "))
        };
        println!("  {:10} - {}{}", p.name, p.description, aliases);
    }
}

/// List the register map (BANK=0)
pub fn list_registers() {
    println!("{:<10} {:>7} {:>5} {:>6}", "Register", "Address", "Port", "Reset");
    println!("{}", "-".repeat(31));

    for reg in Register::ALL {
        let port = reg
            .port()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<10} {:>7} {:>5} {:>6}",
            reg.name(),
            format!("0x{:02X}", reg.addr()),
            port,
            format!("0x{:02X}", reg.reset_value())
        );
    }
}
