//! IOCON configuration register bits

use bitflags::bitflags;

bitflags! {
    /// IOCON register flags
    ///
    /// Bit 0 is unimplemented and reads as 0.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct IoconFlags: u8 {
        /// Registers of each port in separate banks (changes the register map)
        const BANK   = 0x80;
        /// INTA and INTB are internally connected
        const MIRROR = 0x40;
        /// Sequential operation disabled, the address pointer does not increment
        const SEQOP  = 0x20;
        /// Slew rate control on SDA disabled (I2C variant only)
        const DISSLW = 0x10;
        /// Hardware address pins enabled
        const HAEN   = 0x08;
        /// INT pins are open-drain (overrides INTPOL)
        const ODR    = 0x04;
        /// INT pins are active-high
        const INTPOL = 0x02;

        /// Configuration written by the power-on sequence
        const INIT = Self::HAEN.bits() | Self::SEQOP.bits();
    }
}

impl Default for IoconFlags {
    fn default() -> Self {
        IoconFlags::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iocon_bits() {
        assert_eq!(IoconFlags::BANK.bits(), 0x80);
        assert_eq!(IoconFlags::MIRROR.bits(), 0x40);
        assert_eq!(IoconFlags::SEQOP.bits(), 0x20);
        assert_eq!(IoconFlags::DISSLW.bits(), 0x10);
        assert_eq!(IoconFlags::HAEN.bits(), 0x08);
        assert_eq!(IoconFlags::ODR.bits(), 0x04);
        assert_eq!(IoconFlags::INTPOL.bits(), 0x02);
        assert_eq!(IoconFlags::INIT.bits(), 0x28);
    }

    #[test]
    fn test_unimplemented_bit_dropped() {
        let flags = IoconFlags::from_bits_truncate(0x29);
        assert_eq!(flags, IoconFlags::INIT);
    }
}
