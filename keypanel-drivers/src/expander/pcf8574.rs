//! PCF8574 / PCF8574A 8-bit I/O expander
//!
//! The chip has no registers: a write sets the output latches, a read
//! returns the pin levels. A pin only works as an input while its latch is
//! high (weak pull-up), so [`Pcf8574::configure_inputs`] writes `0xFF`
//! before any reads. Buttons pull their pin to ground, which is why
//! [`Pcf8574::read_pressed`] inverts the port.

use keypanel_core::{ChannelSet, ExpanderAddress};
use keypanel_hal::I2cBus;

/// Base address of the PCF8574 (A2..A0 low)
pub const PCF8574_BASE: u8 = 0x20;

/// Base address of the PCF8574A (A2..A0 low)
pub const PCF8574A_BASE: u8 = 0x38;

/// Latch value that turns every pin into an input
pub const ALL_INPUTS: u8 = 0xFF;

/// Error from an explicit expander operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExpanderError {
    /// The bus transaction failed (usually: chip not acknowledging)
    Bus,
}

/// Chip variant, which fixes the upper address bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    /// Addresses 0x20..=0x27
    Pcf8574,
    /// Addresses 0x38..=0x3F
    Pcf8574A,
}

impl Variant {
    /// Bus address for the given A2..A0 strap pins
    pub fn address(self, pins: u8) -> ExpanderAddress {
        let base = match self {
            Variant::Pcf8574 => PCF8574_BASE,
            Variant::Pcf8574A => PCF8574A_BASE,
        };
        ExpanderAddress::truncate(base | (pins & 0x07))
    }

    /// Variant that owns `address`, if it is in either range
    pub fn of(address: ExpanderAddress) -> Option<Self> {
        match address.get() {
            0x20..=0x27 => Some(Variant::Pcf8574),
            0x38..=0x3F => Some(Variant::Pcf8574A),
            _ => None,
        }
    }
}

/// PCF8574 driver
///
/// Holds only the address; the bus is passed to each call so the same bus
/// can serve the display between transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pcf8574 {
    address: ExpanderAddress,
}

impl Pcf8574 {
    /// Driver for the chip at `address`
    pub const fn new(address: ExpanderAddress) -> Self {
        Self { address }
    }

    /// Driver for a chip of `variant` strapped to `pins`
    pub fn with_pins(variant: Variant, pins: u8) -> Self {
        Self::new(variant.address(pins))
    }

    /// Bus address of the chip
    pub fn address(&self) -> ExpanderAddress {
        self.address
    }

    /// Set the output latches
    pub fn write_port<B: I2cBus>(&self, bus: &mut B, value: u8) -> Result<(), ExpanderError> {
        bus.write(self.address.get(), &[value])
            .map_err(|_| ExpanderError::Bus)
    }

    /// Read the pin levels
    pub fn read_port<B: I2cBus>(&self, bus: &mut B) -> Result<u8, ExpanderError> {
        bus.read_byte(self.address.get())
            .map_err(|_| ExpanderError::Bus)
    }

    /// Release every latch so all eight pins read as inputs
    pub fn configure_inputs<B: I2cBus>(&self, bus: &mut B) -> Result<(), ExpanderError> {
        self.write_port(bus, ALL_INPUTS)
    }

    /// Returns true if the chip acknowledges a read
    pub fn detect<B: I2cBus>(&self, bus: &mut B) -> bool {
        bus.probe(self.address.get())
    }

    /// Undebounced pressed mask (pin low = pressed)
    ///
    /// An absent or failing chip reads as nothing pressed.
    pub fn read_pressed<B: I2cBus>(&self, bus: &mut B) -> ChannelSet {
        match self.read_port(bus) {
            Ok(port) => ChannelSet::from_bits(!port),
            Err(_) => ChannelSet::EMPTY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeChip {
        present: bool,
        latch: u8,
        pins: u8,
    }

    impl FakeChip {
        fn new(pins: u8) -> Self {
            Self {
                present: true,
                latch: 0x00,
                pins,
            }
        }
    }

    impl I2cBus for FakeChip {
        type Error = ();

        fn write(&mut self, _address: u8, data: &[u8]) -> Result<(), ()> {
            if !self.present {
                return Err(());
            }
            self.latch = data[0];
            Ok(())
        }

        fn read(&mut self, _address: u8, buf: &mut [u8]) -> Result<(), ()> {
            if !self.present {
                return Err(());
            }
            // A low latch drives its pin low
            buf[0] = self.pins & self.latch;
            Ok(())
        }
    }

    fn chip_at(address: u8) -> Pcf8574 {
        Pcf8574::new(ExpanderAddress::new(address).unwrap())
    }

    #[test]
    fn test_variant_addresses() {
        assert_eq!(Variant::Pcf8574.address(0).get(), 0x20);
        assert_eq!(Variant::Pcf8574.address(7).get(), 0x27);
        assert_eq!(Variant::Pcf8574A.address(0).get(), 0x38);
        assert_eq!(Variant::Pcf8574A.address(0xFF).get(), 0x3F);
        assert_eq!(Pcf8574::with_pins(Variant::Pcf8574A, 2).address().get(), 0x3A);
    }

    #[test]
    fn test_variant_of_address() {
        let of = |a| Variant::of(ExpanderAddress::new(a).unwrap());
        assert_eq!(of(0x24), Some(Variant::Pcf8574));
        assert_eq!(of(0x3C), Some(Variant::Pcf8574A));
        assert_eq!(of(0x50), None);
    }

    #[test]
    fn test_configure_inputs_releases_latches() {
        let mut bus = FakeChip::new(0b1111_1110);
        let chip = chip_at(0x20);

        // Latches low: every pin reads low
        assert_eq!(chip.read_port(&mut bus), Ok(0x00));

        chip.configure_inputs(&mut bus).unwrap();
        assert_eq!(bus.latch, ALL_INPUTS);
        assert_eq!(chip.read_port(&mut bus), Ok(0b1111_1110));
    }

    #[test]
    fn test_read_pressed_inverts() {
        let mut bus = FakeChip::new(0b1001_1111);
        let chip = chip_at(0x21);
        chip.configure_inputs(&mut bus).unwrap();

        let pressed = chip.read_pressed(&mut bus);
        assert_eq!(pressed.bits(), 0b0110_0000);
        assert!(pressed.contains(5));
        assert!(pressed.contains(6));
    }

    #[test]
    fn test_absent_chip() {
        let mut bus = FakeChip::new(0x00);
        bus.present = false;
        let chip = chip_at(0x27);

        assert!(!chip.detect(&mut bus));
        assert_eq!(chip.configure_inputs(&mut bus), Err(ExpanderError::Bus));
        assert_eq!(chip.read_port(&mut bus), Err(ExpanderError::Bus));
        assert_eq!(chip.read_pressed(&mut bus), ChannelSet::EMPTY);
    }

    #[test]
    fn test_detect_present_chip() {
        let mut bus = FakeChip::new(0xFF);
        assert!(chip_at(0x20).detect(&mut bus));
    }
}
