//! I2C bus abstractions
//!
//! The button panel shares one two-wire bus with the display. Every method
//! here is one complete transaction (start, transfer, stop); the `&mut self`
//! receiver is what keeps two users from interleaving on the wire.

/// I2C bus master
///
/// Provides the bus transaction primitive the expander poller consumes.
/// Start/stop framing, acknowledgement and timeouts are handled by the
/// implementation.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Read a single byte in one transaction
    ///
    /// Port expanders without register addressing (PCF8574 and friends)
    /// return their whole input port this way.
    fn read_byte(&mut self, address: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read(address, &mut buf)?;
        Ok(buf[0])
    }

    /// Check whether a device acknowledges its address
    fn probe(&mut self, address: u8) -> bool {
        self.read_byte(address).is_ok()
    }
}

impl<B: I2cBus + ?Sized> I2cBus for &mut B {
    type Error = B::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read(address, buf)
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz), the PCF8574 maximum
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };
}
