//! `embedded-hal` bus adapter
//!
//! Wraps any `embedded_hal::i2c::I2c` so the panel can use it as its bus
//! transaction primitive. Errors are reduced to a small copyable kind; the
//! poller never sees them except as "read failed".

use embedded_hal::i2c::{Error as _, ErrorKind, I2c, NoAcknowledgeSource};
use keypanel_hal::I2cBus;

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Bus error (misplaced start/stop)
    Bus,
    /// Arbitration lost to another master
    ArbitrationLost,
    /// Device did not acknowledge its address
    AddressNack,
    /// Device did not acknowledge a data byte
    DataNack,
    /// Overrun
    Overrun,
    /// Other error
    Other,
}

impl From<ErrorKind> for BusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => BusError::Bus,
            ErrorKind::ArbitrationLoss => BusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data) => BusError::DataNack,
            ErrorKind::NoAcknowledge(_) => BusError::AddressNack,
            ErrorKind::Overrun => BusError::Overrun,
            _ => BusError::Other,
        }
    }
}

/// [`I2cBus`] implementation over an `embedded-hal` 1.0 I2C peripheral
pub struct EmbeddedHalBus<I> {
    i2c: I,
}

impl<I: I2c> EmbeddedHalBus<I> {
    /// Wrap an I2C peripheral (or a `&mut` to one)
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Give the peripheral back
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> I2cBus for EmbeddedHalBus<I> {
    type Error = BusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(address, data).map_err(|e| {
            let error = BusError::from(e.kind());
            #[cfg(feature = "defmt")]
            defmt::warn!("i2c write to {=u8:#x} failed: {}", address, error);
            error
        })
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.read(address, buf).map_err(|e| {
            let error = BusError::from(e.kind());
            #[cfg(feature = "defmt")]
            defmt::warn!("i2c read from {=u8:#x} failed: {}", address, error);
            error
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec;

    use super::*;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    #[test]
    fn test_read_write_forwarded() {
        let expectations = [
            I2cTransaction::write(0x20, vec![0xFF]),
            I2cTransaction::read(0x20, vec![0xFE]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut bus = EmbeddedHalBus::new(&mut i2c);

        assert_eq!(bus.write(0x20, &[0xFF]), Ok(()));
        assert_eq!(bus.read_byte(0x20), Ok(0xFE));

        i2c.done();
    }

    #[test]
    fn test_release_returns_peripheral() {
        let expectations = [I2cTransaction::read(0x27, vec![0x7F])];
        let mut bus = EmbeddedHalBus::new(I2cMock::new(&expectations));

        assert_eq!(bus.read_byte(0x27), Ok(0x7F));

        let mut i2c = bus.release();
        i2c.done();
    }

    #[test]
    fn test_nack_maps_to_bus_error() {
        let expectations = [I2cTransaction::read(0x21, vec![0x00])
            .with_error(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))];
        let mut i2c = I2cMock::new(&expectations);
        let mut bus = EmbeddedHalBus::new(&mut i2c);

        assert_eq!(bus.read_byte(0x21), Err(BusError::AddressNack));

        i2c.done();
    }

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(BusError::from(ErrorKind::Bus), BusError::Bus);
        assert_eq!(
            BusError::from(ErrorKind::ArbitrationLoss),
            BusError::ArbitrationLost
        );
        assert_eq!(
            BusError::from(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)),
            BusError::DataNack
        );
        assert_eq!(
            BusError::from(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown)),
            BusError::AddressNack
        );
        assert_eq!(BusError::from(ErrorKind::Other), BusError::Other);
    }
}
