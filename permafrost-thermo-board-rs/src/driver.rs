//! Low-level MAX31723 register protocol.
//!
//! Implements the framed SPI exchanges the part expects: a write frame is
//! the register address with bit 7 set followed by the data byte; a read
//! frame is the bare address followed by a filler byte whose response
//! slot carries the register value. Every transaction is bounded by the
//! configured timeout so a wedged bus surfaces as an error instead of
//! stalling the caller forever.
//!
//! This module is crate-private — consumers interact with [`Max31723`]
//! in `thermo_board.rs` instead.
//!
//! [`Max31723`]: crate::Max31723

use embassy_time::{with_timeout, Duration};
use embedded_hal_async::spi::SpiDevice;

use crate::error::ThermometerError;
use crate::registers::{ADDRESS_MASK, READ_FILLER, WRITE_FLAG};

/// Low-level register access over an `SpiDevice`.
///
/// Owns the bus handle and provides bounded single-register read/write
/// primitives.
pub(crate) struct RegisterDriver<SPI> {
    spi: SPI,
    timeout: Duration,
}

impl<SPI> RegisterDriver<SPI>
where
    SPI: SpiDevice,
{
    pub fn new(spi: SPI, timeout: Duration) -> Self {
        Self { spi, timeout }
    }

    /// Write one register.
    pub async fn write_register(
        &mut self,
        address: u8,
        value: u8,
    ) -> Result<(), ThermometerError<SPI::Error>> {
        let frame = [(address & ADDRESS_MASK) | WRITE_FLAG, value];
        match with_timeout(self.timeout, self.spi.write(&frame)).await {
            Ok(result) => result?,
            Err(_) => return Err(ThermometerError::Timeout),
        }
        Ok(())
    }

    /// Read one register.
    pub async fn read_register(
        &mut self,
        address: u8,
    ) -> Result<u8, ThermometerError<SPI::Error>> {
        let mut frame = [address & ADDRESS_MASK, READ_FILLER];
        match with_timeout(self.timeout, self.spi.transfer_in_place(&mut frame)).await {
            Ok(result) => result?,
            Err(_) => return Err(ThermometerError::Timeout),
        }
        Ok(frame[1])
    }
}
