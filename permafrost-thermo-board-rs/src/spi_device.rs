//! Chip-enable framing for the MAX31723's active-high CE line.
//!
//! Generic `SpiDevice` adapters assert chip-select **low** during a
//! transaction, following the common convention. The MAX31723 latches its
//! interface while CE is **high**, so the stock bus-sharing helpers
//! cannot frame its transactions. [`CeHighDevice`] owns the bus and one
//! output pin and provides the inverted framing.

use embassy_time::{Duration, Timer};
use embedded_hal::digital::OutputPin;
use embedded_hal_async::spi::{Error as SpiError, ErrorKind, ErrorType, Operation, SpiBus, SpiDevice};

/// Exclusive-bus `SpiDevice` with active-high chip-enable framing.
///
/// Suitable when the thermometer is the only device on the bus; sharing
/// a bus across devices needs a mutex-based device implementation with
/// the same CE polarity.
pub struct CeHighDevice<BUS, CE> {
    bus: BUS,
    ce: CE,
}

impl<BUS, CE> CeHighDevice<BUS, CE> {
    /// Wrap a bus and a chip-enable pin.
    ///
    /// The pin must be configured as a push-pull output, initially low
    /// (device deselected).
    pub fn new(bus: BUS, ce: CE) -> Self {
        Self { bus, ce }
    }
}

/// Error from a [`CeHighDevice`] transaction.
#[derive(Debug)]
pub enum CeDeviceError<B, C> {
    /// The underlying bus failed.
    Spi(B),
    /// The chip-enable pin could not be driven.
    ChipEnable(C),
}

impl<B, C> SpiError for CeDeviceError<B, C>
where
    B: SpiError,
    C: core::fmt::Debug,
{
    fn kind(&self) -> ErrorKind {
        match self {
            CeDeviceError::Spi(e) => e.kind(),
            CeDeviceError::ChipEnable(_) => ErrorKind::ChipSelectFault,
        }
    }
}

#[cfg(feature = "defmt")]
impl<B: defmt::Format, C: defmt::Format> defmt::Format for CeDeviceError<B, C> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            CeDeviceError::Spi(e) => defmt::write!(f, "SPI bus error: {}", e),
            CeDeviceError::ChipEnable(e) => defmt::write!(f, "chip-enable pin error: {}", e),
        }
    }
}

impl<BUS, CE> ErrorType for CeHighDevice<BUS, CE>
where
    BUS: ErrorType,
    CE: OutputPin,
{
    type Error = CeDeviceError<BUS::Error, CE::Error>;
}

impl<BUS, CE> SpiDevice for CeHighDevice<BUS, CE>
where
    BUS: SpiBus,
    CE: OutputPin,
{
    async fn transaction(
        &mut self,
        operations: &mut [Operation<'_, u8>],
    ) -> Result<(), Self::Error> {
        self.ce.set_high().map_err(CeDeviceError::ChipEnable)?;

        let bus_result = 'ops: {
            for operation in operations.iter_mut() {
                let result = match operation {
                    Operation::Read(buf) => self.bus.read(buf).await,
                    Operation::Write(buf) => self.bus.write(buf).await,
                    Operation::Transfer(read, write) => self.bus.transfer(read, write).await,
                    Operation::TransferInPlace(buf) => self.bus.transfer_in_place(buf).await,
                    Operation::DelayNs(ns) => {
                        Timer::after(Duration::from_micros(u64::from(ns.div_ceil(1000)))).await;
                        Ok(())
                    }
                };
                if result.is_err() {
                    break 'ops result;
                }
            }
            // The bus must be idle before the part is deselected.
            self.bus.flush().await
        };

        // CE is released even when an operation failed.
        let ce_result = self.ce.set_low();

        bus_result.map_err(CeDeviceError::Spi)?;
        ce_result.map_err(CeDeviceError::ChipEnable)?;
        Ok(())
    }
}
