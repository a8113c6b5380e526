//! The driver trait and measurement channel selector.

use core::future::Future;

use crate::sensor_api::temperature::Temperature;

/// Measurement channels a sensor may expose.
///
/// Drivers report [`Sensor::Error`] for channels their hardware does not
/// provide, so the host loop can ask generically and handle the refusal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Temperature of the air around the board.
    AmbientTemperature,
    /// Temperature of an attached external probe.
    ProbeTemperature,
    /// Temperature of the sensor die itself.
    DieTemperature,
}

/// A device that acquires samples on command and serves decoded readings.
///
/// Implementations own their bus handle exclusively; callers hold the only
/// reference and serialize access through `&mut self`. All methods are
/// expected to return promptly — drivers bound their bus transactions
/// rather than blocking forever.
///
/// # Example Implementation
///
/// ```ignore
/// struct Thermistor { adc: Adc, last: u16 }
///
/// impl Sensor for Thermistor {
///     type Error = AdcError;
///
///     async fn initialize(&mut self) -> Result<(), AdcError> {
///         self.adc.calibrate().await
///     }
///
///     async fn fetch(&mut self) -> Result<(), AdcError> {
///         self.last = self.adc.read().await?;
///         Ok(())
///     }
///
///     fn get(&self, channel: Channel) -> Result<Temperature, AdcError> {
///         match channel {
///             Channel::AmbientTemperature => Ok(decode(self.last)),
///             _ => Err(AdcError::UnsupportedChannel),
///         }
///     }
/// }
/// ```
pub trait Sensor {
    /// Driver-specific error type.
    type Error;

    /// Configure the hardware and verify it responds.
    ///
    /// Must be called once before [`fetch()`](Self::fetch); on failure the
    /// device stays unusable and may be re-initialized by calling again.
    fn initialize(&mut self) -> impl Future<Output = Result<(), Self::Error>>;

    /// Acquire a fresh sample from the hardware and cache it.
    ///
    /// On failure the previously cached sample is left untouched.
    fn fetch(&mut self) -> impl Future<Output = Result<(), Self::Error>>;

    /// Decode the cached sample for one channel.
    ///
    /// Pure with respect to driver state: no bus traffic, no mutation.
    fn get(&self, channel: Channel) -> Result<Temperature, Self::Error>;
}
