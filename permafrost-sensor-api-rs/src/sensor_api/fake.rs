//! Fake sensor for host-side tests.

use core::convert::Infallible;

use crate::sensor_api::sensor::{Channel, Sensor};
use crate::sensor_api::temperature::Temperature;

/// A fake sensor that reports a programmable fixed temperature.
///
/// `initialize` and `fetch` always succeed, and `get` returns the scripted
/// reading for every channel, so host logic can be exercised without
/// hardware attached.
pub struct FakeSensor {
    temperature: Temperature,
}

impl FakeSensor {
    /// Create a fake sensor that will report `temperature`.
    pub const fn new(temperature: Temperature) -> Self {
        Self { temperature }
    }

    /// The currently scripted reading.
    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    /// Change the scripted reading.
    pub fn set_temperature(&mut self, temperature: Temperature) {
        self.temperature = temperature;
    }
}

impl Sensor for FakeSensor {
    type Error = Infallible;

    async fn initialize(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    async fn fetch(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn get(&self, _channel: Channel) -> Result<Temperature, Infallible> {
        Ok(self.temperature)
    }
}
