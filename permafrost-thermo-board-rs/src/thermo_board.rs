//! High-level interface for the MAX31723 digital thermometer.
//!
//! [`Max31723`] wraps the low-level register driver with the device
//! lifecycle: configuration write and verification, sample acquisition
//! (with the oneshot trigger-and-wait sequence), and decoding the raw
//! register pair into the shared [`Temperature`] representation.

use embassy_time::Timer;
use embedded_hal_async::spi::SpiDevice;
use permafrost::{Channel, Sensor, Temperature};

use crate::config::{Config, Resolution};
use crate::driver::RegisterDriver;
use crate::error::ThermometerError;
use crate::registers::{CFG_ONESHOT, CONFIG, TEMP_LSB, TEMP_MSB};

const MICRODEGREES_PER_DEGREE: u32 = 1_000_000;

/// Raw words at or above this threshold report below-zero readings.
const RAW_NEGATIVE_THRESHOLD: u16 = 0x8000;

/// High-level interface for the MAX31723 digital thermometer.
///
/// Provides the configure / fetch / decode lifecycle over SPI and
/// implements the [`permafrost::Sensor`] trait so host loops can stay
/// generic over the attached part.
///
/// # Example
///
/// ```ignore
/// use permafrost::{Channel, Sensor};
/// use thermometer_driver::{Config, Max31723};
///
/// // `spi` is any `embedded-hal-async` SPI device with CE framing
/// let mut sensor = Max31723::new(spi, Config::default());
///
/// sensor.initialize().await?;
/// sensor.fetch().await?;
/// let reading = sensor.get(Channel::AmbientTemperature)?;
/// ```
pub struct Max31723<SPI> {
    driver: RegisterDriver<SPI>,
    config: Config,
    last_raw: u16,
    ready: bool,
}

impl<SPI> Max31723<SPI>
where
    SPI: SpiDevice,
{
    /// Create a new driver instance.
    ///
    /// # Arguments
    /// * `spi` — SPI device with chip-enable framing (takes ownership for
    ///   exclusive access). The part latches while CE is **high**; see
    ///   [`CeHighDevice`](crate::CeHighDevice).
    /// * `config` — declarative instance configuration.
    pub fn new(spi: SPI, config: Config) -> Self {
        Self {
            driver: RegisterDriver::new(spi, config.transaction_timeout),
            config,
            last_raw: 0,
            ready: false,
        }
    }

    /// The configuration this instance was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Write the configuration register and verify the part accepted it.
    ///
    /// Must succeed once before [`fetch()`](Self::fetch). The readback
    /// comparison ignores the 1SHOT bit, which the part clears on its own
    /// once a triggered conversion completes.
    ///
    /// # Errors
    /// * [`ThermometerError::Spi`] / [`ThermometerError::Timeout`] on bus
    ///   failure — the device stays unusable; calling again retries.
    /// * [`ThermometerError::ConfigMismatch`] if the part reports back a
    ///   different configuration than was written.
    pub async fn initialize(&mut self) -> Result<(), ThermometerError<SPI::Error>> {
        let written = self.config.register_byte();
        self.driver.write_register(CONFIG, written).await?;

        let read = self.driver.read_register(CONFIG).await?;
        if read & !CFG_ONESHOT != written & !CFG_ONESHOT {
            return Err(ThermometerError::ConfigMismatch { written, read });
        }

        self.ready = true;
        Ok(())
    }

    /// Acquire a fresh sample and cache the raw register pair.
    ///
    /// In oneshot mode this first arms a conversion (read-modify-write of
    /// the configuration register) and waits out the conversion time for
    /// the configured resolution. The cached sample is replaced only
    /// after both temperature bytes are read successfully; any failure
    /// leaves the previous sample intact.
    ///
    /// # Errors
    /// * [`ThermometerError::NotReady`] before a successful
    ///   [`initialize()`](Self::initialize).
    /// * [`ThermometerError::Spi`] / [`ThermometerError::Timeout`] on bus
    ///   failure.
    pub async fn fetch(&mut self) -> Result<(), ThermometerError<SPI::Error>> {
        if !self.ready {
            return Err(ThermometerError::NotReady);
        }

        if self.config.oneshot {
            let cfg = self.driver.read_register(CONFIG).await?;
            self.driver.write_register(CONFIG, cfg | CFG_ONESHOT).await?;
            Timer::after(self.config.resolution.conversion_time()).await;
        }

        let low = self.driver.read_register(TEMP_LSB).await?;
        let high = self.driver.read_register(TEMP_MSB).await?;

        self.last_raw = u16::from(low) | (u16::from(high) << 8);
        Ok(())
    }

    /// Decode the cached sample for one channel.
    ///
    /// Only [`Channel::AmbientTemperature`] is backed by this part; any
    /// other channel fails without touching driver state. Before the
    /// first successful [`fetch()`](Self::fetch) the cached sample is
    /// zero and decodes to 0 °C.
    ///
    /// # Errors
    /// * [`ThermometerError::UnsupportedChannel`] for channels the part
    ///   does not measure.
    pub fn get(&self, channel: Channel) -> Result<Temperature, ThermometerError<SPI::Error>> {
        if channel != Channel::AmbientTemperature {
            return Err(ThermometerError::UnsupportedChannel);
        }
        Ok(decode_temperature(self.last_raw, self.config.resolution))
    }
}

impl<SPI> Sensor for Max31723<SPI>
where
    SPI: SpiDevice,
{
    type Error = ThermometerError<SPI::Error>;

    async fn initialize(&mut self) -> Result<(), Self::Error> {
        Max31723::initialize(self).await
    }

    async fn fetch(&mut self) -> Result<(), Self::Error> {
        Max31723::fetch(self).await
    }

    fn get(&self, channel: Channel) -> Result<Temperature, Self::Error> {
        Max31723::get(self, channel)
    }
}

/// Convert the raw register pair into the integer/micro-degree pair.
///
/// The MSB is the integer part and the upper nibble of the LSB carries
/// the fraction. The sign is decided by threshold: words at or above
/// 0x8000 report below-zero readings, with integer and fraction both
/// negated so the pair stays sign-consistent. Fraction bits beyond the
/// configured resolution are discarded.
fn decode_temperature(raw: u16, resolution: Resolution) -> Temperature {
    let integer = i32::from(raw >> 8);
    let fraction_bits = u32::from(raw) & u32::from(resolution.fraction_mask());
    let micro = ((fraction_bits * MICRODEGREES_PER_DEGREE) >> 8) as i32;

    if raw < RAW_NEGATIVE_THRESHOLD {
        Temperature::from_parts(integer, micro)
    } else {
        Temperature::from_parts(-integer, -micro)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    use crate::config::ThermostatMode;
    use crate::test_support::{MockSpi, Transaction};

    const CONTINUOUS_12BIT: u8 = 0b0000_0110;
    const ONESHOT_9BIT: u8 = 0b0001_0001;

    /// Script for a successful `initialize()` of the default config.
    fn init_script() -> Vec<Transaction> {
        vec![
            Transaction::Write([0x80, CONTINUOUS_12BIT]),
            Transaction::Transfer([0x00, 0xFF], [0x00, CONTINUOUS_12BIT]),
        ]
    }

    /// Script for a successful `fetch()` reading `raw` (continuous mode).
    fn fetch_script(raw: u16) -> Vec<Transaction> {
        vec![
            Transaction::Transfer([0x01, 0xFF], [0x00, raw as u8]),
            Transaction::Transfer([0x02, 0xFF], [0x00, (raw >> 8) as u8]),
        ]
    }

    fn initialized_board(extra: Vec<Transaction>) -> Max31723<MockSpi> {
        let mut script = init_script();
        script.extend(extra);
        let mut board = Max31723::new(MockSpi::new(script), Config::default());
        block_on(board.initialize()).unwrap();
        board
    }

    // ── initialize ───────────────────────────────────────────────────

    #[test]
    fn initialize_writes_config_and_verifies_readback() {
        let board = initialized_board(vec![]);
        assert_eq!(board.config().register_byte(), CONTINUOUS_12BIT);
    }

    #[test]
    fn initialize_rejects_config_mismatch() {
        let script = vec![
            Transaction::Write([0x80, CONTINUOUS_12BIT]),
            Transaction::Transfer([0x00, 0xFF], [0x00, 0x00]),
        ];
        let mut board = Max31723::new(MockSpi::new(script), Config::default());

        let result = block_on(board.initialize());
        assert!(matches!(
            result,
            Err(ThermometerError::ConfigMismatch {
                written: CONTINUOUS_12BIT,
                read: 0x00,
            })
        ));

        // The device stays unusable after a failed initialize.
        assert!(matches!(
            block_on(board.fetch()),
            Err(ThermometerError::NotReady)
        ));
    }

    #[test]
    fn initialize_ignores_the_self_clearing_oneshot_bit() {
        let config = Config {
            resolution: Resolution::Bits9,
            oneshot: true,
            ..Config::default()
        };
        let script = vec![
            Transaction::Write([0x80, ONESHOT_9BIT]),
            // 1SHOT already cleared by a completed conversion.
            Transaction::Transfer([0x00, 0xFF], [0x00, ONESHOT_9BIT & !CFG_ONESHOT]),
        ];
        let mut board = Max31723::new(MockSpi::new(script), config);
        block_on(board.initialize()).unwrap();
    }

    #[test]
    fn initialize_propagates_bus_errors() {
        let script = vec![Transaction::WriteError([0x80, CONTINUOUS_12BIT])];
        let mut board = Max31723::new(MockSpi::new(script), Config::default());
        assert!(matches!(
            block_on(board.initialize()),
            Err(ThermometerError::Spi(_))
        ));
    }

    // ── fetch ────────────────────────────────────────────────────────

    #[test]
    fn fetch_before_initialize_fails() {
        let mut board = Max31723::new(MockSpi::new(vec![]), Config::default());
        assert!(matches!(
            block_on(board.fetch()),
            Err(ThermometerError::NotReady)
        ));
    }

    #[test]
    fn fetch_combines_low_and_high_bytes() {
        let mut board = initialized_board(fetch_script(0x1980));
        block_on(board.fetch()).unwrap();

        let reading = board.get(Channel::AmbientTemperature).unwrap();
        assert_eq!(reading, Temperature::from_parts(25, 500_000));
    }

    #[test]
    fn fetch_failure_on_low_byte_preserves_cached_sample() {
        let mut extra = fetch_script(0x1980);
        extra.push(Transaction::TransferError([0x01, 0xFF]));
        let mut board = initialized_board(extra);

        block_on(board.fetch()).unwrap();
        assert!(matches!(
            block_on(board.fetch()),
            Err(ThermometerError::Spi(_))
        ));

        let reading = board.get(Channel::AmbientTemperature).unwrap();
        assert_eq!(reading, Temperature::from_parts(25, 500_000));
    }

    #[test]
    fn fetch_failure_on_high_byte_preserves_cached_sample() {
        let mut extra = fetch_script(0x1980);
        // Second fetch: low byte succeeds, high byte fails.
        extra.push(Transaction::Transfer([0x01, 0xFF], [0x00, 0xF0]));
        extra.push(Transaction::TransferError([0x02, 0xFF]));
        let mut board = initialized_board(extra);

        block_on(board.fetch()).unwrap();
        assert!(matches!(
            block_on(board.fetch()),
            Err(ThermometerError::Spi(_))
        ));

        // The half-read sample must not leak into the cache.
        let reading = board.get(Channel::AmbientTemperature).unwrap();
        assert_eq!(reading, Temperature::from_parts(25, 500_000));
    }

    #[test]
    fn oneshot_fetch_arms_a_conversion_before_reading() {
        let config = Config {
            resolution: Resolution::Bits9,
            thermostat_mode: ThermostatMode::Comparator,
            oneshot: true,
            ..Config::default()
        };
        let script = vec![
            Transaction::Write([0x80, ONESHOT_9BIT]),
            Transaction::Transfer([0x00, 0xFF], [0x00, ONESHOT_9BIT]),
            // fetch: re-arm 1SHOT, then read both temperature bytes.
            Transaction::Transfer([0x00, 0xFF], [0x00, ONESHOT_9BIT & !CFG_ONESHOT]),
            Transaction::Write([0x80, ONESHOT_9BIT]),
            Transaction::Transfer([0x01, 0xFF], [0x00, 0x80]),
            Transaction::Transfer([0x02, 0xFF], [0x00, 0x19]),
        ];
        let mut board = Max31723::new(MockSpi::new(script), config);

        block_on(board.initialize()).unwrap();
        block_on(board.fetch()).unwrap();

        let reading = board.get(Channel::AmbientTemperature).unwrap();
        assert_eq!(reading, Temperature::from_parts(25, 500_000));
    }

    // ── get ──────────────────────────────────────────────────────────

    #[test]
    fn get_rejects_unsupported_channels() {
        let mut board = initialized_board(fetch_script(0x1980));
        block_on(board.fetch()).unwrap();

        for channel in [Channel::ProbeTemperature, Channel::DieTemperature] {
            assert!(matches!(
                board.get(channel),
                Err(ThermometerError::UnsupportedChannel)
            ));
        }

        // The rejection leaves the cached sample untouched.
        assert_eq!(
            board.get(Channel::AmbientTemperature).unwrap(),
            Temperature::from_parts(25, 500_000)
        );
    }

    #[test]
    fn get_before_any_fetch_reads_zero() {
        let board = initialized_board(vec![]);
        assert_eq!(
            board.get(Channel::AmbientTemperature).unwrap(),
            Temperature::ZERO
        );
    }

    // ── decode ───────────────────────────────────────────────────────

    #[test]
    fn decode_positive_reading() {
        assert_eq!(
            decode_temperature(0x1980, Resolution::Bits12),
            Temperature::from_parts(25, 500_000)
        );
    }

    #[test]
    fn decode_negative_reading() {
        assert_eq!(
            decode_temperature(0xE700, Resolution::Bits12),
            Temperature::from_parts(-231, 0)
        );
        assert_eq!(
            decode_temperature(0xE780, Resolution::Bits12),
            Temperature::from_parts(-231, -500_000)
        );
    }

    #[test]
    fn decode_sign_pair_stays_consistent() {
        let positives = [0x0000, 0x0010, 0x00F0, 0x1980, 0x7FF0];
        for raw in positives {
            let t = decode_temperature(raw, Resolution::Bits12);
            assert_eq!(t.degrees(), i32::from(raw >> 8));
            assert!(t.micro_degrees() >= 0, "raw {:#06x}", raw);
        }

        let negatives = [0x8000, 0xC880, 0xE700, 0xFFF0];
        for raw in negatives {
            let t = decode_temperature(raw, Resolution::Bits12);
            assert!(t.degrees() <= 0, "raw {:#06x}", raw);
            assert!(t.micro_degrees() <= 0, "raw {:#06x}", raw);
        }
    }

    #[test]
    fn decode_is_deterministic() {
        for raw in [0x1980u16, 0xE780] {
            assert_eq!(
                decode_temperature(raw, Resolution::Bits10),
                decode_temperature(raw, Resolution::Bits10)
            );
        }
    }

    #[test]
    fn decode_masks_fraction_bits_beyond_the_resolution() {
        assert_eq!(
            decode_temperature(0x19F0, Resolution::Bits9).micro_degrees(),
            500_000
        );
        assert_eq!(
            decode_temperature(0x19F0, Resolution::Bits10).micro_degrees(),
            750_000
        );
        assert_eq!(
            decode_temperature(0x19F0, Resolution::Bits11).micro_degrees(),
            875_000
        );
        assert_eq!(
            decode_temperature(0x19F0, Resolution::Bits12).micro_degrees(),
            937_500
        );
    }

    #[test]
    fn decode_ignores_the_invalid_low_nibble() {
        assert_eq!(
            decode_temperature(0x198F, Resolution::Bits12),
            decode_temperature(0x1980, Resolution::Bits12)
        );
    }
}
