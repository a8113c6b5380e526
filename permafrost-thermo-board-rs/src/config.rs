//! Declarative device configuration and its register-byte encoding.

use embassy_time::Duration;

use crate::registers::{
    CFG_ONESHOT, CFG_RESOLUTION_MASK, CFG_RESOLUTION_SHIFT, CFG_SHUTDOWN, CFG_THERMOSTAT_MASK,
    CFG_THERMOSTAT_SHIFT,
};

/// Default bound on a single register transaction.
pub const DEFAULT_TRANSACTION_TIMEOUT: Duration = Duration::from_millis(50);

/// Conversion resolution, trading fractional precision against
/// conversion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// 0.5 °C steps.
    Bits9,
    /// 0.25 °C steps.
    Bits10,
    /// 0.125 °C steps.
    Bits11,
    /// 0.0625 °C steps.
    Bits12,
}

impl Resolution {
    /// Value of the R1:R0 configuration field.
    pub(crate) const fn bits(self) -> u8 {
        match self {
            Resolution::Bits9 => 0b00,
            Resolution::Bits10 => 0b01,
            Resolution::Bits11 => 0b10,
            Resolution::Bits12 => 0b11,
        }
    }

    /// Recover the resolution from the R1:R0 field of a register byte.
    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits & CFG_RESOLUTION_MASK {
            0b00 => Resolution::Bits9,
            0b01 => Resolution::Bits10,
            0b10 => Resolution::Bits11,
            _ => Resolution::Bits12,
        }
    }

    /// Worst-case conversion time at this resolution.
    pub const fn conversion_time(self) -> Duration {
        match self {
            Resolution::Bits9 => Duration::from_millis(25),
            Resolution::Bits10 => Duration::from_millis(50),
            Resolution::Bits11 => Duration::from_millis(100),
            Resolution::Bits12 => Duration::from_millis(200),
        }
    }

    /// Valid bits of the temperature LSB at this resolution.
    ///
    /// The LSB always reads back a full byte, but only the top bits up to
    /// the configured resolution carry data.
    pub(crate) const fn fraction_mask(self) -> u8 {
        match self {
            Resolution::Bits9 => 0x80,
            Resolution::Bits10 => 0xC0,
            Resolution::Bits11 => 0xE0,
            Resolution::Bits12 => 0xF0,
        }
    }
}

/// Behavior of the thermostat output when a programmed threshold trips.
///
/// The PMB1 module does not route the output pin anywhere, but the bit is
/// still part of the configuration register contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ThermostatMode {
    /// Output follows the thresholds with hysteresis.
    Comparator,
    /// Output latches until a register read clears it.
    Interrupt,
}

impl ThermostatMode {
    /// Value of the single-bit mode field.
    pub(crate) const fn bit(self) -> u8 {
        match self {
            ThermostatMode::Comparator => 0,
            ThermostatMode::Interrupt => 1,
        }
    }

    /// Recover the mode from the field of a register byte.
    pub(crate) const fn from_bit(bit: u8) -> Self {
        if bit & CFG_THERMOSTAT_MASK == 0 {
            ThermostatMode::Comparator
        } else {
            ThermostatMode::Interrupt
        }
    }
}

/// Declarative configuration for one MAX31723 instance.
///
/// Immutable once handed to [`Max31723::new`](crate::Max31723::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Conversion resolution.
    pub resolution: Resolution,
    /// Thermostat output behavior.
    pub thermostat_mode: ThermostatMode,
    /// Convert once per [`fetch`](crate::Max31723::fetch) instead of
    /// continuously, saving power between samples.
    pub oneshot: bool,
    /// Upper bound on any single bus transaction.
    pub transaction_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution: Resolution::Bits12,
            thermostat_mode: ThermostatMode::Comparator,
            oneshot: false,
            transaction_timeout: DEFAULT_TRANSACTION_TIMEOUT,
        }
    }
}

impl Config {
    /// Pack this configuration into the register byte the part expects.
    ///
    /// Enabling oneshot sets both SD and 1SHOT: the part must be shut
    /// down between conversions for the trigger bit to take effect.
    pub fn register_byte(&self) -> u8 {
        let mut byte = 0;
        if self.oneshot {
            byte |= CFG_ONESHOT | CFG_SHUTDOWN;
        }
        byte |= (self.resolution.bits() & CFG_RESOLUTION_MASK) << CFG_RESOLUTION_SHIFT;
        byte |= (self.thermostat_mode.bit() & CFG_THERMOSTAT_MASK) << CFG_THERMOSTAT_SHIFT;
        byte
    }

    /// Recover the configuration fields encoded in a register byte.
    ///
    /// The transaction timeout is not part of the hardware contract and
    /// comes back as [`DEFAULT_TRANSACTION_TIMEOUT`].
    pub fn from_register_byte(byte: u8) -> Self {
        Self {
            resolution: Resolution::from_bits(byte >> CFG_RESOLUTION_SHIFT),
            thermostat_mode: ThermostatMode::from_bit(byte >> CFG_THERMOSTAT_SHIFT),
            oneshot: byte & CFG_ONESHOT != 0,
            transaction_timeout: DEFAULT_TRANSACTION_TIMEOUT,
        }
    }
}
