//! Async driver for the MAX31723 digital thermometer.
//!
//! This crate provides an Embassy-compatible async SPI driver for the
//! MAX31723 SPI/3-wire digital thermometer (as found on the PMB1
//! peripheral module), covering configuration, sample acquisition in
//! continuous or oneshot mode, and decoding of the raw register pair.
//!
//! # Architecture
//!
//! The crate is split into layers:
//!
//! - **`driver`** (crate-private) — Low-level register protocol
//!   primitives that handle frame layout and transaction bounding.
//! - **[`Max31723`]** (public) — Validated high-level API implementing
//!   the configure / fetch / decode lifecycle and the
//!   [`permafrost::Sensor`] trait.
//! - **[`CeHighDevice`]** (public) — Exclusive-bus `SpiDevice` adapter
//!   for the part's active-high chip-enable line.
//!
//! # Quick start
//!
//! ```ignore
//! use permafrost::{Channel, Sensor};
//! use thermometer_driver::{CeHighDevice, Config, Max31723};
//!
//! // `spi` is any `embedded-hal-async` SPI bus; `ce` its chip-enable pin
//! let mut sensor = Max31723::new(CeHighDevice::new(spi, ce), Config::default());
//!
//! sensor.initialize().await?;
//! sensor.fetch().await?;
//! let reading = sensor.get(Channel::AmbientTemperature)?;
//! ```
//!
//! # Features
//!
//! - **`defmt`** — Enable [`defmt::Format`] implementations on
//!   configuration and error types for embedded logging.

#![cfg_attr(not(test), no_std)]

pub use config::{Config, Resolution, ThermostatMode, DEFAULT_TRANSACTION_TIMEOUT};
pub use error::ThermometerError;
pub use spi_device::{CeDeviceError, CeHighDevice};
pub use thermo_board::Max31723;

mod config;
mod driver;
mod error;
mod registers;
mod spi_device;
mod thermo_board;

#[cfg(test)]
mod test_support;
