//! Generic sensor access: channels, readings, and the driver trait.
//!
//! # Architecture
//!
//! The API follows a fetch-then-get split: [`Sensor::fetch()`] performs the
//! bus traffic needed to acquire a fresh sample and caches the raw result
//! inside the driver, while [`Sensor::get()`] decodes the cached sample for
//! one [`Channel`] without touching the bus. The host can therefore fetch
//! once and read several channels, and a failed fetch never corrupts the
//! previously cached reading.
//!
//! # `no_std` Compatibility
//!
//! No heap allocation and no floating point: temperatures are carried as a
//! sign-consistent integer/micro-degree pair. The optional `defmt` feature
//! enables structured logging for embedded targets.

mod sensor;
mod temperature;

#[cfg(feature = "fake")]
pub mod fake;

pub use sensor::{Channel, Sensor};
pub use temperature::Temperature;
