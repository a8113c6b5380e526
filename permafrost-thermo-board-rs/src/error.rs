//! Error types for the thermometer driver.

use core::fmt;

/// Errors that can occur when communicating with the thermometer.
#[derive(Debug)]
pub enum ThermometerError<E> {
    /// Underlying SPI bus error.
    Spi(E),

    /// `fetch` was called before a successful `initialize`.
    NotReady,

    /// The configuration register readback did not match what was written.
    ConfigMismatch {
        /// Byte written to the configuration register.
        written: u8,
        /// Byte the part reported back.
        read: u8,
    },

    /// The requested channel is not backed by this part.
    UnsupportedChannel,

    /// A bus transaction exceeded the configured bound.
    Timeout,
}

// Allow ergonomic `?` propagation from raw SPI errors.
impl<E> From<E> for ThermometerError<E> {
    fn from(error: E) -> Self {
        ThermometerError::Spi(error)
    }
}

impl<E: fmt::Debug> fmt::Display for ThermometerError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ThermometerError::Spi(e) => write!(f, "SPI error: {:?}", e),
            ThermometerError::NotReady => write!(f, "device not initialized"),
            ThermometerError::ConfigMismatch { written, read } => write!(
                f,
                "config readback mismatch (wrote {:#04x}, read {:#04x})",
                written, read
            ),
            ThermometerError::UnsupportedChannel => write!(f, "channel not backed by this part"),
            ThermometerError::Timeout => write!(f, "bus transaction timed out"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for ThermometerError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ThermometerError::Spi(e) => defmt::write!(f, "SPI error: {}", e),
            ThermometerError::NotReady => defmt::write!(f, "device not initialized"),
            ThermometerError::ConfigMismatch { written, read } => {
                defmt::write!(f, "config readback mismatch (wrote {}, read {})", written, read)
            }
            ThermometerError::UnsupportedChannel => {
                defmt::write!(f, "channel not backed by this part")
            }
            ThermometerError::Timeout => defmt::write!(f, "bus transaction timed out"),
        }
    }
}
