//! Simple thermometer example
//!
//! Demonstrates basic usage of the thermometer-driver crate on the
//! Raspberry Pi Pico 2. Configures the MAX31723 for oneshot 12-bit
//! conversions, polls once per second, and logs readings via defmt.
//! A failed cycle is logged and polling continues.
//!
//! # Wiring
//!
//! | Signal   | Pico 2 Pin | Notes                       |
//! |----------|------------|-----------------------------|
//! | SPI0 SCK | GP18       |                             |
//! | SPI0 TX  | GP19       | MOSI (part's SDI)           |
//! | SPI0 RX  | GP16       | MISO (part's SDO)           |
//! | CE       | GP17       | Active-high chip enable     |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::spi::{self, Phase, Polarity, Spi};
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use permafrost::{Channel, Sensor};
use thermometer_driver::{CeHighDevice, Config, Max31723, Resolution};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // --- SPI0 bus (GP18 = SCK, GP19 = TX, GP16 = RX), mode 1, 1 MHz ---
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 1_000_000;
    spi_config.polarity = Polarity::IdleLow;
    spi_config.phase = Phase::CaptureOnSecondTransition;
    let spi = Spi::new(
        p.SPI0,
        p.PIN_18, // SCK
        p.PIN_19, // TX
        p.PIN_16, // RX
        p.DMA_CH0,
        p.DMA_CH1,
        spi_config,
    );

    // --- Chip enable (GP17, active-high, idle low) ---
    let ce = Output::new(p.PIN_17, Level::Low);

    // --- Thermometer ---
    let config = Config {
        resolution: Resolution::Bits12,
        oneshot: true,
        ..Config::default()
    };
    let mut sensor = Max31723::new(CeHighDevice::new(spi, ce), config);

    loop {
        match sensor.initialize().await {
            Ok(()) => {
                info!("Sensor successfully initialized");
                break;
            }
            Err(e) => {
                error!("Sensor not ready: {}", e);
                Timer::after(Duration::from_secs(1)).await;
            }
        }
    }

    loop {
        if let Err(e) = sensor.fetch().await {
            // A failed cycle is transient; keep polling.
            error!("Could not fetch sample: {}", e);
            Timer::after(Duration::from_secs(1)).await;
            continue;
        }

        match sensor.get(Channel::AmbientTemperature) {
            Ok(val) => info!(
                "Temperature: int: {} frac: {}",
                val.degrees(),
                val.micro_degrees()
            ),
            Err(e) => error!("Could not get sample: {}", e),
        }

        Timer::after(Duration::from_secs(1)).await;
    }
}
