//! Keypanel - Debounced Button Panel Firmware
//!
//! Main firmware binary for RP2040 boards with an OLED panel and a PCF8574
//! button expander on I2C0. The button task polls the expander every
//! millisecond; the UI task turns button events into screen updates.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, I2c};
use {defmt_rtt as _, panic_probe as _};

use keypanel_drivers::{ButtonPanel, EmbeddedHalBus};
use keypanel_hal::clock::{Clock, EmbassyClock};
use keypanel_hal::I2cConfig;

mod channels;
mod config;
mod display;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Keypanel firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Setup I2C0 for the button expander (GPIO5=SCL, GPIO4=SDA)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2cConfig::STANDARD.frequency;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    let mut bus = EmbeddedHalBus::new(i2c);

    // Panel layout from panel.toml (validated at build time)
    let mut panel = match ButtonPanel::from_config(config::panel_config()) {
        Ok(panel) => panel,
        Err(e) => {
            warn!("Panel config rejected ({}), using built-in layout", e);
            ButtonPanel::new(config::fallback_address())
        }
    };

    if let Err(e) = panel.begin(&mut bus, EmbassyClock.now()) {
        error!("Button panel setup failed: {}", e);
    }
    info!(
        "Button panel ready: {} buttons, expander present={}",
        panel.poller().attached().len(),
        panel.expander_present()
    );

    spawner.spawn(tasks::buttons_task(bus, panel)).unwrap();
    spawner.spawn(tasks::ui_task()).unwrap();

    info!("All tasks spawned");
}
