//! Button polling task
//!
//! Polls the expander once per tick and forwards debounced edges.

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Ticker};

use keypanel_core::buttons::{FCT_BACK, MENU};
use keypanel_drivers::{ButtonPanel, EmbeddedHalBus};
use keypanel_hal::clock::{Clock, EmbassyClock};

use crate::channels::BUTTON_CHANNEL;

/// Poll interval in milliseconds
pub const POLL_INTERVAL_MS: u64 = 1;

/// How often bus fault counts are reported
const FAULT_REPORT_INTERVAL: Duration = Duration::from_secs(10);

/// Bus type used by the panel
pub type PanelBus = EmbeddedHalBus<I2c<'static, I2C0, Blocking>>;

/// Button task - one expander read per tick
#[embassy_executor::task]
pub async fn buttons_task(mut bus: PanelBus, mut panel: ButtonPanel) {
    info!("Button task started");

    let clock = EmbassyClock;
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    let mut last_report = clock.now();
    let mut reported_faults = 0;

    loop {
        ticker.next().await;
        let now = clock.now();

        let events = panel.update(&mut bus, now);
        let any_press = events.iter().any(|event| event.is_press());

        for event in events {
            match event.button() {
                Some(button) if event.is_press() => info!("{} pressed", button.name()),
                Some(button) => info!("{} released", button.name()),
                None => info!("{}", event),
            }
            if BUTTON_CHANNEL.try_send(event).is_err() {
                warn!("Button channel full, dropped {}", event);
            }
        }

        if any_press && panel.combo_pressed(MENU) {
            info!("Menu combo");
        } else if any_press && panel.combo_pressed(FCT_BACK) {
            info!("Back combo");
        }

        if now.saturating_duration_since(last_report) >= FAULT_REPORT_INTERVAL {
            let faults = panel.poller().bus_faults();
            if faults != reported_faults {
                warn!(
                    "Expander bus faults: {} of {} reads",
                    faults,
                    panel.poller().reads()
                );
                reported_faults = faults;
            }
            last_report = now;
        }
    }
}
