//! Panel configuration
//!
//! panel.toml is parsed on the host by build.rs; the firmware rebuilds the
//! `PanelConfig` from the generated constants.

use defmt::*;

use keypanel_core::config::{ButtonConfig, ConfigError, PanelConfig};
use keypanel_core::ExpanderAddress;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/panel_config.rs"));
}

/// Address used when the configured layout is unusable
const FALLBACK_ADDRESS: u8 = 0x20;

/// Configuration from panel.toml, or the classic layout if it cannot be built
pub fn panel_config() -> PanelConfig {
    match build() {
        Ok(config) => {
            info!(
                "Panel config loaded: address={}, {} buttons",
                config.address,
                config.buttons.len()
            );
            config
        }
        Err(e) => {
            warn!("Panel config invalid ({}), using built-in layout", e);
            PanelConfig::oled_panel(Some(FALLBACK_ADDRESS))
        }
    }
}

/// Expander address for the built-in layout
pub fn fallback_address() -> Option<ExpanderAddress> {
    ExpanderAddress::new(FALLBACK_ADDRESS).ok()
}

fn build() -> Result<PanelConfig, ConfigError> {
    let mut config = PanelConfig::new();
    config.address = generated::ADDRESS;
    config.debounce_ms = generated::DEBOUNCE_MS;

    for &(name, channel, debounce_ms) in generated::BUTTONS {
        let mut button = ButtonConfig::new(name, channel)?;
        button.debounce_ms = debounce_ms;
        config
            .buttons
            .push(button)
            .map_err(|_| ConfigError::TooManyButtons)?;
    }

    config.validate()?;
    Ok(config)
}
