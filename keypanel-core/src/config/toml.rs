//! TOML loading
//!
//! ```toml
//! address = 0x20
//! debounce_ms = 5
//!
//! [[buttons]]
//! name = "select"
//!
//! [[buttons]]
//! name = "up"
//! channel = 3
//! debounce_ms = 10
//! ```

use super::panel::{ConfigError, PanelConfig};

impl PanelConfig {
    /// Parse and validate a TOML panel description
    ///
    /// Missing keys take their defaults; a missing `address` disables the
    /// panel.
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: PanelConfig = ::toml::from_str(input).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DEBOUNCE_MS;
    use embassy_time::Duration;

    #[test]
    fn test_parse_panel() {
        let input = r#"
            # Front panel on a PCF8574A
            address = 0x38
            debounce_ms = 8

            [[buttons]]
            name = "select"

            [[buttons]]
            name = "up"
            channel = 3
            debounce_ms = 15
        "#;

        let config = PanelConfig::from_toml(input).unwrap();
        assert_eq!(config.address, Some(0x38));
        assert_eq!(config.buttons.len(), 2);
        assert_eq!(config.buttons[0].channel(), Ok(0));
        assert_eq!(
            config.interval_for(&config.buttons[1]),
            Duration::from_millis(15)
        );
        assert_eq!(
            config.interval_for(&config.buttons[0]),
            Duration::from_millis(8)
        );
    }

    #[test]
    fn test_defaults_when_empty() {
        let config = PanelConfig::from_toml("").unwrap();
        assert_eq!(config.address, None);
        assert_eq!(config.debounce_ms, DEFAULT_DEBOUNCE_MS);
        assert!(config.buttons.is_empty());
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let input = r#"
            address = 0x20

            [[buttons]]
            name = "a"
            channel = 1

            [[buttons]]
            name = "b"
            channel = 1
        "#;
        assert_eq!(
            PanelConfig::from_toml(input),
            Err(ConfigError::DuplicateChannel(1))
        );
    }

    #[test]
    fn test_malformed_toml() {
        assert_eq!(
            PanelConfig::from_toml("address = [unclosed"),
            Err(ConfigError::Parse)
        );
    }
}
