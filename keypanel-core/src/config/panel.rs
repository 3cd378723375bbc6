//! Panel configuration
//!
//! The host application supplies, per button, an expander address, a bit
//! index and a debounce interval. A panel with no address is a valid
//! configuration meaning "buttons disabled".

use embassy_time::Duration;
use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::buttons::Button;
use crate::poller::{ChannelSet, ExpanderAddress, MAX_CHANNELS};

/// Current configuration format version
pub const CONFIG_VERSION: u8 = 1;

/// Maximum buttons per panel (one expander port)
pub const MAX_BUTTONS: usize = MAX_CHANNELS;

/// Maximum button label length
pub const MAX_LABEL_LEN: usize = 16;

pub use crate::debounce::DEFAULT_DEBOUNCE_MS;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// TOML could not be parsed into a panel config
    Parse,
    /// Config written for a different format version
    VersionMismatch(u8),
    /// Expander address does not fit in 7 bits
    InvalidAddress(u8),
    /// Button bit index outside 0-7
    InvalidChannel(u8),
    /// Two buttons bound to the same bit
    DuplicateChannel(u8),
    /// Button has no channel and its name is not a known button
    UnknownButton,
    /// More buttons than the port has bits
    TooManyButtons,
    /// Label longer than `MAX_LABEL_LEN`
    LabelTooLong,
}

/// One button binding
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonConfig {
    /// Button name (e.g., "select", "up", "f1")
    pub name: String<MAX_LABEL_LEN>,
    /// Expander bit; derived from the name when omitted
    #[cfg_attr(feature = "serde", serde(default))]
    pub channel: Option<u8>,
    /// Per-button debounce override in milliseconds
    #[cfg_attr(feature = "serde", serde(default))]
    pub debounce_ms: Option<u16>,
}

impl ButtonConfig {
    /// Button bound to an explicit bit
    pub fn new(name: &str, channel: u8) -> Result<Self, ConfigError> {
        let mut label = String::new();
        label
            .push_str(name)
            .map_err(|_| ConfigError::LabelTooLong)?;
        Ok(Self {
            name: label,
            channel: Some(channel),
            debounce_ms: None,
        })
    }

    /// Set a per-button debounce interval
    pub fn with_debounce_ms(mut self, debounce_ms: u16) -> Self {
        self.debounce_ms = Some(debounce_ms);
        self
    }

    /// Resolved expander bit
    pub fn channel(&self) -> Result<u8, ConfigError> {
        let channel = match self.channel {
            Some(channel) => channel,
            None => Button::from_name(&self.name)
                .ok_or(ConfigError::UnknownButton)?
                .channel(),
        };
        if usize::from(channel) >= MAX_CHANNELS {
            return Err(ConfigError::InvalidChannel(channel));
        }
        Ok(channel)
    }
}

/// Complete panel configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanelConfig {
    /// Configuration version for compatibility checks
    pub version: u8,
    /// 7-bit expander address; `None` disables the buttons
    pub address: Option<u8>,
    /// Default debounce interval in milliseconds
    pub debounce_ms: u16,
    /// Button bindings
    pub buttons: Vec<ButtonConfig, MAX_BUTTONS>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelConfig {
    /// Empty configuration: no expander, no buttons
    pub const fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            address: None,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            buttons: Vec::new(),
        }
    }

    /// The classic eight-key OLED panel layout on one expander
    pub fn oled_panel(address: Option<u8>) -> Self {
        let mut config = Self::new();
        config.address = address;
        for button in Button::ALL {
            let mut name = String::new();
            // Button names are at most six characters
            let _ = name.push_str(button.name());
            let _ = config.buttons.push(ButtonConfig {
                name,
                channel: Some(button.channel()),
                debounce_ms: None,
            });
        }
        config
    }

    /// Validated expander address
    pub fn expander_address(&self) -> Result<Option<ExpanderAddress>, ConfigError> {
        self.address
            .map(|address| {
                ExpanderAddress::new(address).map_err(|_| ConfigError::InvalidAddress(address))
            })
            .transpose()
    }

    /// Debounce interval for a button, falling back to the panel default
    pub fn interval_for(&self, button: &ButtonConfig) -> Duration {
        let ms = button.debounce_ms.unwrap_or(self.debounce_ms);
        Duration::from_millis(u64::from(ms))
    }

    /// Check version, address range and channel assignments
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch(self.version));
        }
        self.expander_address()?;

        let mut used = ChannelSet::EMPTY;
        for button in &self.buttons {
            let channel = button.channel()?;
            if used.contains(channel) {
                return Err(ConfigError::DuplicateChannel(channel));
            }
            used.insert(channel);
        }
        Ok(())
    }

    /// Channels bound by this configuration
    pub fn channels(&self) -> ChannelSet {
        self.buttons
            .iter()
            .filter_map(|button| button.channel().ok())
            .collect()
    }
}
