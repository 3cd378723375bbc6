//! Button panel
//!
//! Ties a PCF8574 expander, the multiplexed poller and a [`PanelConfig`]
//! together: [`ButtonPanel::begin`] prepares the chip and attaches every
//! configured button, [`ButtonPanel::update`] runs one poll and reports
//! the debounced edges as events.

use heapless::Vec;
use keypanel_core::buttons::Button;
use keypanel_core::config::{ConfigError, PanelConfig};
use keypanel_core::poller::{AttachError, MAX_CHANNELS};
use keypanel_core::{ButtonEvent, ChannelSet, ExpanderAddress, Instant, MultiplexedPoller};
use keypanel_hal::I2cBus;

use crate::expander::Pcf8574;

/// Error from panel setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// Configuration rejected
    Config(ConfigError),
    /// A button could not be attached
    Attach(AttachError),
}

impl From<ConfigError> for PanelError {
    fn from(e: ConfigError) -> Self {
        PanelError::Config(e)
    }
}

impl From<AttachError> for PanelError {
    fn from(e: AttachError) -> Self {
        PanelError::Attach(e)
    }
}

/// Events produced by one update (at most one per channel)
pub type PanelEvents = Vec<ButtonEvent, MAX_CHANNELS>;

/// Debounced button panel on one expander
pub struct ButtonPanel {
    config: PanelConfig,
    address: Option<ExpanderAddress>,
    poller: MultiplexedPoller,
    present: bool,
}

impl ButtonPanel {
    /// Classic eight-key panel at `address`
    ///
    /// `None` gives a panel whose buttons always read released.
    pub fn new(address: Option<ExpanderAddress>) -> Self {
        Self {
            config: PanelConfig::oled_panel(address.map(ExpanderAddress::get)),
            address,
            poller: MultiplexedPoller::disabled(),
            present: false,
        }
    }

    /// Panel described by `config`
    pub fn from_config(config: PanelConfig) -> Result<Self, PanelError> {
        config.validate()?;
        let address = config.expander_address()?;
        Ok(Self {
            config,
            address,
            poller: MultiplexedPoller::disabled(),
            present: false,
        })
    }

    /// Configure the expander as inputs and attach every button
    ///
    /// A missing chip is not an error: the buttons are still attached and
    /// read released until the chip answers.
    pub fn begin<B: I2cBus>(&mut self, bus: &mut B, now: Instant) -> Result<(), PanelError> {
        let mut poller = MultiplexedPoller::new(self.address);

        self.present = match self.address {
            Some(address) => match Pcf8574::new(address).configure_inputs(bus) {
                Ok(()) => {
                    #[cfg(feature = "defmt")]
                    defmt::info!("button expander at {=u8:#x}", address.get());
                    true
                }
                Err(_) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("no button expander at {=u8:#x}", address.get());
                    false
                }
            },
            None => false,
        };

        for button in &self.config.buttons {
            let channel = button.channel()?;
            let interval = self.config.interval_for(button);
            poller.attach(bus, self.address, channel, interval, now)?;
        }

        self.poller = poller;
        Ok(())
    }

    /// Move the panel to another expander address
    ///
    /// With `reinit` the panel is set up again immediately; otherwise the
    /// new address takes effect on the next [`begin`](Self::begin).
    pub fn set_address<B: I2cBus>(
        &mut self,
        bus: &mut B,
        address: Option<ExpanderAddress>,
        reinit: bool,
        now: Instant,
    ) -> Result<(), PanelError> {
        self.address = address;
        self.config.address = address.map(ExpanderAddress::get);
        if reinit {
            self.begin(bus, now)?;
        }
        Ok(())
    }

    /// Poll once and return the debounced edges, lowest channel first
    pub fn update<B: I2cBus>(&mut self, bus: &mut B, now: Instant) -> PanelEvents {
        self.poller.poll(bus, now);
        ButtonEvent::from_edges(self.poller.rose_set(), self.poller.fell_set()).collect()
    }

    /// Undebounced pressed mask from a fresh read
    pub fn raw_buttons<B: I2cBus>(&self, bus: &mut B) -> ChannelSet {
        match self.address {
            Some(address) => Pcf8574::new(address).read_pressed(bus),
            None => ChannelSet::EMPTY,
        }
    }

    /// Returns true if the expander answered the last [`begin`](Self::begin)
    pub fn expander_present(&self) -> bool {
        self.present
    }

    /// Debounced pressed mask
    pub fn pressed(&self) -> ChannelSet {
        self.poller.pressed()
    }

    /// Debounced state of one button
    pub fn is_pressed(&self, button: Button) -> bool {
        self.poller.read(button.channel())
    }

    /// Returns true if `button` was pressed in the last update
    pub fn rose(&self, button: Button) -> bool {
        self.poller.rose(button.channel())
    }

    /// Returns true if `button` was released in the last update
    pub fn fell(&self, button: Button) -> bool {
        self.poller.fell(button.channel())
    }

    /// Returns true if every button in `combo` is held
    pub fn combo_pressed(&self, combo: ChannelSet) -> bool {
        self.pressed().contains_all(combo)
    }

    /// Expander address, if any
    pub fn address(&self) -> Option<ExpanderAddress> {
        self.address
    }

    /// Active configuration
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Underlying poller
    pub fn poller(&self) -> &MultiplexedPoller {
        &self.poller
    }
}
