//! Multiplexed input poller
//!
//! Owns the debounce state for every button wired to one expander. The
//! poller does not own the bus: each call borrows it for exactly one
//! transaction, so the display driver can use the same bus between polls.
//!
//! Buttons switch to ground, so a pressed button reads as a 0 bit on the
//! wire. The poller inverts the port byte once, before fan-out; everything
//! downstream sees "bit set = pressed".

use embassy_time::{Duration, Instant};
use keypanel_hal::I2cBus;

use super::channel_set::ChannelSet;
use crate::debounce::ChannelDebouncer;

/// Number of channels on one expander port
pub const MAX_CHANNELS: usize = 8;

/// Port value of an idle (or absent) expander: every line pulled high
pub const IDLE_REGISTER: u8 = 0xFF;

/// Invalid 7-bit bus address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressError {
    /// Address does not fit in 7 bits
    OutOfRange(u8),
}

/// 7-bit I2C address of an expander chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExpanderAddress(u8);

impl ExpanderAddress {
    /// Validate a 7-bit address
    pub const fn new(address: u8) -> Result<Self, AddressError> {
        if address > 0x7F {
            Err(AddressError::OutOfRange(address))
        } else {
            Ok(Self(address))
        }
    }

    /// Keep the low seven bits of `address`
    pub const fn truncate(address: u8) -> Self {
        Self(address & 0x7F)
    }

    /// Raw 7-bit address
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ExpanderAddress {
    type Error = AddressError;

    fn try_from(address: u8) -> Result<Self, Self::Error> {
        Self::new(address)
    }
}

/// Attach rejected at configuration time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AttachError {
    /// Channel index outside 0-7
    InvalidChannel(u8),
    /// Other channels are already bound to a different expander
    AddressMismatch {
        configured: Option<ExpanderAddress>,
        requested: Option<ExpanderAddress>,
    },
}

/// Debounced view of one expander port
///
/// Channels start detached. [`attach`](Self::attach) binds a channel and
/// seeds it from a live read; [`poll`](Self::poll) reads the port once and
/// updates every attached channel with the same sample and timestamp.
#[derive(Debug, Clone)]
pub struct MultiplexedPoller {
    address: Option<ExpanderAddress>,
    channels: [Option<ChannelDebouncer>; MAX_CHANNELS],
    /// Bus transactions issued
    reads: u32,
    /// Reads that failed and were replaced by the idle value
    bus_faults: u32,
}

impl Default for MultiplexedPoller {
    fn default() -> Self {
        Self::disabled()
    }
}

impl MultiplexedPoller {
    /// Create a poller for the expander at `address`, with no channels attached
    ///
    /// `None` is a valid configuration: the panel is disabled, every channel
    /// reads released and the bus is never touched.
    pub const fn new(address: Option<ExpanderAddress>) -> Self {
        Self {
            address,
            channels: [None; MAX_CHANNELS],
            reads: 0,
            bus_faults: 0,
        }
    }

    /// Create a poller with no expander
    pub const fn disabled() -> Self {
        Self::new(None)
    }

    /// Bind `channel` to a bit of the expander at `address`
    ///
    /// The channel's raw and debounced levels are seeded from an immediate
    /// read so the first poll cannot report a power-up edge. Attaching the
    /// same channel again replaces it completely.
    pub fn attach<B: I2cBus>(
        &mut self,
        bus: &mut B,
        address: Option<ExpanderAddress>,
        channel: u8,
        interval: Duration,
        now: Instant,
    ) -> Result<(), AttachError> {
        let index = usize::from(channel);
        if index >= MAX_CHANNELS {
            return Err(AttachError::InvalidChannel(channel));
        }

        let others_attached = self
            .channels
            .iter()
            .enumerate()
            .any(|(i, slot)| i != index && slot.is_some());
        if others_attached && self.address != address {
            return Err(AttachError::AddressMismatch {
                configured: self.address,
                requested: address,
            });
        }
        self.address = address;

        let initial = match address {
            Some(address) => self.sample(bus, address).contains(channel),
            None => false,
        };

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "attach channel {} (pressed={}, interval={}ms)",
            channel,
            initial,
            interval.as_millis()
        );

        self.channels[index] = Some(ChannelDebouncer::attach(channel, initial, interval, now));
        Ok(())
    }

    /// Read the port once and update every attached channel
    ///
    /// Returns the channels whose debounced level changed in this cycle.
    /// A failed read counts as "nothing pressed"; the next poll is the retry.
    pub fn poll<B: I2cBus>(&mut self, bus: &mut B, now: Instant) -> ChannelSet {
        let Some(address) = self.address else {
            return ChannelSet::EMPTY;
        };

        let pressed = self.sample(bus, address);
        let mut changed = ChannelSet::EMPTY;

        for debouncer in self.channels.iter_mut().flatten() {
            let channel = debouncer.channel();
            if debouncer.update(pressed.contains(channel), now) {
                changed.insert(channel);
            }
        }

        changed
    }

    /// One read of the input port, inverted to "bit set = pressed"
    fn sample<B: I2cBus>(&mut self, bus: &mut B, address: ExpanderAddress) -> ChannelSet {
        self.reads = self.reads.wrapping_add(1);
        let port = match bus.read_byte(address.get()) {
            Ok(port) => port,
            Err(_) => {
                self.bus_faults = self.bus_faults.wrapping_add(1);
                IDLE_REGISTER
            }
        };
        ChannelSet::from_bits(!port)
    }

    /// Debounce state of one channel, if attached
    pub fn channel(&self, channel: u8) -> Option<&ChannelDebouncer> {
        self.channels.get(usize::from(channel))?.as_ref()
    }

    /// Debounced level of a channel; detached channels read released
    pub fn read(&self, channel: u8) -> bool {
        self.channel(channel).is_some_and(ChannelDebouncer::read)
    }

    /// True if the last poll pressed this channel
    pub fn rose(&self, channel: u8) -> bool {
        self.channel(channel).is_some_and(ChannelDebouncer::rose)
    }

    /// True if the last poll released this channel
    pub fn fell(&self, channel: u8) -> bool {
        self.channel(channel).is_some_and(ChannelDebouncer::fell)
    }

    /// Change one channel's debounce window
    pub fn set_interval(&mut self, channel: u8, interval: Duration) -> Result<(), AttachError> {
        match self.channels.get_mut(usize::from(channel)) {
            Some(Some(debouncer)) => {
                debouncer.set_interval(interval);
                Ok(())
            }
            _ => Err(AttachError::InvalidChannel(channel)),
        }
    }

    /// Debounced pressed mask
    pub fn pressed(&self) -> ChannelSet {
        self.channels_where(ChannelDebouncer::read)
    }

    /// Channels pressed by the last poll
    pub fn rose_set(&self) -> ChannelSet {
        self.channels_where(ChannelDebouncer::rose)
    }

    /// Channels released by the last poll
    pub fn fell_set(&self) -> ChannelSet {
        self.channels_where(ChannelDebouncer::fell)
    }

    /// Channels currently bound
    pub fn attached(&self) -> ChannelSet {
        self.channels_where(|_| true)
    }

    /// Configured expander address
    pub fn address(&self) -> Option<ExpanderAddress> {
        self.address
    }

    /// Number of bus reads issued so far
    pub fn reads(&self) -> u32 {
        self.reads
    }

    /// Number of reads that failed and were treated as idle
    pub fn bus_faults(&self) -> u32 {
        self.bus_faults
    }

    fn channels_where(&self, f: impl Fn(&ChannelDebouncer) -> bool) -> ChannelSet {
        self.channels
            .iter()
            .flatten()
            .filter(|debouncer| f(*debouncer))
            .map(ChannelDebouncer::channel)
            .collect()
    }
}
