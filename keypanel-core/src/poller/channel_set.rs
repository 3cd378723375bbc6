//! Fixed eight-channel bit set
//!
//! Bit `i` is channel `i`, which is also bit `i` of the expander register,
//! so a set converts to and from the wire byte without remapping.

use core::ops::{BitAnd, BitOr, BitXor, Not};

/// Set of expander channels (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelSet(u8);

impl ChannelSet {
    /// No channels
    pub const EMPTY: Self = Self(0);

    /// All eight channels
    pub const ALL: Self = Self(0xFF);

    /// Create an empty set
    pub const fn empty() -> Self {
        Self::EMPTY
    }

    /// Create a set from a register-style bitmask
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Bitmask with bit `i` set for each member channel
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check membership; channels past 7 are never members
    pub const fn contains(self, channel: u8) -> bool {
        channel < 8 && self.0 & (1 << channel) != 0
    }

    /// True if every channel of `other` is also in `self`
    pub const fn contains_all(self, other: ChannelSet) -> bool {
        self.0 & other.0 == other.0
    }

    /// Add a channel; out-of-range channels are ignored
    pub fn insert(&mut self, channel: u8) {
        if channel < 8 {
            self.0 |= 1 << channel;
        }
    }

    /// Remove a channel
    pub fn remove(&mut self, channel: u8) {
        if channel < 8 {
            self.0 &= !(1 << channel);
        }
    }

    /// True if no channel is set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of member channels
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate member channels in ascending order
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..8u8).filter(move |&channel| self.contains(channel))
    }
}

impl From<u8> for ChannelSet {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

impl From<ChannelSet> for u8 {
    fn from(set: ChannelSet) -> Self {
        set.0
    }
}

impl FromIterator<u8> for ChannelSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for channel in iter {
            set.insert(channel);
        }
        set
    }
}

impl BitOr for ChannelSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for ChannelSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitXor for ChannelSet {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Not for ChannelSet {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}
