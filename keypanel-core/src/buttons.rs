//! Panel buttons and the events they produce
//!
//! The classic five-way panel wires its keys to expander bits in this order:
//!
//! | Bit | Button | Alias |
//! |-----|--------|-------|
//! | 0   | Select |       |
//! | 1   | Right  | F4    |
//! | 2   | Down   |       |
//! | 3   | Up     |       |
//! | 4   | Left   | F0    |
//! | 5   | F1     |       |
//! | 6   | F2     |       |
//! | 7   | F3     |       |

use crate::poller::ChannelSet;

/// A button on the panel, named by its expander bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Select,
    Right,
    Down,
    Up,
    Left,
    F1,
    F2,
    F3,
}

/// Left + Up + Down: leave the current function
pub const FCT_BACK: ChannelSet =
    ChannelSet::from_bits(Button::Left.bit() | Button::Up.bit() | Button::Down.bit());

/// Up + Down together
pub const UP_DOWN: ChannelSet = ChannelSet::from_bits(Button::Up.bit() | Button::Down.bit());

/// Up + Down + Select: open the menu
pub const MENU: ChannelSet =
    ChannelSet::from_bits(Button::Up.bit() | Button::Down.bit() | Button::Select.bit());

impl Button {
    /// Every button in bit order
    pub const ALL: [Button; 8] = [
        Button::Select,
        Button::Right,
        Button::Down,
        Button::Up,
        Button::Left,
        Button::F1,
        Button::F2,
        Button::F3,
    ];

    /// Function key 0 shares the Left key
    pub const F0: Button = Button::Left;

    /// Function key 4 shares the Right key
    pub const F4: Button = Button::Right;

    /// Expander bit this button is wired to
    pub const fn channel(self) -> u8 {
        self as u8
    }

    /// Single-bit mask for this button
    pub const fn bit(self) -> u8 {
        1 << self.channel()
    }

    /// Mask containing only this button
    pub const fn mask(self) -> ChannelSet {
        ChannelSet::from_bits(self.bit())
    }

    /// Button wired to `channel`
    pub fn from_channel(channel: u8) -> Option<Self> {
        Self::ALL.get(usize::from(channel)).copied()
    }

    /// Lower-case name used in configuration files
    pub fn name(self) -> &'static str {
        match self {
            Button::Select => "select",
            Button::Right => "right",
            Button::Down => "down",
            Button::Up => "up",
            Button::Left => "left",
            Button::F1 => "f1",
            Button::F2 => "f2",
            Button::F3 => "f3",
        }
    }

    /// Parse a configuration name (case-insensitive, accepts aliases)
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        let is = |candidate: &str| name.eq_ignore_ascii_case(candidate);

        if is("ok") || is("enter") {
            return Some(Button::Select);
        }
        if is("f0") {
            return Some(Self::F0);
        }
        if is("f4") {
            return Some(Self::F4);
        }
        Self::ALL.into_iter().find(|button| is(button.name()))
    }
}

/// Debounced edge on one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Debounced level went to pressed
    Pressed(u8),
    /// Debounced level went to released
    Released(u8),
}

impl ButtonEvent {
    /// Channel the edge happened on
    pub fn channel(self) -> u8 {
        match self {
            ButtonEvent::Pressed(channel) | ButtonEvent::Released(channel) => channel,
        }
    }

    /// Named button for this channel
    pub fn button(self) -> Option<Button> {
        Button::from_channel(self.channel())
    }

    /// Returns true if this is a press
    pub fn is_press(self) -> bool {
        matches!(self, ButtonEvent::Pressed(_))
    }

    /// Events for one poll cycle, lowest channel first
    ///
    /// A channel can only be in one of the sets per cycle; presses are
    /// listed before releases on the same channel anyway.
    pub fn from_edges(rose: ChannelSet, fell: ChannelSet) -> impl Iterator<Item = ButtonEvent> {
        (0..8u8).flat_map(move |channel| {
            let press = rose.contains(channel).then_some(ButtonEvent::Pressed(channel));
            let release = fell.contains(channel).then_some(ButtonEvent::Released(channel));
            press.into_iter().chain(release)
        })
    }
}
