//! Time-based debounce state machine for a single channel
//!
//! Two independent booleans make up the state: whether the raw input is
//! still settling, and the accepted (debounced) level.
//!
//! ```text
//!              raw flip (timer restarts)
//!        ┌──────────────────────────────────┐
//!        ▼                                  │
//!   ┌─────────┐  held >= interval and  ┌────┴─────┐
//!   │ settling│ ─── raw != debounced ─▶│ accepted │ (changed = true, timer restarts)
//!   └─────────┘                        └──────────┘
//! ```
//!
//! Any bounce inside the settling window pushes acceptance out again, so a
//! contact that never holds still for a full interval is never reported.

use embassy_time::{Duration, Instant};

/// Debounce interval in milliseconds used when a button has no explicit setting
pub const DEFAULT_DEBOUNCE_MS: u16 = 5;

/// [`DEFAULT_DEBOUNCE_MS`] as a [`Duration`]
pub const DEFAULT_DEBOUNCE_INTERVAL: Duration =
    Duration::from_millis(DEFAULT_DEBOUNCE_MS as u64);

/// Debounce state for one expander input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelDebouncer {
    /// Bit position in the expander register
    channel: u8,
    /// Last unfiltered sample (true = pressed)
    raw: bool,
    /// Accepted level
    debounced: bool,
    /// Set only by the update that flipped `debounced`
    changed: bool,
    /// Time of the last raw flip or accepted transition
    last_transition: Instant,
    /// Minimum hold time before a raw level is accepted
    interval: Duration,
    /// Window for the transition currently settling, fixed at its raw flip
    settle_interval: Duration,
}

impl ChannelDebouncer {
    /// Create a released channel with its timer starting at `now`
    pub const fn new(channel: u8, interval: Duration, now: Instant) -> Self {
        Self::attach(channel, false, interval, now)
    }

    /// Create a channel whose raw and debounced levels both start at `initial`
    ///
    /// Starting both levels from the same sample means the first update can
    /// never report an edge caused by power-up state.
    pub const fn attach(channel: u8, initial: bool, interval: Duration, now: Instant) -> Self {
        Self {
            channel,
            raw: initial,
            debounced: initial,
            changed: false,
            last_transition: now,
            interval,
            settle_interval: interval,
        }
    }

    /// Feed one raw sample taken at `now`
    ///
    /// Returns true if the debounced level changed during this call.
    pub fn update(&mut self, raw: bool, now: Instant) -> bool {
        self.changed = false;

        if raw != self.raw {
            self.raw = raw;
            self.last_transition = now;
            self.settle_interval = self.interval;
        } else if raw != self.debounced
            && now.saturating_duration_since(self.last_transition) >= self.settle_interval
        {
            self.debounced = raw;
            self.changed = true;
            // Accepting restarts the settle timer as well
            self.last_transition = now;
            self.settle_interval = self.interval;
        }

        self.changed
    }

    /// Debounced level (true = pressed)
    pub fn read(&self) -> bool {
        self.debounced
    }

    /// Last raw sample
    pub fn raw(&self) -> bool {
        self.raw
    }

    /// True if the most recent update flipped the debounced level
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// True if the most recent update was a press
    pub fn rose(&self) -> bool {
        self.debounced && self.changed
    }

    /// True if the most recent update was a release
    pub fn fell(&self) -> bool {
        !self.debounced && self.changed
    }

    /// Change the debounce window for subsequent updates
    ///
    /// A transition already settling keeps the window it started with; the
    /// new interval applies from the next raw flip.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Current debounce window
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Bit position in the expander register
    pub fn channel(&self) -> u8 {
        self.channel
    }
}
