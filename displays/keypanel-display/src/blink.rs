//! Blink phase generator
//!
//! Toggles a flag once per half period so cursors and edited values can
//! blink at about 1 Hz. Call [`BlinkTimer::refresh`] from the UI loop.

use embassy_time::{Duration, Instant};

/// Time between toggles
pub const BLINK_HALF_PERIOD: Duration = Duration::from_millis(500);

/// 1 Hz on/off phase
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkTimer {
    last_toggle: Instant,
    on: bool,
    half_period: Duration,
}

impl BlinkTimer {
    /// Start in the off phase at `now`
    pub const fn new(now: Instant) -> Self {
        Self::with_half_period(now, BLINK_HALF_PERIOD)
    }

    /// Timer with a custom toggle interval
    pub const fn with_half_period(now: Instant, half_period: Duration) -> Self {
        Self {
            last_toggle: now,
            on: false,
            half_period,
        }
    }

    /// Advance to `now` and return the current phase
    ///
    /// The phase flips once more than a half period has passed since the
    /// last flip. A refresh after a long gap flips only once.
    pub fn refresh(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_toggle) > self.half_period {
            self.last_toggle = now;
            self.on = !self.on;
        }
        self.on
    }

    /// Current phase without advancing
    pub fn is_on(&self) -> bool {
        self.on
    }
}
