//! Clock abstraction
//!
//! The debounce layer never reads time on its own; callers pass an
//! [`Instant`] into every update. This trait is how the application loop
//! obtains that instant.

use embassy_time::Instant;

/// Monotonic time source
///
/// Implementations must never go backwards. Wraparound of a fixed-width
/// hardware counter is the implementation's problem, not the caller's.
pub trait Clock {
    /// Current time
    fn now(&self) -> Instant;
}

/// Clock backed by the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
