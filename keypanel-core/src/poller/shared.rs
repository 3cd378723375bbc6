//! Poller shared between execution contexts
//!
//! When a main loop and an interrupt handler (or two executors) can both
//! poll, the port read and the eight channel updates must happen as one
//! unit. [`SharedPoller`] wraps the poller in an embassy blocking mutex so
//! each poll runs inside one critical section.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Instant};
use keypanel_hal::I2cBus;

use super::channel_set::ChannelSet;
use super::multiplexed::{AttachError, ExpanderAddress, MultiplexedPoller};

/// Mutex-guarded [`MultiplexedPoller`]
pub struct SharedPoller<M: RawMutex> {
    inner: Mutex<M, RefCell<MultiplexedPoller>>,
}

impl<M: RawMutex> SharedPoller<M> {
    /// Wrap a poller; usable in a `static`
    pub const fn new(poller: MultiplexedPoller) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(poller)),
        }
    }

    /// See [`MultiplexedPoller::attach`]
    pub fn attach<B: I2cBus>(
        &self,
        bus: &mut B,
        address: Option<ExpanderAddress>,
        channel: u8,
        interval: Duration,
        now: Instant,
    ) -> Result<(), AttachError> {
        self.inner.lock(|poller| {
            poller
                .borrow_mut()
                .attach(bus, address, channel, interval, now)
        })
    }

    /// See [`MultiplexedPoller::poll`]
    pub fn poll<B: I2cBus>(&self, bus: &mut B, now: Instant) -> ChannelSet {
        self.inner
            .lock(|poller| poller.borrow_mut().poll(bus, now))
    }

    /// Run `f` against a consistent view of the poller
    ///
    /// No poll can run while `f` executes, so every accessor called inside
    /// reflects the same cycle.
    pub fn with<R>(&self, f: impl FnOnce(&MultiplexedPoller) -> R) -> R {
        self.inner.lock(|poller| f(&*poller.borrow()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poller::mock::MockBus;
    use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};

    static PANEL: SharedPoller<CriticalSectionRawMutex> =
        SharedPoller::new(MultiplexedPoller::disabled());
    static CONTESTED: SharedPoller<CriticalSectionRawMutex> =
        SharedPoller::new(MultiplexedPoller::disabled());

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_static_shared_poller() {
        let address = ExpanderAddress::new(0x27).ok();
        let mut bus = MockBus::new(0xFF);
        for channel in 0..8 {
            PANEL
                .attach(&mut bus, address, channel, Duration::from_millis(5), at(0))
                .unwrap();
        }

        bus.port = Some(!0b0000_0001);
        PANEL.poll(&mut bus, at(1));
        let changed = PANEL.poll(&mut bus, at(6));

        assert_eq!(changed.bits(), 0b0000_0001);
        PANEL.with(|poller| {
            assert!(poller.rose(0));
            assert_eq!(poller.pressed(), changed);
        });
    }

    #[test]
    fn test_shared_attach_errors_pass_through() {
        let shared: SharedPoller<NoopRawMutex> = SharedPoller::new(MultiplexedPoller::disabled());
        let mut bus = MockBus::new(0xFF);
        assert_eq!(
            shared.attach(&mut bus, None, 12, Duration::from_millis(5), at(0)),
            Err(AttachError::InvalidChannel(12))
        );
        assert_eq!(shared.with(|poller| poller.attached()), ChannelSet::EMPTY);
    }

    #[test]
    fn test_concurrent_polls_serialized() {
        const THREADS: usize = 4;
        const POLLS: usize = 25;

        let address = ExpanderAddress::new(0x27).ok();
        let mut setup = MockBus::new(0xFF);
        for channel in 0..8 {
            CONTESTED
                .attach(&mut setup, address, channel, Duration::from_millis(5), at(0))
                .unwrap();
        }

        // Channel 0 goes down; every later poll is past its settle window
        setup.port = Some(!0b0000_0001);
        assert!(CONTESTED.poll(&mut setup, at(1)).is_empty());
        let setup_reads = setup.reads;

        let reports: usize = std::thread::scope(|scope| {
            let handles: std::vec::Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(|| {
                        let mut bus = MockBus::new(!0b0000_0001);
                        let mut seen = 0;
                        for round in 0..POLLS {
                            let changed = CONTESTED.poll(&mut bus, at(10 + round as u64));
                            if changed.contains(0) {
                                seen += 1;
                            }
                        }
                        assert_eq!(bus.reads, POLLS);
                        seen
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        assert_eq!(reports, 1);
        CONTESTED.with(|poller| {
            assert_eq!(poller.reads() as usize, setup_reads + THREADS * POLLS);
            assert_eq!(poller.pressed().bits(), 0b0000_0001);
            assert_eq!(poller.bus_faults(), 0);
        });
    }
}
