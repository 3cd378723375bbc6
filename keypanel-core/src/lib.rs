//! Board-agnostic core logic for the button panel firmware
//!
//! This crate contains everything between the raw expander byte and the
//! application's button events, with no dependency on specific hardware:
//!
//! - Per-channel debounce state machine
//! - Multiplexed poller (one bus read per cycle, eight channels)
//! - Mutex-guarded poller for multi-context use
//! - Button names, combination masks and edge events
//! - Configuration type definitions (TOML loading behind `toml`)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buttons;
pub mod config;
pub mod debounce;
pub mod poller;

pub use buttons::{Button, ButtonEvent};
pub use debounce::ChannelDebouncer;
pub use poller::{ChannelSet, ExpanderAddress, MultiplexedPoller, SharedPoller};

// Time types used throughout the public API
pub use embassy_time::{Duration, Instant};
