//! Keypanel Hardware Abstraction Layer
//!
//! This crate defines the two external collaborators the button panel
//! depends on: a bus transaction primitive and a monotonic clock. Chip
//! specific code (RP2040, host mocks) implements them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (keypanel-firmware, etc.)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  keypanel-core (debounce + poller)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  keypanel-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`clock::Clock`] - Monotonic millisecond time source

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use clock::Clock;
pub use i2c::{I2cBus, I2cConfig};
