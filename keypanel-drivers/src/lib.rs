//! Hardware driver implementations
//!
//! This crate provides the concrete pieces between an `embedded-hal` I2C
//! peripheral and the debounce core in keypanel-core:
//!
//! - Bus adapter (`embedded-hal` 1.0 I2C to [`keypanel_hal::I2cBus`])
//! - PCF8574 / PCF8574A port expander
//! - Button panel (expander setup, debounced polling, named buttons)

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod expander;
pub mod panel;

pub use bus::{BusError, EmbeddedHalBus};
pub use expander::{ExpanderError, Pcf8574, Variant};
pub use panel::{ButtonPanel, PanelError};
