//! Text-display capability for the button panel
//!
//! This crate provides:
//! - `TextSink` trait: the only thing the panel needs from a display
//! - `TextSinkExt` helpers for clearing, centering and right-aligning text
//! - Number formatting in any radix from 2 to 36
//! - A character `Screen` buffer that implements `TextSink`
//! - `BlinkTimer` for cursor and value blinking
//!
//! # Architecture
//!
//! Display controllers (SSD1306, SH1106, ...) implement `TextSink` with
//! their own font and addressing. Application code writes through the
//! trait, or into a `Screen` that is flushed to the controller when dirty.

#![no_std]

pub mod blink;
pub mod number;
pub mod screen;
pub mod sink;

// Re-export key types
pub use blink::{BlinkTimer, BLINK_HALF_PERIOD};
pub use number::format_radix;
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
pub use sink::{DisplayError, TextSink, TextSinkExt};
