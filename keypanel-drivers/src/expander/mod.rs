//! I/O expander drivers
//!
//! Quasi-bidirectional port expanders that return their whole input port
//! in one read.

pub mod pcf8574;

pub use pcf8574::{ExpanderError, Pcf8574, Variant};
