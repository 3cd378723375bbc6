//! Configuration types
//!
//! Board-agnostic panel configuration: which expander address the buttons
//! live on, and how long each one must settle. Loadable from TOML when the
//! `toml` feature is enabled.

pub mod panel;
#[cfg(feature = "toml")]
mod toml;

pub use panel::*;
