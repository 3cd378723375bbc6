//! Per-channel debounce filtering
//!
//! A [`ChannelDebouncer`] turns a stream of raw, polarity-normalized
//! samples into a stable level plus one-cycle rise/fall flags. It does no
//! I/O and never reads the clock itself.

mod channel;

pub use channel::{ChannelDebouncer, DEFAULT_DEBOUNCE_INTERVAL, DEFAULT_DEBOUNCE_MS};
