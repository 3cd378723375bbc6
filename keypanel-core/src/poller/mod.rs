//! Shared-bus expander polling
//!
//! One register read per poll cycle, fanned out to up to eight
//! [`ChannelDebouncer`](crate::debounce::ChannelDebouncer)s. All channels
//! see the same sample and the same timestamp.

mod channel_set;
mod multiplexed;
mod shared;

#[cfg(test)]
pub(crate) mod mock;

pub use channel_set::ChannelSet;
pub use multiplexed::{
    AddressError, AttachError, ExpanderAddress, MultiplexedPoller, IDLE_REGISTER, MAX_CHANNELS,
};
pub use shared::SharedPoller;
