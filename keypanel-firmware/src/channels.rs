//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use keypanel_core::ButtonEvent;

/// Channel capacity for button events
const BUTTON_CHANNEL_SIZE: usize = 16;

/// Debounced button edges from the button task
pub static BUTTON_CHANNEL: Channel<CriticalSectionRawMutex, ButtonEvent, BUTTON_CHANNEL_SIZE> =
    Channel::new();
