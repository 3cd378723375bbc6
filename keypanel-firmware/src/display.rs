//! Log-backed text sink
//!
//! Stands in for the OLED controller: every flushed row goes to the defmt
//! log. Swap in a controller driver implementing `TextSink` to draw for real.

use defmt::*;
use keypanel_display::{DisplayError, TextSink, SCREEN_COLS, SCREEN_ROWS};

/// `TextSink` that logs each write
pub struct LogSink;

impl TextSink for LogSink {
    fn write_at(&mut self, col: u8, row: u8, text: &str) -> Result<(), DisplayError> {
        debug!("lcd[{},{}] {}", row, col, text);
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }
}
