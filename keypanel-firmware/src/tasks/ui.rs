//! UI task
//!
//! Keeps a `Screen` in sync with the buttons: the last event, a press
//! counter and a blinking marker on the active row. Dirty rows are flushed
//! to the display sink.

use defmt::*;
use embassy_time::{with_timeout, Duration};

use keypanel_core::ButtonEvent;
use keypanel_display::{BlinkTimer, Screen, TextSink, TextSinkExt};
use keypanel_hal::clock::{Clock, EmbassyClock};

use crate::channels::BUTTON_CHANNEL;
use crate::display::LogSink;

/// Longest wait for a button before the blink phase is refreshed
const REFRESH_INTERVAL: Duration = Duration::from_millis(100);

/// Row showing the last event
const EVENT_ROW: u8 = 3;

/// Row showing the press counter
const COUNT_ROW: u8 = 5;

/// UI task - renders button events
#[embassy_executor::task]
pub async fn ui_task() {
    info!("UI task started");

    let mut screen = Screen::new();
    let mut sink = LogSink;
    let clock = EmbassyClock;
    let mut blink = BlinkTimer::new(clock.now());
    let mut presses: u32 = 0;
    let mut cursor_on = false;

    draw_frame(&mut screen);

    loop {
        if let Ok(event) = with_timeout(REFRESH_INTERVAL, BUTTON_CHANNEL.receive()).await {
            if event.is_press() {
                presses = presses.wrapping_add(1);
            }
            draw_event(&mut screen, event, presses);
        }

        let on = blink.refresh(clock.now());
        if on != cursor_on {
            cursor_on = on;
            let marker = if on { ">" } else { " " };
            if let Err(e) = screen.write_at(0, EVENT_ROW, marker) {
                warn!("Screen write failed: {}", e);
            }
        }

        if screen.is_dirty() {
            if let Err(e) = screen.flush_to(&mut sink) {
                warn!("Display flush failed: {}", e);
            }
        }
    }
}

fn draw_frame(screen: &mut Screen) {
    screen.clear();
    let _ = screen.print_centered(0, "KEYPANEL");
    let _ = screen.print_right(7, 0, "v0.1");
}

fn draw_event(screen: &mut Screen, event: ButtonEvent, presses: u32) {
    let name = event.button().map_or("?", |button| button.name());
    let action = if event.is_press() { "down" } else { "up" };

    let _ = screen.clear_to_eol(2, EVENT_ROW);
    let _ = screen.write_at(2, EVENT_ROW, name);
    let _ = screen.print_right(EVENT_ROW, 4, action);

    let _ = screen.clear_line(COUNT_ROW);
    let _ = screen.write_at(2, COUNT_ROW, "presses");
    let _ = screen.print_number(10, COUNT_ROW, presses, 10);
    let _ = screen.print_number(16, COUNT_ROW, event.channel().into(), 2);
}
