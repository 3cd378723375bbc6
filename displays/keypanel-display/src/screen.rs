//! Screen buffer
//!
//! A character grid for a 128x64 panel with a 6x8 font. Writes land in
//! RAM and mark their row dirty; the display task flushes dirty rows.

use crate::sink::{DisplayError, TextSink};

/// Number of character rows (64 px / 8 px font)
pub const SCREEN_ROWS: usize = 8;

/// Number of character columns (128 px / 6 px font)
pub const SCREEN_COLS: usize = 21;

/// Stand-in for characters the font cannot draw
const REPLACEMENT: u8 = b'?';

/// Character screen buffer
///
/// Holds printable ASCII only; anything else is stored as `?`.
#[derive(Clone)]
pub struct Screen {
    /// Current display content, space padded
    cells: [[u8; SCREEN_COLS]; SCREEN_ROWS],
    /// Bit per row that changed since the last flush
    dirty_rows: u8,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a blank screen (every row dirty)
    pub const fn new() -> Self {
        Self {
            cells: [[b' '; SCREEN_COLS]; SCREEN_ROWS],
            dirty_rows: 0xFF,
        }
    }

    /// Blank the entire screen
    pub fn clear(&mut self) {
        for line in &mut self.cells {
            line.fill(b' ');
        }
        self.dirty_rows = 0xFF;
    }

    /// Replace a whole row, padding with spaces
    pub fn set_line(&mut self, row: usize, text: &str) {
        if row < SCREEN_ROWS {
            self.cells[row].fill(b' ');
            self.put(row, 0, text);
        }
    }

    /// Content of a row
    pub fn line(&self, row: usize) -> Option<&str> {
        self.cells
            .get(row)
            .and_then(|line| core::str::from_utf8(line).ok())
    }

    /// All rows, top to bottom
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        (0..SCREEN_ROWS).filter_map(|row| self.line(row))
    }

    /// Check if any row needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty_rows != 0
    }

    /// Returns true if `row` changed since the last flush
    pub fn is_row_dirty(&self, row: usize) -> bool {
        row < SCREEN_ROWS && self.dirty_rows & (1 << row) != 0
    }

    /// Rows that changed since the last flush, top to bottom
    pub fn dirty_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..SCREEN_ROWS).filter(|&row| self.is_row_dirty(row))
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty_rows = 0;
    }

    /// Mark screen as dirty (needs full redraw)
    pub fn mark_dirty(&mut self) {
        self.dirty_rows = 0xFF;
    }

    /// Copy dirty rows to `sink` and mark them clean
    pub fn flush_to<S: TextSink>(&mut self, sink: &mut S) -> Result<(), DisplayError> {
        for row in 0..SCREEN_ROWS {
            if !self.is_row_dirty(row) {
                continue;
            }
            if let Some(text) = self.line(row) {
                // row < 8
                sink.write_at(0, row as u8, text)?;
            }
            self.dirty_rows &= !(1 << row);
        }
        Ok(())
    }

    /// Get number of rows
    pub const fn rows(&self) -> usize {
        SCREEN_ROWS
    }

    /// Get number of columns
    pub const fn cols(&self) -> usize {
        SCREEN_COLS
    }

    /// Store `text` from `col` onward, clipped at the row end
    fn put(&mut self, row: usize, col: usize, text: &str) {
        let line = &mut self.cells[row];
        for (cell, ch) in line[col..].iter_mut().zip(text.chars()) {
            *cell = if ch.is_ascii() && !ch.is_ascii_control() {
                ch as u8
            } else {
                REPLACEMENT
            };
        }
        self.dirty_rows |= 1 << row;
    }
}

impl TextSink for Screen {
    fn write_at(&mut self, col: u8, row: u8, text: &str) -> Result<(), DisplayError> {
        let (col, row) = (usize::from(col), usize::from(row));
        if row >= SCREEN_ROWS || col >= SCREEN_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.put(row, col, text);
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line);
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::TextSinkExt;

    #[test]
    fn test_new_screen_is_blank_and_dirty() {
        let screen = Screen::new();
        assert!(screen.is_dirty());
        assert_eq!(screen.line(0), Some("                     "));
        assert_eq!(screen.lines().count(), SCREEN_ROWS);
        assert_eq!(screen.dimensions(), (21, 8));
    }

    #[test]
    fn test_write_at_marks_row() {
        let mut screen = Screen::new();
        screen.mark_clean();

        screen.write_at(2, 3, "Hi").unwrap();
        assert!(screen.is_row_dirty(3));
        assert!(!screen.is_row_dirty(2));
        assert!(screen.line(3).unwrap().starts_with("  Hi "));
    }

    #[test]
    fn test_write_clips_at_row_end() {
        let mut screen = Screen::new();
        screen.write_at(18, 0, "ABCDEF").unwrap();
        assert!(screen.line(0).unwrap().ends_with("ABC"));
        assert!(screen.line(1).unwrap().trim().is_empty());
    }

    #[test]
    fn test_write_off_screen_rejected() {
        let mut screen = Screen::new();
        assert_eq!(
            screen.write_at(21, 0, "x"),
            Err(DisplayError::InvalidCoordinates)
        );
        assert_eq!(
            screen.write_at(0, 8, "x"),
            Err(DisplayError::InvalidCoordinates)
        );
    }

    #[test]
    fn test_non_ascii_replaced() {
        let mut screen = Screen::new();
        screen.set_line(0, "5\u{b0}C");
        assert_eq!(screen.line(0).unwrap().trim_end(), "5?C");
    }

    #[test]
    fn test_helpers_through_screen() {
        let mut screen = Screen::new();
        screen.set_line(4, "XXXXXXXXXXXXXXXXXXXXX");
        screen.clear_to_eol(10, 4).unwrap();
        assert_eq!(screen.line(4).unwrap().trim_end(), "XXXXXXXXXX");

        screen.print_centered(0, "MENU").unwrap();
        assert_eq!(&screen.line(0).unwrap()[8..12], "MENU");

        screen.print_right(7, 0, "v1").unwrap();
        assert!(screen.line(7).unwrap().ends_with("v1"));
    }

    #[test]
    fn test_flush_writes_only_dirty_rows() {
        struct Count(usize);
        impl TextSink for Count {
            fn write_at(&mut self, _: u8, _: u8, _: &str) -> Result<(), DisplayError> {
                self.0 += 1;
                Ok(())
            }
            fn dimensions(&self) -> (u8, u8) {
                (21, 8)
            }
        }

        let mut screen = Screen::new();
        let mut sink = Count(0);
        screen.flush_to(&mut sink).unwrap();
        assert_eq!(sink.0, SCREEN_ROWS);
        assert!(!screen.is_dirty());

        screen.write_at(0, 5, "edit").unwrap();
        screen.write_at(4, 5, "ed").unwrap();
        assert_eq!(screen.dirty_rows().collect::<heapless::Vec<_, 8>>(), [5]);
        screen.flush_to(&mut sink).unwrap();
        assert_eq!(sink.0, SCREEN_ROWS + 1);
    }

    #[test]
    fn test_clear() {
        let mut screen = Screen::new();
        screen.set_line(1, "hello");
        screen.mark_clean();
        screen.clear();
        assert!(screen.is_dirty());
        assert!(screen.line(1).unwrap().trim().is_empty());
    }

    #[test]
    fn test_mark_dirty_forces_full_redraw() {
        let mut screen = Screen::new();
        screen.set_line(2, "menu");
        screen.mark_clean();
        assert!(!screen.is_dirty());

        screen.mark_dirty();
        assert_eq!(screen.dirty_rows().count(), screen.rows());
        assert!(screen.lines().all(|line| line.len() == screen.cols()));
        assert_eq!((screen.rows(), screen.cols()), (SCREEN_ROWS, SCREEN_COLS));
    }
}
