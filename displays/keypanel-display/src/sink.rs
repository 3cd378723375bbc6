//! Text sink trait
//!
//! A character-cell display reduced to "put this string here". Positions
//! are in character units, column first.

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Position outside the display
    InvalidCoordinates,
    /// Text does not fit the target buffer
    BufferOverflow,
}

/// Character-cell text output
pub trait TextSink {
    /// Write `text` starting at `col`, `row`
    ///
    /// Text running past the right edge is clipped.
    fn write_at(&mut self, col: u8, row: u8, text: &str) -> Result<(), DisplayError>;

    /// Returns (columns, rows) in character units
    fn dimensions(&self) -> (u8, u8);
}

const BLANKS: &str = "                                ";

/// Layout helpers available on every [`TextSink`]
pub trait TextSinkExt: TextSink {
    /// Blank `count` characters starting at `col`, `row`
    ///
    /// A span reaching past the line end, or a row below the screen, is
    /// ignored.
    fn clear_span(&mut self, col: u8, row: u8, count: u8) -> Result<(), DisplayError> {
        let (cols, rows) = self.dimensions();
        if u16::from(col) + u16::from(count) > u16::from(cols) || row >= rows {
            return Ok(());
        }

        let mut col = col;
        let mut remaining = usize::from(count);
        while remaining > 0 {
            let chunk = remaining.min(BLANKS.len());
            self.write_at(col, row, &BLANKS[..chunk])?;
            // chunk <= 32
            col += chunk as u8;
            remaining -= chunk;
        }
        Ok(())
    }

    /// Blank a whole row
    fn clear_line(&mut self, row: u8) -> Result<(), DisplayError> {
        self.clear_to_eol(0, row)
    }

    /// Blank from `col` to the end of the row
    fn clear_to_eol(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        let (cols, _) = self.dimensions();
        if col > cols {
            return Ok(());
        }
        self.clear_span(col, row, cols - col)
    }

    /// Write `text` centered on `row`
    ///
    /// Returns the number of characters written; 0 when the row is off
    /// screen or the text is wider than the display.
    fn print_centered(&mut self, row: u8, text: &str) -> Result<usize, DisplayError> {
        let (cols, rows) = self.dimensions();
        let count = text.chars().count();
        if row >= rows || count > usize::from(cols) {
            return Ok(0);
        }

        let col = (usize::from(cols) - count) / 2;
        // col < cols
        self.write_at(col as u8, row, text)?;
        Ok(count)
    }

    /// Write `text` flush against the right edge of `row`
    ///
    /// A non-zero `max_chars` shorter than the text limits the output to its
    /// first `max_chars` characters. Returns the number written.
    fn print_right(&mut self, row: u8, max_chars: u8, text: &str) -> Result<usize, DisplayError> {
        let (cols, rows) = self.dimensions();
        if row >= rows {
            return Ok(0);
        }

        let mut count = text.chars().count();
        if max_chars != 0 && usize::from(max_chars) < count {
            count = usize::from(max_chars);
        }
        count = count.min(usize::from(cols));
        if count == 0 {
            return Ok(0);
        }

        let end = text.char_indices().nth(count).map_or(text.len(), |(i, _)| i);
        // count <= cols
        self.write_at(cols - count as u8, row, &text[..end])?;
        Ok(count)
    }

    /// Write `value` in `radix` at `col`, `row`
    ///
    /// Returns the number of digits written.
    fn print_number(
        &mut self,
        col: u8,
        row: u8,
        value: u32,
        radix: u8,
    ) -> Result<usize, DisplayError> {
        let digits = crate::number::format_radix(value, radix);
        self.write_at(col, row, &digits)?;
        Ok(digits.len())
    }
}

impl<T: TextSink + ?Sized> TextSinkExt for T {}

impl<T: TextSink + ?Sized> TextSink for &mut T {
    fn write_at(&mut self, col: u8, row: u8, text: &str) -> Result<(), DisplayError> {
        (**self).write_at(col, row, text)
    }

    fn dimensions(&self) -> (u8, u8) {
        (**self).dimensions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    /// Records every write
    struct Recorder {
        cols: u8,
        rows: u8,
        writes: Vec<(u8, u8, heapless::String<32>), 16>,
    }

    impl Recorder {
        fn new(cols: u8, rows: u8) -> Self {
            Self {
                cols,
                rows,
                writes: Vec::new(),
            }
        }

        fn last(&self) -> (u8, u8, &str) {
            let (col, row, text) = self.writes.last().unwrap();
            (*col, *row, text.as_str())
        }
    }

    impl TextSink for Recorder {
        fn write_at(&mut self, col: u8, row: u8, text: &str) -> Result<(), DisplayError> {
            let mut owned = heapless::String::new();
            owned.push_str(text).map_err(|_| DisplayError::BufferOverflow)?;
            self.writes
                .push((col, row, owned))
                .map_err(|_| DisplayError::BufferOverflow)
        }

        fn dimensions(&self) -> (u8, u8) {
            (self.cols, self.rows)
        }
    }

    #[test]
    fn test_clear_span() {
        let mut sink = Recorder::new(21, 8);
        sink.clear_span(3, 2, 4).unwrap();
        assert_eq!(sink.last(), (3, 2, "    "));
    }

    #[test]
    fn test_clear_span_out_of_bounds_ignored() {
        let mut sink = Recorder::new(21, 8);
        sink.clear_span(18, 0, 4).unwrap();
        sink.clear_span(0, 8, 1).unwrap();
        sink.clear_to_eol(22, 0).unwrap();
        assert!(sink.writes.is_empty());
    }

    #[test]
    fn test_clear_line_and_eol() {
        let mut sink = Recorder::new(21, 8);
        sink.clear_line(7).unwrap();
        assert_eq!(sink.last().0, 0);
        assert_eq!(sink.last().2.len(), 21);

        sink.clear_to_eol(15, 1).unwrap();
        assert_eq!(sink.last(), (15, 1, "      "));
    }

    #[test]
    fn test_clear_span_longer_than_blank_chunk() {
        let mut sink = Recorder::new(40, 1);
        sink.clear_line(0).unwrap();
        assert_eq!(sink.writes.len(), 2);
        assert_eq!(sink.writes[1].0, 32);
        assert_eq!(sink.writes[1].2.len(), 8);
    }

    #[test]
    fn test_print_centered() {
        let mut sink = Recorder::new(21, 8);
        assert_eq!(sink.print_centered(0, "MENU"), Ok(4));
        assert_eq!(sink.last(), (8, 0, "MENU"));
    }

    #[test]
    fn test_print_centered_too_wide() {
        let mut sink = Recorder::new(4, 2);
        assert_eq!(sink.print_centered(0, "TOO WIDE"), Ok(0));
        assert_eq!(sink.print_centered(2, "ok"), Ok(0));
        assert!(sink.writes.is_empty());
    }

    #[test]
    fn test_print_right() {
        let mut sink = Recorder::new(21, 8);
        assert_eq!(sink.print_right(3, 0, "42"), Ok(2));
        assert_eq!(sink.last(), (19, 3, "42"));

        assert_eq!(sink.print_right(3, 3, "VOLUME"), Ok(3));
        assert_eq!(sink.last(), (18, 3, "VOL"));

        assert_eq!(sink.print_right(9, 0, "x"), Ok(0));
    }

    #[test]
    fn test_print_number() {
        let mut sink = Recorder::new(21, 8);
        assert_eq!(sink.print_number(1, 1, 255, 16), Ok(2));
        assert_eq!(sink.last(), (1, 1, "FF"));
    }

    #[test]
    fn test_borrowed_sink() {
        fn draw<S: TextSink>(mut sink: S) {
            sink.clear_span(0, 0, 1).unwrap();
        }

        let mut sink = Recorder::new(21, 8);
        draw(&mut sink);
        assert_eq!(sink.writes.len(), 1);
    }
}
