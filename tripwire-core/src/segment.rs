//! Seven-segment encoding
//!
//! Bits 0-6 of a row are segments A-G, bit 7 is the decimal point. The
//! four digits of an `MM:SS` backpack live in rows 0, 1, 3 and 4; row 2
//! drives the colon and is either all ones or all zeros.

use crate::countdown::Digits;
use crate::traits::{SegmentDisplay, ROW_COUNT};

/// Glyphs for 0-9 and A-F
pub const FONT: [u8; 16] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, // 0-7
    0x7F, 0x6F, 0x77, 0x7C, 0x39, 0x5E, 0x79, 0x71, // 8-F
];

/// Decimal point bit
pub const DOT: u16 = 0x80;

/// Row wired to the colon
pub const COLON_ROW: u8 = 2;

/// Colon lit
pub const COLON_PATTERN: u16 = 0xFFFF;

/// Rows of the four digits, left to right
pub const DIGIT_ROWS: [u8; 4] = [0, 1, 3, 4];

/// Segment pattern for a hex digit
///
/// Returns `None` for values above 0xF.
pub fn encode_digit(value: u8, dot: bool) -> Option<u16> {
    let glyph = *FONT.get(usize::from(value))? as u16;
    Some(if dot { glyph | DOT } else { glyph })
}

/// Write a hex digit into a row
///
/// Positions past the last row and values above 0xF are ignored.
pub fn write_digit<D: SegmentDisplay>(
    display: &mut D,
    position: u8,
    value: u8,
    dot: bool,
    flush: bool,
) -> Result<(), D::Error> {
    if usize::from(position) >= ROW_COUNT {
        return Ok(());
    }
    match encode_digit(value, dot) {
        Some(pattern) => display.set_row(position, pattern, flush),
        None => Ok(()),
    }
}

/// Write a raw segment bitmask into a row
pub fn write_digit_raw<D: SegmentDisplay>(
    display: &mut D,
    position: u8,
    bitmask: u16,
    flush: bool,
) -> Result<(), D::Error> {
    display.set_row(position, bitmask, flush)
}

/// Light or blank the colon
pub fn set_colon<D: SegmentDisplay>(display: &mut D, on: bool, flush: bool) -> Result<(), D::Error> {
    let pattern = if on { COLON_PATTERN } else { 0 };
    display.set_row(COLON_ROW, pattern, flush)
}

/// Show `MM:SS` with the colon lit, in a single flush
pub fn show_time<D: SegmentDisplay>(display: &mut D, digits: Digits) -> Result<(), D::Error> {
    for (row, value) in DIGIT_ROWS.into_iter().zip(digits.as_array()) {
        write_digit(display, row, value, false, false)?;
    }
    set_colon(display, true, false)?;
    display.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// In-memory display counting flushes
    struct MockDisplay {
        rows: [u16; ROW_COUNT],
        flushes: usize,
    }

    impl MockDisplay {
        fn new() -> Self {
            Self {
                rows: [0; ROW_COUNT],
                flushes: 0,
            }
        }
    }

    impl SegmentDisplay for MockDisplay {
        type Error = ();

        fn set_row(&mut self, index: u8, pattern: u16, flush: bool) -> Result<(), ()> {
            if let Some(row) = self.rows.get_mut(usize::from(index)) {
                *row = pattern;
                if flush {
                    self.flushes += 1;
                }
            }
            Ok(())
        }

        fn row(&self, index: u8) -> Option<u16> {
            self.rows.get(usize::from(index)).copied()
        }

        fn flush(&mut self) -> Result<(), ()> {
            self.flushes += 1;
            Ok(())
        }

        fn clear(&mut self, flush: bool) -> Result<(), ()> {
            self.rows = [0; ROW_COUNT];
            if flush {
                self.flushes += 1;
            }
            Ok(())
        }

        fn set_brightness(&mut self, _level: u8) -> Result<(), ()> {
            Ok(())
        }

        fn set_blink_rate(&mut self, _rate: u8) -> Result<(), ()> {
            Ok(())
        }
    }

    #[test]
    fn test_font_table() {
        assert_eq!(encode_digit(0, false), Some(0x3F));
        assert_eq!(encode_digit(1, false), Some(0x06));
        assert_eq!(encode_digit(8, false), Some(0x7F));
        assert_eq!(encode_digit(15, false), Some(0x71));
        assert_eq!(encode_digit(16, false), None);
        assert_eq!(encode_digit(1, true), Some(0x86));
    }

    #[test]
    fn test_write_digit_ignores_bad_input() {
        let mut display = MockDisplay::new();
        write_digit(&mut display, 8, 3, false, true).unwrap();
        write_digit(&mut display, 0, 16, false, true).unwrap();
        assert_eq!(display.rows, [0; ROW_COUNT]);
        assert_eq!(display.flushes, 0);

        write_digit(&mut display, 7, 0xA, true, false).unwrap();
        assert_eq!(display.row(7), Some(0x77 | DOT));
    }

    #[test]
    fn test_colon() {
        let mut display = MockDisplay::new();
        set_colon(&mut display, true, false).unwrap();
        assert_eq!(display.row(COLON_ROW), Some(0xFFFF));
        set_colon(&mut display, false, false).unwrap();
        assert_eq!(display.row(COLON_ROW), Some(0));
    }

    #[test]
    fn test_show_time_single_flush() {
        let mut display = MockDisplay::new();
        show_time(&mut display, Digits::from_seconds(65)).unwrap();
        assert_eq!(display.flushes, 1);
        assert_eq!(display.row(0), Some(0x3F));
        assert_eq!(display.row(1), Some(0x06));
        assert_eq!(display.row(2), Some(COLON_PATTERN));
        assert_eq!(display.row(3), Some(0x3F));
        assert_eq!(display.row(4), Some(0x6D));
    }

    proptest! {
        #[test]
        fn prop_dot_sets_bit_seven(value in 0u8..16) {
            let plain = encode_digit(value, false).unwrap();
            prop_assert_eq!(encode_digit(value, true).unwrap(), plain | DOT);
            prop_assert_eq!(plain & DOT, 0);
        }
    }
}
