//! Segment display trait
//!
//! A display is eight 16-bit rows of segment bits, mirrored in memory and
//! pushed to the hardware as a whole.

/// Number of addressable rows
pub const ROW_COUNT: usize = 8;

/// Trait for a row-addressed segment display
///
/// Row indices outside `0..ROW_COUNT` are ignored by `set_row` and
/// reported as `None` by `row`; they are never an error.
pub trait SegmentDisplay {
    /// Error type for the underlying transport
    type Error;

    /// Store `pattern` in `index`, pushing the whole buffer when `flush` is set
    fn set_row(&mut self, index: u8, pattern: u16, flush: bool) -> Result<(), Self::Error>;

    /// Current buffered pattern of a row
    fn row(&self, index: u8) -> Option<u16>;

    /// Push the whole buffer to the hardware
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Blank every row
    fn clear(&mut self, flush: bool) -> Result<(), Self::Error>;

    /// Set brightness (0-15, higher values are capped)
    fn set_brightness(&mut self, level: u8) -> Result<(), Self::Error>;

    /// Set blink rate (0 = off, 1 = 2 Hz, 2 = 1 Hz, 3 = 0.5 Hz; others mean off)
    fn set_blink_rate(&mut self, rate: u8) -> Result<(), Self::Error>;
}
