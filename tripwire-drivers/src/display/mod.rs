//! HT16K33 segment display driver
//!
//! - Register map and blink settings
//! - Buffered row writes flushed as one block
//! - Key-scan readout

mod buffer;
mod ht16k33;

pub use buffer::DisplayBuffer;
pub use ht16k33::{regs, BlinkRate, Ht16k33};
