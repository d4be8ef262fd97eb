//! HT16K33 LED controller
//!
//! The controller takes single command bytes for setup and dimming and a
//! block write into display RAM for the segments. This driver keeps a copy
//! of display RAM and always writes all 16 bytes, so the display never
//! shows a mix of old and new rows.
//!
//! # Usage
//!
//! ```ignore
//! let mut display = Ht16k33::new(i2c, BusAddress::new(0x70));
//! display.initialize()?;
//! display.set_row(0, 0x3F, true)?; // "0" in the first digit
//! ```

use tripwire_core::traits::SegmentDisplay;
use tripwire_hal::I2cBus;

use super::buffer::DisplayBuffer;
use crate::bus::{BusAddress, BusError, RegisterBus};

/// Register map
pub mod regs {
    /// Display RAM, 16 bytes
    pub const DISPLAY_RAM: u8 = 0x00;
    /// System setup command, bit 0 = oscillator
    pub const SYSTEM_SETUP: u8 = 0x20;
    /// Key data, three 16-bit rows
    pub const KEY_DATA: u8 = 0x40;
    /// Display setup command, bit 0 = display on, bits 1-2 = blink
    pub const DISPLAY_SETUP: u8 = 0x80;
    /// Dimming command, bits 0-3 = level
    pub const DIMMING: u8 = 0xE0;

    pub const OSCILLATOR_ON: u8 = 0x01;
    pub const DISPLAY_ON: u8 = 0x01;
}

/// Highest dimming level
pub const MAX_BRIGHTNESS: u8 = 15;

/// Number of key-scan rows
pub const KEY_ROWS: u8 = 3;

/// K13..K1
const KEY_MASK: u16 = 0x1FFF;

/// Hardware blink settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BlinkRate {
    #[default]
    Off = 0,
    Hz2 = 1,
    Hz1 = 2,
    HalfHz = 3,
}

impl BlinkRate {
    /// Map 0-3 to a rate; anything else is `Off`
    pub fn from_u8(rate: u8) -> Self {
        match rate {
            1 => BlinkRate::Hz2,
            2 => BlinkRate::Hz1,
            3 => BlinkRate::HalfHz,
            _ => BlinkRate::Off,
        }
    }
}

/// HT16K33 driver
pub struct Ht16k33<B> {
    bus: RegisterBus<B>,
    buffer: DisplayBuffer,
    oscillator_on: bool,
    blink_rate: BlinkRate,
    brightness: u8,
}

impl<B: I2cBus> Ht16k33<B> {
    /// Create a driver; nothing is sent until [`Ht16k33::initialize`]
    pub fn new(bus: B, address: BusAddress) -> Self {
        Self {
            bus: RegisterBus::new(bus, address),
            buffer: DisplayBuffer::new(),
            oscillator_on: false,
            blink_rate: BlinkRate::Off,
            brightness: MAX_BRIGHTNESS,
        }
    }

    /// Start the oscillator, stop blinking, full brightness, blank display
    pub fn initialize(&mut self) -> Result<(), BusError> {
        self.command(regs::SYSTEM_SETUP | regs::OSCILLATOR_ON)?;
        self.oscillator_on = true;
        self.set_blink(BlinkRate::Off)?;
        self.set_brightness(MAX_BRIGHTNESS)?;
        self.clear(true)?;
        debug!("ht16k33 {=u8:#x} initialized", self.bus.address().get());
        Ok(())
    }

    /// Set the dimming level, capping at 15
    pub fn set_brightness(&mut self, level: u8) -> Result<(), BusError> {
        let level = level.min(MAX_BRIGHTNESS);
        self.command(regs::DIMMING | level)?;
        self.brightness = level;
        debug!("brightness {}", level);
        Ok(())
    }

    /// Set the blink rate; the display stays on
    pub fn set_blink(&mut self, rate: BlinkRate) -> Result<(), BusError> {
        self.command(regs::DISPLAY_SETUP | regs::DISPLAY_ON | ((rate as u8) << 1))?;
        self.blink_rate = rate;
        debug!("blink rate {}", rate);
        Ok(())
    }

    /// Store a row, writing the whole buffer when `flush` is set
    ///
    /// Indices past 7 are ignored.
    pub fn set_row(&mut self, index: u8, pattern: u16, flush: bool) -> Result<(), BusError> {
        if !self.buffer.set(index, pattern) {
            return Ok(());
        }
        if flush {
            self.write_display()?;
        }
        Ok(())
    }

    pub fn get_row(&self, index: u8) -> Option<u16> {
        self.buffer.get(index)
    }

    /// Snapshot of all eight rows
    pub fn buffer(&self) -> [u16; 8] {
        self.buffer.rows()
    }

    /// Blank every row
    pub fn clear(&mut self, flush: bool) -> Result<(), BusError> {
        self.buffer.clear();
        if flush {
            self.write_display()?;
        }
        Ok(())
    }

    /// Push the buffer to display RAM in one transaction
    pub fn write_display(&mut self) -> Result<(), BusError> {
        self.bus
            .write_block(regs::DISPLAY_RAM, &self.buffer.to_bytes())
    }

    /// Pressed keys of a scan row (0-2), K1 in bit 0
    ///
    /// Returns `Ok(None)` for a row past the last one.
    pub fn read_keys(&mut self, row: u8) -> Result<Option<u16>, BusError> {
        if row >= KEY_ROWS {
            return Ok(None);
        }
        let keys = self.bus.read_word(regs::KEY_DATA + row * 2)?;
        Ok(Some(keys & KEY_MASK))
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn blink_rate(&self) -> BlinkRate {
        self.blink_rate
    }

    pub fn is_oscillator_on(&self) -> bool {
        self.oscillator_on
    }

    /// Give the bus back
    pub fn release(self) -> B {
        self.bus.release()
    }

    /// Single-byte command; the controller ignores the trailing data byte
    fn command(&mut self, cmd: u8) -> Result<(), BusError> {
        self.bus.write_byte(cmd, 0x00)
    }
}

impl<B: I2cBus> SegmentDisplay for Ht16k33<B> {
    type Error = BusError;

    fn set_row(&mut self, index: u8, pattern: u16, flush: bool) -> Result<(), BusError> {
        Ht16k33::set_row(self, index, pattern, flush)
    }

    fn row(&self, index: u8) -> Option<u16> {
        self.get_row(index)
    }

    fn flush(&mut self) -> Result<(), BusError> {
        self.write_display()
    }

    fn clear(&mut self, flush: bool) -> Result<(), BusError> {
        Ht16k33::clear(self, flush)
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), BusError> {
        Ht16k33::set_brightness(self, level)
    }

    fn set_blink_rate(&mut self, rate: u8) -> Result<(), BusError> {
        self.set_blink(BlinkRate::from_u8(rate))
    }
}
