//! I2C bus abstractions
//!
//! Provides the master-side bus trait the register transport is built on,
//! plus an adapter for any `embedded-hal` 1.0 blocking I2C peripheral.

use embedded_hal::i2c::{ErrorKind, I2c};

/// Fault reported by an I2C transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cFault {
    /// Bus error (misplaced start/stop)
    Bus,
    /// Arbitration lost to another master
    ArbitrationLost,
    /// Device did not acknowledge
    Nack,
    /// Transaction did not finish within the bus timeout
    Timeout,
    /// Data overrun/underrun
    Overrun,
    /// Other error
    Other,
}

impl From<ErrorKind> for I2cFault {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => I2cFault::Bus,
            ErrorKind::ArbitrationLoss => I2cFault::ArbitrationLost,
            ErrorKind::NoAcknowledge(_) => I2cFault::Nack,
            ErrorKind::Overrun => I2cFault::Overrun,
            _ => I2cFault::Other,
        }
    }
}

impl core::fmt::Display for I2cFault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = match self {
            I2cFault::Bus => "bus error",
            I2cFault::ArbitrationLost => "arbitration lost",
            I2cFault::Nack => "no acknowledge",
            I2cFault::Timeout => "timeout",
            I2cFault::Overrun => "overrun",
            I2cFault::Other => "i2c error",
        };
        f.write_str(text)
    }
}

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices. Every call is a complete, blocking transaction.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error: Into<I2cFault>;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically register address)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

/// Wraps an `embedded-hal` blocking I2C peripheral as an [`I2cBus`]
///
/// Board glue (linux-embedded-hal, embassy blocking I2C, ...) hands its
/// peripheral in here; faults are folded into [`I2cFault`].
pub struct EmbeddedHalI2c<T> {
    inner: T,
}

impl<T: I2c> EmbeddedHalI2c<T> {
    /// Wrap a peripheral
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Release the wrapped peripheral
    pub fn release(self) -> T {
        self.inner
    }
}

fn fault_of<E: embedded_hal::i2c::Error>(e: E) -> I2cFault {
    I2cFault::from(e.kind())
}

impl<T: I2c> I2cBus for EmbeddedHalI2c<T> {
    type Error = I2cFault;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cFault> {
        self.inner.write(address, data).map_err(fault_of)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), I2cFault> {
        self.inner.read(address, buf).map_err(fault_of)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), I2cFault> {
        self.inner
            .write_read(address, write_data, read_buf)
            .map_err(fault_of)
    }
}
