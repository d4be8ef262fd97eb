//! Register transport
//!
//! Byte, word and block access to the registers of a single device on an
//! I2C bus. Every operation is one complete bus transaction to the
//! configured address. Faults are returned with the address and register
//! attached; nothing is retried here.
//!
//! Word values are little-endian (low byte at the lower register) unless
//! the method says otherwise.

use heapless::Vec;
use tripwire_hal::{I2cBus, I2cFault};

/// SMBus block transfer limit
pub const MAX_BLOCK_LEN: usize = 32;

/// 7-bit device address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusAddress(u8);

impl BusAddress {
    /// Create from a 7-bit address, dropping bit 7
    pub const fn new(address: u8) -> Self {
        Self(address & 0x7F)
    }

    /// Get the 7-bit address
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// What went wrong in a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusFault {
    /// The bus reported a fault
    Io(I2cFault),
    /// Block longer than [`MAX_BLOCK_LEN`]
    BlockTooLong(usize),
}

/// Failed register access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusError {
    pub address: u8,
    pub register: u8,
    pub fault: BusFault,
}

impl core::fmt::Display for BusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "i2c device {:#04x} register {:#04x}: ",
            self.address, self.register
        )?;
        match self.fault {
            BusFault::Io(fault) => write!(f, "{}", fault),
            BusFault::BlockTooLong(len) => {
                write!(f, "block of {} bytes exceeds {}", len, MAX_BLOCK_LEN)
            }
        }
    }
}

/// Register access to one device
pub struct RegisterBus<B> {
    bus: B,
    address: BusAddress,
}

impl<B: I2cBus> RegisterBus<B> {
    pub fn new(bus: B, address: BusAddress) -> Self {
        Self { bus, address }
    }

    pub fn address(&self) -> BusAddress {
        self.address
    }

    /// Give the bus back
    pub fn release(self) -> B {
        self.bus
    }

    /// Write one byte to `register`
    pub fn write_byte(&mut self, register: u8, value: u8) -> Result<(), BusError> {
        trace!("i2c {=u8:#x} write8 {=u8:#x}", self.address.get(), register);
        let result = self.bus.write(self.address.get(), &[register, value]);
        self.check(register, result)
    }

    /// Write a 16-bit word to `register`
    pub fn write_word(&mut self, register: u8, value: u16) -> Result<(), BusError> {
        trace!("i2c {=u8:#x} write16 {=u8:#x}", self.address.get(), register);
        let [lo, hi] = value.to_le_bytes();
        let result = self.bus.write(self.address.get(), &[register, lo, hi]);
        self.check(register, result)
    }

    /// Write up to [`MAX_BLOCK_LEN`] bytes starting at `register`
    pub fn write_block(&mut self, register: u8, data: &[u8]) -> Result<(), BusError> {
        if data.len() > MAX_BLOCK_LEN {
            return Err(self.error(register, BusFault::BlockTooLong(data.len())));
        }
        trace!(
            "i2c {=u8:#x} write block {=u8:#x} len {}",
            self.address.get(),
            register,
            data.len()
        );

        let mut frame: Vec<u8, { MAX_BLOCK_LEN + 1 }> = Vec::new();
        // Capacity checked above
        let _ = frame.push(register);
        let _ = frame.extend_from_slice(data);

        let result = self.bus.write(self.address.get(), &frame);
        self.check(register, result)
    }

    /// Read `len` bytes starting at `register`
    pub fn read_block(
        &mut self,
        register: u8,
        len: usize,
    ) -> Result<Vec<u8, MAX_BLOCK_LEN>, BusError> {
        let mut buf: Vec<u8, MAX_BLOCK_LEN> = Vec::new();
        buf.resize(len, 0)
            .map_err(|_| self.error(register, BusFault::BlockTooLong(len)))?;
        self.read_into(register, &mut buf)?;
        Ok(buf)
    }

    /// Fill `buf` from consecutive registers starting at `register`
    pub fn read_into(&mut self, register: u8, buf: &mut [u8]) -> Result<(), BusError> {
        trace!(
            "i2c {=u8:#x} read {=u8:#x} len {}",
            self.address.get(),
            register,
            buf.len()
        );
        let result = self.bus.write_read(self.address.get(), &[register], buf);
        self.check(register, result)
    }

    pub fn read_byte(&mut self, register: u8) -> Result<u8, BusError> {
        let mut buf = [0u8; 1];
        self.read_into(register, &mut buf)?;
        Ok(buf[0])
    }

    pub fn read_i8(&mut self, register: u8) -> Result<i8, BusError> {
        self.read_byte(register).map(|b| b as i8)
    }

    /// Read a little-endian word
    pub fn read_word(&mut self, register: u8) -> Result<u16, BusError> {
        let mut buf = [0u8; 2];
        self.read_into(register, &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Read a big-endian word
    pub fn read_word_be(&mut self, register: u8) -> Result<u16, BusError> {
        let mut buf = [0u8; 2];
        self.read_into(register, &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Read a little-endian signed word
    pub fn read_i16(&mut self, register: u8) -> Result<i16, BusError> {
        self.read_word(register).map(|w| w as i16)
    }

    fn check<E: Into<I2cFault>>(&self, register: u8, result: Result<(), E>) -> Result<(), BusError> {
        result.map_err(|e| {
            let fault = e.into();
            warn!(
                "i2c {=u8:#x} register {=u8:#x} failed: {}",
                self.address.get(),
                register,
                fault
            );
            self.error(register, BusFault::Io(fault))
        })
    }

    fn error(&self, register: u8, fault: BusFault) -> BusError {
        BusError {
            address: self.address.get(),
            register,
            fault,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockBus;
    use super::*;

    fn device() -> RegisterBus<MockBus> {
        RegisterBus::new(MockBus::new(), BusAddress::new(0x70))
    }

    #[test]
    fn test_address_masked_to_seven_bits() {
        assert_eq!(BusAddress::new(0xF0).get(), 0x70);
        assert_eq!(BusAddress::new(0x08).get(), 0x08);
    }

    #[test]
    fn test_writes_are_framed_with_register() {
        let mut dev = device();
        dev.write_byte(0xE0, 0x00).unwrap();
        dev.write_word(0x10, 0xABCD).unwrap();
        dev.write_block(0x00, &[1, 2, 3]).unwrap();

        let bus = dev.release();
        assert_eq!(bus.last_address, Some(0x70));
        assert_eq!(bus.writes[0].as_slice(), &[0xE0, 0x00]);
        assert_eq!(bus.writes[1].as_slice(), &[0x10, 0xCD, 0xAB]);
        assert_eq!(bus.writes[2].as_slice(), &[0x00, 1, 2, 3]);
    }

    #[test]
    fn test_block_limit() {
        let mut dev = device();
        assert!(dev.write_block(0x00, &[0; 32]).is_ok());
        assert_eq!(
            dev.write_block(0x00, &[0; 33]),
            Err(BusError {
                address: 0x70,
                register: 0x00,
                fault: BusFault::BlockTooLong(33),
            })
        );
        assert!(dev.read_block(0x00, 33).is_err());
    }

    #[test]
    fn test_reads() {
        let mut bus = MockBus::new();
        bus.registers[0x40] = 0x34;
        bus.registers[0x41] = 0x92;
        let mut dev = RegisterBus::new(bus, BusAddress::new(0x70));

        assert_eq!(dev.read_byte(0x40).unwrap(), 0x34);
        assert_eq!(dev.read_i8(0x41).unwrap(), 0x92u8 as i8);
        assert_eq!(dev.read_word(0x40).unwrap(), 0x9234);
        assert_eq!(dev.read_word_be(0x40).unwrap(), 0x3492);
        assert_eq!(dev.read_i16(0x40).unwrap(), 0x9234u16 as i16);
        assert_eq!(dev.read_block(0x40, 2).unwrap().as_slice(), &[0x34, 0x92]);
    }

    #[test]
    fn test_fault_carries_address_and_register() {
        let mut bus = MockBus::new();
        bus.fail = Some(I2cFault::Nack);
        let mut dev = RegisterBus::new(bus, BusAddress::new(0x71));

        let err = dev.write_byte(0x81, 0x00).unwrap_err();
        assert_eq!(
            err,
            BusError {
                address: 0x71,
                register: 0x81,
                fault: BusFault::Io(I2cFault::Nack),
            }
        );
        assert_eq!(
            err.to_string(),
            "i2c device 0x71 register 0x81: no acknowledge"
        );
        assert!(dev.read_word(0x40).is_err());
    }
}
