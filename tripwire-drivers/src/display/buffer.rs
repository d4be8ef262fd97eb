//! In-memory mirror of the HT16K33 display RAM

use tripwire_core::traits::ROW_COUNT;

/// Eight 16-bit segment rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayBuffer {
    rows: [u16; ROW_COUNT],
}

impl DisplayBuffer {
    /// Bytes in one full flush
    pub const BYTES: usize = ROW_COUNT * 2;

    pub const fn new() -> Self {
        Self {
            rows: [0; ROW_COUNT],
        }
    }

    /// Store a row; returns false (and changes nothing) for a bad index
    pub fn set(&mut self, index: u8, pattern: u16) -> bool {
        match self.rows.get_mut(usize::from(index)) {
            Some(row) => {
                *row = pattern;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, index: u8) -> Option<u16> {
        self.rows.get(usize::from(index)).copied()
    }

    pub fn clear(&mut self) {
        self.rows = [0; ROW_COUNT];
    }

    pub fn rows(&self) -> [u16; ROW_COUNT] {
        self.rows
    }

    /// Display RAM image, low byte then high byte per row
    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        let mut bytes = [0u8; Self::BYTES];
        for (chunk, row) in bytes.chunks_exact_mut(2).zip(self.rows.iter()) {
            chunk.copy_from_slice(&row.to_le_bytes());
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_byte_layout() {
        let mut buf = DisplayBuffer::new();
        buf.set(0, 0x0006);
        buf.set(2, 0xFFFF);
        buf.set(7, 0x1280);
        let bytes = buf.to_bytes();
        assert_eq!(&bytes[0..2], &[0x06, 0x00]);
        assert_eq!(&bytes[4..6], &[0xFF, 0xFF]);
        assert_eq!(&bytes[14..16], &[0x80, 0x12]);
    }

    #[test]
    fn test_out_of_range_index() {
        let mut buf = DisplayBuffer::new();
        assert!(!buf.set(8, 0x3F));
        assert_eq!(buf, DisplayBuffer::new());
        assert_eq!(buf.get(8), None);
    }

    proptest! {
        #[test]
        fn prop_row_round_trip(index in 0u8..8, pattern in any::<u16>()) {
            let mut buf = DisplayBuffer::new();
            prop_assert!(buf.set(index, pattern));
            prop_assert_eq!(buf.get(index), Some(pattern));
        }

        #[test]
        fn prop_bad_index_is_noop(index in 8u8.., pattern in any::<u16>()) {
            let mut buf = DisplayBuffer::new();
            buf.set(3, 0x7F);
            let before = buf;
            prop_assert!(!buf.set(index, pattern));
            prop_assert_eq!(buf, before);
            prop_assert_eq!(buf.get(index), None);
        }
    }
}
