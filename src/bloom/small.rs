use super::traits::ProbeFilter;
use crate::error::{BloomError, BloomResult};
use crate::filter::FilterResult;
use crate::hash::SmallIndex;
use bitvec::{array::BitArray, order::Lsb0};
use serde::{Deserialize, Serialize};

pub const SMALL_BITMAP_BYTES: usize = 32;

/// 256-bit bitmap. Probe byte `a` addresses byte `a >> 3`, bit `a & 7`,
/// bits numbered from the least significant end of each byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    from = "[u8; SMALL_BITMAP_BYTES]",
    into = "[u8; SMALL_BITMAP_BYTES]"
)]
pub struct SmallBitmap {
    bits: BitArray<[u8; SMALL_BITMAP_BYTES], Lsb0>,
}

impl SmallBitmap {
    pub fn new() -> Self {
        Self::from_bytes([0u8; SMALL_BITMAP_BYTES])
    }

    pub fn from_bytes(bytes: [u8; SMALL_BITMAP_BYTES]) -> Self {
        Self {
            bits: BitArray::new(bytes),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    pub fn into_bytes(self) -> [u8; SMALL_BITMAP_BYTES] {
        self.bits.into_inner()
    }

    /// Sets one bit by explicit address. For bulk loaders that compute
    /// addresses themselves.
    pub fn set_bit(&mut self, byte_offset: usize, bit: usize) -> BloomResult<()> {
        let position = Self::position(byte_offset, bit)?;
        self.bits.set(position, true);
        Ok(())
    }

    pub fn get_bit(&self, byte_offset: usize, bit: usize) -> BloomResult<bool> {
        let position = Self::position(byte_offset, bit)?;
        Ok(self.bits[position])
    }

    pub fn update(self, index: SmallIndex) -> Self {
        let mut next = self;
        for (byte_offset, bit) in index.bit_addresses() {
            next.bits.set(byte_offset * 8 + bit, true);
        }
        next
    }

    pub fn test(self, index: SmallIndex) -> FilterResult {
        let all_set = index
            .bit_addresses()
            .into_iter()
            .all(|(byte_offset, bit)| self.bits[byte_offset * 8 + bit]);
        FilterResult::from_all_set(all_set)
    }

    fn position(byte_offset: usize, bit: usize) -> BloomResult<usize> {
        if byte_offset >= SMALL_BITMAP_BYTES || bit >= 8 {
            return Err(BloomError::InvalidBitAddress { byte_offset, bit });
        }
        Ok(byte_offset * 8 + bit)
    }
}

impl Default for SmallBitmap {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[u8; SMALL_BITMAP_BYTES]> for SmallBitmap {
    fn from(bytes: [u8; SMALL_BITMAP_BYTES]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<SmallBitmap> for [u8; SMALL_BITMAP_BYTES] {
    fn from(bitmap: SmallBitmap) -> Self {
        bitmap.into_bytes()
    }
}

impl ProbeFilter for SmallBitmap {
    type Index = SmallIndex;

    fn empty() -> Self {
        Self::new()
    }

    fn update(self, index: SmallIndex) -> Self {
        SmallBitmap::update(self, index)
    }

    fn test(self, index: SmallIndex) -> FilterResult {
        SmallBitmap::test(self, index)
    }

    fn union(self, other: Self) -> Self {
        let mut bytes = self.into_bytes();
        for (byte, theirs) in bytes.iter_mut().zip(other.into_bytes()) {
            *byte |= theirs;
        }
        Self::from_bytes(bytes)
    }

    fn count_ones(self) -> usize {
        self.bits.count_ones()
    }
}
