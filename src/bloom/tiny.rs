use super::traits::ProbeFilter;
use crate::filter::FilterResult;
use crate::hash::TinyIndex;
use serde::{Deserialize, Serialize};

/// 16-slot bitmap addressed directly by the 4-bit probes of a [`TinyIndex`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TinyBitmap(u16);

impl TinyBitmap {
    pub const EMPTY: TinyBitmap = TinyBitmap(0);

    pub const fn new(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    pub fn update(self, index: TinyIndex) -> Self {
        Self(self.0 | index.mask())
    }

    pub fn test(self, index: TinyIndex) -> FilterResult {
        let mask = index.mask();
        FilterResult::from_all_set(self.0 & mask == mask)
    }

    /// Whether slot `probe` (0..16) is set. Out of range slots read as clear.
    pub fn is_set(self, probe: u8) -> bool {
        probe < 16 && self.0 & (1 << probe) != 0
    }
}

impl From<u16> for TinyBitmap {
    fn from(bits: u16) -> Self {
        Self(bits)
    }
}

impl From<TinyBitmap> for u16 {
    fn from(bitmap: TinyBitmap) -> Self {
        bitmap.0
    }
}

impl ProbeFilter for TinyBitmap {
    type Index = TinyIndex;

    fn empty() -> Self {
        Self::EMPTY
    }

    fn update(self, index: TinyIndex) -> Self {
        TinyBitmap::update(self, index)
    }

    fn test(self, index: TinyIndex) -> FilterResult {
        TinyBitmap::test(self, index)
    }

    fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    fn count_ones(self) -> usize {
        self.0.count_ones() as usize
    }
}
