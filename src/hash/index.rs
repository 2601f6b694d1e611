use serde::{Deserialize, Serialize};

/// Number of probes per index for both resolutions.
pub const NUM_PROBES: usize = 4;

/// 16-bit index for the tiny filter: four 4-bit probes, lowest nibble first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TinyIndex(u16);

impl TinyIndex {
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    /// Probe values `p0..p3`, each in `0..16`.
    pub const fn probes(self) -> [u8; NUM_PROBES] {
        let v = self.0;
        [
            (v & 0x0f) as u8,
            ((v >> 4) & 0x0f) as u8,
            ((v >> 8) & 0x0f) as u8,
            ((v >> 12) & 0x0f) as u8,
        ]
    }

    /// OR of the four single-bit probe masks.
    pub fn mask(self) -> u16 {
        self.probes().iter().fold(0u16, |acc, &p| acc | (1 << p))
    }
}

impl From<u16> for TinyIndex {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<TinyIndex> for u16 {
    fn from(index: TinyIndex) -> Self {
        index.0
    }
}

/// 32-bit index for the small filter: four probe bytes, least significant
/// byte first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SmallIndex(u32);

impl SmallIndex {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn probes(self) -> [u8; NUM_PROBES] {
        self.0.to_le_bytes()
    }

    /// `(byte_offset, bit)` pairs addressed in a 32-byte bitmap.
    pub fn bit_addresses(self) -> [(usize, usize); NUM_PROBES] {
        self.probes().map(|a| (((a >> 3) & 0x1f) as usize, (a & 0x07) as usize))
    }
}

impl From<u32> for SmallIndex {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<SmallIndex> for u32 {
    fn from(index: SmallIndex) -> Self {
        index.0
    }
}
