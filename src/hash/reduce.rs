//! XOR folding of a 256-bit digest into filter indices.
//!
//! Every digest bit contributes to the output, so a single flipped input bit
//! is likely to change the probes. Plain truncation would throw most of the
//! digest away.

use super::digest::Digest;
use super::index::{SmallIndex, TinyIndex};
use tracing::trace;

/// Folds the digest as sixteen little-endian `u16` words.
pub fn reduce_tiny(digest: &Digest) -> TinyIndex {
    let folded = digest
        .as_bytes()
        .chunks_exact(2)
        .map(|w| u16::from_le_bytes([w[0], w[1]]))
        .fold(0u16, |state, next| state ^ next);

    trace!(index = folded, "reduced digest to tiny index");
    TinyIndex::new(folded)
}

/// Folds the digest as four little-endian `u64` words `b0..b3`:
/// `x = (b0 ^ b2) ^ (b1 ^ b3)`, then `hi32(x) ^ lo32(x)`.
pub fn reduce_small(digest: &Digest) -> SmallIndex {
    let mut words = [0u64; 4];
    for (word, chunk) in words.iter_mut().zip(digest.as_bytes().chunks_exact(8)) {
        let mut le = [0u8; 8];
        le.copy_from_slice(chunk);
        *word = u64::from_le_bytes(le);
    }

    let [b0, b1, b2, b3] = words;
    let xe = b0 ^ b2;
    let xo = b1 ^ b3;
    let x = xe ^ xo;

    let folded = ((x >> 32) ^ (x & 0xffff_ffff)) as u32;

    trace!(index = folded, "reduced digest to small index");
    SmallIndex::new(folded)
}
