//! Tiny and small fixed-size Bloom filters for typed values.
//!
//! The crate has two halves:
//!    * Filters: [`TinyBitmap`] is a 16-bit bitmap probed by the four nibbles
//!      of a [`TinyIndex`]. [`SmallBitmap`] is a 32-byte bitmap probed by the
//!      four bytes of a [`SmallIndex`].
//!    * Index derivation: [`IndexDeriver`] turns identifiers, integers,
//!      booleans, null and short text into indices. Random identifiers are
//!      used directly; everything else goes through SHA-256 and is XOR-folded
//!      down to 16 or 32 bits.
//!
//! Usage:
//!     * Derive an index for a value (digest derivations are [`Deferred`] and
//!       only run when awaited).
//!     * `update` an empty bitmap with the indices of the recorded values.
//!     * `test` a candidate index: [`FilterResult::NotFound`] is definitive,
//!       [`FilterResult::MayExist`] may be a false positive.
//!
//! Both filters use k=4 and cannot be resized or merged across resolutions.
//! The tiny filter saturates after a handful of values.

pub mod bloom;
pub mod config;
mod error;
pub mod filter;
pub mod hash;
pub mod task;

pub use bloom::{ProbeFilter, SMALL_BITMAP_BYTES, SmallBitmap, TinyBitmap};
pub use config::{
    DeriverConfig, DeriverConfigBuilder, DeriverConfigBuilderError,
    NullEncoding, TruncationPolicy,
};
pub use error::{BloomError, BloomResult};
pub use filter::{FilterResult, result_code_to_string};
pub use hash::{
    Digest, DigestGateway, IndexDeriver, Sha256Gateway, SmallIndex, TinyIndex,
    reduce_small, reduce_tiny, small_from_id, tiny_from_id,
};
pub use task::Deferred;
