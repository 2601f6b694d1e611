//! Digests, reducers and typed-value index derivation
pub mod derive;
pub mod digest;
pub mod index;
pub mod reduce;

pub use derive::{
    ID_LEN, IndexDeriver, SENTINEL_LEN, TextEncoding, encode_bool, encode_int,
    encode_text, small_from_id, tiny_from_id,
};
pub use digest::{DIGEST_LEN, Digest, DigestGateway, Sha256Gateway};
pub use index::{NUM_PROBES, SmallIndex, TinyIndex};
pub use reduce::{reduce_small, reduce_tiny};
