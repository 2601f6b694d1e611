//! Typed value to filter index derivation.
//!
//! Two strategies are used. Identifiers that are already uniformly random
//! (UUIDv4 and friends) are used directly: their leading bytes become the
//! index. Everything else is encoded into a canonical byte form, digested
//! through a [`DigestGateway`] and XOR-reduced.
//!
//! Canonical encodings:
//!
//! | value   | digest input                                   |
//! |---------|------------------------------------------------|
//! | integer | 8 bytes, big-endian two's complement (wrapped) |
//! | `true`  | 32 bytes of `0xff`                             |
//! | `false` | 32 bytes of `0x00`                             |
//! | null    | see [`NullEncoding`]                           |
//! | text    | UTF-8 bytes actually written to the scratch    |

use super::digest::{Digest, DigestGateway, Sha256Gateway};
use super::index::{SmallIndex, TinyIndex};
use super::reduce::{reduce_small, reduce_tiny};
use crate::config::{DeriverConfig, NullEncoding, TruncationPolicy};
use crate::error::{BloomError, BloomResult};
use crate::task::Deferred;
use std::sync::Arc;
use tracing::{debug, warn};

/// Length of a raw identifier such as a UUID.
pub const ID_LEN: usize = 16;
/// Width of the boolean and null sentinel blocks.
pub const SENTINEL_LEN: usize = 32;

const TRUE_BLOCK: [u8; SENTINEL_LEN] = [0xff; SENTINEL_LEN];
const FALSE_BLOCK: [u8; SENTINEL_LEN] = [0x00; SENTINEL_LEN];
const NULL_BLOCK: [u8; SENTINEL_LEN] = [0x00; SENTINEL_LEN];

/// Tiny index from the first two identifier bytes, little-endian.
pub fn tiny_from_id(id: &[u8]) -> BloomResult<TinyIndex> {
    let head = id_prefix::<2>(id)?;
    Ok(TinyIndex::new(u16::from_le_bytes(head)))
}

/// Small index from the first four identifier bytes, little-endian.
pub fn small_from_id(id: &[u8]) -> BloomResult<SmallIndex> {
    let head = id_prefix::<4>(id)?;
    Ok(SmallIndex::new(u32::from_le_bytes(head)))
}

fn id_prefix<const N: usize>(id: &[u8]) -> BloomResult<[u8; N]> {
    id.get(..N)
        .and_then(|head| head.try_into().ok())
        .ok_or(BloomError::IdentifierTooShort {
            required: N,
            actual: id.len(),
        })
}

/// Integers are wrapped to 64 bits and written big-endian.
pub fn encode_int(value: impl Into<i128>) -> [u8; 8] {
    let wide: i128 = value.into();
    (wide as i64).to_be_bytes()
}

pub fn encode_bool(value: bool) -> [u8; SENTINEL_LEN] {
    if value { TRUE_BLOCK } else { FALSE_BLOCK }
}

/// Result of writing text into a scratch buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding {
    /// Bytes written at the front of the buffer
    pub written: usize,
    /// Bytes the full text needs
    pub required: usize,
}

impl TextEncoding {
    pub fn is_truncated(&self) -> bool {
        self.written < self.required
    }
}

/// Writes the UTF-8 form of `text` into `buf`, stopping at the last whole
/// character that fits. Bytes past `written` are left untouched.
pub fn encode_text(text: &str, buf: &mut [u8]) -> TextEncoding {
    let bytes = text.as_bytes();
    let written = if bytes.len() <= buf.len() {
        bytes.len()
    } else {
        (0..=buf.len())
            .rev()
            .find(|&end| text.is_char_boundary(end))
            .unwrap_or(0)
    };

    buf[..written].copy_from_slice(&bytes[..written]);
    TextEncoding {
        written,
        required: bytes.len(),
    }
}

/// Produces filter indices for typed values.
///
/// Digest-backed derivations return a [`Deferred`]; no digest is computed
/// until it is run. Derivations that do not share a scratch buffer can run
/// concurrently.
pub struct IndexDeriver<G: ?Sized = Sha256Gateway> {
    gateway: Arc<G>,
    config: DeriverConfig,
}

impl IndexDeriver<Sha256Gateway> {
    /// Software SHA-256 with default settings.
    pub fn sha256() -> Self {
        Self {
            gateway: Arc::new(Sha256Gateway),
            config: DeriverConfig::default(),
        }
    }
}

impl<G: ?Sized> Clone for IndexDeriver<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            config: self.config.clone(),
        }
    }
}

impl<G> IndexDeriver<G>
where
    G: DigestGateway + ?Sized + 'static,
{
    pub fn new(gateway: Arc<G>, config: DeriverConfig) -> BloomResult<Self> {
        config.validate()?;
        Ok(Self { gateway, config })
    }

    pub fn config(&self) -> &DeriverConfig {
        &self.config
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    /// Fresh zeroed scratch buffer of the configured text capacity.
    pub fn scratch(&self) -> Vec<u8> {
        vec![0u8; self.config.text_capacity]
    }

    pub fn tiny_from_int(&self, value: impl Into<i128>) -> Deferred<'static, TinyIndex> {
        self.digest_and_reduce("int", encode_int(value), reduce_tiny)
    }

    pub fn small_from_int(&self, value: impl Into<i128>) -> Deferred<'static, SmallIndex> {
        self.digest_and_reduce("int", encode_int(value), reduce_small)
    }

    pub fn tiny_from_bool(&self, value: bool) -> Deferred<'static, TinyIndex> {
        self.digest_and_reduce("bool", encode_bool(value), reduce_tiny)
    }

    pub fn small_from_bool(&self, value: bool) -> Deferred<'static, SmallIndex> {
        self.digest_and_reduce("bool", encode_bool(value), reduce_small)
    }

    pub fn tiny_from_null(&self) -> Deferred<'static, TinyIndex> {
        self.digest_and_reduce("null", self.null_input(), reduce_tiny)
    }

    pub fn small_from_null(&self) -> Deferred<'static, SmallIndex> {
        self.digest_and_reduce("null", self.null_input(), reduce_small)
    }

    /// Digests the identifier bytes as-is. Slower than [`small_from_id`] but
    /// does not rely on the identifier being random.
    pub fn small_from_id_digest(&self, id: &[u8]) -> Deferred<'static, SmallIndex> {
        self.digest_and_reduce("id", id.to_vec(), reduce_small)
    }

    pub fn tiny_from_text<'a>(
        &self,
        text: &'a str,
        scratch: &'a mut [u8],
    ) -> Deferred<'a, TinyIndex> {
        self.digest_text(text, scratch).map(|digest| reduce_tiny(&digest))
    }

    pub fn small_from_text<'a>(
        &self,
        text: &'a str,
        scratch: &'a mut [u8],
    ) -> Deferred<'a, SmallIndex> {
        self.digest_text(text, scratch).map(|digest| reduce_small(&digest))
    }

    /// Encodes `text` into `scratch` and digests only the written prefix.
    ///
    /// The scratch buffer stays mutably borrowed until the returned task is
    /// run or dropped, so two derivations can never write the same buffer
    /// at once.
    pub fn digest_text<'a>(
        &self,
        text: &'a str,
        scratch: &'a mut [u8],
    ) -> Deferred<'a, Digest> {
        let gateway = Arc::clone(&self.gateway);
        let policy = self.config.truncation;

        Deferred::new(move || async move {
            let encoding = encode_text(text, scratch);
            if encoding.is_truncated() {
                match policy {
                    TruncationPolicy::Reject => {
                        return Err(BloomError::EncodingTruncated {
                            required: encoding.required,
                            capacity: scratch.len(),
                        });
                    }
                    TruncationPolicy::Truncate => {
                        warn!(
                            required = encoding.required,
                            written = encoding.written,
                            "text truncated before hashing"
                        );
                    }
                }
            }

            debug!(input = "text", len = encoding.written, "computing digest");
            gateway.digest(&scratch[..encoding.written]).await
        })
    }

    fn null_input(&self) -> &'static [u8] {
        match self.config.null_encoding {
            NullEncoding::ZeroBlock => &NULL_BLOCK,
            NullEncoding::Empty => &[],
        }
    }

    fn digest_and_reduce<B, R, F>(
        &self,
        kind: &'static str,
        input: B,
        reduce: F,
    ) -> Deferred<'static, R>
    where
        B: AsRef<[u8]> + Send + 'static,
        R: Send + 'static,
        F: FnOnce(&Digest) -> R + Send + 'static,
    {
        let gateway = Arc::clone(&self.gateway);

        Deferred::new(move || async move {
            let bytes = input.as_ref();
            debug!(input = kind, len = bytes.len(), "computing digest");
            let digest = gateway.digest(bytes).await?;
            Ok(reduce(&digest))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_extraction_is_little_endian() {
        let id = [0x01, 0x02, 0x03, 0x04, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(tiny_from_id(&id).unwrap().value(), 0x0201);
        assert_eq!(small_from_id(&id).unwrap().value(), 0x0403_0201);
    }

    #[test]
    fn test_direct_extraction_rejects_short_ids() {
        assert_eq!(
            tiny_from_id(&[0xaa]),
            Err(BloomError::IdentifierTooShort {
                required: 2,
                actual: 1
            })
        );
        assert_eq!(
            small_from_id(&[1, 2, 3]),
            Err(BloomError::IdentifierTooShort {
                required: 4,
                actual: 3
            })
        );
        assert!(small_from_id(&[1, 2, 3, 4]).is_ok());
    }

    #[test]
    fn test_int_encoding_big_endian_twos_complement() {
        assert_eq!(encode_int(3776i64), [0, 0, 0, 0, 0, 0, 0x0e, 0xc0]);
        assert_eq!(encode_int(-1i32), [0xff; 8]);
        // wraps like a 64-bit store
        assert_eq!(encode_int(u64::MAX), [0xff; 8]);
        assert_eq!(encode_int(1i128 << 64), [0; 8]);
    }

    #[test]
    fn test_bool_encoding_blocks() {
        assert_eq!(encode_bool(true), [0xff; 32]);
        assert_eq!(encode_bool(false), [0x00; 32]);
    }

    #[test]
    fn test_encode_text_reports_written_length() {
        let mut buf = [0xee; 8];
        let enc = encode_text("helo", &mut buf);
        assert_eq!(enc, TextEncoding { written: 4, required: 4 });
        assert_eq!(&buf[..4], b"helo");
        assert_eq!(&buf[4..], &[0xee; 4]);
    }

    #[test]
    fn test_encode_text_stops_on_char_boundary() {
        let mut buf = [0u8; 3];
        // 'é' is two bytes and does not fit after "ab"
        let enc = encode_text("abé", &mut buf);
        assert_eq!(enc.written, 2);
        assert_eq!(enc.required, 4);
        assert!(enc.is_truncated());
    }

    #[tokio::test]
    async fn test_known_int_indices() {
        let deriver = IndexDeriver::sha256();
        assert_eq!(deriver.tiny_from_int(3776).run().await.unwrap().value(), 0xcca1);
        assert_eq!(deriver.tiny_from_int(599).run().await.unwrap().value(), 0x230c);
        assert_eq!(
            deriver.small_from_int(3776).run().await.unwrap().value(),
            0xce08_02a9
        );
    }

    #[tokio::test]
    async fn test_text_rejects_overflow_by_default() {
        let deriver = IndexDeriver::sha256();
        let mut scratch = [0u8; 3];
        let result = deriver.tiny_from_text("helo", &mut scratch).run().await;
        assert_eq!(
            result,
            Err(BloomError::EncodingTruncated {
                required: 4,
                capacity: 3
            })
        );
    }
}
