use crate::error::{BloomError, BloomResult};
use async_trait::async_trait;
use sha2::{Digest as _, Sha256};
use std::fmt;

pub const DIGEST_LEN: usize = 32;

/// A 256-bit digest. Consumed by a reducer right after it is produced.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    pub const fn new(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Builds a digest from a gateway output, which must be exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> BloomResult<Self> {
        let array: [u8; DIGEST_LEN] = bytes.try_into().map_err(|_| {
            BloomError::DigestFailure(format!(
                "expected {DIGEST_LEN} digest bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(array))
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest(")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

/// Source of SHA-256 digests.
///
/// Implementations may be backed by a hardware engine, a remote service or a
/// plain software hasher. A failure is reported as
/// [`BloomError::DigestFailure`] and is never retried by this crate.
#[async_trait]
pub trait DigestGateway: Send + Sync {
    async fn digest(&self, bytes: &[u8]) -> BloomResult<Digest>;
}

/// Software SHA-256 from the `sha2` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Gateway;

impl Sha256Gateway {
    pub fn digest_sync(bytes: &[u8]) -> Digest {
        Digest(Sha256::digest(bytes).into())
    }
}

#[async_trait]
impl DigestGateway for Sha256Gateway {
    async fn digest(&self, bytes: &[u8]) -> BloomResult<Digest> {
        Ok(Self::digest_sync(bytes))
    }
}
