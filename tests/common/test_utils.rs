use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use typed_bloom_rs::{
    BloomError, BloomResult, Digest, DigestGateway, Sha256Gateway,
};

/// Gateway that always fails, as an unavailable crypto engine would.
pub struct FailingGateway;

#[async_trait]
impl DigestGateway for FailingGateway {
    async fn digest(&self, _bytes: &[u8]) -> BloomResult<Digest> {
        Err(BloomError::DigestFailure("engine unavailable".into()))
    }
}

/// SHA-256 gateway that records how often it was called and the last input.
#[derive(Default)]
pub struct RecordingGateway {
    calls: AtomicUsize,
    last_input: std::sync::Mutex<Vec<u8>>,
}

impl RecordingGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn last_input(&self) -> Vec<u8> {
        self.last_input.lock().expect("poisoned").clone()
    }
}

#[async_trait]
impl DigestGateway for RecordingGateway {
    async fn digest(&self, bytes: &[u8]) -> BloomResult<Digest> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_input.lock().expect("poisoned") = bytes.to_vec();
        Ok(Sha256Gateway::digest_sync(bytes))
    }
}

/// Scratch buffer full of random garbage, as left behind by earlier use.
#[allow(dead_code)]
pub fn garbage_scratch(len: usize) -> Vec<u8> {
    use rand::Rng;
    let mut buf = vec![0u8; len];
    rand::rng().fill(&mut buf[..]);
    // make sure at least the first bytes are non-zero
    for byte in buf.iter_mut().take(8) {
        *byte |= 0x80;
    }
    buf
}
