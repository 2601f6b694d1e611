use thiserror::Error;

pub type BloomResult<T> = std::result::Result<T, BloomError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BloomError {
    #[error("Digest computation failed: {0}")]
    DigestFailure(String),

    #[error("Encoded text needs {required} bytes, scratch buffer holds {capacity}")]
    EncodingTruncated { required: usize, capacity: usize },

    #[error("Identifier too short: need {required} bytes, got {actual}")]
    IdentifierTooShort { required: usize, actual: usize },

    #[error("Invalid bit address: byte {byte_offset} (max 31), bit {bit} (max 7)")]
    InvalidBitAddress { byte_offset: usize, bit: usize },

    #[error("Unknown filter result code: {0}")]
    UnknownResult(u8),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse environment variable {var_name}: value '{value}' - {error}")]
    EnvParseError {
        var_name: String,
        value: String,
        error: String,
    },
}

// Builder failures (missing/invalid fields) surface as config errors
impl From<crate::config::DeriverConfigBuilderError> for BloomError {
    fn from(err: crate::config::DeriverConfigBuilderError) -> Self {
        BloomError::InvalidConfig(err.to_string())
    }
}
