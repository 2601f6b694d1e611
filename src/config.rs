use crate::error::{BloomError, BloomResult};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_TEXT_CAPACITY: usize = 256;

pub const ENV_TEXT_CAPACITY: &str = "TYPED_BLOOM_TEXT_CAPACITY";
pub const ENV_TRUNCATION: &str = "TYPED_BLOOM_TRUNCATION";
pub const ENV_NULL_ENCODING: &str = "TYPED_BLOOM_NULL_ENCODING";

/// What to do when encoded text does not fit the scratch buffer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum TruncationPolicy {
    /// Fail with [`BloomError::EncodingTruncated`].
    #[default]
    Reject,
    /// Hash whatever prefix fit. Different texts sharing that prefix
    /// collide.
    Truncate,
}

impl FromStr for TruncationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(TruncationPolicy::Reject),
            "truncate" => Ok(TruncationPolicy::Truncate),
            other => Err(format!("expected 'reject' or 'truncate', got '{other}'")),
        }
    }
}

/// Canonical digest input for the null marker.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum NullEncoding {
    /// 32 zero bytes. Hashes exactly like boolean `false`.
    #[default]
    ZeroBlock,
    /// Zero-length input, distinct from every boolean.
    Empty,
}

impl FromStr for NullEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero-block" | "zero_block" => Ok(NullEncoding::ZeroBlock),
            "empty" => Ok(NullEncoding::Empty),
            other => {
                Err(format!("expected 'zero-block' or 'empty', got '{other}'"))
            }
        }
    }
}

/// Settings for [`crate::IndexDeriver`].
#[derive(Clone, Debug, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(pattern = "owned")]
pub struct DeriverConfig {
    /// Size of scratch buffers handed out by `IndexDeriver::scratch`
    #[builder(default = "DEFAULT_TEXT_CAPACITY")]
    pub text_capacity: usize,

    /// Behaviour when text overflows the scratch buffer
    #[builder(default)]
    pub truncation: TruncationPolicy,

    /// How null is encoded before hashing
    #[builder(default)]
    pub null_encoding: NullEncoding,
}

impl Default for DeriverConfig {
    fn default() -> Self {
        Self {
            text_capacity: DEFAULT_TEXT_CAPACITY,
            truncation: TruncationPolicy::default(),
            null_encoding: NullEncoding::default(),
        }
    }
}

impl DeriverConfig {
    pub fn validate(&self) -> BloomResult<()> {
        if self.text_capacity == 0 {
            return Err(BloomError::InvalidConfig(
                "Text capacity must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Reads overrides from the environment; unset variables keep defaults.
    pub fn from_env() -> BloomResult<Self> {
        let defaults = Self::default();

        let config = Self {
            text_capacity: env_or(ENV_TEXT_CAPACITY, defaults.text_capacity)?,
            truncation: env_or(ENV_TRUNCATION, defaults.truncation)?,
            null_encoding: env_or(ENV_NULL_ENCODING, defaults.null_encoding)?,
        };
        config.validate()?;
        Ok(config)
    }
}

fn env_or<T>(var_name: &str, default: T) -> BloomResult<T>
where
    T: FromStr,
    T::Err: ToString,
{
    match std::env::var(var_name) {
        Ok(value) => {
            value
                .parse()
                .map_err(|e: T::Err| BloomError::EnvParseError {
                    var_name: var_name.to_string(),
                    value: value.clone(),
                    error: e.to_string(),
                })
        }
        Err(_) => Ok(default),
    }
}
