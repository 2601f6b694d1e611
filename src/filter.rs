use crate::error::{BloomError, BloomResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a membership test.
///
/// The filters only ever produce [`FilterResult::NotFound`] and
/// [`FilterResult::MayExist`]. `Unknown` and `Exit` exist for callers that
/// layer more logic on top, e.g. an exact-match lookup that can confirm a
/// `MayExist` as a definitive hit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum FilterResult {
    #[default]
    Unknown = 0,
    NotFound = 1,
    MayExist = 2,
    Exit = 3,
}

impl FilterResult {
    /// Human readable form, e.g. `"may exist"`.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterResult::NotFound => "not found",
            FilterResult::MayExist => "may exist",
            FilterResult::Exit => "found",
            FilterResult::Unknown => "unknown",
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// `true` unless the filter ruled the value out.
    pub fn is_possible_member(self) -> bool {
        matches!(self, FilterResult::MayExist | FilterResult::Exit)
    }

    pub(crate) fn from_all_set(all_set: bool) -> Self {
        if all_set {
            FilterResult::MayExist
        } else {
            FilterResult::NotFound
        }
    }
}

impl fmt::Display for FilterResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for FilterResult {
    type Error = BloomError;

    fn try_from(code: u8) -> BloomResult<Self> {
        match code {
            0 => Ok(FilterResult::Unknown),
            1 => Ok(FilterResult::NotFound),
            2 => Ok(FilterResult::MayExist),
            3 => Ok(FilterResult::Exit),
            other => Err(BloomError::UnknownResult(other)),
        }
    }
}

/// Display string for a raw result code. Codes outside the enumeration
/// render as `"unknown"`.
pub fn result_code_to_string(code: u8) -> &'static str {
    FilterResult::try_from(code)
        .map(FilterResult::as_str)
        .unwrap_or("unknown")
}
