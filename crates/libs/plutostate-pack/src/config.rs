use serde::{Deserialize, Serialize};

const DEFAULT_MAX_DEPTH: usize = 1024;

/// Runtime capabilities and limits for a [`crate::Codec`].
///
/// The `int64_*` switches model hosts without 64-bit integer support: dates
/// cannot be encoded there, and decoded dates degrade to
/// [`crate::Timestamp::Invalid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub int64_encode: bool,
    pub int64_decode: bool,
    pub max_depth: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self { int64_encode: true, int64_decode: true, max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl CodecConfig {
    /// Configuration for a host with no 64-bit integer arithmetic.
    pub fn without_int64() -> Self {
        Self { int64_encode: false, int64_decode: false, ..Self::default() }
    }
}
