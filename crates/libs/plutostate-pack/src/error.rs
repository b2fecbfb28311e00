/// Errors returned by [`crate::Codec`] operations.
///
/// Every failure is deterministic for a given input; none of these are worth
/// retrying.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CodecError {
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    #[error("unknown extension tag {0:#04x}")]
    UnknownExtensionTag(i8),

    #[error("date out of representable range: {0} ms exceeds the largest safe integer")]
    DateRange(i64),

    #[error("unsupported capability: {0}")]
    UnsupportedCapability(&'static str),

    #[error("extension {tag:#04x} payload of {len} bytes is not a multiple of {width}")]
    MisalignedPayload { tag: i8, len: usize, width: usize },

    #[error("invalid date has no wire representation")]
    InvalidDate,

    #[error("encode error: {0}")]
    Encode(String),
}

impl CodecError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedFrame(message.into())
    }
}
