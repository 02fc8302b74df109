//! Error types for payload translation.

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Codec error types.
///
/// Every variant is terminal for the message that produced it: the callbacks
/// report it as `Status::Error` and emit no partial output.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    /// The topic is not the one this direction listens on.
    #[error("incorrect topic: {0}")]
    IncorrectTopic(String),

    /// The device payload is not valid JSON.
    #[error("decode error: {reason} (payload: {raw})")]
    Decode { reason: String, raw: String },

    /// The normative message is not valid JSON or lacks the request shape.
    #[error("encode error: {reason} (message: {raw})")]
    Encode { reason: String, raw: String },

    /// The normative message carries a `data_type` other than `requests`.
    #[error("not a request: data_type is {0}")]
    NotARequest(String),

    /// The device payload is valid JSON but neither a list nor an object.
    #[error("unexpected payload shape: {kind}")]
    UnexpectedShape { kind: &'static str },

    /// No device resource is known for this request type.
    #[error("unknown request type: {0}")]
    UnknownRequestType(String),
}

impl CodecError {
    pub(crate) fn decode(reason: impl ToString, raw: &[u8]) -> Self {
        Self::Decode {
            reason: reason.to_string(),
            raw: String::from_utf8_lossy(raw).into_owned(),
        }
    }

    pub(crate) fn encode(reason: impl ToString, raw: &[u8]) -> Self {
        Self::Encode {
            reason: reason.to_string(),
            raw: String::from_utf8_lossy(raw).into_owned(),
        }
    }
}
