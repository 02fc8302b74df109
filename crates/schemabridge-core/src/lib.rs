//! Payload translation between device wire formats and the normative schema.
//!
//! A message gateway hands every device message to [`decode`] and every
//! outbound request to [`encode`]. Both are pure: they look at the topic,
//! reshape the JSON payload and return a `(Status, result)` pair. Nothing is
//! cached between calls, so a host may run them concurrently.
//!
//! ## Architecture
//!
//! ```text
//!   device payload                                    normative payload
//! ┌────────────────┐   TopicRouter   ShapeClassifier   ┌──────────────────┐
//! │ [{"tmp":..}]   │──────────────▶──────────────────▶ │ {"data_type":    │
//! │ {"req_id":..}  │        decode   FieldTranslator   │  "events", ..}   │
//! │                │◀──────────────◀────────────────── │ {"data_type":    │
//! │ {"cmd":"get"}  │        encode                     │  "requests", ..} │
//! └────────────────┘                                   └──────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use schemabridge_core::{decode, Status, INBOUND_TOPIC};
//!
//! let (status, out) = decode(INBOUND_TOPIC, r#"{"req_id":1,"code":0,"st":1}"#);
//! assert_eq!(status, Status::Ok);
//! assert_eq!(
//!     out,
//!     r#"{"data_type":"responses","data":{"request_id":1,"result":{"code":0,"msg":"ok","is_working":true}}}"#
//! );
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod fields;
pub mod shape;
pub mod topic;

pub use codec::{decode, decode_with, encode, encode_with, PayloadCodec, SensorCodec, Status};
pub use config::CodecConfig;
pub use error::{CodecError, Result};
pub use fields::{Event, Reading, RequestType, ResultCode};
pub use shape::Shape;
pub use topic::{TopicRouter, INBOUND_TOPIC, OUTBOUND_TOPIC};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-exports commonly used types.
pub mod prelude {
    pub use crate::codec::{decode, encode, PayloadCodec, SensorCodec, Status};
    pub use crate::config::{env_vars, CodecConfig};
    pub use crate::error::{CodecError, Result};
    pub use crate::topic::{INBOUND_TOPIC, OUTBOUND_TOPIC};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
