//! Topic routing.
//!
//! Each direction listens on exactly one topic. Topics arrive either as text
//! or as raw bytes from the transport, so matching is done on bytes.

use crate::config::CodecConfig;
use crate::error::{CodecError, Result};

/// Topic carrying device telemetry and request responses.
pub const INBOUND_TOPIC: &str = "/19/0/0";

/// Topic carrying requests sent down to devices.
pub const OUTBOUND_TOPIC: &str = "/19/1/0";

/// Accepts the configured inbound/outbound topics and rejects everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRouter {
    inbound: String,
    outbound: String,
}

impl TopicRouter {
    pub fn new(inbound: impl Into<String>, outbound: impl Into<String>) -> Self {
        Self {
            inbound: inbound.into(),
            outbound: outbound.into(),
        }
    }

    pub fn from_config(config: &CodecConfig) -> Self {
        Self::new(config.inbound_topic.clone(), config.outbound_topic.clone())
    }

    pub fn inbound(&self) -> &str {
        &self.inbound
    }

    pub fn outbound(&self) -> &str {
        &self.outbound
    }

    /// Ensure `topic` is the inbound topic.
    pub fn check_inbound(&self, topic: &[u8]) -> Result<()> {
        Self::check(&self.inbound, topic)
    }

    /// Ensure `topic` is the outbound topic.
    pub fn check_outbound(&self, topic: &[u8]) -> Result<()> {
        Self::check(&self.outbound, topic)
    }

    fn check(expected: &str, topic: &[u8]) -> Result<()> {
        if expected.as_bytes() == topic {
            Ok(())
        } else {
            Err(CodecError::IncorrectTopic(
                String::from_utf8_lossy(topic).into_owned(),
            ))
        }
    }
}

impl Default for TopicRouter {
    fn default() -> Self {
        Self::new(INBOUND_TOPIC, OUTBOUND_TOPIC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_topics() {
        let router = TopicRouter::default();
        assert!(router.check_inbound(b"/19/0/0").is_ok());
        assert!(router.check_outbound(b"/19/1/0").is_ok());
    }

    #[test]
    fn test_directions_are_not_interchangeable() {
        let router = TopicRouter::default();
        assert_eq!(
            router.check_inbound(OUTBOUND_TOPIC.as_bytes()),
            Err(CodecError::IncorrectTopic("/19/1/0".to_string()))
        );
        assert!(router.check_outbound(INBOUND_TOPIC.as_bytes()).is_err());
    }

    #[test]
    fn test_match_is_exact() {
        let router = TopicRouter::default();
        assert!(router.check_inbound(b"/19/0/0/").is_err());
        assert!(router.check_inbound(b"/19/0").is_err());
        assert!(router.check_inbound(b"").is_err());
    }

    #[test]
    fn test_non_utf8_topic_is_named_lossily() {
        let router = TopicRouter::default();
        let err = router.check_inbound(&[b'/', 0xff]).unwrap_err();
        assert!(err.to_string().starts_with("incorrect topic: /"));
    }

    #[test]
    fn test_custom_topics() {
        let router = TopicRouter::new("devices/up", "devices/down");
        assert!(router.check_inbound(b"devices/up").is_ok());
        assert!(router.check_inbound(INBOUND_TOPIC.as_bytes()).is_err());
        assert_eq!(router.outbound(), "devices/down");
    }
}
