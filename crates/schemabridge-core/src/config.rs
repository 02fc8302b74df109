//! Codec configuration.
//!
//! The callbacks always run with [`CodecConfig::default`]. Hosts that need
//! different topics build a config themselves, from a file or from the
//! environment, and hand it to [`SensorCodec::new`](crate::SensorCodec::new).

use serde::Deserialize;

use crate::topic::{INBOUND_TOPIC, OUTBOUND_TOPIC};

/// Environment variable names.
pub mod env_vars {
    pub const INBOUND_TOPIC: &str = "SCHEMABRIDGE_INBOUND_TOPIC";
    pub const OUTBOUND_TOPIC: &str = "SCHEMABRIDGE_OUTBOUND_TOPIC";
}

/// Topics the codec listens on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Topic of device events and responses.
    pub inbound_topic: String,
    /// Topic of requests to devices.
    pub outbound_topic: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            inbound_topic: INBOUND_TOPIC.to_string(),
            outbound_topic: OUTBOUND_TOPIC.to_string(),
        }
    }
}

impl CodecConfig {
    /// Defaults overridden by `SCHEMABRIDGE_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().merge_lookup(|key| std::env::var(key).ok())
    }

    /// Override fields from a key lookup; empty values are ignored.
    pub fn merge_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(topic) = lookup(env_vars::INBOUND_TOPIC).filter(|t| !t.is_empty()) {
            self.inbound_topic = topic;
        }
        if let Some(topic) = lookup(env_vars::OUTBOUND_TOPIC).filter(|t| !t.is_empty()) {
            self.outbound_topic = topic;
        }
        self
    }

    pub fn with_inbound_topic(mut self, topic: impl Into<String>) -> Self {
        self.inbound_topic = topic.into();
        self
    }

    pub fn with_outbound_topic(mut self, topic: impl Into<String>) -> Self {
        self.outbound_topic = topic.into();
        self
    }
}
