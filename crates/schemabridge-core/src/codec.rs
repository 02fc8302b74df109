//! Decode/encode callbacks.
//!
//! [`PayloadCodec`] is the seam a gateway host calls into. [`SensorCodec`]
//! is the codec for the temperature/humidity sensor family, and the free
//! functions [`decode`] and [`encode`] wrap it in the `(status, result)`
//! contract hosts expect from a callback.
//!
//! ```text
//! device → gateway                          gateway → device
//! [{"tmp":{"ts":..,"v":..}}]                {"data_type":"requests",
//!   → {"data_type":"events",..}               "data":{"request_type":..}}
//! {"req_id":1,"code":0,"st":1}                → {"cmd":"get","req_id":..,
//!   → {"data_type":"responses",..}                "res":"tmp"}
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::fields::{self, Event, RequestType, ResultCode, DEVICE_COMMAND};
use crate::shape::Shape;
use crate::topic::TopicRouter;

/// Outcome reported back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    Ok = 0,
    Error = 1,
}

impl Status {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Translation between a device wire format and the normative format.
pub trait PayloadCodec: Send + Sync {
    /// Codec name, for logs.
    fn name(&self) -> &str;

    /// Device payload → normative JSON text.
    fn decode(&self, topic: &[u8], payload: &[u8]) -> Result<String>;

    /// Normative JSON message → device payload.
    fn encode(&self, topic: &[u8], message: &[u8]) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum DataType {
    Events,
    Responses,
}

/// Normative wrapper: `{"data_type": .., "data": ..}`.
#[derive(Debug, Serialize)]
struct Envelope<T> {
    data_type: DataType,
    data: T,
}

#[derive(Debug, Serialize)]
struct Response {
    request_id: Value,
    result: ResponseResult,
}

#[derive(Debug, Serialize)]
struct ResponseResult {
    code: Value,
    msg: Option<Cow<'static, str>>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct NormativeRequest {
    request_type: String,
    request_id: Value,
    #[serde(default)]
    parameters: Option<Vec<Value>>,
}

#[derive(Debug, Serialize)]
struct DeviceRequest {
    cmd: &'static str,
    req_id: Value,
    res: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    params: Vec<Value>,
}

const REQUEST_ID_KEY: &str = "req_id";
const CODE_KEY: &str = "code";
const REQUESTS: &str = "requests";

/// Codec for the temperature/humidity/status sensor family.
#[derive(Debug, Clone, Default)]
pub struct SensorCodec {
    router: TopicRouter,
}

impl SensorCodec {
    pub fn new(config: &CodecConfig) -> Self {
        Self {
            router: TopicRouter::from_config(config),
        }
    }

    pub fn router(&self) -> &TopicRouter {
        &self.router
    }

    fn decode_events(items: &[Value]) -> Vec<Event> {
        items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let event = fields::translate_event(item);
                if event.is_none() {
                    warn!(index, element = %item, "Skipping unrecognized event");
                }
                event
            })
            .collect()
    }

    fn decode_response(map: &Map<String, Value>) -> Response {
        let request_id = map.get(REQUEST_ID_KEY).cloned().unwrap_or(Value::Null);
        let code = map.get(CODE_KEY).cloned().unwrap_or(Value::Null);

        let result = match Self::translate_payload_fields(map) {
            Some(fields) => ResponseResult {
                msg: ResultCode::message_for(&code).map(Cow::Borrowed),
                code,
                fields,
            },
            None => {
                let raw = Value::Object(map.clone()).to_string();
                warn!(response = %raw, "Unsupported response");
                ResponseResult {
                    code,
                    msg: Some(Cow::Owned(format!("unsupported response: {raw}"))),
                    fields: Map::new(),
                }
            }
        };

        Response { request_id, result }
    }

    /// Translate every key besides `req_id`/`code`; `None` if any of them
    /// has no translation.
    fn translate_payload_fields(map: &Map<String, Value>) -> Option<Map<String, Value>> {
        map.iter()
            .filter(|(key, _)| key.as_str() != REQUEST_ID_KEY && key.as_str() != CODE_KEY)
            .map(|(key, value)| {
                fields::translate_field(key, value).map(|(k, v)| (k.to_string(), v))
            })
            .collect()
    }
}

impl PayloadCodec for SensorCodec {
    fn name(&self) -> &str {
        "sensor"
    }

    fn decode(&self, topic: &[u8], payload: &[u8]) -> Result<String> {
        self.router.check_inbound(topic)?;

        let value: Value =
            serde_json::from_slice(payload).map_err(|e| CodecError::decode(e, payload))?;

        let out = match Shape::classify(value) {
            Shape::Sequence(items) => {
                let events = Self::decode_events(&items);
                debug!(received = items.len(), decoded = events.len(), "Decoded events");
                serde_json::to_string(&Envelope {
                    data_type: DataType::Events,
                    data: events,
                })
            }
            Shape::Mapping(map) => {
                let response = Self::decode_response(&map);
                debug!(request_id = %response.request_id, "Decoded response");
                serde_json::to_string(&Envelope {
                    data_type: DataType::Responses,
                    data: response,
                })
            }
            scalar @ Shape::Scalar(_) => {
                return Err(CodecError::UnexpectedShape {
                    kind: scalar.kind(),
                });
            }
        };

        out.map_err(|e| CodecError::decode(e, payload))
    }

    fn encode(&self, topic: &[u8], message: &[u8]) -> Result<Vec<u8>> {
        self.router.check_outbound(topic)?;

        let value: Value =
            serde_json::from_slice(message).map_err(|e| CodecError::encode(e, message))?;

        let mut map = match Shape::classify(value) {
            Shape::Mapping(map) => map,
            other => {
                return Err(CodecError::encode(
                    format!("expected a JSON object, got {}", other.kind()),
                    message,
                ));
            }
        };

        match map.get("data_type") {
            Some(Value::String(data_type)) if data_type == REQUESTS => {}
            Some(other) => return Err(CodecError::NotARequest(other.to_string())),
            None => return Err(CodecError::NotARequest("missing".to_string())),
        }

        let data = map.remove("data").unwrap_or(Value::Null);
        let request =
            NormativeRequest::deserialize(data).map_err(|e| CodecError::encode(e, message))?;

        let request_type = RequestType::parse(&request.request_type)
            .ok_or_else(|| CodecError::UnknownRequestType(request.request_type.clone()))?;

        let out = DeviceRequest {
            cmd: DEVICE_COMMAND,
            req_id: request.request_id,
            res: request_type.resource(),
            params: request.parameters.unwrap_or_default(),
        };
        debug!(req_id = %out.req_id, res = out.res, "Encoded request");

        serde_json::to_vec(&out).map_err(|e| CodecError::encode(e, message))
    }
}

/// Decode with a given codec, folding errors into `(Status::Error, diagnostic)`.
pub fn decode_with<C>(
    codec: &C,
    topic: impl AsRef<[u8]>,
    message: impl AsRef<[u8]>,
) -> (Status, String)
where
    C: PayloadCodec + ?Sized,
{
    match codec.decode(topic.as_ref(), message.as_ref()) {
        Ok(out) => (Status::Ok, out),
        Err(e) => {
            warn!(codec = codec.name(), error = %e, "Decode failed");
            (Status::Error, e.to_string())
        }
    }
}

/// Encode with a given codec, folding errors into `(Status::Error, diagnostic)`.
pub fn encode_with<C>(
    codec: &C,
    topic: impl AsRef<[u8]>,
    message: impl AsRef<[u8]>,
) -> (Status, Vec<u8>)
where
    C: PayloadCodec + ?Sized,
{
    match codec.encode(topic.as_ref(), message.as_ref()) {
        Ok(out) => (Status::Ok, out),
        Err(e) => {
            warn!(codec = codec.name(), error = %e, "Encode failed");
            (Status::Error, e.to_string().into_bytes())
        }
    }
}

/// Gateway callback: device payload on `topic` → normative JSON.
pub fn decode(topic: impl AsRef<[u8]>, message: impl AsRef<[u8]>) -> (Status, String) {
    decode_with(&SensorCodec::default(), topic, message)
}

/// Gateway callback: normative request on `topic` → device payload.
pub fn encode(topic: impl AsRef<[u8]>, message: impl AsRef<[u8]>) -> (Status, Vec<u8>) {
    encode_with(&SensorCodec::default(), topic, message)
}
