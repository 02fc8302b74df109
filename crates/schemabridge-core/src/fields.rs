//! Fixed translation tables between device fields and normative fields.
//!
//! All lookups are total: anything outside the tables yields `None` and the
//! caller decides whether that degrades or fails.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Command sent to devices for every supported request.
pub const DEVICE_COMMAND: &str = "get";

/// A sensor reading as devices send it: `{"ts": 1547660823, "v": -3.7}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
struct DeviceReading {
    ts: i64,
    v: Number,
}

/// A sensor reading in normative form: `{"time": 1547660823, "value": -3.7}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub time: i64,
    pub value: Number,
}

impl Reading {
    /// Parse a device reading, `None` if `ts`/`v` are missing or mistyped.
    pub fn from_device(value: &Value) -> Option<Self> {
        let DeviceReading { ts, v } = DeviceReading::deserialize(value).ok()?;
        Some(Self { time: ts, value: v })
    }
}

/// A normative event, serialized as `{"temperature": {...}}` or
/// `{"humidity": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    Temperature(Reading),
    Humidity(Reading),
}

/// Fields a device may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceField {
    /// `tmp`
    Temperature,
    /// `hmd`
    Humidity,
    /// `st`
    Status,
}

impl DeviceField {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "tmp" => Some(Self::Temperature),
            "hmd" => Some(Self::Humidity),
            "st" => Some(Self::Status),
            _ => None,
        }
    }

    /// Key on the device side.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Temperature => "tmp",
            Self::Humidity => "hmd",
            Self::Status => "st",
        }
    }

    /// Key on the normative side.
    pub fn normative_key(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Status => "is_working",
        }
    }

    /// Translate this field's device value into its normative value.
    pub fn translate(&self, value: &Value) -> Option<Value> {
        match self {
            Self::Temperature | Self::Humidity => {
                let reading = Reading::from_device(value)?;
                serde_json::to_value(reading).ok()
            }
            Self::Status => Some(Value::Bool(is_one(value))),
        }
    }
}

fn is_one(value: &Value) -> bool {
    value.as_f64() == Some(1.0)
}

/// Translate one element of an events batch.
///
/// Only sensor readings are events; `tmp` wins over `hmd` when an element
/// carries both.
pub fn translate_event(element: &Value) -> Option<Event> {
    let map = element.as_object()?;
    if let Some(v) = map.get(DeviceField::Temperature.key()) {
        return Reading::from_device(v).map(Event::Temperature);
    }
    if let Some(v) = map.get(DeviceField::Humidity.key()) {
        return Reading::from_device(v).map(Event::Humidity);
    }
    None
}

/// Translate a single device field into `(normative_key, value)`.
pub fn translate_field(key: &str, value: &Value) -> Option<(&'static str, Value)> {
    let field = DeviceField::from_key(key)?;
    field.translate(value).map(|v| (field.normative_key(), v))
}

/// Response status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ResultCode {
    Ok = 0,
    Error = 1,
    Pending = 2,
}

impl ResultCode {
    pub fn from_value(code: &Value) -> Option<Self> {
        match code.as_u64()? {
            0 => Some(Self::Ok),
            1 => Some(Self::Error),
            2 => Some(Self::Pending),
            _ => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
            Self::Pending => "pending",
        }
    }

    /// Message for a raw `code` value, `None` for anything outside 0..=2.
    pub fn message_for(code: &Value) -> Option<&'static str> {
        Self::from_value(code).map(|c| c.message())
    }
}

/// Normative request kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    GetDeviceStatus,
    GetTemperature,
    GetHumidity,
}

impl RequestType {
    pub fn parse(request_type: &str) -> Option<Self> {
        match request_type {
            "get_device_status" => Some(Self::GetDeviceStatus),
            "get_temperature" => Some(Self::GetTemperature),
            "get_humidity" => Some(Self::GetHumidity),
            _ => None,
        }
    }

    /// Device resource code for the `res` field.
    pub fn resource(&self) -> &'static str {
        match self {
            Self::GetDeviceStatus => DeviceField::Status.key(),
            Self::GetTemperature => DeviceField::Temperature.key(),
            Self::GetHumidity => DeviceField::Humidity.key(),
        }
    }
}
