use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use serde_json::{Number, Value as JsonValue};

use super::LogicalType;

/// Owned cell value used to build row blocks and to read decoded rows back.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    Timestamp(i64),
    Utf8(String),
    Binary(Vec<u8>),
}

impl ScalarValue {
    pub fn logical_type(&self) -> Option<LogicalType> {
        match self {
            ScalarValue::Null => None,
            ScalarValue::Boolean(_) => Some(LogicalType::Boolean),
            ScalarValue::Int8(_) => Some(LogicalType::Int8),
            ScalarValue::Int16(_) => Some(LogicalType::Int16),
            ScalarValue::Int32(_) => Some(LogicalType::Int32),
            ScalarValue::Int64(_) => Some(LogicalType::Int64),
            ScalarValue::Float(_) => Some(LogicalType::Float),
            ScalarValue::Double(_) => Some(LogicalType::Double),
            ScalarValue::Timestamp(_) => Some(LogicalType::Timestamp),
            ScalarValue::Utf8(_) => Some(LogicalType::String),
            ScalarValue::Binary(_) => Some(LogicalType::Binary),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ScalarValue::Int8(v) => Some(i64::from(*v)),
            ScalarValue::Int16(v) => Some(i64::from(*v)),
            ScalarValue::Int32(v) => Some(i64::from(*v)),
            ScalarValue::Int64(v) | ScalarValue::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            ScalarValue::Null => JsonValue::Null,
            ScalarValue::Boolean(b) => JsonValue::Bool(*b),
            ScalarValue::Int8(v) => JsonValue::Number(Number::from(*v)),
            ScalarValue::Int16(v) => JsonValue::Number(Number::from(*v)),
            ScalarValue::Int32(v) => JsonValue::Number(Number::from(*v)),
            ScalarValue::Int64(v) | ScalarValue::Timestamp(v) => JsonValue::Number(Number::from(*v)),
            ScalarValue::Float(f) => Number::from_f64(f64::from(*f))
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            ScalarValue::Double(f) => Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            ScalarValue::Utf8(s) => JsonValue::String(s.clone()),
            ScalarValue::Binary(bytes) => JsonValue::String(BASE64_STANDARD.encode(bytes)),
        }
    }

    /// Interprets a JSON value as a cell of type `ty`. Binary cells are read
    /// from base64 strings. Returns `None` when the value cannot represent `ty`.
    pub fn from_json(value: &JsonValue, ty: LogicalType) -> Option<ScalarValue> {
        if value.is_null() {
            return Some(ScalarValue::Null);
        }
        match ty {
            LogicalType::Boolean => value.as_bool().map(ScalarValue::Boolean),
            LogicalType::Int8 => value
                .as_i64()
                .and_then(|v| i8::try_from(v).ok())
                .map(ScalarValue::Int8),
            LogicalType::Int16 => value
                .as_i64()
                .and_then(|v| i16::try_from(v).ok())
                .map(ScalarValue::Int16),
            LogicalType::Int32 => value
                .as_i64()
                .and_then(|v| i32::try_from(v).ok())
                .map(ScalarValue::Int32),
            LogicalType::Int64 => value.as_i64().map(ScalarValue::Int64),
            LogicalType::Timestamp => value.as_i64().map(ScalarValue::Timestamp),
            LogicalType::Float => value.as_f64().map(|f| ScalarValue::Float(f as f32)),
            LogicalType::Double => value.as_f64().map(ScalarValue::Double),
            LogicalType::String => value.as_str().map(|s| ScalarValue::Utf8(s.to_string())),
            LogicalType::Binary => value
                .as_str()
                .and_then(|s| BASE64_STANDARD.decode(s).ok())
                .map(ScalarValue::Binary),
        }
    }
}

impl From<&ScalarValue> for JsonValue {
    fn from(value: &ScalarValue) -> Self {
        value.to_json()
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Utf8(value.to_string())
    }
}

impl From<i32> for ScalarValue {
    fn from(value: i32) -> Self {
        ScalarValue::Int32(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Int64(value)
    }
}

impl<T: Into<ScalarValue>> From<Option<T>> for ScalarValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ScalarValue::Null)
    }
}
