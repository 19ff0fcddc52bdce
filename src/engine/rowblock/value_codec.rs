use crate::engine::errors::RowBlockError;
use crate::engine::types::{LogicalType, ScalarValue};

/// Little-endian cell encoding shared by column blocks and row views.
pub struct ValueCodec;

impl ValueCodec {
    pub fn encode_fixed(
        value: &ScalarValue,
        logical_type: LogicalType,
        buffer: &mut Vec<u8>,
    ) -> Result<(), RowBlockError> {
        match (logical_type, value) {
            (LogicalType::Boolean, ScalarValue::Boolean(b)) => buffer.push(u8::from(*b)),
            (LogicalType::Int8, ScalarValue::Int8(v)) => buffer.extend_from_slice(&v.to_le_bytes()),
            (LogicalType::Int16, ScalarValue::Int16(v)) => {
                buffer.extend_from_slice(&v.to_le_bytes())
            }
            (LogicalType::Int32, ScalarValue::Int32(v)) => {
                buffer.extend_from_slice(&v.to_le_bytes())
            }
            (LogicalType::Int64, ScalarValue::Int64(v))
            | (LogicalType::Timestamp, ScalarValue::Timestamp(v)) => {
                buffer.extend_from_slice(&v.to_le_bytes())
            }
            (LogicalType::Float, ScalarValue::Float(v)) => {
                buffer.extend_from_slice(&v.to_le_bytes())
            }
            (LogicalType::Double, ScalarValue::Double(v)) => {
                buffer.extend_from_slice(&v.to_le_bytes())
            }
            _ => return Err(Self::mismatch(value, logical_type)),
        }
        Ok(())
    }

    pub fn decode_fixed(
        bytes: &[u8],
        logical_type: LogicalType,
    ) -> Result<ScalarValue, RowBlockError> {
        let width = logical_type.fixed_width().ok_or_else(|| {
            RowBlockError::InvalidArgument(format!("{logical_type} is not a fixed-width type"))
        })?;
        if bytes.len() != width {
            return Err(RowBlockError::Corrupt(format!(
                "{} cell has {} bytes, expected {}",
                logical_type,
                bytes.len(),
                width
            )));
        }

        let value = match logical_type {
            LogicalType::Boolean => ScalarValue::Boolean(bytes[0] != 0),
            LogicalType::Int8 => ScalarValue::Int8(i8::from_le_bytes([bytes[0]])),
            LogicalType::Int16 => ScalarValue::Int16(i16::from_le_bytes(read_array(bytes))),
            LogicalType::Int32 => ScalarValue::Int32(i32::from_le_bytes(read_array(bytes))),
            LogicalType::Int64 => ScalarValue::Int64(i64::from_le_bytes(read_array(bytes))),
            LogicalType::Timestamp => {
                ScalarValue::Timestamp(i64::from_le_bytes(read_array(bytes)))
            }
            LogicalType::Float => ScalarValue::Float(f32::from_le_bytes(read_array(bytes))),
            LogicalType::Double => ScalarValue::Double(f64::from_le_bytes(read_array(bytes))),
            LogicalType::String | LogicalType::Binary => {
                return Err(RowBlockError::InvalidArgument(format!(
                    "{logical_type} is not a fixed-width type"
                )));
            }
        };
        Ok(value)
    }

    /// Payload bytes of a variable-length value.
    pub fn encode_variable<'v>(
        value: &'v ScalarValue,
        logical_type: LogicalType,
    ) -> Result<&'v [u8], RowBlockError> {
        match (logical_type, value) {
            (LogicalType::String, ScalarValue::Utf8(s)) => Ok(s.as_bytes()),
            (LogicalType::Binary, ScalarValue::Binary(b)) => Ok(b.as_slice()),
            _ => Err(Self::mismatch(value, logical_type)),
        }
    }

    pub fn decode_variable(
        bytes: &[u8],
        logical_type: LogicalType,
    ) -> Result<ScalarValue, RowBlockError> {
        match logical_type {
            LogicalType::String => std::str::from_utf8(bytes)
                .map(|s| ScalarValue::Utf8(s.to_string()))
                .map_err(|e| RowBlockError::Corrupt(format!("UTF-8 decode error: {e}"))),
            LogicalType::Binary => Ok(ScalarValue::Binary(bytes.to_vec())),
            other => Err(RowBlockError::InvalidArgument(format!(
                "{other} is not a variable-length type"
            ))),
        }
    }

    fn mismatch(value: &ScalarValue, logical_type: LogicalType) -> RowBlockError {
        RowBlockError::InvalidArgument(format!(
            "value {:?} does not match column type {}",
            value, logical_type
        ))
    }
}

/// Copies the first `N` bytes of `bytes`; callers check the length first.
#[inline]
pub(crate) fn read_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut buf = [0u8; N];
    buf.copy_from_slice(&bytes[..N]);
    buf
}
