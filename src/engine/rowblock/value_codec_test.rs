use super::value_codec::ValueCodec;
use crate::engine::errors::RowBlockError;
use crate::engine::types::{LogicalType, ScalarValue};

#[test]
fn fixed_values_encode_little_endian() {
    let mut buf = Vec::new();
    ValueCodec::encode_fixed(&ScalarValue::Int32(1), LogicalType::Int32, &mut buf).unwrap();
    ValueCodec::encode_fixed(&ScalarValue::Boolean(true), LogicalType::Boolean, &mut buf).unwrap();
    ValueCodec::encode_fixed(&ScalarValue::Int16(-2), LogicalType::Int16, &mut buf).unwrap();
    assert_eq!(buf, vec![1, 0, 0, 0, 1, 0xFE, 0xFF]);
}

#[test]
fn decode_fixed_restores_each_type() {
    let cases = vec![
        (LogicalType::Boolean, ScalarValue::Boolean(false)),
        (LogicalType::Int8, ScalarValue::Int8(-8)),
        (LogicalType::Int16, ScalarValue::Int16(300)),
        (LogicalType::Int32, ScalarValue::Int32(-70_000)),
        (LogicalType::Int64, ScalarValue::Int64(1 << 40)),
        (LogicalType::Float, ScalarValue::Float(1.5)),
        (LogicalType::Double, ScalarValue::Double(-2.25)),
        (LogicalType::Timestamp, ScalarValue::Timestamp(1_700_000_000_000)),
    ];

    for (ty, value) in cases {
        let mut buf = Vec::new();
        ValueCodec::encode_fixed(&value, ty, &mut buf).unwrap();
        assert_eq!(buf.len(), ty.fixed_width().unwrap());
        assert_eq!(ValueCodec::decode_fixed(&buf, ty).unwrap(), value);
    }
}

#[test]
fn encode_fixed_rejects_type_mismatch() {
    let mut buf = Vec::new();
    let err = ValueCodec::encode_fixed(&ScalarValue::Int64(1), LogicalType::Int32, &mut buf)
        .unwrap_err();
    assert!(matches!(err, RowBlockError::InvalidArgument(_)));
    assert!(buf.is_empty());
}

#[test]
fn decode_fixed_rejects_wrong_width() {
    let err = ValueCodec::decode_fixed(&[1, 2, 3], LogicalType::Int32).unwrap_err();
    assert!(err.is_corruption());
}

#[test]
fn variable_values_expose_raw_payload() {
    let value = ScalarValue::Utf8("bye".into());
    assert_eq!(
        ValueCodec::encode_variable(&value, LogicalType::String).unwrap(),
        b"bye"
    );
    assert!(ValueCodec::encode_variable(&value, LogicalType::Binary).is_err());
}

#[test]
fn decode_variable_validates_utf8() {
    assert_eq!(
        ValueCodec::decode_variable(b"hi", LogicalType::String).unwrap(),
        ScalarValue::Utf8("hi".into())
    );
    assert_eq!(
        ValueCodec::decode_variable(&[0xFF], LogicalType::Binary).unwrap(),
        ScalarValue::Binary(vec![0xFF])
    );
    let err = ValueCodec::decode_variable(&[0xFF, 0xFE], LogicalType::String).unwrap_err();
    assert!(err.is_corruption());
}
