use super::logical_type::LogicalType;
use std::str::FromStr;

#[test]
fn fixed_widths_match_physical_sizes() {
    assert_eq!(LogicalType::Boolean.fixed_width(), Some(1));
    assert_eq!(LogicalType::Int8.fixed_width(), Some(1));
    assert_eq!(LogicalType::Int16.fixed_width(), Some(2));
    assert_eq!(LogicalType::Int32.fixed_width(), Some(4));
    assert_eq!(LogicalType::Float.fixed_width(), Some(4));
    assert_eq!(LogicalType::Int64.fixed_width(), Some(8));
    assert_eq!(LogicalType::Double.fixed_width(), Some(8));
    assert_eq!(LogicalType::Timestamp.fixed_width(), Some(8));
    assert_eq!(LogicalType::String.fixed_width(), None);
    assert_eq!(LogicalType::Binary.fixed_width(), None);
}

#[test]
fn only_string_and_binary_are_variable_length() {
    assert!(LogicalType::String.is_variable_length());
    assert!(LogicalType::Binary.is_variable_length());
    assert!(!LogicalType::Int32.is_variable_length());
    assert!(!LogicalType::Timestamp.is_variable_length());
}

#[test]
fn parses_names_and_aliases() {
    assert_eq!(LogicalType::from_str("Int32"), Ok(LogicalType::Int32));
    assert_eq!(LogicalType::from_str("Integer"), Ok(LogicalType::Int64));
    assert_eq!(LogicalType::from_str("Bool"), Ok(LogicalType::Boolean));
    assert!(LogicalType::from_str("Decimal").is_err());
}

#[test]
fn display_roundtrips_through_from_str() {
    for ty in [
        LogicalType::Boolean,
        LogicalType::Int8,
        LogicalType::Int16,
        LogicalType::Int32,
        LogicalType::Int64,
        LogicalType::Float,
        LogicalType::Double,
        LogicalType::Timestamp,
        LogicalType::String,
        LogicalType::Binary,
    ] {
        assert_eq!(LogicalType::from_str(&ty.to_string()), Ok(ty));
    }
}
