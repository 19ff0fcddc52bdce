mod logical_type;
mod scalar_value;

#[cfg(test)]
mod logical_type_test;

pub use logical_type::LogicalType;
pub use scalar_value::ScalarValue;
