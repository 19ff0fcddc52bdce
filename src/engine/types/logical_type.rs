use std::fmt;
use std::str::FromStr;

/// Column type as seen by the row codec. Fixed-width types are stored inline
/// in the row record, variable-length types through the indirect buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    Timestamp,
    String,
    Binary,
}

impl LogicalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalType::Boolean => "Boolean",
            LogicalType::Int8 => "Int8",
            LogicalType::Int16 => "Int16",
            LogicalType::Int32 => "Int32",
            LogicalType::Int64 => "Int64",
            LogicalType::Float => "Float",
            LogicalType::Double => "Double",
            LogicalType::Timestamp => "Timestamp",
            LogicalType::String => "String",
            LogicalType::Binary => "Binary",
        }
    }

    /// Width in bytes of a fixed-width cell, `None` for variable-length types.
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            LogicalType::Boolean | LogicalType::Int8 => Some(1),
            LogicalType::Int16 => Some(2),
            LogicalType::Int32 | LogicalType::Float => Some(4),
            LogicalType::Int64 | LogicalType::Double | LogicalType::Timestamp => Some(8),
            LogicalType::String | LogicalType::Binary => None,
        }
    }

    pub fn is_variable_length(&self) -> bool {
        self.fixed_width().is_none()
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicalType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Boolean" | "Bool" => Ok(LogicalType::Boolean),
            "Int8" => Ok(LogicalType::Int8),
            "Int16" => Ok(LogicalType::Int16),
            "Int32" => Ok(LogicalType::Int32),
            "Int64" | "Integer" => Ok(LogicalType::Int64),
            "Float" => Ok(LogicalType::Float),
            "Double" => Ok(LogicalType::Double),
            "Timestamp" => Ok(LogicalType::Timestamp),
            "String" => Ok(LogicalType::String),
            "Binary" => Ok(LogicalType::Binary),
            _ => Err(()),
        }
    }
}
