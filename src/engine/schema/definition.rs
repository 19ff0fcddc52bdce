use std::collections::HashMap;

use crate::engine::errors::RowBlockError;
use crate::engine::types::LogicalType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    name: String,
    logical_type: LogicalType,
    nullable: bool,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, logical_type: LogicalType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            logical_type,
            nullable,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn logical_type(&self) -> LogicalType {
        self.logical_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_variable_length(&self) -> bool {
        self.logical_type.is_variable_length()
    }
}

/// Ordered, non-empty set of uniquely named columns. Position is significant:
/// it fixes each column's physical offset in a row record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<ColumnSchema>,
    by_name: HashMap<String, usize>,
}

impl Schema {
    pub fn new(columns: Vec<ColumnSchema>) -> Result<Self, RowBlockError> {
        if columns.is_empty() {
            return Err(RowBlockError::InvalidArgument(
                "schema must contain at least one column".into(),
            ));
        }

        let mut by_name = HashMap::with_capacity(columns.len());
        for (idx, column) in columns.iter().enumerate() {
            if by_name.insert(column.name.clone(), idx).is_some() {
                return Err(RowBlockError::InvalidArgument(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
        }

        Ok(Self { columns, by_name })
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    pub fn column(&self, idx: usize) -> Option<&ColumnSchema> {
        self.columns.get(idx)
    }

    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }
}
