use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::engine::errors::RowBlockError;
use crate::engine::schema::{ColumnSchema, Schema};
use crate::engine::types::LogicalType;

/// Serializable form of a [`ColumnSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchemaRecord {
    pub name: String,
    pub logical_type: String,
    #[serde(default)]
    pub is_nullable: bool,
}

impl From<&ColumnSchema> for ColumnSchemaRecord {
    fn from(column: &ColumnSchema) -> Self {
        Self {
            name: column.name().to_string(),
            logical_type: column.logical_type().as_str().to_string(),
            is_nullable: column.is_nullable(),
        }
    }
}

impl TryFrom<&ColumnSchemaRecord> for ColumnSchema {
    type Error = RowBlockError;

    fn try_from(record: &ColumnSchemaRecord) -> Result<Self, Self::Error> {
        let logical_type: LogicalType = record.logical_type.parse().map_err(|_| {
            RowBlockError::InvalidArgument(format!(
                "unknown type '{}' for column {}",
                record.logical_type, record.name
            ))
        })?;
        Ok(ColumnSchema::new(
            &record.name,
            logical_type,
            record.is_nullable,
        ))
    }
}

pub fn schema_to_records(schema: &Schema) -> Vec<ColumnSchemaRecord> {
    schema.columns().iter().map(ColumnSchemaRecord::from).collect()
}

/// Rebuilds a schema, rejecting unknown types, empty lists and duplicate names.
pub fn records_to_schema(records: &[ColumnSchemaRecord]) -> Result<Arc<Schema>, RowBlockError> {
    let columns = records
        .iter()
        .map(ColumnSchema::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Arc::new(Schema::new(columns)?))
}
