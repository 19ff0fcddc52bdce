use std::sync::Arc;

use crate::engine::schema::{ColumnSchema, Schema};
use crate::engine::types::LogicalType;

pub struct SchemaFactory {
    columns: Vec<ColumnSchema>,
}

impl SchemaFactory {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    pub fn with_column(mut self, name: &str, logical_type: LogicalType, nullable: bool) -> Self {
        self.columns
            .push(ColumnSchema::new(name, logical_type, nullable));
        self
    }

    pub fn not_null(self, name: &str, logical_type: LogicalType) -> Self {
        self.with_column(name, logical_type, false)
    }

    pub fn nullable(self, name: &str, logical_type: LogicalType) -> Self {
        self.with_column(name, logical_type, true)
    }

    /// `k` Int32 NOT NULL, `note` String NULL.
    pub fn key_note() -> Arc<Schema> {
        Self::new()
            .not_null("k", LogicalType::Int32)
            .nullable("note", LogicalType::String)
            .create()
    }

    /// One column per (nullable, variable-length) combination.
    pub fn all_kinds() -> Arc<Schema> {
        Self::new()
            .not_null("id", LogicalType::Int64)
            .nullable("score", LogicalType::Double)
            .not_null("name", LogicalType::String)
            .nullable("payload", LogicalType::Binary)
            .create()
    }

    pub fn create(self) -> Arc<Schema> {
        Arc::new(Schema::new(self.columns).expect("valid test schema"))
    }
}
