use std::sync::Arc;

use crate::engine::rowblock::{RowBlock, RowBlockBuilder, SelectionVector};
use crate::engine::schema::Schema;
use crate::engine::types::ScalarValue;

use super::schema_factory::SchemaFactory;

pub struct RowBlockFactory {
    schema: Arc<Schema>,
    rows: Vec<Vec<ScalarValue>>,
    selected: Option<Vec<usize>>,
}

impl RowBlockFactory {
    pub fn new() -> Self {
        Self {
            schema: SchemaFactory::key_note(),
            rows: Vec::new(),
            selected: None,
        }
    }

    pub fn with_schema(mut self, schema: Arc<Schema>) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_row(mut self, row: Vec<ScalarValue>) -> Self {
        self.rows.push(row);
        self
    }

    pub fn with_rows(mut self, rows: Vec<Vec<ScalarValue>>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn with_selected(mut self, indices: &[usize]) -> Self {
        self.selected = Some(indices.to_vec());
        self
    }

    /// (1, "hi"), (2, null), (3, "bye") over `SchemaFactory::key_note`.
    pub fn key_note_rows() -> Vec<Vec<ScalarValue>> {
        vec![
            vec![ScalarValue::Int32(1), ScalarValue::from("hi")],
            vec![ScalarValue::Int32(2), ScalarValue::Null],
            vec![ScalarValue::Int32(3), ScalarValue::from("bye")],
        ]
    }

    /// Rows over `SchemaFactory::all_kinds`, with nulls in both nullable columns.
    pub fn all_kinds_rows() -> Vec<Vec<ScalarValue>> {
        vec![
            vec![
                ScalarValue::Int64(10),
                ScalarValue::Double(0.5),
                ScalarValue::from("alpha"),
                ScalarValue::Binary(vec![1, 2, 3]),
            ],
            vec![
                ScalarValue::Int64(11),
                ScalarValue::Null,
                ScalarValue::from(""),
                ScalarValue::Null,
            ],
            vec![
                ScalarValue::Int64(-12),
                ScalarValue::Double(-3.75),
                ScalarValue::from("gamma"),
                ScalarValue::Binary(vec![]),
            ],
            vec![
                ScalarValue::Int64(13),
                ScalarValue::Null,
                ScalarValue::from("delta"),
                ScalarValue::Binary(vec![0xFF; 4]),
            ],
        ]
    }

    pub fn create(self) -> RowBlock {
        let mut builder = RowBlockBuilder::with_capacity(Arc::clone(&self.schema), self.rows.len());
        for row in &self.rows {
            builder.push_row(row).expect("valid test row");
        }
        let mut block = builder.finish().expect("valid test block");
        if let Some(indices) = self.selected {
            let selection = SelectionVector::from_indices(self.rows.len(), &indices)
                .expect("valid test selection");
            block.set_selection(selection).expect("selection matches block");
        }
        block
    }
}
