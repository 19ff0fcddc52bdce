use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::engine::errors::RowBlockError;
use crate::engine::schema::{ColumnSchema, Schema};
use crate::engine::types::{LogicalType, ScalarValue};

use super::bitmap::NullBitmap;
use super::selection::SelectionVector;
use super::value_codec::ValueCodec;

#[derive(Debug, Clone)]
enum ColumnData {
    /// `len * width` bytes, one cell after another.
    Fixed { width: usize, data: Vec<u8> },
    /// Cell `i` spans `data[offsets[i]..offsets[i + 1]]`.
    Variable { offsets: Vec<usize>, data: Vec<u8> },
}

/// One column of a row block, stored contiguously. Null cells occupy a
/// zeroed fixed cell or an empty variable cell and are flagged in `nulls`.
#[derive(Debug, Clone)]
pub struct ColumnBlock {
    logical_type: LogicalType,
    data: ColumnData,
    nulls: Option<Vec<u8>>,
    len: usize,
}

/// Borrowed, pre-split view of a column's storage for the encoder's copy loops.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnCells<'a> {
    pub width: usize,
    pub data: &'a [u8],
    pub offsets: &'a [usize],
    pub nulls: Option<&'a [u8]>,
}

impl ColumnBlock {
    pub fn new(logical_type: LogicalType, nullable: bool) -> Self {
        Self::with_capacity(logical_type, nullable, 0)
    }

    pub fn with_capacity(logical_type: LogicalType, nullable: bool, capacity: usize) -> Self {
        let data = match logical_type.fixed_width() {
            Some(width) => ColumnData::Fixed {
                width,
                data: Vec::with_capacity(capacity * width),
            },
            None => {
                let mut offsets = Vec::with_capacity(capacity + 1);
                offsets.push(0);
                ColumnData::Variable {
                    offsets,
                    data: Vec::new(),
                }
            }
        };
        Self {
            logical_type,
            data,
            nulls: nullable.then(|| Vec::with_capacity(NullBitmap::size_for(capacity))),
            len: 0,
        }
    }

    pub fn for_column(column: &ColumnSchema) -> Self {
        Self::new(column.logical_type(), column.is_nullable())
    }

    pub fn logical_type(&self) -> LogicalType {
        self.logical_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nulls.is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fails without modifying the column if `value` cannot be stored in it.
    pub fn check(&self, value: &ScalarValue) -> Result<(), RowBlockError> {
        match value.logical_type() {
            None if self.nulls.is_none() => Err(RowBlockError::InvalidArgument(format!(
                "null value for non-nullable {} column",
                self.logical_type
            ))),
            None => Ok(()),
            Some(ty) if ty == self.logical_type => Ok(()),
            Some(ty) => Err(RowBlockError::InvalidArgument(format!(
                "{} value for {} column",
                ty, self.logical_type
            ))),
        }
    }

    pub fn push(&mut self, value: &ScalarValue) -> Result<(), RowBlockError> {
        self.check(value)?;
        let is_null = value.is_null();

        match &mut self.data {
            ColumnData::Fixed { width, data } => {
                if is_null {
                    data.resize(data.len() + *width, 0);
                } else {
                    ValueCodec::encode_fixed(value, self.logical_type, data)?;
                }
            }
            ColumnData::Variable { offsets, data } => {
                if !is_null {
                    data.extend_from_slice(ValueCodec::encode_variable(value, self.logical_type)?);
                }
                offsets.push(data.len());
            }
        }

        if let Some(nulls) = self.nulls.as_mut() {
            if self.len % 8 == 0 {
                nulls.push(0);
            }
            if is_null {
                NullBitmap::set_bit(nulls, self.len);
            }
        }
        self.len += 1;
        Ok(())
    }

    pub fn is_null(&self, row: usize) -> bool {
        self.nulls
            .as_deref()
            .is_some_and(|nulls| NullBitmap::is_set(nulls, row))
    }

    /// Raw bytes of cell `row`: the fixed-width value or the variable payload.
    pub fn cell(&self, row: usize) -> Option<&[u8]> {
        if row >= self.len {
            return None;
        }
        match &self.data {
            ColumnData::Fixed { width, data } => Some(&data[row * width..(row + 1) * width]),
            ColumnData::Variable { offsets, data } => Some(&data[offsets[row]..offsets[row + 1]]),
        }
    }

    pub fn value(&self, row: usize) -> Result<ScalarValue, RowBlockError> {
        let cell = self.cell(row).ok_or_else(|| {
            RowBlockError::InvalidArgument(format!(
                "row {} out of bounds for column of {} rows",
                row, self.len
            ))
        })?;
        if self.is_null(row) {
            return Ok(ScalarValue::Null);
        }
        if self.logical_type.is_variable_length() {
            ValueCodec::decode_variable(cell, self.logical_type)
        } else {
            ValueCodec::decode_fixed(cell, self.logical_type)
        }
    }

    pub(crate) fn cells(&self) -> ColumnCells<'_> {
        let nulls = self.nulls.as_deref();
        match &self.data {
            ColumnData::Fixed { width, data } => ColumnCells {
                width: *width,
                data,
                offsets: &[],
                nulls,
            },
            ColumnData::Variable { offsets, data } => ColumnCells {
                width: 0,
                data,
                offsets,
                nulls,
            },
        }
    }
}

/// Columnar batch of rows plus the selection vector marking live rows.
#[derive(Debug, Clone)]
pub struct RowBlock {
    schema: Arc<Schema>,
    columns: Vec<ColumnBlock>,
    selection: SelectionVector,
    nrows: usize,
}

impl RowBlock {
    pub fn new(
        schema: Arc<Schema>,
        columns: Vec<ColumnBlock>,
        selection: SelectionVector,
    ) -> Result<Self, RowBlockError> {
        if columns.len() != schema.num_columns() {
            return Err(RowBlockError::InvalidArgument(format!(
                "row block has {} columns but schema has {}",
                columns.len(),
                schema.num_columns()
            )));
        }

        let nrows = columns.first().map(ColumnBlock::len).unwrap_or(0);
        for (idx, (column, expected)) in columns.iter().zip(schema.columns()).enumerate() {
            if column.logical_type() != expected.logical_type()
                || column.is_nullable() != expected.is_nullable()
            {
                return Err(RowBlockError::InvalidArgument(format!(
                    "column {} ('{}') does not match its schema definition",
                    idx,
                    expected.name()
                )));
            }
            if column.len() != nrows {
                return Err(RowBlockError::InvalidArgument(format!(
                    "column {} has {} rows, expected {}",
                    idx,
                    column.len(),
                    nrows
                )));
            }
        }

        if selection.len() != nrows {
            return Err(RowBlockError::InvalidArgument(format!(
                "selection vector covers {} rows but block has {}",
                selection.len(),
                nrows
            )));
        }

        Ok(Self {
            schema,
            columns,
            selection,
            nrows,
        })
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn columns(&self) -> &[ColumnBlock] {
        &self.columns
    }

    pub fn column(&self, idx: usize) -> Option<&ColumnBlock> {
        self.columns.get(idx)
    }

    pub fn selection(&self) -> &SelectionVector {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionVector {
        &mut self.selection
    }

    pub fn set_selection(&mut self, selection: SelectionVector) -> Result<(), RowBlockError> {
        if selection.len() != self.nrows {
            return Err(RowBlockError::InvalidArgument(format!(
                "selection vector covers {} rows but block has {}",
                selection.len(),
                self.nrows
            )));
        }
        self.selection = selection;
        Ok(())
    }

    pub fn row(&self, idx: usize) -> Result<Vec<ScalarValue>, RowBlockError> {
        self.columns.iter().map(|column| column.value(idx)).collect()
    }

    pub fn selected_rows(&self) -> Result<Vec<Vec<ScalarValue>>, RowBlockError> {
        self.selection
            .selected_indices()
            .map(|idx| self.row(idx))
            .collect()
    }
}

#[derive(Debug)]
pub struct RowBlockBuilder {
    schema: Arc<Schema>,
    columns: Vec<ColumnBlock>,
    len: usize,
}

impl RowBlockBuilder {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self::with_capacity(schema, 0)
    }

    pub fn with_capacity(schema: Arc<Schema>, capacity: usize) -> Self {
        let columns = schema
            .columns()
            .iter()
            .map(|c| ColumnBlock::with_capacity(c.logical_type(), c.is_nullable(), capacity))
            .collect();
        Self {
            schema,
            columns,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push_row(&mut self, values: &[ScalarValue]) -> Result<(), RowBlockError> {
        if values.len() != self.columns.len() {
            return Err(RowBlockError::InvalidArgument(format!(
                "row has {} values but schema has {} columns",
                values.len(),
                self.columns.len()
            )));
        }

        // validate the whole row first so a bad value leaves no partial row behind
        for (column, value) in self.columns.iter().zip(values) {
            column.check(value)?;
        }
        for (column, value) in self.columns.iter_mut().zip(values) {
            column.push(value)?;
        }

        self.len += 1;
        Ok(())
    }

    /// Converts one JSON array (`null` for null cells, base64 for binary) and
    /// appends it as a row.
    pub fn push_json_row(&mut self, values: &[JsonValue]) -> Result<(), RowBlockError> {
        let row = self
            .schema
            .columns()
            .iter()
            .zip(values)
            .map(|(column, value)| {
                ScalarValue::from_json(value, column.logical_type()).ok_or_else(|| {
                    RowBlockError::InvalidArgument(format!(
                        "value {} is not a valid {} for column {}",
                        value,
                        column.logical_type(),
                        column.name()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if row.len() != values.len() {
            return Err(RowBlockError::InvalidArgument(format!(
                "row has {} values but schema has {} columns",
                values.len(),
                self.columns.len()
            )));
        }
        self.push_row(&row)
    }

    /// Finishes the block with every row selected.
    pub fn finish(self) -> Result<RowBlock, RowBlockError> {
        let selection = SelectionVector::all_selected(self.len);
        RowBlock::new(self.schema, self.columns, selection)
    }
}
