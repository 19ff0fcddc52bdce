use crate::engine::errors::RowBlockError;
use crate::engine::schema::{ColumnLayout, RowLayout, VARLEN_SLOT_SIZE};
use crate::engine::types::{LogicalType, ScalarValue};

use super::bitmap::NullBitmap;
use super::resolver::{ResolvedRowBlock, UnresolvedRowBlock};
use super::slot::VarlenSlot;
use super::value_codec::{ValueCodec, read_array};

/// Appends the start of each of the `row_count` records of `row_bytes` to
/// `out`. Leaves `out` untouched when there are no rows. `row_bytes` must hold
/// exactly `row_count * stride` bytes, as a resolved block always does.
pub fn extract_row_starts<'a>(
    row_bytes: &'a [u8],
    row_count: usize,
    stride: usize,
    out: &mut Vec<&'a [u8]>,
) {
    if row_count == 0 || stride == 0 {
        return;
    }
    debug_assert_eq!(
        row_count.checked_mul(stride),
        Some(row_bytes.len()),
        "row bytes do not hold {row_count} records of {stride} bytes"
    );
    out.reserve(row_count);
    out.extend(row_bytes.chunks_exact(stride).take(row_count));
}

/// Resolves a received row block and returns it ready for row access.
pub fn extract_rows<'a>(
    layout: RowLayout,
    row_count: usize,
    row_bytes: Vec<u8>,
    indirect: &'a [u8],
) -> Result<ResolvedRowBlock<'a>, RowBlockError> {
    UnresolvedRowBlock::new(layout, row_count, row_bytes).resolve(indirect)
}

impl<'a> ResolvedRowBlock<'a> {
    pub fn layout(&self) -> &RowLayout {
        &self.layout
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn row_bytes(&self) -> &[u8] {
        &self.row_bytes
    }

    pub fn indirect_bytes(&self) -> &'a [u8] {
        self.indirect
    }

    /// Appends one view per row, in order, to `out`.
    pub fn extract_row_views<'b>(&'b self, out: &mut Vec<RowView<'b>>) {
        if self.row_count == 0 {
            return;
        }
        out.reserve(self.row_count);
        out.extend(self.rows());
    }

    pub fn row(&self, idx: usize) -> Option<RowView<'_>> {
        if idx >= self.row_count {
            return None;
        }
        let stride = self.layout.stride();
        Some(self.view(&self.row_bytes[idx * stride..(idx + 1) * stride]))
    }

    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> + '_ {
        let mut starts = Vec::new();
        extract_row_starts(
            &self.row_bytes,
            self.row_count,
            self.layout.stride(),
            &mut starts,
        );
        starts.into_iter().map(move |record| self.view(record))
    }

    pub fn to_values(&self) -> Result<Vec<Vec<ScalarValue>>, RowBlockError> {
        self.rows().map(|row| row.to_values()).collect()
    }

    fn view<'b>(&'b self, record: &'b [u8]) -> RowView<'b> {
        RowView {
            layout: &self.layout,
            record,
            indirect: self.indirect,
        }
    }
}

/// Read-only access to one resolved row record.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    layout: &'a RowLayout,
    record: &'a [u8],
    indirect: &'a [u8],
}

impl<'a> RowView<'a> {
    pub fn record(&self) -> &'a [u8] {
        self.record
    }

    pub fn is_null(&self, col: usize) -> Result<bool, RowBlockError> {
        let column = self.column(col)?;
        Ok(self.null_flag(column))
    }

    /// Raw bytes of a cell: the fixed-width value, or the payload borrowed from
    /// the indirect buffer. `None` for a null cell.
    pub fn cell_bytes(&self, col: usize) -> Result<Option<&'a [u8]>, RowBlockError> {
        let column = self.column(col)?;
        if self.null_flag(column) {
            return Ok(None);
        }

        let slot = &self.record[column.offset..column.offset + column.size];
        if !column.variable_length {
            return Ok(Some(slot));
        }

        // bounds were checked when the block was resolved
        let entry = VarlenSlot::read_from(&slot[..VARLEN_SLOT_SIZE]);
        let start = entry.offset as usize;
        let end = start + entry.length as usize;
        Ok(Some(&self.indirect[start..end]))
    }

    pub fn get_str(&self, col: usize) -> Result<Option<&'a str>, RowBlockError> {
        self.expect_type(col, LogicalType::String)?;
        match self.cell_bytes(col)? {
            None => Ok(None),
            Some(bytes) => std::str::from_utf8(bytes)
                .map(Some)
                .map_err(|e| RowBlockError::Corrupt(format!("UTF-8 decode error: {e}"))),
        }
    }

    pub fn get_bool(&self, col: usize) -> Result<Option<bool>, RowBlockError> {
        Ok(self
            .typed_cell::<1>(col, LogicalType::Boolean)?
            .map(|b| b[0] != 0))
    }

    pub fn get_i32(&self, col: usize) -> Result<Option<i32>, RowBlockError> {
        Ok(self
            .typed_cell(col, LogicalType::Int32)?
            .map(i32::from_le_bytes))
    }

    pub fn get_i64(&self, col: usize) -> Result<Option<i64>, RowBlockError> {
        Ok(self
            .typed_cell(col, LogicalType::Int64)?
            .map(i64::from_le_bytes))
    }

    pub fn get_f64(&self, col: usize) -> Result<Option<f64>, RowBlockError> {
        Ok(self
            .typed_cell(col, LogicalType::Double)?
            .map(f64::from_le_bytes))
    }

    pub fn get_bytes(&self, col: usize) -> Result<Option<&'a [u8]>, RowBlockError> {
        self.expect_type(col, LogicalType::Binary)?;
        self.cell_bytes(col)
    }

    pub fn value(&self, col: usize) -> Result<ScalarValue, RowBlockError> {
        let logical_type = self
            .layout
            .schema()
            .column(col)
            .map(|c| c.logical_type())
            .ok_or_else(|| Self::out_of_bounds(col, self.layout.num_columns()))?;

        match self.cell_bytes(col)? {
            None => Ok(ScalarValue::Null),
            Some(bytes) if logical_type.is_variable_length() => {
                ValueCodec::decode_variable(bytes, logical_type)
            }
            Some(bytes) => ValueCodec::decode_fixed(bytes, logical_type),
        }
    }

    pub fn to_values(&self) -> Result<Vec<ScalarValue>, RowBlockError> {
        (0..self.layout.num_columns())
            .map(|col| self.value(col))
            .collect()
    }

    fn typed_cell<const N: usize>(
        &self,
        col: usize,
        logical_type: LogicalType,
    ) -> Result<Option<[u8; N]>, RowBlockError> {
        self.expect_type(col, logical_type)?;
        Ok(self.cell_bytes(col)?.map(read_array::<N>))
    }

    fn expect_type(&self, col: usize, logical_type: LogicalType) -> Result<(), RowBlockError> {
        let column = self
            .layout
            .schema()
            .column(col)
            .ok_or_else(|| Self::out_of_bounds(col, self.layout.num_columns()))?;
        if column.logical_type() != logical_type {
            return Err(RowBlockError::InvalidArgument(format!(
                "column {} is {}, not {}",
                column.name(),
                column.logical_type(),
                logical_type
            )));
        }
        Ok(())
    }

    fn column(&self, col: usize) -> Result<&'a ColumnLayout, RowBlockError> {
        self.layout
            .column(col)
            .ok_or_else(|| Self::out_of_bounds(col, self.layout.num_columns()))
    }

    fn null_flag(&self, column: &ColumnLayout) -> bool {
        column.null_bit.is_some_and(|bit| {
            NullBitmap::is_set(&self.record[self.layout.null_bitmap_offset()..], bit)
        })
    }

    fn out_of_bounds(col: usize, num_columns: usize) -> RowBlockError {
        RowBlockError::InvalidArgument(format!(
            "column {} out of bounds for row with {} columns",
            col, num_columns
        ))
    }
}
