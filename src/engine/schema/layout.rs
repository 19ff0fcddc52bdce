use std::sync::Arc;

use crate::engine::rowblock::NullBitmap;

use super::definition::Schema;

/// Byte width of the offset half of a variable-length slot.
pub const VARLEN_OFFSET_SIZE: usize = 8;
/// Byte width of a variable-length slot: offset followed by length, both u64 LE.
pub const VARLEN_SLOT_SIZE: usize = 2 * VARLEN_OFFSET_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Byte offset of the slot within a row record.
    pub offset: usize,
    /// Slot width: the type's fixed width or `VARLEN_SLOT_SIZE`.
    pub size: usize,
    /// Position in the trailing null bitmap, present only for nullable columns.
    pub null_bit: Option<usize>,
    pub variable_length: bool,
}

/// Physical shape of one row record for a schema:
/// `[slot 0][slot 1]...[slot n-1][null bitmap]`.
#[derive(Debug, Clone)]
pub struct RowLayout {
    schema: Arc<Schema>,
    columns: Vec<ColumnLayout>,
    null_bitmap_offset: usize,
    null_bitmap_len: usize,
    stride: usize,
}

impl RowLayout {
    pub fn new(schema: Arc<Schema>) -> Self {
        let mut columns = Vec::with_capacity(schema.num_columns());
        let mut offset = 0;
        let mut nullable_count = 0;

        for column in schema.columns() {
            let size = column
                .logical_type()
                .fixed_width()
                .unwrap_or(VARLEN_SLOT_SIZE);
            let null_bit = if column.is_nullable() {
                nullable_count += 1;
                Some(nullable_count - 1)
            } else {
                None
            };
            columns.push(ColumnLayout {
                offset,
                size,
                null_bit,
                variable_length: column.is_variable_length(),
            });
            offset += size;
        }

        let null_bitmap_len = NullBitmap::size_for(nullable_count);

        Self {
            schema,
            columns,
            null_bitmap_offset: offset,
            null_bitmap_len,
            stride: offset + null_bitmap_len,
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn columns(&self) -> &[ColumnLayout] {
        &self.columns
    }

    pub fn column(&self, idx: usize) -> Option<&ColumnLayout> {
        self.columns.get(idx)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn null_bitmap_offset(&self) -> usize {
        self.null_bitmap_offset
    }

    pub fn null_bitmap_len(&self) -> usize {
        self.null_bitmap_len
    }

    /// Size of `row_count` records, `None` on overflow.
    pub fn row_bytes_for(&self, row_count: usize) -> Option<usize> {
        row_count.checked_mul(self.stride)
    }
}
