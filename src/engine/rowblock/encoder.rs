use tracing::debug;

use crate::engine::errors::RowBlockError;

use super::bitmap::NullBitmap;
use super::block::{ColumnCells, RowBlock};
use super::projection::ProjectionMapping;
use super::selection::SelectionVector;
use super::slot::VarlenSlot;

/// Flattens the selected rows of a columnar block into fixed-stride row
/// records plus an indirect buffer of variable-length payloads.
pub struct RowEncoder;

/// Where one destination column lives inside each row record.
struct SlotTarget {
    stride: usize,
    offset: usize,
    size: usize,
    bitmap_offset: usize,
    null_bit: usize,
}

impl RowEncoder {
    /// Appends one record per selected row to `row_bytes` and every non-null
    /// variable-length payload to `indirect_bytes`. Returns the number of rows
    /// appended. Both buffers only ever grow, so several blocks can be folded
    /// into one message.
    pub fn encode(
        block: &RowBlock,
        mapping: &ProjectionMapping,
        row_bytes: &mut Vec<u8>,
        indirect_bytes: &mut Vec<u8>,
    ) -> Result<usize, RowBlockError> {
        Self::check_source(block, mapping)?;

        let layout = mapping.layout();
        let targets = mapping
            .columns()
            .iter()
            .map(|column_map| {
                match (
                    block.column(column_map.source),
                    layout.column(column_map.destination),
                ) {
                    (Some(column), Some(slot)) => Ok((column, *slot)),
                    _ => Err(RowBlockError::InvalidArgument(format!(
                        "column mapping {} -> {} is out of range",
                        column_map.source, column_map.destination
                    ))),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let selection = block.selection();
        let selected = selection.count_selected();
        if selected == 0 {
            debug!(target: "rowblock::encode", nrows = block.nrows(), "No rows selected, nothing to encode");
            return Ok(0);
        }

        let added = layout.row_bytes_for(selected).ok_or_else(|| {
            RowBlockError::InvalidArgument(format!(
                "{} rows of {} bytes overflow the row buffer",
                selected,
                layout.stride()
            ))
        })?;
        let base = row_bytes.len();
        let indirect_before = indirect_bytes.len();
        row_bytes.resize(base + added, 0);
        let dst = &mut row_bytes[base..];

        for (column, slot) in targets {
            let target = SlotTarget {
                stride: layout.stride(),
                offset: slot.offset,
                size: slot.size,
                bitmap_offset: layout.null_bitmap_offset(),
                null_bit: slot.null_bit.unwrap_or(0),
            };
            let cells = column.cells();

            // dispatch once per column on (nullable, varlen)
            match (slot.null_bit.is_some(), slot.variable_length) {
                (true, true) => {
                    copy_column::<true, true>(cells, selection, &target, dst, indirect_bytes)
                }
                (true, false) => {
                    copy_column::<true, false>(cells, selection, &target, dst, indirect_bytes)
                }
                (false, true) => {
                    copy_column::<false, true>(cells, selection, &target, dst, indirect_bytes)
                }
                (false, false) => {
                    copy_column::<false, false>(cells, selection, &target, dst, indirect_bytes)
                }
            }
        }

        debug!(
            target: "rowblock::encode",
            rows = selected,
            row_bytes = added,
            indirect_bytes = indirect_bytes.len() - indirect_before,
            "Encoded row block"
        );
        Ok(selected)
    }

    fn check_source(block: &RowBlock, mapping: &ProjectionMapping) -> Result<(), RowBlockError> {
        let expected = mapping.source_schema();
        let actual = block.schema();
        if actual.num_columns() != expected.num_columns()
            || actual
                .columns()
                .iter()
                .zip(expected.columns())
                .any(|(a, e)| {
                    a.name() != e.name()
                        || a.logical_type() != e.logical_type()
                        || a.is_nullable() != e.is_nullable()
                })
        {
            return Err(RowBlockError::InvalidArgument(
                "row block schema does not match the projection source schema".into(),
            ));
        }
        Ok(())
    }
}

fn copy_column<const NULLABLE: bool, const VARLEN: bool>(
    cells: ColumnCells<'_>,
    selection: &SelectionVector,
    target: &SlotTarget,
    dst: &mut [u8],
    indirect: &mut Vec<u8>,
) {
    let mut row_idx = 0;
    let mut src = 0;
    let mut dst_row = 0;

    for run in selection.runs() {
        if !run.selected {
            row_idx += run.len;
            src += run.len * cells.width;
            continue;
        }

        for _ in 0..run.len {
            let record = &mut dst[dst_row..dst_row + target.stride];
            let (slots, bitmap) = record.split_at_mut(target.bitmap_offset);
            let slot = &mut slots[target.offset..target.offset + target.size];

            let is_null = NULLABLE
                && cells
                    .nulls
                    .is_some_and(|nulls| NullBitmap::is_set(nulls, row_idx));

            if is_null {
                slot.fill(0);
                NullBitmap::set_bit(bitmap, target.null_bit);
            } else {
                if VARLEN {
                    let value = &cells.data[cells.offsets[row_idx]..cells.offsets[row_idx + 1]];
                    let entry = VarlenSlot {
                        offset: indirect.len() as u64,
                        length: value.len() as u64,
                    };
                    indirect.extend_from_slice(value);
                    entry.write_to(slot);
                } else {
                    slot.copy_from_slice(&cells.data[src..src + cells.width]);
                }
                if NULLABLE {
                    NullBitmap::clear_bit(bitmap, target.null_bit);
                }
            }

            dst_row += target.stride;
            src += cells.width;
            row_idx += 1;
        }
    }
}
