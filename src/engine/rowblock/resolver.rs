use tracing::{debug, warn};

use crate::engine::errors::RowBlockError;
use crate::engine::schema::{RowLayout, VARLEN_SLOT_SIZE};

use super::bitmap::NullBitmap;
use super::slot::VarlenSlot;

/// Row records as received from a peer. Variable-length slots still hold
/// untrusted `(offset, length)` pairs and must not be read until resolved.
#[derive(Debug)]
pub struct UnresolvedRowBlock {
    layout: RowLayout,
    row_count: usize,
    row_bytes: Vec<u8>,
}

/// Row records whose variable-length slots have all been proven to lie inside
/// `indirect`. Only obtainable through [`UnresolvedRowBlock::resolve`].
#[derive(Debug)]
pub struct ResolvedRowBlock<'a> {
    pub(super) layout: RowLayout,
    pub(super) row_count: usize,
    pub(super) row_bytes: Vec<u8>,
    pub(super) indirect: &'a [u8],
}

impl UnresolvedRowBlock {
    pub fn new(layout: RowLayout, row_count: usize, row_bytes: Vec<u8>) -> Self {
        Self {
            layout,
            row_count,
            row_bytes,
        }
    }

    pub fn layout(&self) -> &RowLayout {
        &self.layout
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Validates every non-null variable-length slot against `indirect` and
    /// hands back the resolved block. Consumes `self`, so a message is resolved
    /// exactly once; on error nothing resolved escapes.
    pub fn resolve(self, indirect: &[u8]) -> Result<ResolvedRowBlock<'_>, RowBlockError> {
        let stride = self.layout.stride();
        let expected = self.layout.row_bytes_for(self.row_count);
        if expected != Some(self.row_bytes.len()) {
            let err = RowBlockError::SizeMismatch {
                actual: self.row_bytes.len(),
                expected: expected.unwrap_or(usize::MAX),
                row_count: self.row_count,
            };
            warn!(target: "rowblock::resolve", "Rejecting row block: {}", err);
            return Err(err);
        }

        if self.row_count == 0 {
            return Ok(ResolvedRowBlock {
                layout: self.layout,
                row_count: 0,
                row_bytes: self.row_bytes,
                indirect,
            });
        }

        let bitmap_offset = self.layout.null_bitmap_offset();
        let indirect_len = indirect.len() as u64;

        for (col_idx, column) in self.layout.columns().iter().enumerate() {
            if !column.variable_length {
                continue;
            }

            for (row_idx, record) in self.row_bytes.chunks_exact(stride).enumerate() {
                if let Some(bit) = column.null_bit {
                    if NullBitmap::is_set(&record[bitmap_offset..], bit) {
                        continue;
                    }
                }

                let slot =
                    VarlenSlot::read_from(&record[column.offset..column.offset + VARLEN_SLOT_SIZE]);
                match slot.end() {
                    Some(end) if end <= indirect_len => {}
                    _ => {
                        let err = RowBlockError::BadIndirect {
                            row: row_idx,
                            column: self
                                .layout
                                .schema()
                                .column(col_idx)
                                .map(|c| c.name().to_string())
                                .unwrap_or_default(),
                            offset: slot.offset,
                            length: slot.length,
                        };
                        warn!(
                            target: "rowblock::resolve",
                            row = row_idx,
                            indirect_len = indirect.len(),
                            "Rejecting row block: {}",
                            err
                        );
                        return Err(err);
                    }
                }
            }
        }

        debug!(
            target: "rowblock::resolve",
            rows = self.row_count,
            row_bytes = self.row_bytes.len(),
            indirect_bytes = indirect.len(),
            "Resolved row block"
        );

        Ok(ResolvedRowBlock {
            layout: self.layout,
            row_count: self.row_count,
            row_bytes: self.row_bytes,
            indirect,
        })
    }
}
