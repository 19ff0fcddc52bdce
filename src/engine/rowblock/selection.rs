use crate::engine::errors::RowBlockError;

use super::bitmap::NullBitmap;

/// Bitmap over the logical rows of a block; a set bit marks a live row.
/// Bits past `len` are always zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionVector {
    bitmap: Vec<u8>,
    len: usize,
}

/// One maximal stretch of rows sharing the same selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRun {
    pub selected: bool,
    pub len: usize,
}

impl SelectionVector {
    pub fn all_selected(len: usize) -> Self {
        let mut bitmap = vec![0xFF; NullBitmap::size_for(len)];
        if len % 8 != 0 {
            if let Some(last) = bitmap.last_mut() {
                *last = (1u8 << (len % 8)) - 1;
            }
        }
        Self { bitmap, len }
    }

    pub fn none_selected(len: usize) -> Self {
        Self {
            bitmap: vec![0; NullBitmap::size_for(len)],
            len,
        }
    }

    pub fn from_indices(len: usize, indices: &[usize]) -> Result<Self, RowBlockError> {
        let mut selection = Self::none_selected(len);
        for &idx in indices {
            selection.select(idx)?;
        }
        Ok(selection)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn select(&mut self, row: usize) -> Result<(), RowBlockError> {
        self.check_bounds(row)?;
        NullBitmap::set_bit(&mut self.bitmap, row);
        Ok(())
    }

    pub fn unselect(&mut self, row: usize) -> Result<(), RowBlockError> {
        self.check_bounds(row)?;
        NullBitmap::clear_bit(&mut self.bitmap, row);
        Ok(())
    }

    pub fn is_selected(&self, row: usize) -> bool {
        row < self.len && NullBitmap::is_set(&self.bitmap, row)
    }

    pub fn count_selected(&self) -> usize {
        NullBitmap::count_set(&self.bitmap, self.len)
    }

    pub fn selected_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(|&row| NullBitmap::is_set(&self.bitmap, row))
    }

    /// Alternating runs of selected and unselected rows, covering every row once.
    pub fn runs(&self) -> SelectionRuns<'_> {
        SelectionRuns {
            bitmap: &self.bitmap,
            len: self.len,
            pos: 0,
        }
    }

    fn check_bounds(&self, row: usize) -> Result<(), RowBlockError> {
        if row >= self.len {
            return Err(RowBlockError::InvalidArgument(format!(
                "row {} out of bounds for selection of {} rows",
                row, self.len
            )));
        }
        Ok(())
    }
}

pub struct SelectionRuns<'a> {
    bitmap: &'a [u8],
    len: usize,
    pos: usize,
}

impl Iterator for SelectionRuns<'_> {
    type Item = SelectionRun;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.len {
            return None;
        }

        let start = self.pos;
        let selected = NullBitmap::is_set(self.bitmap, self.pos);
        let uniform = if selected { 0xFF } else { 0x00 };
        self.pos += 1;

        while self.pos < self.len {
            // whole bytes of the same state are skipped at once
            if self.pos % 8 == 0
                && self.pos + 8 <= self.len
                && self.bitmap[self.pos / 8] == uniform
            {
                self.pos += 8;
                continue;
            }
            if NullBitmap::is_set(self.bitmap, self.pos) != selected {
                break;
            }
            self.pos += 1;
        }

        Some(SelectionRun {
            selected,
            len: self.pos - start,
        })
    }
}
