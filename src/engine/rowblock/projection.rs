use std::sync::Arc;

use crate::engine::errors::RowBlockError;
use crate::engine::schema::{RowLayout, Schema};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub source: usize,
    pub destination: usize,
}

/// Maps a source schema onto the destination row layout that gets encoded.
/// Source columns absent from the destination are not encoded at all.
#[derive(Debug, Clone)]
pub struct ProjectionMapping {
    source: Arc<Schema>,
    layout: RowLayout,
    columns: Vec<ColumnMapping>,
}

impl ProjectionMapping {
    pub fn identity(source: Arc<Schema>) -> Self {
        let columns = (0..source.num_columns())
            .map(|idx| ColumnMapping {
                source: idx,
                destination: idx,
            })
            .collect();
        Self {
            layout: RowLayout::new(Arc::clone(&source)),
            source,
            columns,
        }
    }

    /// Builds the mapping for `projection`, or the identity mapping when `None`.
    /// The projection must be a subset of the source with matching types, and
    /// may not make a nullable source column non-nullable.
    pub fn new(
        source: Arc<Schema>,
        projection: Option<Arc<Schema>>,
    ) -> Result<Self, RowBlockError> {
        let Some(projection) = projection else {
            return Ok(Self::identity(source));
        };

        for dst in projection.columns() {
            let src_idx = source.find_column(dst.name()).ok_or_else(|| {
                RowBlockError::InvalidArgument(format!(
                    "projected column '{}' does not exist in the source schema",
                    dst.name()
                ))
            })?;
            let src = &source.columns()[src_idx];
            if src.logical_type() != dst.logical_type() {
                return Err(RowBlockError::InvalidArgument(format!(
                    "projected column '{}' has type {} but source has {}",
                    dst.name(),
                    dst.logical_type(),
                    src.logical_type()
                )));
            }
            if src.is_nullable() && !dst.is_nullable() {
                return Err(RowBlockError::InvalidArgument(format!(
                    "cannot project nullable column '{}' as non-nullable",
                    dst.name()
                )));
            }
        }

        let columns = source
            .columns()
            .iter()
            .enumerate()
            .filter_map(|(src_idx, col)| {
                projection
                    .find_column(col.name())
                    .map(|dst_idx| ColumnMapping {
                        source: src_idx,
                        destination: dst_idx,
                    })
            })
            .collect();

        Ok(Self {
            source,
            layout: RowLayout::new(projection),
            columns,
        })
    }

    pub fn source_schema(&self) -> &Arc<Schema> {
        &self.source
    }

    pub fn layout(&self) -> &RowLayout {
        &self.layout
    }

    pub fn columns(&self) -> &[ColumnMapping] {
        &self.columns
    }

    pub fn stride(&self) -> usize {
        self.layout.stride()
    }

    #[cfg(test)]
    pub(crate) fn with_columns(mut self, columns: Vec<ColumnMapping>) -> Self {
        self.columns = columns;
        self
    }
}
