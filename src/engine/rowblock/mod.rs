mod bitmap;
mod block;
mod encoder;
mod projection;
mod resolver;
mod rows;
mod selection;
mod slot;
mod value_codec;

#[cfg(test)]
mod value_codec_test;

pub use bitmap::NullBitmap;
pub use block::{ColumnBlock, RowBlock, RowBlockBuilder};
pub use encoder::RowEncoder;
pub use projection::{ColumnMapping, ProjectionMapping};
pub use resolver::{ResolvedRowBlock, UnresolvedRowBlock};
pub use rows::{RowView, extract_row_starts, extract_rows};
pub use selection::{SelectionRun, SelectionVector};
pub use slot::VarlenSlot;
pub use value_codec::ValueCodec;
