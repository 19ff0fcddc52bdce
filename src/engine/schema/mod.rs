mod definition;
mod layout;


pub use definition::{ColumnSchema, Schema};
pub use layout::{ColumnLayout, RowLayout, VARLEN_OFFSET_SIZE, VARLEN_SLOT_SIZE};
