mod header;
mod message;
mod schema;
mod status;

#[cfg(test)]
mod message_test;

pub use header::{MESSAGE_MAGIC, MESSAGE_VERSION, MessageHeader};
pub use message::{RowBlockMessage, RowBlockWriter};
pub use schema::{ColumnSchemaRecord, records_to_schema, schema_to_records};
pub use status::{StatusCode, WireStatus};
