use std::io::Cursor;
use std::sync::Arc;

use super::header::MessageHeader;
use super::message::{RowBlockMessage, RowBlockWriter};
use crate::engine::errors::RowBlockError;
use crate::logging::init_for_tests;
use crate::engine::rowblock::ProjectionMapping;
use crate::engine::types::ScalarValue;
use crate::test_helpers::factories::{RowBlockFactory, SchemaFactory};

fn key_note_message() -> RowBlockMessage {
    let block = RowBlockFactory::new()
        .with_rows(RowBlockFactory::key_note_rows())
        .create();
    let mut writer = RowBlockWriter::new(ProjectionMapping::identity(Arc::clone(block.schema())));
    writer.append(&block).unwrap();
    writer.finish()
}

fn framed(message: &RowBlockMessage) -> Vec<u8> {
    let mut buf = Vec::new();
    message.write_to(&mut buf).unwrap();
    buf
}

#[test]
fn writer_counts_rows_across_batches() {
    let first = RowBlockFactory::new()
        .with_rows(RowBlockFactory::key_note_rows())
        .with_selected(&[0, 1])
        .create();
    let second = RowBlockFactory::new()
        .with_rows(RowBlockFactory::key_note_rows())
        .with_selected(&[2])
        .create();
    let mut writer = RowBlockWriter::new(ProjectionMapping::identity(SchemaFactory::key_note()));

    assert_eq!(writer.append(&first).unwrap(), 2);
    assert_eq!(writer.append(&second).unwrap(), 1);
    assert_eq!(writer.row_count(), 3);

    let message = writer.finish();
    assert_eq!(message.row_count, 3);
    assert_eq!(message.row_bytes.len(), 3 * 21);
    assert_eq!(message.indirect_bytes, b"hibye");
}

#[test]
fn empty_writer_finishes_empty_message() {
    let writer = RowBlockWriter::new(ProjectionMapping::identity(SchemaFactory::key_note()));
    let message = writer.finish();
    assert!(message.is_empty());
    assert!(message.row_bytes.is_empty());
    assert!(message.indirect_bytes.is_empty());
}

#[test]
fn decode_then_resolve_yields_original_rows() {
    let message = key_note_message();
    let layout = ProjectionMapping::identity(SchemaFactory::key_note())
        .layout()
        .clone();

    let (unresolved, indirect) = message.decode(layout);
    let resolved = unresolved.resolve(&indirect).unwrap();

    assert_eq!(
        resolved.to_values().unwrap(),
        RowBlockFactory::key_note_rows()
    );
}

#[test]
fn frame_round_trip() {
    let message = key_note_message();
    let buf = framed(&message);
    assert_eq!(buf.len(), MessageHeader::TOTAL_LEN + 63 + 5);

    let read = RowBlockMessage::read_from(Cursor::new(&buf), 1024).unwrap();
    assert_eq!(read, message);
}

#[test]
fn default_reader_accepts_small_message() {
    let message = key_note_message();
    let read = RowBlockMessage::read_from_default(Cursor::new(framed(&message))).unwrap();
    assert_eq!(read.row_count, 3);
}

#[test]
fn rejects_message_over_size_limit_before_reading_payload() {
    let message = key_note_message();
    let buf = framed(&message);
    // only the header is supplied; the size check must fire first
    let err = RowBlockMessage::read_from(Cursor::new(&buf[..MessageHeader::TOTAL_LEN]), 10)
        .unwrap_err();
    assert!(matches!(err, RowBlockError::Corrupt(_)));
}

#[test]
fn rejects_flipped_payload_byte() {
    init_for_tests();
    let message = key_note_message();
    let mut buf = framed(&message);
    let last = buf.len() - 1;
    buf[last] ^= 0x01;

    let err = RowBlockMessage::read_from(Cursor::new(&buf), 1024).unwrap_err();
    assert!(err.is_corruption());
}

#[test]
fn truncated_payload_is_io_error() {
    let message = key_note_message();
    let buf = framed(&message);
    let err = RowBlockMessage::read_from(Cursor::new(&buf[..buf.len() - 2]), 1024).unwrap_err();
    assert!(matches!(err, RowBlockError::Io(_)));
}

#[test]
fn failed_append_leaves_message_untouched() {
    let block = RowBlockFactory::new()
        .with_rows(RowBlockFactory::key_note_rows())
        .create();
    let mut writer = RowBlockWriter::new(ProjectionMapping::identity(SchemaFactory::all_kinds()));

    let err = writer.append(&block).unwrap_err();
    assert!(matches!(err, RowBlockError::InvalidArgument(_)));
    assert_eq!(writer.row_count(), 0);
    assert_eq!(writer.finish(), RowBlockMessage::default());
}

#[test]
fn projected_writer_resolves_against_destination_layout() {
    let block = RowBlockFactory::new()
        .with_schema(SchemaFactory::all_kinds())
        .with_rows(RowBlockFactory::all_kinds_rows())
        .create();
    let projection = SchemaFactory::new()
        .not_null("id", crate::engine::types::LogicalType::Int64)
        .create();
    let mapping = ProjectionMapping::new(Arc::clone(block.schema()), Some(projection)).unwrap();
    let layout = mapping.layout().clone();
    let mut writer = RowBlockWriter::new(mapping);
    writer.append(&block).unwrap();

    let (unresolved, indirect) = writer.finish().decode(layout);
    assert!(indirect.is_empty());
    let resolved = unresolved.resolve(&indirect).unwrap();
    let ids: Vec<ScalarValue> = resolved
        .rows()
        .map(|row| row.value(0).unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![
            ScalarValue::Int64(10),
            ScalarValue::Int64(11),
            ScalarValue::Int64(-12),
            ScalarValue::Int64(13)
        ]
    );
}
