use super::row_block_factory::RowBlockFactory;

#[test]
fn default_block_uses_key_note_schema() {
    let block = RowBlockFactory::new()
        .with_rows(RowBlockFactory::key_note_rows())
        .create();

    assert_eq!(block.nrows(), 3);
    assert_eq!(block.schema().num_columns(), 2);
    assert_eq!(block.selection().count_selected(), 3);
}

#[test]
fn with_selected_restricts_selection() {
    let block = RowBlockFactory::new()
        .with_rows(RowBlockFactory::key_note_rows())
        .with_selected(&[2])
        .create();

    assert_eq!(block.selection().count_selected(), 1);
    assert!(block.selection().is_selected(2));
}

#[test]
fn factory_entry_point_builds_blocks_over_custom_schemas() {
    use crate::engine::types::{LogicalType, ScalarValue};
    use crate::test_helpers::factory::Factory;

    let schema = Factory::schema()
        .nullable("flag", LogicalType::Boolean)
        .create();
    let block = Factory::row_block()
        .with_schema(schema)
        .with_row(vec![ScalarValue::Boolean(true)])
        .with_row(vec![ScalarValue::Null])
        .create();

    assert_eq!(block.nrows(), 2);
    assert!(block.column(0).unwrap().is_null(1));
}
