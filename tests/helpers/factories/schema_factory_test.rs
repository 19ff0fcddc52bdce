use super::schema_factory::SchemaFactory;
use crate::engine::types::LogicalType;

#[test]
fn builds_columns_in_order() {
    let schema = SchemaFactory::new()
        .not_null("a", LogicalType::Int32)
        .nullable("b", LogicalType::String)
        .create();

    assert_eq!(schema.num_columns(), 2);
    assert_eq!(schema.find_column("b"), Some(1));
    assert!(schema.column(1).unwrap().is_nullable());
}

#[test]
fn all_kinds_covers_each_nullable_varlen_pair() {
    let schema = SchemaFactory::all_kinds();
    let kinds: Vec<(bool, bool)> = schema
        .columns()
        .iter()
        .map(|c| (c.is_nullable(), c.is_variable_length()))
        .collect();
    assert_eq!(
        kinds,
        vec![(false, false), (true, false), (false, true), (true, true)]
    );
}
