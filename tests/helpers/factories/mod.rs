pub mod row_block_factory;
pub mod schema_factory;

pub use row_block_factory::RowBlockFactory;
pub use schema_factory::SchemaFactory;

#[cfg(test)]
mod row_block_factory_test;
#[cfg(test)]
mod schema_factory_test;
