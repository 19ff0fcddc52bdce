pub use super::factories::{RowBlockFactory, SchemaFactory};

pub struct Factory;

impl Factory {
    pub fn schema() -> SchemaFactory {
        SchemaFactory::new()
    }

    pub fn row_block() -> RowBlockFactory {
        RowBlockFactory::new()
    }
}
