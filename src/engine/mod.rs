pub mod errors;
pub mod rowblock;
pub mod schema;
pub mod types;
pub mod wire;


pub use errors::*;
