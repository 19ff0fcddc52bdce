mod global;
mod model;


pub use global::CONFIG;
pub use model::{LoggingConfig, Settings, WireConfig, load_settings};
