use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub wire: WireConfig,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

#[derive(Debug, Deserialize)]
pub struct WireConfig {
    /// Upper bound on the row and indirect payload of one framed message.
    pub max_message_bytes: u64,
    #[serde(default = "default_verify_checksum")]
    pub verify_checksum: bool,
}

fn default_verify_checksum() -> bool {
    true
}

use std::env;

pub const DEFAULT_MAX_MESSAGE_BYTES: u64 = 64 * 1024 * 1024;

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("ROWWIRE_CONFIG").unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

/// Built-in defaults, overridden by the optional file at `config_path`, then
/// by `ROWWIRE__SECTION__KEY` environment variables.
pub fn load_settings_from(config_path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .set_default("logging.log_dir", "logs")?
        .set_default("logging.stdout_level", "info")?
        .set_default("logging.file_level", "debug")?
        .set_default("wire.max_message_bytes", DEFAULT_MAX_MESSAGE_BYTES as i64)?
        .set_default("wire.verify_checksum", true)?
        .add_source(config::File::with_name(config_path).required(false))
        .add_source(config::Environment::with_prefix("ROWWIRE").separator("__"))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
