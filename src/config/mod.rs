//! Configuration management.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{
    Config, GeocodeConfig, IntentConfig, MapConfig, PositionConfig, ServerConfig, VoiceConfig,
};
