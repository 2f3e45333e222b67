use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub intent: IntentConfig,
    #[serde(default)]
    pub geocode: GeocodeConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    /// Fixed device position. Absent means the current location is unknown.
    #[serde(default)]
    pub position: Option<PositionConfig>,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Intent-classification backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentConfig {
    /// Full URL the command is POSTed to.
    #[serde(default = "default_intent_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u32,
}

/// Free-text geocoding service (Nominatim-compatible search API).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeConfig {
    /// Base URL; `/search` is appended.
    #[serde(default = "default_geocode_base_url")]
    pub base_url: String,
    /// Sent as `User-Agent`, required by the public Nominatim usage policy.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds. Also bounds the join of paired lookups.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u32,
}

/// Initial map view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_initial_latitude")]
    pub initial_latitude: f64,
    #[serde(default = "default_initial_longitude")]
    pub initial_longitude: f64,
    #[serde(default = "default_initial_zoom")]
    pub initial_zoom: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// Keep listening after a finalized utterance.
    #[serde(default = "default_continuous")]
    pub continuous: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionConfig {
    pub latitude: f64,
    pub longitude: f64,
}

/// Local intent-classification service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (host:port).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_intent_endpoint() -> String {
    "http://127.0.0.1:5000/command".to_string()
}

fn default_geocode_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_user_agent() -> String {
    concat!("voicemap/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_seconds() -> u32 {
    10
}

fn default_initial_latitude() -> f64 {
    51.505
}

fn default_initial_longitude() -> f64 {
    -0.09
}

fn default_initial_zoom() -> u8 {
    13
}

fn default_continuous() -> bool {
    true
}

fn default_bind_addr() -> String {
    "127.0.0.1:5000".to_string()
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            endpoint: default_intent_endpoint(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocode_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_latitude: default_initial_latitude(),
            initial_longitude: default_initial_longitude(),
            initial_zoom: default_initial_zoom(),
        }
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            continuous: default_continuous(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}
