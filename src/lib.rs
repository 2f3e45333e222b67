//! Voice-driven map assistant.
//!
//! A spoken command flows through:
//!
//! ```text
//! VoiceSession ─→ transcript::normalize ─→ CommandClassifier ─→ CommandPipeline
//!                                                                   │ Geocoder
//!                                                                   ▼
//!                                 renderer ←── AssistantState ←── MapReducer
//! ```

pub mod assistant;
pub mod config;
pub mod error;
pub mod geo;
pub mod geocode;
pub mod intent;
pub mod logging;
pub mod map;
pub mod position;
pub mod server;
pub mod shutdown;
pub mod transcript;
pub mod voice;
