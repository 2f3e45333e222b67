//! Intent classification: typed actions decoded once at the dispatch boundary.

mod dispatcher;
pub mod rules;

pub use dispatcher::{IntentDispatcher, TRANSPORT_FAILURE_MESSAGE};
pub use rules::RuleClassifier;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fallback message when the backend gives none.
pub const DEFAULT_UNKNOWN_MESSAGE: &str = "I'm not sure how to help with that.";

/// Wire tags of the recognized actions.
pub mod action {
    pub const FIND_LOCATION: &str = "find_location";
    pub const FIND_DISTANCE: &str = "find_distance";
    pub const DISTANCE_FROM_CURRENT: &str = "distance_from_current";
    pub const READ_DETAILS: &str = "read_details";
    pub const ZOOM: &str = "zoom";
    pub const UNKNOWN: &str = "unknown";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Zoom levels moved per command.
    pub fn delta(self) -> i32 {
        match self {
            ZoomDirection::In => 2,
            ZoomDirection::Out => -2,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "in" => Some(ZoomDirection::In),
            "out" => Some(ZoomDirection::Out),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ZoomDirection::In => "in",
            ZoomDirection::Out => "out",
        }
    }
}

/// A classified voice command.
#[derive(Debug, Clone, PartialEq)]
pub enum IntentAction {
    FindLocation { location: String },
    FindDistance { place1: String, place2: String },
    DistanceFromCurrent { place2: String },
    ReadDetails { location: String },
    Zoom { location: String, direction: ZoomDirection },
    /// Nothing actionable. `backend_unreachable` marks a transport failure
    /// rather than an utterance the backend could not classify.
    Unknown {
        raw_message: String,
        backend_unreachable: bool,
    },
}

impl IntentAction {
    pub fn unknown(message: impl Into<String>) -> Self {
        IntentAction::Unknown {
            raw_message: message.into(),
            backend_unreachable: false,
        }
    }

    /// The intent backend could not be reached or answered with garbage.
    pub fn unreachable() -> Self {
        IntentAction::Unknown {
            raw_message: TRANSPORT_FAILURE_MESSAGE.to_string(),
            backend_unreachable: true,
        }
    }

    /// Wire tag for logging.
    pub fn name(&self) -> &'static str {
        match self {
            IntentAction::FindLocation { .. } => action::FIND_LOCATION,
            IntentAction::FindDistance { .. } => action::FIND_DISTANCE,
            IntentAction::DistanceFromCurrent { .. } => action::DISTANCE_FROM_CURRENT,
            IntentAction::ReadDetails { .. } => action::READ_DETAILS,
            IntentAction::Zoom { .. } => action::ZOOM,
            IntentAction::Unknown { .. } => action::UNKNOWN,
        }
    }
}

/// Intent backend request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRequest {
    pub command: String,
}

/// Intent backend response body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IntentResponse {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub details: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl IntentResponse {
    /// Decodes into a typed action.
    ///
    /// Unrecognized tags, and recognized tags missing a required detail
    /// field, become `Unknown` carrying the backend's message.
    pub fn into_action(self) -> IntentAction {
        let message = self
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_UNKNOWN_MESSAGE.to_string());
        let details = self.details.unwrap_or(Value::Null);
        let field = |name: &str| -> Option<String> {
            details
                .get(name)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let decoded = match self.action.as_str() {
            action::FIND_LOCATION => {
                field("location").map(|location| IntentAction::FindLocation { location })
            }
            action::FIND_DISTANCE => match (field("place1"), field("place2")) {
                (Some(place1), Some(place2)) => {
                    Some(IntentAction::FindDistance { place1, place2 })
                }
                _ => None,
            },
            action::DISTANCE_FROM_CURRENT => {
                field("place2").map(|place2| IntentAction::DistanceFromCurrent { place2 })
            }
            action::READ_DETAILS => {
                field("location").map(|location| IntentAction::ReadDetails { location })
            }
            action::ZOOM => match (
                field("location"),
                field("zoom").as_deref().and_then(ZoomDirection::parse),
            ) {
                (Some(location), Some(direction)) => {
                    Some(IntentAction::Zoom { location, direction })
                }
                _ => None,
            },
            other => {
                tracing::debug!(action = %other, "Unrecognized intent action");
                None
            }
        };

        decoded.unwrap_or_else(|| IntentAction::unknown(message))
    }
}

/// Anything that turns a normalized command into an action.
///
/// Implementations never fail: transport and decoding problems become
/// `IntentAction::Unknown`.
#[async_trait]
pub trait CommandClassifier: Send + Sync {
    async fn dispatch(&self, command: &str) -> IntentAction;
}
