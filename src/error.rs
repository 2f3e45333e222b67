//! Failure taxonomy for the voice-to-map pipeline.
//!
//! Every failure is captured as a value at the boundary of the component that
//! detects it and rendered as a single user-visible message. None of them is
//! fatal: after any of these the assistant returns to its ready state.

use thiserror::Error;

use crate::intent::TRANSPORT_FAILURE_MESSAGE;

/// `TransportFailure` service tags.
pub const INTENT_SERVICE: &str = "intent";
pub const GEOCODE_SERVICE: &str = "geocode";

/// Errors surfaced to the user by the assistant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssistantError {
    /// The platform has no speech recognition capability.
    #[error("Speech capture unavailable: {reason}")]
    CaptureUnavailable { reason: String },

    /// The speech recognizer reported a failure.
    #[error("Speech capture error: {code}")]
    CaptureError { code: String },

    /// Current position is required but unknown.
    #[error("current location unavailable")]
    PositionUnavailable,

    /// Intent backend or geocoding service unreachable, timed out or non-2xx.
    #[error("{service} request failed: {reason}")]
    TransportFailure { service: String, reason: String },

    /// Geocoding returned no usable candidate.
    #[error("{message}")]
    NotFound { message: String },

    /// The intent backend did not produce an actionable command.
    #[error("{message}")]
    UnrecognizedIntent { message: String },
}

impl AssistantError {
    pub fn transport(service: &str, reason: impl Into<String>) -> Self {
        AssistantError::TransportFailure {
            service: service.to_string(),
            reason: reason.into(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        AssistantError::NotFound {
            message: message.to_string(),
        }
    }

    /// Message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            AssistantError::CaptureUnavailable { .. } => {
                "Speech recognition is not available".to_string()
            }
            AssistantError::CaptureError { code } => format!("Speech recognition error: {}", code),
            AssistantError::PositionUnavailable => "current location unavailable".to_string(),
            AssistantError::TransportFailure { service, .. } if service == INTENT_SERVICE => {
                TRANSPORT_FAILURE_MESSAGE.to_string()
            }
            AssistantError::TransportFailure { .. } => {
                "Could not reach the service, please try again".to_string()
            }
            AssistantError::NotFound { message } => message.clone(),
            AssistantError::UnrecognizedIntent { message } => message.clone(),
        }
    }

    /// Stable tag for logs and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            AssistantError::CaptureUnavailable { .. } => "capture_unavailable",
            AssistantError::CaptureError { .. } => "capture_error",
            AssistantError::PositionUnavailable => "position_unavailable",
            AssistantError::TransportFailure { .. } => "transport_failure",
            AssistantError::NotFound { .. } => "not_found",
            AssistantError::UnrecognizedIntent { .. } => "unrecognized_intent",
        }
    }
}
