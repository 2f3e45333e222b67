//! Continuous speech capture.
//!
//! A [`SpeechRecognizer`] is the platform collaborator; [`VoiceSession`] owns
//! one, tracks the `Idle`/`Listening`/`Error` lifecycle and forwards every
//! finalized utterance onto a transcript channel drained by the assistant.

mod line;
mod session;

pub use line::LineRecognizer;
pub use session::VoiceSession;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::error::AssistantError;

/// Raw output of the recognizer.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    Result { is_final: bool, transcript: String },
    Error { code: String },
}

impl SpeechEvent {
    pub fn final_result(transcript: impl Into<String>) -> Self {
        SpeechEvent::Result {
            is_final: true,
            transcript: transcript.into(),
        }
    }

    pub fn interim(transcript: impl Into<String>) -> Self {
        SpeechEvent::Result {
            is_final: false,
            transcript: transcript.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum VoiceState {
    #[default]
    Idle,
    Listening,
    Error {
        reason: String,
    },
}

impl VoiceState {
    pub fn is_listening(&self) -> bool {
        matches!(self, VoiceState::Listening)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum VoiceError {
    /// No speech capability on this platform.
    #[error("Speech recognition unavailable: {reason}")]
    Unavailable { reason: String },

    /// A previous capture error has not been acknowledged yet.
    #[error("Capture error not acknowledged: {reason}")]
    Unacknowledged { reason: String },
}

impl From<VoiceError> for AssistantError {
    fn from(err: VoiceError) -> Self {
        match err {
            VoiceError::Unavailable { reason } => AssistantError::CaptureUnavailable { reason },
            VoiceError::Unacknowledged { reason } => AssistantError::CaptureError { code: reason },
        }
    }
}

/// Platform speech recognition.
///
/// `start` begins delivering events on `events` until `stop` is called or the
/// source runs dry, in which case the sender is dropped.
pub trait SpeechRecognizer: Send {
    fn start(&mut self, events: mpsc::UnboundedSender<SpeechEvent>) -> Result<(), VoiceError>;
    fn stop(&mut self);
}
