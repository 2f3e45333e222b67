use tokio::sync::mpsc;

use crate::assistant::Assistant;
use crate::error::AssistantError;
use crate::shutdown::ShutdownHandle;
use crate::voice::{VoiceSession, VoiceState};

/// Drives a voice session until capture ends, fails, or shutdown is signaled.
///
/// Finalized transcripts are processed strictly one at a time, in the order
/// they were spoken. A capture error is surfaced through the assistant and
/// acknowledged, leaving the session idle.
///
/// Returns an error only when capture cannot start at all.
pub async fn listen(
    assistant: &Assistant,
    session: &mut VoiceSession,
    mut transcripts: mpsc::Receiver<String>,
    shutdown: ShutdownHandle,
) -> Result<(), AssistantError> {
    let mut voice = session.subscribe();
    if let Err(e) = session.start() {
        let err = AssistantError::from(e);
        assistant.report(&err);
        return Err(err);
    }

    loop {
        tokio::select! {
            Some(raw) = transcripts.recv() => {
                assistant.handle_transcript(&raw).await;
            }
            changed = voice.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = voice.borrow_and_update().clone();
                match state {
                    VoiceState::Listening => {}
                    VoiceState::Idle => {
                        drain(assistant, &mut transcripts).await;
                        break;
                    }
                    VoiceState::Error { reason } => {
                        drain(assistant, &mut transcripts).await;
                        session.acknowledge();
                        assistant.report(&AssistantError::CaptureError { code: reason });
                        break;
                    }
                }
            }
            _ = shutdown.wait() => {
                session.stop();
                break;
            }
        }
    }

    tracing::info!("Listening ended");
    Ok(())
}

/// Handles transcripts that were queued before capture ended.
async fn drain(assistant: &Assistant, transcripts: &mut mpsc::Receiver<String>) {
    while let Ok(raw) = transcripts.try_recv() {
        assistant.handle_transcript(&raw).await;
    }
}
