use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::voice::{SpeechEvent, SpeechRecognizer, VoiceError, VoiceState};

type SharedRecognizer = Arc<Mutex<Box<dyn SpeechRecognizer>>>;

/// State plus a generation counter bumped on every start/stop, so a pump
/// task that outlives its capture period cannot overwrite newer state.
struct Lifecycle {
    state: VoiceState,
    generation: u64,
}

#[derive(Clone)]
struct SharedLifecycle {
    inner: Arc<Mutex<Lifecycle>>,
    notify: Arc<watch::Sender<VoiceState>>,
}

impl SharedLifecycle {
    fn new() -> Self {
        let (notify, _) = watch::channel(VoiceState::Idle);
        Self {
            inner: Arc::new(Mutex::new(Lifecycle {
                state: VoiceState::Idle,
                generation: 0,
            })),
            notify: Arc::new(notify),
        }
    }

    fn get(&self) -> VoiceState {
        self.inner.lock().state.clone()
    }

    /// Unconditional transition; starts a new generation.
    fn advance(&self, state: VoiceState) -> u64 {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        inner.state = state.clone();
        self.notify.send_replace(state);
        inner.generation
    }

    /// Transition only if `generation` is still current.
    fn settle(&self, generation: u64, state: VoiceState) -> bool {
        let mut inner = self.inner.lock();
        if inner.generation != generation {
            return false;
        }
        tracing::debug!(from = ?inner.state, to = ?state, "Voice state transition");
        inner.state = state.clone();
        self.notify.send_replace(state);
        true
    }
}

/// Owns a recognizer and its capture lifecycle.
///
/// Transitions:
/// - `Idle --start--> Listening`
/// - `Listening --final result--> Listening` (continuous) or `Idle` (single shot)
/// - `Listening --stop--> Idle`, discarding any partial result
/// - `any --platform error--> Error`, then `Error --acknowledge--> Idle`
///
/// Dropping the session stops the recognizer.
pub struct VoiceSession {
    recognizer: SharedRecognizer,
    lifecycle: SharedLifecycle,
    transcripts: mpsc::Sender<String>,
    continuous: bool,
    pump: Option<JoinHandle<()>>,
}

impl VoiceSession {
    pub fn new(
        recognizer: Box<dyn SpeechRecognizer>,
        transcripts: mpsc::Sender<String>,
        continuous: bool,
    ) -> Self {
        Self {
            recognizer: Arc::new(Mutex::new(recognizer)),
            lifecycle: SharedLifecycle::new(),
            transcripts,
            continuous,
            pump: None,
        }
    }

    pub fn state(&self) -> VoiceState {
        self.lifecycle.get()
    }

    /// Receives every state change.
    pub fn subscribe(&self) -> watch::Receiver<VoiceState> {
        self.lifecycle.notify.subscribe()
    }

    /// Begins capture. A no-op while already listening.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&mut self) -> Result<(), VoiceError> {
        match self.lifecycle.get() {
            VoiceState::Listening => return Ok(()),
            VoiceState::Error { reason } => return Err(VoiceError::Unacknowledged { reason }),
            VoiceState::Idle => {}
        }

        // A single-shot capture may have left the previous pump behind.
        self.release();

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        self.recognizer.lock().start(events_tx)?;

        let generation = self.lifecycle.advance(VoiceState::Listening);
        tracing::info!(continuous = self.continuous, "Voice capture started");

        self.pump = Some(tokio::spawn(pump(
            events_rx,
            self.recognizer.clone(),
            self.lifecycle.clone(),
            generation,
            self.transcripts.clone(),
            self.continuous,
        )));
        Ok(())
    }

    /// Ends capture. Partial results still in flight are discarded; commands
    /// already forwarded are not recalled.
    pub fn stop(&mut self) {
        if !self.lifecycle.get().is_listening() {
            return;
        }
        self.release();
        self.lifecycle.advance(VoiceState::Idle);
        tracing::info!("Voice capture stopped");
    }

    /// Clears a capture error, returning its reason.
    pub fn acknowledge(&mut self) -> Option<String> {
        match self.lifecycle.get() {
            VoiceState::Error { reason } => {
                self.lifecycle.advance(VoiceState::Idle);
                Some(reason)
            }
            _ => None,
        }
    }

    fn release(&mut self) {
        if let Some(pump) = self.pump.take() {
            pump.abort();
        }
        self.recognizer.lock().stop();
    }
}

impl Drop for VoiceSession {
    fn drop(&mut self) {
        self.release();
    }
}

async fn pump(
    mut events: mpsc::UnboundedReceiver<SpeechEvent>,
    recognizer: SharedRecognizer,
    lifecycle: SharedLifecycle,
    generation: u64,
    transcripts: mpsc::Sender<String>,
    continuous: bool,
) {
    while let Some(event) = events.recv().await {
        match event {
            SpeechEvent::Result {
                is_final: false, ..
            } => {}
            SpeechEvent::Result {
                is_final: true,
                transcript,
            } => {
                tracing::debug!(transcript = %transcript, "Final transcript");
                if transcripts.send(transcript).await.is_err() {
                    tracing::debug!("Transcript consumer gone");
                    break;
                }
                if !continuous {
                    recognizer.lock().stop();
                    lifecycle.settle(generation, VoiceState::Idle);
                    return;
                }
            }
            SpeechEvent::Error { code } => {
                tracing::warn!(code = %code, "Speech recognition error");
                recognizer.lock().stop();
                lifecycle.settle(generation, VoiceState::Error { reason: code });
                return;
            }
        }
    }

    // Source ran dry or the consumer went away.
    lifecycle.settle(generation, VoiceState::Idle);
}
