//! Orchestration: transcript → intent → handler → reducer → published state.

mod listen;
mod pipeline;

pub use listen::listen;
pub use pipeline::{
    CommandEffect, CommandPipeline, DETAILS_NOT_FOUND, LOCATION_NOT_FOUND, PAIR_NOT_FOUND,
};

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::AssistantError;
use crate::geo::round_km;
use crate::intent::CommandClassifier;
use crate::map::mvi::Reducer;
use crate::map::{MapReducer, MapView};
use crate::transcript;

/// Everything the rendering collaborator needs.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AssistantState {
    pub view: MapView,
    /// Last non-empty transcript received.
    pub recognized_text: Option<String>,
    /// Distance of the last two-point action, rounded for display.
    pub last_distance_km: Option<f64>,
    /// Current user-visible failure. The most recent one wins.
    pub last_error: Option<String>,
}

/// What happened to one command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Transcript was blank; nothing was dispatched.
    Skipped,
    Applied { action: &'static str },
    Failed(AssistantError),
}

/// Owns the published state and runs commands against it.
///
/// State is replaced wholesale after each command, so subscribers never see
/// a half-applied update. Concurrent commands are last-write-wins; [`listen`]
/// feeds them one at a time.
pub struct Assistant {
    classifier: Arc<dyn CommandClassifier>,
    pipeline: CommandPipeline,
    state: watch::Sender<AssistantState>,
}

impl Assistant {
    pub fn new(
        classifier: Arc<dyn CommandClassifier>,
        pipeline: CommandPipeline,
        initial_view: MapView,
    ) -> Self {
        let (state, _) = watch::channel(AssistantState {
            view: initial_view,
            ..AssistantState::default()
        });
        Self {
            classifier,
            pipeline,
            state,
        }
    }

    pub fn snapshot(&self) -> AssistantState {
        self.state.borrow().clone()
    }

    pub fn view(&self) -> MapView {
        self.state.borrow().view.clone()
    }

    /// Receives every published state.
    pub fn subscribe(&self) -> watch::Receiver<AssistantState> {
        self.state.subscribe()
    }

    /// Runs one transcript through the full pipeline.
    pub async fn handle_transcript(&self, raw: &str) -> CommandOutcome {
        let Some(command) = transcript::normalize(raw) else {
            return CommandOutcome::Skipped;
        };

        let span = tracing::info_span!("command", id = %Uuid::new_v4());
        self.run_command(command).instrument(span).await
    }

    async fn run_command(&self, command: String) -> CommandOutcome {
        tracing::info!(command = %command, "Handling command");
        self.publish(|state| state.recognized_text = Some(command.clone()));

        let action = self.classifier.dispatch(&command).await;
        let action_name = action.name();

        match self.pipeline.execute(action).await {
            Ok(effect) => {
                self.publish(|state| {
                    state.view = MapReducer::reduce(state.view.clone(), effect.intent.clone());
                    if let Some(km) = effect.distance_km {
                        state.last_distance_km = Some(round_km(km));
                    }
                    state.last_error = None;
                });
                tracing::info!(action = action_name, "Command applied");
                CommandOutcome::Applied {
                    action: action_name,
                }
            }
            Err(err) => {
                self.report(&err);
                CommandOutcome::Failed(err)
            }
        }
    }

    /// Surfaces a failure detected outside the command pipeline.
    pub fn report(&self, err: &AssistantError) {
        tracing::warn!(kind = err.kind(), error = %err, "Command failed");
        let message = err.user_message();
        self.publish(|state| state.last_error = Some(message.clone()));
    }

    fn publish(&self, update: impl FnOnce(&mut AssistantState)) {
        let mut next = self.state.borrow().clone();
        update(&mut next);
        self.state.send_replace(next);
    }
}
