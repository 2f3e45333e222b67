//! HTTP client for the intent-classification backend.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;

use crate::config::IntentConfig;
use crate::intent::{CommandClassifier, CommandRequest, IntentAction, IntentResponse};

/// Shown when the backend cannot be reached or answers with garbage.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Could not reach the command service, please try again";

/// Sends commands to the intent backend and decodes its answer.
///
/// Stateless apart from the connection pool; safe to share across tasks.
#[derive(Clone)]
pub struct IntentDispatcher {
    client: Client,
    endpoint: String,
}

impl IntentDispatcher {
    pub fn new(config: &IntentConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request(&self, command: &str) -> Result<IntentResponse, String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&CommandRequest {
                command: command.to_string(),
            })
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("status {}", status.as_u16()));
        }

        response
            .json::<IntentResponse>()
            .await
            .map_err(|e| format!("malformed response: {}", e))
    }
}

#[async_trait]
impl CommandClassifier for IntentDispatcher {
    async fn dispatch(&self, command: &str) -> IntentAction {
        let start = Instant::now();
        tracing::debug!(endpoint = %self.endpoint, command = %command, "Dispatching command");

        match self.request(command).await {
            Ok(response) => {
                let action = response.into_action();
                tracing::info!(
                    action = action.name(),
                    latency_ms = start.elapsed().as_millis() as u64,
                    "Command classified"
                );
                action
            }
            Err(reason) => {
                tracing::warn!(
                    endpoint = %self.endpoint,
                    error = %reason,
                    "Intent backend request failed"
                );
                IntentAction::unreachable()
            }
        }
    }
}
