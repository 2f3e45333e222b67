//! Device positioning capability.
//!
//! Queried once when a session starts; the result is read-only afterwards.

use async_trait::async_trait;

use crate::config::PositionConfig;
use crate::error::AssistantError;
use crate::geo::Coordinate;

/// One-shot source of the device position.
#[async_trait]
pub trait PositionProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinate, AssistantError>;
}

/// Position pinned in configuration, or none at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPosition {
    position: Option<Coordinate>,
}

impl FixedPosition {
    pub fn new(position: Option<Coordinate>) -> Self {
        Self { position }
    }

    pub fn from_config(config: Option<&PositionConfig>) -> Self {
        Self::new(config.and_then(|p| Coordinate::checked(p.latitude, p.longitude)))
    }
}

#[async_trait]
impl PositionProvider for FixedPosition {
    async fn current_position(&self) -> Result<Coordinate, AssistantError> {
        self.position.ok_or(AssistantError::PositionUnavailable)
    }
}

/// Asks the provider once, logging and swallowing failures.
pub async fn locate_once(provider: &dyn PositionProvider) -> Option<Coordinate> {
    match provider.current_position().await {
        Ok(position) => {
            tracing::info!(
                latitude = position.latitude,
                longitude = position.longitude,
                "Current location acquired"
            );
            Some(position)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Current location unavailable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_position_reports_configured_point() {
        let provider = FixedPosition::from_config(Some(&PositionConfig {
            latitude: 22.3,
            longitude: 70.8,
        }));
        assert_eq!(
            provider.current_position().await,
            Ok(Coordinate::new(22.3, 70.8))
        );
        assert_eq!(locate_once(&provider).await, Some(Coordinate::new(22.3, 70.8)));
    }

    #[tokio::test]
    async fn missing_position_is_unavailable() {
        let provider = FixedPosition::from_config(None);
        assert_eq!(
            provider.current_position().await,
            Err(AssistantError::PositionUnavailable)
        );
        assert_eq!(locate_once(&provider).await, None);
    }
}
