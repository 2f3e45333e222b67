//! Action handlers: resolve the places an action names and turn them into a
//! map change.

use std::sync::Arc;
use std::time::Duration;

use crate::error::{AssistantError, GEOCODE_SERVICE, INTENT_SERVICE};
use crate::geo::{haversine_km, Coordinate, PlaceResult};
use crate::geocode::{GeocodeError, Geocoder};
use crate::intent::IntentAction;
use crate::map::MapIntent;

pub const LOCATION_NOT_FOUND: &str = "location not found";
pub const PAIR_NOT_FOUND: &str = "one or both locations not found";
pub const DETAILS_NOT_FOUND: &str = "details not found";

/// A successfully handled action.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandEffect {
    pub intent: MapIntent,
    /// Full-precision great-circle distance for two-point actions.
    pub distance_km: Option<f64>,
}

impl CommandEffect {
    fn view_only(intent: MapIntent) -> Self {
        Self {
            intent,
            distance_km: None,
        }
    }
}

pub struct CommandPipeline {
    geocoder: Arc<dyn Geocoder>,
    current_location: Option<Coordinate>,
    join_timeout: Duration,
}

impl CommandPipeline {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        current_location: Option<Coordinate>,
        join_timeout: Duration,
    ) -> Self {
        Self {
            geocoder,
            current_location,
            join_timeout,
        }
    }

    pub fn current_location(&self) -> Option<Coordinate> {
        self.current_location
    }

    /// Runs the handler for `action`. At most one geocode attempt per place.
    pub async fn execute(&self, action: IntentAction) -> Result<CommandEffect, AssistantError> {
        match action {
            IntentAction::FindLocation { location } => {
                let place = self.require(&location, LOCATION_NOT_FOUND).await?;
                Ok(CommandEffect::view_only(MapIntent::ShowPlace(place)))
            }
            IntentAction::FindDistance { place1, place2 } => {
                let (first, second) = self.resolve_pair(&place1, &place2).await?;
                let distance = haversine_km(&first.coordinate, &second.coordinate);
                Ok(CommandEffect {
                    intent: MapIntent::ShowPair { first, second },
                    distance_km: Some(distance),
                })
            }
            IntentAction::DistanceFromCurrent { place2 } => {
                // Checked before any lookup is issued.
                let current = self
                    .current_location
                    .ok_or(AssistantError::PositionUnavailable)?;
                let place = self.require(&place2, LOCATION_NOT_FOUND).await?;
                let distance = haversine_km(&current, &place.coordinate);
                Ok(CommandEffect {
                    intent: MapIntent::AddFromCurrent { current, place },
                    distance_km: Some(distance),
                })
            }
            IntentAction::ReadDetails { location } => {
                let place = self.require(&location, DETAILS_NOT_FOUND).await?;
                Ok(CommandEffect::view_only(MapIntent::ShowDetails(place)))
            }
            IntentAction::Zoom {
                location,
                direction,
            } => {
                let place = self.require(&location, LOCATION_NOT_FOUND).await?;
                Ok(CommandEffect::view_only(MapIntent::ZoomAt { place, direction }))
            }
            IntentAction::Unknown {
                backend_unreachable: true,
                ..
            } => Err(AssistantError::transport(
                INTENT_SERVICE,
                "intent backend unreachable",
            )),
            IntentAction::Unknown { raw_message, .. } => {
                Err(AssistantError::UnrecognizedIntent {
                    message: raw_message,
                })
            }
        }
    }

    async fn require(
        &self,
        query: &str,
        not_found: &str,
    ) -> Result<PlaceResult, AssistantError> {
        match self.geocoder.resolve(query).await {
            Ok(Some(place)) => Ok(place),
            Ok(None) => {
                tracing::info!(query = %query, "Place not found");
                Err(AssistantError::not_found(not_found))
            }
            Err(e) => Err(transport(e)),
        }
    }

    /// Both lookups run concurrently and must both finish.
    async fn resolve_pair(
        &self,
        first: &str,
        second: &str,
    ) -> Result<(PlaceResult, PlaceResult), AssistantError> {
        let lookups = async {
            tokio::join!(self.geocoder.resolve(first), self.geocoder.resolve(second))
        };
        let (a, b) = tokio::time::timeout(self.join_timeout, lookups)
            .await
            .map_err(|_| {
                transport(GeocodeError::Timeout {
                    seconds: self.join_timeout.as_secs(),
                })
            })?;

        match (a.map_err(transport)?, b.map_err(transport)?) {
            (Some(a), Some(b)) => Ok((a, b)),
            (a, b) => {
                tracing::info!(
                    first = %first,
                    first_found = a.is_some(),
                    second = %second,
                    second_found = b.is_some(),
                    "Place pair not resolved"
                );
                Err(AssistantError::not_found(PAIR_NOT_FOUND))
            }
        }
    }
}

fn transport(err: GeocodeError) -> AssistantError {
    tracing::warn!(error = %err, "Geocoding failed");
    AssistantError::transport(GEOCODE_SERVICE, err.to_string())
}
