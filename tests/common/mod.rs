//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use voicemap::assistant::{Assistant, CommandPipeline};
use voicemap::config::GeocodeConfig;
use voicemap::geo::{Coordinate, PlaceResult};
use voicemap::geocode::{GeocodeError, Geocoder, NominatimClient};
use voicemap::intent::{CommandClassifier, IntentAction};
use voicemap::map::MapView;

pub const PARIS: (f64, f64) = (48.8566, 2.3522);
pub const LONDON: (f64, f64) = (51.5074, -0.1278);

/// Geocode config pointed at a mock server.
pub fn geocode_config(base_url: &str) -> GeocodeConfig {
    GeocodeConfig {
        base_url: base_url.to_string(),
        user_agent: "voicemap-tests".to_string(),
        timeout_seconds: 2,
    }
}

pub fn nominatim(base_url: &str) -> Arc<NominatimClient> {
    Arc::new(NominatimClient::new(&geocode_config(base_url)).expect("geocode client"))
}

pub fn place(name: &str, (lat, lon): (f64, f64)) -> PlaceResult {
    PlaceResult {
        coordinate: Coordinate::new(lat, lon),
        display_name: name.to_string(),
        raw_query: name.to_string(),
    }
}

// -- Stubs --------------------------------------------------------------------

/// Classifier returning a fixed action per command, `Unknown` otherwise.
#[derive(Default)]
pub struct StubClassifier {
    actions: HashMap<String, IntentAction>,
}

impl StubClassifier {
    pub fn with(mut self, command: &str, action: IntentAction) -> Self {
        self.actions.insert(command.to_string(), action);
        self
    }
}

#[async_trait]
impl CommandClassifier for StubClassifier {
    async fn dispatch(&self, command: &str) -> IntentAction {
        self.actions
            .get(command)
            .cloned()
            .unwrap_or_else(|| IntentAction::unknown("stub: unexpected command"))
    }
}

/// In-memory geocoder that counts lookups.
#[derive(Default)]
pub struct StubGeocoder {
    places: HashMap<String, PlaceResult>,
    pub lookups: Mutex<Vec<String>>,
}

impl StubGeocoder {
    pub fn with(mut self, query: &str, name: &str, coord: (f64, f64)) -> Self {
        self.places.insert(query.to_string(), place(name, coord));
        self
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.lock().len()
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn resolve(&self, query: &str) -> Result<Option<PlaceResult>, GeocodeError> {
        self.lookups.lock().push(query.to_string());
        Ok(self.places.get(query).cloned())
    }
}

// -- Assistant builders -------------------------------------------------------

pub fn assistant_with(
    classifier: StubClassifier,
    geocoder: Arc<dyn Geocoder>,
    current: Option<Coordinate>,
) -> Assistant {
    let pipeline = CommandPipeline::new(geocoder, current, Duration::from_secs(2));
    Assistant::new(Arc::new(classifier), pipeline, MapView::default())
}
