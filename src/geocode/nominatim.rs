use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::GeocodeConfig;
use crate::geo::{Coordinate, PlaceResult};
use crate::geocode::{GeocodeError, Geocoder};

/// One search hit.
///
/// Nominatim encodes coordinates as strings; bare numbers are accepted too.
/// Anything else leaves the candidate without a usable position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCandidate {
    #[serde(default)]
    pub lat: Value,
    #[serde(default)]
    pub lon: Value,
    #[serde(default)]
    pub display_name: String,
}

impl SearchCandidate {
    /// Parses into a place. `None` when the coordinates are not valid numbers.
    pub fn into_place(self, query: &str) -> Option<PlaceResult> {
        let latitude = coordinate_value(&self.lat)?;
        let longitude = coordinate_value(&self.lon)?;
        let coordinate = Coordinate::checked(latitude, longitude)?;

        let display_name = if self.display_name.trim().is_empty() {
            query.to_string()
        } else {
            self.display_name
        };

        Some(PlaceResult {
            coordinate,
            display_name,
            raw_query: query.to_string(),
        })
    }
}

fn coordinate_value(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// HTTP client for `GET {base_url}/search?format=json&q=<query>`.
#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    search_url: String,
}

impl NominatimClient {
    pub fn new(config: &GeocodeConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            search_url: format!("{}/search", config.base_url.trim_end_matches('/')),
        })
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn resolve(&self, query: &str) -> Result<Option<PlaceResult>, GeocodeError> {
        let start = Instant::now();
        let response = self
            .client
            .get(&self.search_url)
            .query(&[("format", "json"), ("q", query)])
            .send()
            .await
            .map_err(|e| GeocodeError::Request {
                query: query.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(query = %query, status = %status, "Geocoding service error");
            return Err(GeocodeError::Status {
                query: query.to_string(),
                status: status.as_u16(),
            });
        }

        // Only the first hit is used, so later hits are never decoded.
        let candidates: Vec<Value> = response.json().await.map_err(|e| GeocodeError::Request {
            query: query.to_string(),
            source: e,
        })?;

        let latency_ms = start.elapsed().as_millis() as u64;
        let Some(first) = candidates.into_iter().next() else {
            tracing::debug!(query = %query, latency_ms, "No geocode candidates");
            return Ok(None);
        };

        let place = serde_json::from_value::<SearchCandidate>(first.clone())
            .ok()
            .and_then(|candidate| candidate.into_place(query));
        match place {
            Some(place) => {
                tracing::debug!(
                    query = %query,
                    display_name = %place.display_name,
                    latency_ms,
                    "Resolved place"
                );
                Ok(Some(place))
            }
            None => {
                tracing::warn!(
                    query = %query,
                    lat = %first.get("lat").unwrap_or(&serde_json::Value::Null),
                    lon = %first.get("lon").unwrap_or(&serde_json::Value::Null),
                    "Unparseable coordinates in geocode candidate"
                );
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(lat: &str, lon: &str, name: &str) -> SearchCandidate {
        SearchCandidate {
            lat: Value::from(lat),
            lon: Value::from(lon),
            display_name: name.to_string(),
        }
    }

    #[test]
    fn parses_string_coordinates() {
        let place = candidate("48.8566", "2.3522", "Paris, France")
            .into_place("Paris")
            .expect("place");
        assert_eq!(place.coordinate, Coordinate::new(48.8566, 2.3522));
        assert_eq!(place.display_name, "Paris, France");
        assert_eq!(place.raw_query, "Paris");
    }

    #[test]
    fn parses_numeric_coordinates() {
        let candidate: SearchCandidate = serde_json::from_value(serde_json::json!({
            "lat": 48.8566, "lon": 2.3522, "display_name": "Paris, France"
        }))
        .expect("candidate");
        let place = candidate.into_place("Paris").expect("place");
        assert_eq!(place.coordinate, Coordinate::new(48.8566, 2.3522));
    }

    #[test]
    fn missing_coordinates_are_none() {
        let candidate: SearchCandidate =
            serde_json::from_value(serde_json::json!({ "display_name": "no coords" }))
                .expect("candidate");
        assert!(candidate.into_place("x").is_none());
    }

    #[test]
    fn garbage_coordinates_are_none() {
        assert!(candidate("north", "2.0", "x").into_place("x").is_none());
        assert!(candidate("NaN", "2.0", "x").into_place("x").is_none());
        assert!(candidate("95.0", "2.0", "x").into_place("x").is_none());
        assert!(candidate("", "", "x").into_place("x").is_none());
    }

    #[test]
    fn blank_display_name_falls_back_to_query() {
        let place = candidate("1.0", "2.0", " ").into_place("Somewhere").expect("place");
        assert_eq!(place.display_name, "Somewhere");
    }

    #[test]
    fn search_url_strips_trailing_slash() {
        let config = GeocodeConfig {
            base_url: "http://localhost:9000/".to_string(),
            ..GeocodeConfig::default()
        };
        let client = NominatimClient::new(&config).expect("client");
        assert_eq!(client.search_url(), "http://localhost:9000/search");
    }
}
