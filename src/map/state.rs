use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::map::mvi::UiState;

pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 18;

/// Zoom used when a single place is shown.
pub const PLACE_ZOOM: u8 = 13;
/// Zoom used when two places are shown together.
pub const ROUTE_ZOOM: u8 = 5;

/// Clamps a zoom level into `MIN_ZOOM..=MAX_ZOOM`.
pub fn clamp_zoom(zoom: i32) -> u8 {
    zoom.clamp(i32::from(MIN_ZOOM), i32::from(MAX_ZOOM)) as u8
}

/// A pin on the map with its popup content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub position: Coordinate,
    pub label: String,
    pub detail_lines: Vec<String>,
}

/// A two-point route drawn as a polyline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub origin: Coordinate,
    pub destination: Coordinate,
}

impl Route {
    pub fn points(&self) -> [Coordinate; 2] {
        [self.origin, self.destination]
    }
}

/// The single rendered map state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
    pub route: Option<Route>,
}

impl UiState for MapView {}

impl MapView {
    /// An empty view centered on `center`. Zoom is clamped.
    pub fn new(center: Coordinate, zoom: u8) -> Self {
        Self {
            center,
            zoom: clamp_zoom(i32::from(zoom)),
            markers: Vec::new(),
            route: None,
        }
    }

    /// True when the route endpoints are both backed by a marker.
    pub fn route_is_anchored(&self) -> bool {
        match &self.route {
            None => true,
            Some(route) => route
                .points()
                .iter()
                .all(|p| self.markers.iter().any(|m| m.position == *p)),
        }
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::new(Coordinate::new(51.505, -0.09), PLACE_ZOOM)
    }
}
