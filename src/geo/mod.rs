//! Geographic primitives shared by the geocoder, the reducer and the handlers.

mod distance;

pub use distance::{haversine_km, midpoint, round_km, EARTH_RADIUS_KM};

use serde::{Deserialize, Serialize};

/// A resolved point on the globe, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Builds a coordinate only when both components are finite and in range.
    pub fn checked(latitude: f64, longitude: f64) -> Option<Self> {
        let coord = Self::new(latitude, longitude);
        coord.is_valid().then_some(coord)
    }

    /// Returns true if the coordinate is finite and within the WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// A geocoded place: first candidate returned for a free-text query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub coordinate: Coordinate,
    pub display_name: String,
    pub raw_query: String,
}
