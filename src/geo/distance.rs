use super::Coordinate;

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers (haversine formula).
pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Arithmetic mean of latitudes and longitudes.
///
/// Not a geodesic midpoint: it drifts near the poles and across the antimeridian.
pub fn midpoint(a: &Coordinate, b: &Coordinate) -> Coordinate {
    Coordinate::new(
        (a.latitude + b.latitude) / 2.0,
        (a.longitude + b.longitude) / 2.0,
    )
}

/// Rounds a distance to two decimal places for display.
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
