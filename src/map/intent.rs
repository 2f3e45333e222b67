use crate::geo::{Coordinate, PlaceResult};
use crate::intent::ZoomDirection;
use crate::map::mvi::Intent;

/// A map change with every place already resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum MapIntent {
    /// Center on a single place, replacing all markers.
    ShowPlace(PlaceResult),
    /// Show two places joined by a route.
    ShowPair {
        first: PlaceResult,
        second: PlaceResult,
    },
    /// Route from the device position to a place, keeping existing markers.
    AddFromCurrent {
        current: Coordinate,
        place: PlaceResult,
    },
    /// Replace markers with a detailed marker, leaving center and zoom alone.
    ShowDetails(PlaceResult),
    /// Recenter on a place and step the zoom level.
    ZoomAt {
        place: PlaceResult,
        direction: ZoomDirection,
    },
}

impl Intent for MapIntent {}
