use crate::geo::{midpoint, Coordinate, PlaceResult};
use crate::map::intent::MapIntent;
use crate::map::mvi::Reducer;
use crate::map::state::{clamp_zoom, MapMarker, MapView, Route, PLACE_ZOOM, ROUTE_ZOOM};

/// Label of the marker placed at the device position.
pub const CURRENT_LOCATION_LABEL: &str = "Current location";

pub struct MapReducer;

impl Reducer for MapReducer {
    type State = MapView;
    type Intent = MapIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            MapIntent::ShowPlace(place) => MapView {
                center: place.coordinate,
                zoom: PLACE_ZOOM,
                markers: vec![detailed_marker(&place)],
                route: None,
            },
            MapIntent::ShowPair { first, second } => MapView {
                center: midpoint(&first.coordinate, &second.coordinate),
                zoom: ROUTE_ZOOM,
                route: Some(Route {
                    origin: first.coordinate,
                    destination: second.coordinate,
                }),
                markers: vec![brief_marker(&first), brief_marker(&second)],
            },
            MapIntent::AddFromCurrent { current, place } => {
                let mut markers = state.markers;
                // Keep the route anchored to markers.
                if !markers.iter().any(|m| m.position == current) {
                    markers.push(current_marker(current));
                }
                markers.push(brief_marker(&place));
                MapView {
                    center: midpoint(&current, &place.coordinate),
                    zoom: ROUTE_ZOOM,
                    markers,
                    route: Some(Route {
                        origin: current,
                        destination: place.coordinate,
                    }),
                }
            }
            MapIntent::ShowDetails(place) => MapView {
                markers: vec![detailed_marker(&place)],
                // Route endpoints would no longer be backed by markers.
                route: None,
                ..state
            },
            MapIntent::ZoomAt { place, direction } => MapView {
                center: place.coordinate,
                zoom: clamp_zoom(i32::from(state.zoom) + direction.delta()),
                markers: vec![detailed_marker(&place)],
                route: None,
            },
        }
    }
}

fn detailed_marker(place: &PlaceResult) -> MapMarker {
    MapMarker {
        position: place.coordinate,
        label: place.display_name.clone(),
        detail_lines: vec![
            format!("Latitude: {}", place.coordinate.latitude),
            format!("Longitude: {}", place.coordinate.longitude),
            format!("Display Name: {}", place.display_name),
        ],
    }
}

fn brief_marker(place: &PlaceResult) -> MapMarker {
    MapMarker {
        position: place.coordinate,
        label: place.display_name.clone(),
        detail_lines: coordinate_lines(&place.coordinate),
    }
}

fn current_marker(current: Coordinate) -> MapMarker {
    MapMarker {
        position: current,
        label: CURRENT_LOCATION_LABEL.to_string(),
        detail_lines: coordinate_lines(&current),
    }
}

fn coordinate_lines(coord: &Coordinate) -> Vec<String> {
    vec![
        format!("Latitude: {}", coord.latitude),
        format!("Longitude: {}", coord.longitude),
    ]
}
