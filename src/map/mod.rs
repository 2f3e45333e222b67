//! Map view state and its reducer.
//!
//! `MapView` is owned by the reducer: it only changes through
//! [`MapReducer::reduce`] and is always replaced wholesale.

pub mod mvi;

mod intent;
mod reducer;
mod state;

pub use intent::MapIntent;
pub use reducer::{MapReducer, CURRENT_LOCATION_LABEL};
pub use state::{
    clamp_zoom, MapMarker, MapView, Route, MAX_ZOOM, MIN_ZOOM, PLACE_ZOOM, ROUTE_ZOOM,
};
