//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents carry fully resolved data (geocoded places, the device position),
/// so reducers never perform I/O.
pub trait Intent: Send + 'static {}
