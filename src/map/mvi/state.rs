//! Base trait for view state in MVI architecture.

/// Marker trait for state objects.
///
/// States should be:
/// - Immutable (Clone to create new states, replaced wholesale)
/// - Self-contained (all data needed to render the view)
/// - Comparable (PartialEq for detecting changes)
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
