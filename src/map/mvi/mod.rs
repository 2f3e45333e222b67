//! Model-View-Intent (MVI) architecture primitives.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Renderer
//!    ↑                                │
//!    └────────── voice command ───────┘
//! ```
//!
//! - **State**: Immutable representation of what the renderer draws
//! - **Intent**: Resolved map changes produced by command handlers
//! - **Reducer**: Pure function that transforms state based on intents

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
