// src/server/state.rs

//! Application state for the presentation bridge.
//!
//! Holds the settings every new screen connection starts its session with.

use crate::game::timing::SessionTimings;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Timer durations handed to each new game session.
    pub timings: SessionTimings,
}

impl AppState {
    pub fn new(timings: SessionTimings) -> Self {
        AppState { timings }
    }
}
