// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the presentation bridge, including:
//! - Application state shared with handlers
//! - HTTP/WebSocket routing
//! - Game session orchestration (engine ownership, timers, screen connection)
//! - Error frames and flood protection for screen connections

pub mod state;
pub mod router;
pub mod game_session;
pub mod ws_error;
pub mod anti_spam;
pub mod ws_actor_utils;
