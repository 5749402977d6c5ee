//! HTTP and WebSocket routing configuration.
//!
//! A single endpoint serves the game screen. Each connection is handled by a
//! dedicated WebSocket actor owning its own game session.

use actix_web::web;
use crate::config::server::WS_GAME_PATH;
use crate::server::game_session::session::ws_game;

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(WS_GAME_PATH)
            .to(ws_game)
    );
}
