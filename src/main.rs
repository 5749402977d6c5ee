//! Main entry point for the tug-of-war game server.
//!
//! Initializes logging and launches the HTTP server whose WebSocket endpoint
//! drives one game screen per connection.

use actix_web::{web, App, HttpServer};
use log::info;

use config::server::{BIND_HOST, BIND_PORT, WS_GAME_PATH};
use game::timing::SessionTimings;

pub mod config;
mod server;
mod game;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (RUST_LOG).
    env_logger::init();

    // Shared application state for WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(SessionTimings::default()));

    info!("[Main] Listening on ws://{}:{}{}", BIND_HOST, BIND_PORT, WS_GAME_PATH);

    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*"))
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind((BIND_HOST, BIND_PORT))?
    .run()
    .await
}
