/// Presentation bridge configuration.
///
/// The game screen connects locally over a WebSocket; these values select where
/// the HTTP server listens.
pub const BIND_HOST: &str = "127.0.0.1";

/// TCP port of the HTTP server.
pub const BIND_PORT: u16 = 8080;

/// Path of the WebSocket endpoint serving one game screen per connection.
pub const WS_GAME_PATH: &str = "/ws/game";
