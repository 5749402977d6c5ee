/// WebSocket session handler for one game screen.
///
/// Each connection gets its own `GameSession` actor. This actor parses the
/// screen's intents, forwards them to the session, and relays every snapshot
/// back as JSON.
use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{info, warn};
use uuid::Uuid;

use crate::game::engine::Engine;
use crate::game::questions::RandomQuestionBank;
use crate::game::timing::SessionTimings;
use crate::server::anti_spam::AntiSpamState;
use crate::server::game_session::messages::{ClientIntent, Disconnect, ProcessIntent, ServerWsMessage};
use crate::server::game_session::server::GameSession;
use crate::server::ws_actor_utils::WsActorUtils;

pub struct ClientSession {
    pub session_id: Uuid,
    pub timings: SessionTimings,
    game: Option<Addr<GameSession>>,
    anti_spam: AntiSpamState,
}

impl ClientSession {
    pub fn new(timings: SessionTimings) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            timings,
            game: None,
            anti_spam: AntiSpamState::new(),
        }
    }
}

impl WsActorUtils for ClientSession {
    fn anti_spam(&mut self) -> &mut AntiSpamState {
        &mut self.anti_spam
    }

    fn client_id(&self) -> String {
        self.session_id.to_string()
    }
}

impl Actor for ClientSession {
    type Context = ws::WebsocketContext<Self>;

    /// Spawns the game session that belongs to this screen.
    fn started(&mut self, ctx: &mut Self::Context) {
        let engine = Engine::new(Box::new(RandomQuestionBank::new()), self.timings.clone());
        let game = GameSession::new(self.session_id, engine, ctx.address().recipient()).start();
        self.game = Some(game);
        info!("[ClientSession] Screen connected session_id={}", self.session_id);
    }

    /// Tears the game session down with the connection.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(game) = self.game.take() {
            game.do_send(Disconnect);
        }
        info!("[ClientSession] Screen disconnected session_id={}", self.session_id);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ClientSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                let client_id = self.client_id();
                if self.anti_spam.record_request(&client_id) {
                    self.send_ban_and_close(ctx);
                    return;
                }
                match serde_json::from_str::<ClientIntent>(&text) {
                    Ok(ClientIntent::Ping) => {}
                    Ok(intent) => {
                        self.anti_spam.reset_on_valid_action();
                        if let Some(game) = &self.game {
                            game.do_send(ProcessIntent { intent });
                        }
                    }
                    Err(e) => {
                        warn!("[ClientSession] Invalid intent from session_id={}: {}", self.session_id, e);
                        self.send_error_and_maybe_ban(
                            ctx,
                            "INVALID_INTENT",
                            "Invalid client message",
                            Some(e.to_string()),
                        );
                    }
                }
            }
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(e) => {
                warn!("[ClientSession] Protocol error session_id={}: {}", self.session_id, e);
                ctx.stop();
            }
            _ => (),
        }
    }
}

impl Handler<ServerWsMessage> for ClientSession {
    type Result = ();

    /// Serializes frames from the game session to the screen.
    fn handle(&mut self, msg: ServerWsMessage, ctx: &mut Self::Context) {
        if let ServerWsMessage::Error { code, message, context } = &msg {
            self.send_error_and_maybe_ban(ctx, code, message, context.clone());
            return;
        }
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                warn!("[ClientSession] Failed to serialize frame: {}", e);
                self.send_error_and_maybe_ban(ctx, "INTERNAL", "Internal server error", None);
            }
        }
    }
}

/// WebSocket endpoint for one game screen.
pub async fn ws_game(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    ws::start(ClientSession::new(data.timings.clone()), &req, stream)
}
