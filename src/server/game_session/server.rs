use actix::prelude::*;
use actix::MessageResult;
use log::{debug, info, warn};
use uuid::Uuid;

use crate::game::engine::{Engine, Transition};
use crate::game::timing::Ticket;
use crate::server::game_session::messages::{
    ClientIntent, Disconnect, GetSnapshot, ProcessIntent, ServerWsMessage,
};
use crate::server::game_session::timers;

/// Owns one engine and the real timers behind its directives.
///
/// The actor mailbox serializes intents and timer callbacks, so the engine
/// sees one event at a time.
pub struct GameSession {
    pub session_id: Uuid,
    pub(super) engine: Engine,
    pub(super) client: Recipient<ServerWsMessage>,
    pub(super) countdown: Option<SpawnHandle>,
    pub(super) pending: Vec<SpawnHandle>,
}

impl Actor for GameSession {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("[GameSession] Started session_id={}", self.session_id);
        self.send_state();
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!("[GameSession] Stopped session_id={}", self.session_id);
    }
}

impl GameSession {
    pub fn new(session_id: Uuid, engine: Engine, client: Recipient<ServerWsMessage>) -> Self {
        Self {
            session_id,
            engine,
            client,
            countdown: None,
            pending: Vec::new(),
        }
    }

    pub fn send_state(&self) {
        let snapshot = self.engine.snapshot();
        debug!(
            "[GameSession] Broadcast snapshot: session_id={} phase={:?} question={} rope={} remaining={}",
            self.session_id,
            snapshot.phase,
            snapshot.question_number,
            snapshot.rope_position,
            snapshot.remaining_seconds
        );
        self.client.do_send(ServerWsMessage::snapshot(snapshot));
    }

    /// Carry out the engine's directives and publish the new state.
    pub(super) fn apply(&mut self, transition: Transition, ctx: &mut Context<Self>) {
        if let Transition::Applied(directives) = transition {
            timers::apply_directives(self, ctx, directives);
            self.send_state();
        }
    }

    /// Timer callback entry point.
    pub(super) fn fire(&mut self, ticket: Ticket, ctx: &mut Context<Self>) {
        let transition = self.engine.fire(ticket);
        self.apply(transition, ctx);
    }
}

impl Handler<ProcessIntent> for GameSession {
    type Result = ();

    fn handle(&mut self, msg: ProcessIntent, ctx: &mut Context<Self>) -> Self::Result {
        let transition = match msg.intent {
            ClientIntent::ChooseMode { mode } => match self.engine.start_game(mode) {
                Ok(transition) => transition,
                Err(e) => {
                    warn!("[GameSession] Refused to start session_id={}: {}", self.session_id, e);
                    self.client.do_send(ServerWsMessage::error(
                        "START_REFUSED",
                        "The game could not be started.",
                        Some(e.to_string()),
                    ));
                    return;
                }
            },
            ClientIntent::Digit { side, digit } => self.engine.press_digit(side, digit),
            ClientIntent::Clear { side } => self.engine.clear_input(side),
            ClientIntent::Submit { side } => self.engine.submit_input(side),
            ClientIntent::ReturnToMenu => self.engine.return_to_menu(),
            ClientIntent::Ping => Transition::Ignored,
        };
        self.apply(transition, ctx);
    }
}

impl Handler<GetSnapshot> for GameSession {
    type Result = MessageResult<GetSnapshot>;

    fn handle(&mut self, _: GetSnapshot, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.engine.snapshot())
    }
}

impl Handler<Disconnect> for GameSession {
    type Result = ();

    fn handle(&mut self, _: Disconnect, ctx: &mut Context<Self>) -> Self::Result {
        let transition = self.engine.return_to_menu();
        timers::apply_directives(self, ctx, transition.into_directives());
        ctx.stop();
    }
}
