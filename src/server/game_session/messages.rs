//! Messages exchanged between the screen, its WebSocket actor and the game session actor.

use actix::prelude::*;
use serde::{Serialize, Deserialize};

use crate::game::snapshot::GameSnapshot;
use crate::game::types::{GameMode, Side};

/// Raw user intent sent by the screen.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "action", content = "data")]
pub enum ClientIntent {
    ChooseMode { mode: GameMode },
    Digit { side: Side, digit: u8 },
    Clear { side: Side },
    Submit { side: Side },
    ReturnToMenu,
    Ping,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct ProcessIntent {
    pub intent: ClientIntent,
}

/// Server -> screen frame.
#[derive(Message, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum ServerWsMessage {
    Snapshot(GameSnapshot),
    Error {
        code: String,
        message: String,
        context: Option<String>,
    },
}

impl ServerWsMessage {
    pub fn snapshot(snapshot: GameSnapshot) -> Self {
        Self::Snapshot(snapshot)
    }
    pub fn error(code: &str, message: &str, context: Option<String>) -> Self {
        Self::Error { code: code.to_string(), message: message.to_string(), context }
    }
}

/// Ask the session actor for its current snapshot.
#[derive(Message)]
#[rtype(result = "GameSnapshot")]
pub struct GetSnapshot;

/// The screen went away; stop the session and its timers.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect;
