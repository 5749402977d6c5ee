//! Game engine: question source, session state and the round state machine.
//!
//! Nothing here knows about actors or sockets. The engine is driven by plain
//! method calls and reports the timers it needs as `Directive`s.

pub mod types;
pub mod error;
pub mod questions;
pub mod state;
pub mod timing;
pub mod engine;
pub mod snapshot;
pub mod tests;

pub use engine::{Answer, Engine, Transition};
pub use error::GameError;
pub use snapshot::GameSnapshot;
pub use timing::{Directive, SessionTimings, Task, Ticket};
pub use types::{EndReason, GameMode, GameResult, Phase, Question, Side};
