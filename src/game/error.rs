//! Errors raised by the game engine.

use thiserror::Error;

use crate::game::types::Question;

/// Preconditions the engine refuses to start a session without.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("question source returned {actual} questions, expected {expected}")]
    WrongQuestionCount { expected: usize, actual: usize },
    #[error("question {index} is malformed: {question:?}")]
    MalformedQuestion { index: usize, question: Question },
}
