use serde::{Serialize, Deserialize};

use crate::config::game::MAX_SUM;

/// One of the two teams pulling on the rope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Rope movement caused by a correct answer from this side.
    pub fn pull(self) -> i8 {
        match self {
            Side::Left => -1,
            Side::Right => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Human on the left, bot on the right.
    SinglePlayer,
    /// Two humans sharing the screen.
    TwoPlayer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Menu,
    Playing,
    RoundResult,
    GameOver,
}

/// Why a game ended. Kept apart from the per-round winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    /// The rope reached a side's limit.
    RopeWin(Side),
    /// The last question of the sequence was answered.
    Finished,
    /// The countdown reached zero.
    Timeout,
}

/// Final result shown once the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Winner(Side),
    Draw,
}

impl GameResult {
    /// Result decided by the sign of the rope position.
    pub fn from_rope(rope_position: i8) -> Self {
        match rope_position {
            p if p < 0 => GameResult::Winner(Side::Left),
            p if p > 0 => GameResult::Winner(Side::Right),
            _ => GameResult::Draw,
        }
    }

    pub fn for_end(reason: EndReason, rope_position: i8) -> Self {
        match reason {
            EndReason::RopeWin(side) => GameResult::Winner(side),
            EndReason::Finished | EndReason::Timeout => GameResult::from_rope(rope_position),
        }
    }
}

/// An addition problem `a + b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    pub a: u8,
    pub b: u8,
    pub answer: u8,
}

impl Question {
    /// Build a question, or `None` when the operands fall outside the game's range.
    pub fn new(a: u8, b: u8) -> Option<Self> {
        let sum = a.checked_add(b)?;
        if a > MAX_SUM || b > MAX_SUM || sum == 0 || sum > MAX_SUM {
            return None;
        }
        Some(Self { a, b, answer: sum })
    }

    pub fn is_valid(&self) -> bool {
        Question::new(self.a, self.b).is_some_and(|q| q.answer == self.answer)
    }
}
