//! Read-only view of a session for the presentation layer.
//!
//! Everything the screen needs is derived here so that the screen itself
//! holds no game rules: clock text, question counter, the final result and
//! the rope tally on the results screen.

use serde::{Serialize, Deserialize};

use crate::config::game::{GAME_DURATION_SECS, QUESTIONS_PER_GAME, ROPE_LIMIT};
use crate::game::state::GameState;
use crate::game::types::{EndReason, GameMode, GameResult, Phase, Side};

/// Operands on display. The answer never leaves the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    pub a: u8,
    pub b: u8,
}

/// Points shown for each side once the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RopeTally {
    pub left: u8,
    pub right: u8,
}

impl RopeTally {
    pub fn from_rope(rope_position: i8) -> Self {
        let base = ROPE_LIMIT.unsigned_abs();
        Self {
            left: base + rope_position.min(0).unsigned_abs(),
            right: base + rope_position.max(0).unsigned_abs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub mode: Option<GameMode>,
    pub question: Option<QuestionView>,
    /// 1-based.
    pub question_number: usize,
    pub question_total: usize,
    pub remaining_seconds: u32,
    pub clock: String,
    pub rope_position: i8,
    pub left_input: String,
    pub right_input: String,
    pub round_winner: Option<Side>,
    pub end_reason: Option<EndReason>,
    pub result: Option<GameResult>,
    pub tally: Option<RopeTally>,
    pub feedback: Option<String>,
    pub left_label: String,
    pub right_label: String,
}

impl GameSnapshot {
    /// Capture the session, or the menu when there is none.
    pub fn capture(session: Option<&GameState>) -> Self {
        let Some(s) = session else {
            return Self::menu();
        };
        let result = s.end_reason.map(|reason| GameResult::for_end(reason, s.rope_position));
        let (left_label, right_label) = side_labels(s.mode);
        GameSnapshot {
            phase: s.phase,
            mode: Some(s.mode),
            question: s.current_question().map(|q| QuestionView { a: q.a, b: q.b }),
            question_number: s.question_index + 1,
            question_total: s.question_count(),
            remaining_seconds: s.remaining_seconds,
            clock: format_clock(s.remaining_seconds),
            rope_position: s.rope_position,
            left_input: s.left_input.clone(),
            right_input: s.right_input.clone(),
            round_winner: s.round_winner,
            end_reason: s.end_reason,
            result,
            tally: result.map(|_| RopeTally::from_rope(s.rope_position)),
            feedback: s.feedback.clone(),
            left_label: left_label.to_string(),
            right_label: right_label.to_string(),
        }
    }

    fn menu() -> Self {
        GameSnapshot {
            phase: Phase::Menu,
            mode: None,
            question: None,
            question_number: 0,
            question_total: QUESTIONS_PER_GAME,
            remaining_seconds: GAME_DURATION_SECS,
            clock: format_clock(GAME_DURATION_SECS),
            rope_position: 0,
            left_input: String::new(),
            right_input: String::new(),
            round_winner: None,
            end_reason: None,
            result: None,
            tally: None,
            feedback: None,
            left_label: String::new(),
            right_label: String::new(),
        }
    }
}

/// `m:ss` countdown text.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn side_labels(mode: GameMode) -> (&'static str, &'static str) {
    match mode {
        GameMode::SinglePlayer => ("You (left team)", "Robot"),
        GameMode::TwoPlayer => ("Player 1 (left)", "Player 2 (right)"),
    }
}
