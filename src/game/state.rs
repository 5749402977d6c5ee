use crate::config::game::{GAME_DURATION_SECS, MAX_INPUT_DIGITS, ROPE_LIMIT};
use crate::game::questions::QuestionSequence;
use crate::game::types::{EndReason, GameMode, Phase, Question, Side};

/// One game, from mode selection to game over.
#[derive(Debug, Clone)]
pub struct GameState {
    pub mode: GameMode,
    pub phase: Phase,
    pub question_index: usize,
    pub remaining_seconds: u32,
    pub rope_position: i8,
    pub left_input: String,
    pub right_input: String,
    /// Side that won the round on display. Only set during `RoundResult`.
    pub round_winner: Option<Side>,
    /// Only set during `GameOver`.
    pub end_reason: Option<EndReason>,
    pub feedback: Option<String>,
    questions: QuestionSequence,
}

impl GameState {
    // Creates a fresh session with every counter reset
    pub fn new(mode: GameMode, questions: QuestionSequence) -> Self {
        GameState {
            mode,
            phase: Phase::Playing,
            question_index: 0,
            remaining_seconds: GAME_DURATION_SECS,
            rope_position: 0,
            left_input: String::new(),
            right_input: String::new(),
            round_winner: None,
            end_reason: None,
            feedback: None,
            questions,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.question_index)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Whether a human controls this side. The right side belongs to the bot in single-player.
    pub fn is_human(&self, side: Side) -> bool {
        !(self.mode == GameMode::SinglePlayer && side == Side::Right)
    }

    pub fn input(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left_input,
            Side::Right => &self.right_input,
        }
    }

    fn input_mut(&mut self, side: Side) -> &mut String {
        match side {
            Side::Left => &mut self.left_input,
            Side::Right => &mut self.right_input,
        }
    }

    /// Append a digit if the buffer has room. Returns whether the buffer changed.
    pub fn push_digit(&mut self, side: Side, digit: u8) -> bool {
        let Some(c) = char::from_digit(u32::from(digit), 10) else {
            return false;
        };
        let input = self.input_mut(side);
        if input.len() >= MAX_INPUT_DIGITS {
            return false;
        }
        input.push(c);
        true
    }

    pub fn clear_input(&mut self, side: Side) {
        self.input_mut(side).clear();
    }

    /// Numeric value of a side's buffer, `None` when empty.
    pub fn parse_input(&self, side: Side) -> Option<u8> {
        self.input(side).parse().ok()
    }

    /// Pull the rope one step toward `side` and return the new position.
    pub fn record_correct(&mut self, side: Side) -> i8 {
        self.rope_position = (self.rope_position + side.pull()).clamp(-ROPE_LIMIT, ROPE_LIMIT);
        self.round_winner = Some(side);
        self.feedback = Some(format!("{} is correct!", self.team_name(side)));
        self.rope_position
    }

    pub fn team_name(&self, side: Side) -> &'static str {
        match (side, self.mode) {
            (Side::Left, _) => "Left team",
            (Side::Right, GameMode::SinglePlayer) => "Robot",
            (Side::Right, GameMode::TwoPlayer) => "Right team",
        }
    }

    /// Decide whether the round that just ended finishes the game.
    /// Rope thresholds win over sequence exhaustion.
    pub fn arbitrate(&self, rope_at_check: i8) -> Option<EndReason> {
        if rope_at_check <= -ROPE_LIMIT {
            Some(EndReason::RopeWin(Side::Left))
        } else if rope_at_check >= ROPE_LIMIT {
            Some(EndReason::RopeWin(Side::Right))
        } else if self.questions.is_last(self.question_index) {
            Some(EndReason::Finished)
        } else {
            None
        }
    }

    pub fn next_question(&mut self) {
        self.question_index += 1;
        self.left_input.clear();
        self.right_input.clear();
        self.round_winner = None;
        self.feedback = None;
    }

    pub fn finish(&mut self, reason: EndReason) {
        self.phase = Phase::GameOver;
        self.end_reason = Some(reason);
        self.round_winner = None;
        self.feedback = None;
    }
}
