//! Round state machine.
//!
//! `Engine` owns at most one `GameState` and applies every event to it in
//! order: user intents, countdown ticks, bot answers and round advances. No
//! event touches the session unless the current phase accepts it, so the loser
//! of any race between timers and input is a no-op.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game::error::GameError;
use crate::game::questions::{QuestionSequence, QuestionSource, RandomQuestionBank};
use crate::game::snapshot::GameSnapshot;
use crate::game::state::GameState;
use crate::game::timing::{Directive, Generation, SessionTimings, Task, Ticket};
use crate::game::types::{EndReason, GameMode, Phase, Side};

/// What the value of a submission is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// Parse the submitting side's input buffer.
    Buffer,
    /// Use this value directly (bot).
    Value(u8),
}

/// Result of feeding one event to the engine.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed.
    Ignored,
    /// The session changed; the driver must carry out the directives in order.
    Applied(Vec<Directive>),
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied(_))
    }

    pub fn into_directives(self) -> Vec<Directive> {
        match self {
            Transition::Ignored => Vec::new(),
            Transition::Applied(directives) => directives,
        }
    }
}

pub struct Engine {
    source: Box<dyn QuestionSource>,
    rng: StdRng,
    timings: SessionTimings,
    generation: Generation,
    session: Option<GameState>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Box::new(RandomQuestionBank::new()), SessionTimings::default())
    }
}

impl Engine {
    pub fn new(source: Box<dyn QuestionSource>, timings: SessionTimings) -> Self {
        Self::with_rng(source, timings, StdRng::from_os_rng())
    }

    /// Engine whose bot delays are reproducible.
    pub fn with_seed(source: Box<dyn QuestionSource>, timings: SessionTimings, seed: u64) -> Self {
        Self::with_rng(source, timings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(source: Box<dyn QuestionSource>, timings: SessionTimings, rng: StdRng) -> Self {
        Self {
            source,
            rng,
            timings,
            generation: 0,
            session: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.session.as_ref().map_or(Phase::Menu, |s| s.phase)
    }

    pub fn session(&self) -> Option<&GameState> {
        self.session.as_ref()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self.session.as_ref())
    }

    /// Leave the menu with a freshly generated question sequence.
    ///
    /// Ignored outside the menu. Fails without creating a session when the
    /// question source hands back a malformed sequence.
    pub fn start_game(&mut self, mode: GameMode) -> Result<Transition, GameError> {
        if self.session.is_some() {
            return Ok(Transition::Ignored);
        }
        let questions = QuestionSequence::validate(self.source.generate_sequence())?;
        self.session = Some(GameState::new(mode, questions));
        info!("[Engine] Game started: mode={:?} generation={}", mode, self.generation + 1);
        Ok(Transition::Applied(self.enter_playing()))
    }

    /// Discard the session and cancel every timer it owns.
    pub fn return_to_menu(&mut self) -> Transition {
        let Some(session) = self.session.take() else {
            return Transition::Ignored;
        };
        self.generation += 1;
        info!(
            "[Engine] Back to menu from {:?} (question {}, rope {})",
            session.phase,
            session.question_index + 1,
            session.rope_position
        );
        Transition::Applied(vec![Directive::StopCountdown, Directive::CancelPending])
    }

    pub fn press_digit(&mut self, side: Side, digit: u8) -> Transition {
        if self.human_turn(side).is_some_and(|session| session.push_digit(side, digit)) {
            Transition::Applied(Vec::new())
        } else {
            Transition::Ignored
        }
    }

    pub fn clear_input(&mut self, side: Side) -> Transition {
        match self.human_turn(side) {
            Some(session) if !session.input(side).is_empty() => {
                session.clear_input(side);
                Transition::Applied(Vec::new())
            }
            _ => Transition::Ignored,
        }
    }

    /// Submit the side's typed answer on behalf of a human player.
    pub fn submit_input(&mut self, side: Side) -> Transition {
        if self.human_turn(side).is_none() {
            return Transition::Ignored;
        }
        self.submit_answer(side, Answer::Buffer)
    }

    /// Check an answer for the current question.
    pub fn submit_answer(&mut self, side: Side, answer: Answer) -> Transition {
        let round_result_delay = self.timings.round_result_delay;
        let Some(session) = self.session.as_mut().filter(|s| s.phase == Phase::Playing) else {
            debug!("[Engine] Answer from {:?} outside of play, ignored", side);
            return Transition::Ignored;
        };
        let value = match answer {
            Answer::Buffer => session.parse_input(side),
            Answer::Value(value) => Some(value),
        };
        let (Some(value), Some(question)) = (value, session.current_question()) else {
            return Transition::Ignored;
        };

        if value != question.answer {
            session.clear_input(side);
            return Transition::Applied(Vec::new());
        }

        let rope_at_check = session.record_correct(side);
        session.phase = Phase::RoundResult;
        self.generation += 1;
        debug!(
            "[Engine] Round {} won by {:?}, rope={}",
            session.question_index + 1,
            side,
            rope_at_check
        );
        Transition::Applied(vec![
            Directive::StopCountdown,
            Directive::CancelPending,
            Directive::Schedule {
                ticket: Ticket { generation: self.generation, task: Task::AdvanceRound { rope_at_check } },
                delay: round_result_delay,
            },
        ])
    }

    /// Close the round on display: end the game or move to the next question.
    pub fn advance_round(&mut self, rope_at_check: i8) -> Transition {
        let Some(session) = self.session.as_mut().filter(|s| s.phase == Phase::RoundResult) else {
            return Transition::Ignored;
        };
        match session.arbitrate(rope_at_check) {
            Some(reason) => self.end_game(reason),
            None => {
                session.next_question();
                Transition::Applied(self.enter_playing())
            }
        }
    }

    /// One second of the countdown.
    pub fn tick(&mut self) -> Transition {
        let Some(session) = self.session.as_mut().filter(|s| s.phase == Phase::Playing) else {
            return Transition::Ignored;
        };
        session.remaining_seconds = session.remaining_seconds.saturating_sub(1);
        if session.remaining_seconds == 0 {
            return self.end_game(EndReason::Timeout);
        }
        Transition::Applied(Vec::new())
    }

    /// Run a timer callback. Tickets from an earlier generation are dropped.
    pub fn fire(&mut self, ticket: Ticket) -> Transition {
        if ticket.generation != self.generation {
            debug!(
                "[Engine] Stale {:?} from generation {} dropped (current {})",
                ticket.task, ticket.generation, self.generation
            );
            return Transition::Ignored;
        }
        match ticket.task {
            Task::CountdownTick => self.tick(),
            Task::BotAnswer => {
                let answer = self
                    .session
                    .as_ref()
                    .filter(|s| s.mode == GameMode::SinglePlayer)
                    .and_then(|s| s.current_question())
                    .map(|q| q.answer);
                match answer {
                    Some(answer) => self.submit_answer(Side::Right, Answer::Value(answer)),
                    None => Transition::Ignored,
                }
            }
            Task::AdvanceRound { rope_at_check } => self.advance_round(rope_at_check),
        }
    }

    fn human_turn(&mut self, side: Side) -> Option<&mut GameState> {
        self.session
            .as_mut()
            .filter(|s| s.phase == Phase::Playing && s.is_human(side))
    }

    fn enter_playing(&mut self) -> Vec<Directive> {
        self.generation += 1;
        let generation = self.generation;
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        session.phase = Phase::Playing;

        let mut directives = vec![Directive::StartCountdown {
            ticket: Ticket { generation, task: Task::CountdownTick },
            interval: self.timings.tick_interval,
        }];
        if session.mode == GameMode::SinglePlayer {
            let range = self.timings.bot_delay_ms.clone();
            let delay_ms = if range.is_empty() { range.start } else { self.rng.random_range(range) };
            directives.push(Directive::Schedule {
                ticket: Ticket { generation, task: Task::BotAnswer },
                delay: std::time::Duration::from_millis(delay_ms),
            });
        }
        directives
    }

    fn end_game(&mut self, reason: EndReason) -> Transition {
        let Some(session) = self.session.as_mut() else {
            return Transition::Ignored;
        };
        session.finish(reason);
        self.generation += 1;
        info!(
            "[Engine] Game over: reason={:?} rope={} question={} remaining={}s",
            reason,
            session.rope_position,
            session.question_index + 1,
            session.remaining_seconds
        );
        Transition::Applied(vec![Directive::StopCountdown, Directive::CancelPending])
    }
}
