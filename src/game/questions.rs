//! Question source.
//!
//! The engine asks a `QuestionSource` for a fresh sequence at the start of
//! every game and validates it before the session is created.

use rand::rngs::StdRng;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::SeedableRng;

use crate::config::game::{MAX_SUM, QUESTIONS_PER_GAME};
use crate::game::error::GameError;
use crate::game::types::Question;

/// Supplies the ordered questions for one game.
pub trait QuestionSource: Send {
    fn generate_sequence(&mut self) -> Vec<Question>;
}

/// Every valid question: all pairs with `0 <= a,b <= 20` and `0 < a+b <= 20`.
pub fn question_universe() -> impl Iterator<Item = Question> {
    (0..=MAX_SUM).flat_map(|a| (0..=MAX_SUM).filter_map(move |b| Question::new(a, b)))
}

/// Samples distinct pairs uniformly, without replacement.
pub struct RandomQuestionBank {
    rng: StdRng,
}

impl RandomQuestionBank {
    pub fn new() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomQuestionBank {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionSource for RandomQuestionBank {
    fn generate_sequence(&mut self) -> Vec<Question> {
        let mut picked = question_universe().choose_multiple(&mut self.rng, QUESTIONS_PER_GAME);
        // choose_multiple keeps the universe's order for part of the buffer.
        picked.shuffle(&mut self.rng);
        picked
    }
}

/// Replays a fixed list of questions. Handy for scripted sessions.
#[derive(Debug, Clone)]
pub struct FixedQuestions(pub Vec<Question>);

impl QuestionSource for FixedQuestions {
    fn generate_sequence(&mut self) -> Vec<Question> {
        self.0.clone()
    }
}

/// Validated questions for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSequence(Vec<Question>);

impl QuestionSequence {
    /// Check the source output: exactly `QUESTIONS_PER_GAME` well-formed questions.
    pub fn validate(questions: Vec<Question>) -> Result<Self, GameError> {
        if questions.len() != QUESTIONS_PER_GAME {
            return Err(GameError::WrongQuestionCount {
                expected: QUESTIONS_PER_GAME,
                actual: questions.len(),
            });
        }
        if let Some((index, question)) = questions.iter().enumerate().find(|(_, q)| !q.is_valid()) {
            return Err(GameError::MalformedQuestion { index, question: *question });
        }
        Ok(Self(questions))
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.0.len()
    }
}
