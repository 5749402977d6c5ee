//! Timer model shared by the engine and its driver.
//!
//! The engine never sleeps. It emits `Directive`s that the driver turns into
//! real timers, and every deferred callback comes back as a `Ticket` stamped
//! with the generation that scheduled it. A ticket from an older generation is
//! stale and the engine drops it.

use std::ops::Range;
use std::time::Duration;

use crate::config::game::{
    BOT_DELAY_MAX_MS, BOT_DELAY_MIN_MS, ROUND_RESULT_DELAY_MS, TICK_INTERVAL_MS,
};

/// Identifies one phase instance. Bumped on every transition and reset.
pub type Generation = u64;

/// Work deferred until a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// One elapsed second of the countdown.
    CountdownTick,
    /// The bot submits the correct answer.
    BotAnswer,
    /// Leave the round result, carrying the rope position to arbitrate on.
    AdvanceRound { rope_at_check: i8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub generation: Generation,
    pub task: Task,
}

/// Instruction for whoever owns the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Fire `ticket` every `interval` until stopped.
    StartCountdown { ticket: Ticket, interval: Duration },
    StopCountdown,
    /// Fire `ticket` once after `delay`.
    Schedule { ticket: Ticket, delay: Duration },
    /// Drop every pending one-shot task.
    CancelPending,
}

/// Durations used by a session. Defaults come from `config::game`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTimings {
    pub tick_interval: Duration,
    pub round_result_delay: Duration,
    /// Bot delay in milliseconds, end exclusive.
    pub bot_delay_ms: Range<u64>,
}

impl Default for SessionTimings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            round_result_delay: Duration::from_millis(ROUND_RESULT_DELAY_MS),
            bot_delay_ms: BOT_DELAY_MIN_MS..BOT_DELAY_MAX_MS,
        }
    }
}
