/// Game configuration constants.
/// 
/// This module defines the main gameplay parameters such as the total game
/// duration, the number of questions, the rope range and the timer delays.
pub const GAME_DURATION_SECS: u32 = 300; // Total countdown for one game, in seconds.

/// Number of questions in one game's sequence.
pub const QUESTIONS_PER_GAME: usize = 10;

/// Largest operand and largest sum a question may use.
pub const MAX_SUM: u8 = 20;

/// Rope position at which a side wins outright (negative for left, positive for right).
pub const ROPE_LIMIT: i8 = 5;

/// Maximum number of digits an input buffer can hold.
pub const MAX_INPUT_DIGITS: usize = 2;

/// Delay (in milliseconds) during which a round result stays on screen.
pub const ROUND_RESULT_DELAY_MS: u64 = 1500;

/// Bot reaction delay range (in milliseconds), lower bound inclusive, upper bound exclusive.
pub const BOT_DELAY_MIN_MS: u64 = 3000;
pub const BOT_DELAY_MAX_MS: u64 = 7000;

/// Interval (in milliseconds) between two countdown ticks.
pub const TICK_INTERVAL_MS: u64 = 1000;
