/// Main configuration module.
/// 
/// Re-exports submodules for gameplay, presentation-bridge and anti-spam configuration.
pub mod game;
pub mod server;
pub mod anti_spam;
