//! Snake Arcade - a grid snake game with lives, obstacles and a duel mode
//!
//! This library provides:
//! - Core game logic: grid, snakes, food, obstacles, sessions (game module)
//! - Menu and screen flow as an explicit state machine (flow module)
//! - The persisted high-score table (scores module)
//! - Draw commands and terminal rendering (render module)
//! - Keyboard mapping (input module) and the interactive frame loop (modes module)

pub mod flow;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod scores;
