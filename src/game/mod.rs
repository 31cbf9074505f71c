//! Core game logic module for Snake
//!
//! Grid geometry, entities and sessions, without any I/O or rendering
//! dependencies. Sessions are advanced one tick at a time by the caller.

pub mod action;
pub mod config;
pub mod grid;
pub mod items;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Input, Player};
pub use config::{Difficulty, GameConfig};
pub use grid::Grid;
pub use items::{Food, Obstacle};
pub use session::{
    DuelStepResult, SinglePlayerSession, StepInfo, StepOutcome, StepResult, TwoPlayerSession,
};
pub use state::{CollisionType, Position, Snake};
