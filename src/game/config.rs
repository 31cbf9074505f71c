use std::fmt;

use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// Fixed game constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side of one grid cell, in pixels
    pub cell_size: i32,
    /// Playfield width in pixels
    pub screen_width: i32,
    /// Playfield height in pixels
    pub screen_height: i32,
    /// Frames (and ticks) per second before the difficulty bonus
    pub base_fps: u32,
    /// Points for one piece of food
    pub food_reward: u32,
    /// Lives at the start of a single-player session
    pub starting_lives: u32,
    /// Obstacles on Medium, Hard and in two-player sessions
    pub obstacle_count: usize,
    /// Rows on the high-score screen
    pub high_score_rows: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: 20,
            screen_width: 640,
            screen_height: 480,
            base_fps: 10,
            food_reward: 10,
            starting_lives: 3,
            obstacle_count: 5,
            high_score_rows: 10,
        }
    }
}

impl GameConfig {
    pub fn grid(&self) -> Grid {
        Grid::new(self.cell_size, self.screen_width, self.screen_height)
    }

    /// Tick rate for a session played at `difficulty`
    pub fn frame_rate(&self, difficulty: Difficulty) -> u32 {
        self.base_fps + difficulty.speed_bonus()
    }
}

/// Single-player difficulty.
///
/// The variant names are written verbatim into the score file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Extra frames per second on top of the base rate
    pub fn speed_bonus(&self) -> u32 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 5,
            Difficulty::Hard => 10,
        }
    }

    pub fn obstacle_count(&self, config: &GameConfig) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium | Difficulty::Hard => config.obstacle_count,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        let grid = config.grid();
        assert_eq!(grid.columns(), 32);
        assert_eq!(grid.rows(), 24);
        assert_eq!(config.starting_lives, 3);
        assert_eq!(config.food_reward, 10);
    }

    #[test]
    fn test_frame_rate_per_difficulty() {
        let config = GameConfig::default();
        assert_eq!(config.frame_rate(Difficulty::Easy), 10);
        assert_eq!(config.frame_rate(Difficulty::Medium), 15);
        assert_eq!(config.frame_rate(Difficulty::Hard), 20);
    }

    #[test]
    fn test_obstacle_count_per_difficulty() {
        let config = GameConfig::default();
        assert_eq!(Difficulty::Easy.obstacle_count(&config), 0);
        assert_eq!(Difficulty::Medium.obstacle_count(&config), 5);
        assert_eq!(Difficulty::Hard.obstacle_count(&config), 5);
    }

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(Difficulty::Easy.to_string(), "Easy");
        assert_eq!(Difficulty::Medium.to_string(), "Medium");
        assert_eq!(Difficulty::Hard.to_string(), "Hard");
        assert_eq!(serde_json::to_string(&Difficulty::Medium).unwrap(), "\"Medium\"");
    }
}
