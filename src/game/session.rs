use rand::rngs::StdRng;
use std::time::{Duration, Instant};

use super::{
    action::{Direction, Input, Player},
    config::{Difficulty, GameConfig},
    grid::Grid,
    items::{Food, Obstacle},
    state::{CollisionType, Position, Snake},
};
use crate::metrics::SessionTimer;
use crate::scores::ScoreRecord;

/// What happened to one snake during a tick
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Collision that was registered, if any
    pub collision_type: Option<CollisionType>,
}

impl StepInfo {
    fn idle() -> Self {
        Self {
            ate_food: false,
            collision_type: None,
        }
    }
}

/// Where a single-player session stands after a tick
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Running,
    /// A life was lost and the snake was sent back to the start
    LifeLost,
    /// Last life lost; carries the record to persist
    GameOver(ScoreRecord),
}

/// Result of a single-player tick
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub outcome: StepOutcome,
    pub info: StepInfo,
}

/// Collision checks shared by both session kinds
fn check_collision(snake: &Snake, grid: &Grid, obstacles: &[Obstacle]) -> Option<CollisionType> {
    if snake.head_collides_with_wall(grid) {
        return Some(CollisionType::Wall);
    }
    if snake.head_collides_with_body() {
        return Some(CollisionType::SelfCollision);
    }
    if obstacles
        .iter()
        .any(|obstacle| snake.head_collides_with(obstacle.position))
    {
        return Some(CollisionType::Obstacle);
    }
    None
}

fn spawn_obstacles(grid: &Grid, count: usize, rng: &mut StdRng) -> Vec<Obstacle> {
    (0..count).map(|_| Obstacle::spawn(grid, rng)).collect()
}

/// One single-player game, from start until the last life is lost
#[derive(Debug, Clone)]
pub struct SinglePlayerSession {
    pub config: GameConfig,
    pub grid: Grid,
    pub difficulty: Difficulty,
    pub snake: Snake,
    pub food: Food,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub lives: u32,
    pub paused: bool,
    pub timer: SessionTimer,
    pub is_over: bool,
    rng: StdRng,
}

impl SinglePlayerSession {
    pub fn new(config: GameConfig, difficulty: Difficulty, mut rng: StdRng, now: Instant) -> Self {
        let grid = config.grid();
        let snake = Snake::spawn(grid.center(), &mut rng);
        let food = Food::spawn(&grid, &mut rng);
        let obstacles = spawn_obstacles(&grid, difficulty.obstacle_count(&config), &mut rng);
        let lives = config.starting_lives;

        tracing::info!(%difficulty, obstacles = obstacles.len(), "single-player session started");

        Self {
            config,
            grid,
            difficulty,
            snake,
            food,
            obstacles,
            score: 0,
            lives,
            paused: false,
            timer: SessionTimer::new(now),
            is_over: false,
            rng,
        }
    }

    pub fn steer(&mut self, direction: Direction) {
        self.snake.set_direction(direction);
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Apply one input symbol. Only the arrow-key player steers here.
    pub fn apply(&mut self, input: Input) {
        match input {
            Input::Pause => self.toggle_pause(),
            Input::Steer(Player::One, direction) => self.steer(direction),
            _ => {}
        }
    }

    /// Elapsed time as last computed; frozen while paused
    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed_time
    }

    pub fn frame_rate(&self) -> u32 {
        self.config.frame_rate(self.difficulty)
    }

    /// Advance the session by one tick
    pub fn step(&mut self, now: Instant) -> StepResult {
        if self.is_over || self.paused {
            return StepResult {
                outcome: StepOutcome::Running,
                info: StepInfo::idle(),
            };
        }

        self.timer.update(now);
        self.snake.advance(&self.grid, &mut self.rng);

        let ate_food = self.snake.head_collides_with(self.food.position);
        if ate_food {
            self.score += self.config.food_reward;
            self.snake.grow();
            self.food.randomize_position(&self.grid, &mut self.rng);
        }

        let collision_type = check_collision(&self.snake, &self.grid, &self.obstacles);
        let info = StepInfo {
            ate_food,
            collision_type,
        };

        let Some(collision) = collision_type else {
            return StepResult {
                outcome: StepOutcome::Running,
                info,
            };
        };

        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.is_over = true;
            let record = ScoreRecord::new(self.score, self.difficulty, self.timer.elapsed_secs());
            tracing::info!(
                score = record.score,
                difficulty = %record.difficulty,
                elapsed_secs = record.elapsed_secs,
                ?collision,
                "single-player game over"
            );
            return StepResult {
                outcome: StepOutcome::GameOver(record),
                info,
            };
        }

        tracing::debug!(lives = self.lives, ?collision, "life lost");
        self.snake.reset(&self.grid, &mut self.rng);
        StepResult {
            outcome: StepOutcome::LifeLost,
            info,
        }
    }
}

/// Result of a two-player tick
#[derive(Debug, Clone, PartialEq)]
pub struct DuelStepResult {
    pub player_one: StepInfo,
    pub player_two: StepInfo,
    /// Whether either collision ended the session
    pub terminated: bool,
}

/// Head-to-head session on one keyboard. No lives, nothing persisted.
#[derive(Debug, Clone)]
pub struct TwoPlayerSession {
    pub config: GameConfig,
    pub grid: Grid,
    pub snake_one: Snake,
    pub snake_two: Snake,
    pub food: Food,
    pub obstacles: Vec<Obstacle>,
    pub score_one: u32,
    pub score_two: u32,
    pub paused: bool,
    pub is_over: bool,
    rng: StdRng,
}

impl TwoPlayerSession {
    /// Tick-rate tier used for the duel
    pub const PACE: Difficulty = Difficulty::Medium;

    pub fn new(config: GameConfig, mut rng: StdRng) -> Self {
        let grid = config.grid();
        let row = grid.height / 2;
        let snake_one = Snake::spawn(Position::new(grid.width / 4, row), &mut rng);
        let snake_two = Snake::spawn(Position::new(3 * grid.width / 4, row), &mut rng);
        let food = Food::spawn(&grid, &mut rng);
        let obstacles = spawn_obstacles(&grid, config.obstacle_count, &mut rng);

        tracing::info!(obstacles = obstacles.len(), "two-player session started");

        Self {
            config,
            grid,
            snake_one,
            snake_two,
            food,
            obstacles,
            score_one: 0,
            score_two: 0,
            paused: false,
            is_over: false,
            rng,
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn apply(&mut self, input: Input) {
        match input {
            Input::Pause => self.toggle_pause(),
            Input::Steer(Player::One, direction) => self.snake_one.set_direction(direction),
            Input::Steer(Player::Two, direction) => self.snake_two.set_direction(direction),
            _ => {}
        }
    }

    pub fn frame_rate(&self) -> u32 {
        self.config.frame_rate(Self::PACE)
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.score_one, self.score_two)
    }

    /// Advance both snakes by one tick.
    ///
    /// Player one is resolved completely before player two, so if both heads
    /// sit on the food only player one is guaranteed the points; player two
    /// scores only if the re-rolled food lands under its head as well.
    pub fn step(&mut self) -> DuelStepResult {
        if self.is_over || self.paused {
            return DuelStepResult {
                player_one: StepInfo::idle(),
                player_two: StepInfo::idle(),
                terminated: false,
            };
        }

        self.snake_one.advance(&self.grid, &mut self.rng);
        self.snake_two.advance(&self.grid, &mut self.rng);

        let one_ate = self.eat(true);
        let two_ate = self.eat(false);

        // Only player one loses on a shared head cell.
        let one_collision = check_collision(&self.snake_one, &self.grid, &self.obstacles).or(
            (self.snake_one.head() == self.snake_two.head()).then_some(CollisionType::HeadToHead),
        );
        let two_collision = check_collision(&self.snake_two, &self.grid, &self.obstacles);

        let terminated = one_collision.is_some() || two_collision.is_some();
        if terminated {
            self.is_over = true;
            tracing::info!(
                score_one = self.score_one,
                score_two = self.score_two,
                ?one_collision,
                ?two_collision,
                "two-player game over"
            );
        }

        DuelStepResult {
            player_one: StepInfo {
                ate_food: one_ate,
                collision_type: one_collision,
            },
            player_two: StepInfo {
                ate_food: two_ate,
                collision_type: two_collision,
            },
            terminated,
        }
    }

    fn eat(&mut self, player_one: bool) -> bool {
        let (snake, score) = if player_one {
            (&mut self.snake_one, &mut self.score_one)
        } else {
            (&mut self.snake_two, &mut self.score_two)
        };

        if !snake.head_collides_with(self.food.position) {
            return false;
        }

        *score += self.config.food_reward;
        snake.grow();
        self.food.randomize_position(&self.grid, &mut self.rng);
        true
    }
}
