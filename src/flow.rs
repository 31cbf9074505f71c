//! Menu and screen flow
//!
//! The controller is a plain state machine: each input is matched against
//! the current [`Screen`] to produce an optional [`Route`], and the route is
//! applied by replacing the screen. Nothing recurses, so arbitrarily long
//! play keeps a flat call stack.

use anyhow::Result;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::time::Instant;

use crate::game::{
    Difficulty, GameConfig, Input, SinglePlayerSession, StepOutcome, TwoPlayerSession,
};
use crate::scores::{ScoreRecord, ScoreStore};

/// Screen currently shown
#[derive(Debug, Clone)]
pub enum Screen {
    MainMenu,
    LevelSelect,
    SinglePlayer(SinglePlayerSession),
    TwoPlayer(TwoPlayerSession),
    HighScores,
    GameOver(ScoreRecord),
    GameOverTwoPlayer { score_one: u32, score_two: u32 },
}

/// Target of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    MainMenu,
    /// Back to the main menu with the in-memory score list emptied
    MainMenuDiscardingScores,
    LevelSelect,
    SinglePlayer(Difficulty),
    TwoPlayer,
    HighScores,
    Exit,
}

/// What the frame loop should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

pub struct FlowController {
    config: GameConfig,
    screen: Screen,
    scores: ScoreStore,
    rng: StdRng,
}

impl FlowController {
    pub fn new(config: GameConfig, scores: ScoreStore, rng: StdRng) -> Self {
        Self {
            config,
            screen: Screen::MainMenu,
            scores,
            rng,
        }
    }

    /// Controller with a reproducible random sequence
    pub fn seeded(config: GameConfig, scores: ScoreStore, seed: u64) -> Self {
        Self::new(config, scores, StdRng::seed_from_u64(seed))
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scores(&self) -> &ScoreStore {
        &self.scores
    }

    /// Rows for the high-score screen
    pub fn high_scores(&self) -> Vec<&ScoreRecord> {
        self.scores.top(self.config.high_score_rows)
    }

    /// Frames per second the loop should run at for the current screen
    pub fn frame_rate(&self) -> u32 {
        match &self.screen {
            Screen::SinglePlayer(session) => session.frame_rate(),
            Screen::TwoPlayer(session) => session.frame_rate(),
            _ => self.config.base_fps,
        }
    }

    /// Process one frame: apply the polled inputs in arrival order, then
    /// advance the active session by one tick.
    ///
    /// An input that changes the screen ends the frame there: the rest of
    /// the batch is discarded and a freshly entered session first moves on
    /// the following frame.
    pub fn handle_frame(&mut self, inputs: &[Input], now: Instant) -> Result<Control> {
        for &input in inputs {
            if let Some(route) = self.route_for(input) {
                return self.enter(route, now);
            }
        }

        self.tick(now)?;
        Ok(Control::Continue)
    }

    fn route_for(&mut self, input: Input) -> Option<Route> {
        if input == Input::Quit {
            return Some(Route::Exit);
        }

        match &mut self.screen {
            Screen::MainMenu => match input {
                Input::Choice(1) => Some(Route::LevelSelect),
                Input::Choice(2) => Some(Route::HighScores),
                Input::Choice(3) => Some(Route::TwoPlayer),
                Input::Choice(4) => Some(Route::Exit),
                _ => None,
            },
            Screen::LevelSelect => match input {
                Input::Choice(1) => Some(Route::SinglePlayer(Difficulty::Easy)),
                Input::Choice(2) => Some(Route::SinglePlayer(Difficulty::Medium)),
                Input::Choice(3) => Some(Route::SinglePlayer(Difficulty::Hard)),
                Input::Choice(4) => Some(Route::MainMenu),
                _ => None,
            },
            Screen::SinglePlayer(session) => {
                session.apply(input);
                None
            }
            Screen::TwoPlayer(session) => {
                session.apply(input);
                None
            }
            Screen::HighScores | Screen::GameOver(_) => Some(Route::MainMenu),
            Screen::GameOverTwoPlayer { .. } => Some(Route::MainMenuDiscardingScores),
        }
    }

    fn enter(&mut self, route: Route, now: Instant) -> Result<Control> {
        tracing::debug!(?route, "screen transition");

        self.screen = match route {
            Route::MainMenu => Screen::MainMenu,
            Route::MainMenuDiscardingScores => {
                tracing::info!(discarded = self.scores.len(), "score list cleared after two-player game");
                self.scores.clear();
                Screen::MainMenu
            }
            Route::LevelSelect => Screen::LevelSelect,
            Route::HighScores => Screen::HighScores,
            Route::SinglePlayer(difficulty) => Screen::SinglePlayer(SinglePlayerSession::new(
                self.config.clone(),
                difficulty,
                self.session_rng(),
                now,
            )),
            Route::TwoPlayer => {
                Screen::TwoPlayer(TwoPlayerSession::new(self.config.clone(), self.session_rng()))
            }
            Route::Exit => {
                self.scores.save()?;
                return Ok(Control::Exit);
            }
        };

        Ok(Control::Continue)
    }

    fn session_rng(&mut self) -> StdRng {
        StdRng::seed_from_u64(self.rng.gen())
    }

    fn tick(&mut self, now: Instant) -> Result<()> {
        let next = match &mut self.screen {
            Screen::SinglePlayer(session) => match session.step(now).outcome {
                StepOutcome::GameOver(record) => {
                    self.scores.push(record.clone());
                    self.scores.save()?;
                    Some(Screen::GameOver(record))
                }
                StepOutcome::Running | StepOutcome::LifeLost => None,
            },
            Screen::TwoPlayer(session) => {
                if session.step().terminated {
                    let (score_one, score_two) = session.scores();
                    Some(Screen::GameOverTwoPlayer {
                        score_one,
                        score_two,
                    })
                } else {
                    None
                }
            }
            _ => None,
        };

        if let Some(screen) = next {
            self.screen = screen;
        }
        Ok(())
    }
}
