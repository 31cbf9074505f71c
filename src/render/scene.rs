//! Draw commands for one frame.
//!
//! A [`Scene`] is built from the flow controller without touching the
//! terminal, then handed to the [`Renderer`](super::Renderer).

use crate::flow::{FlowController, Screen};
use crate::game::{GameConfig, Obstacle, Position, SinglePlayerSession, Snake, TwoPlayerSession};

/// Fill colour of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    SnakeOne,
    SnakeTwo,
    Food,
    Obstacle,
}

/// One grid-aligned filled square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub position: Position,
    pub tint: Tint,
}

/// A line of text whose top edge is centred on `anchor` (pixel coordinates)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub size: u16,
    pub anchor: Position,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scene {
    pub cells: Vec<CellRect>,
    pub labels: Vec<Label>,
}

const TITLE: u16 = 40;
const ITEM: u16 = 30;
const HUD: u16 = 20;
const BANNER: u16 = 50;

impl Scene {
    pub fn from_flow(flow: &FlowController) -> Self {
        let config = flow.config();
        let mut scene = Scene::default();

        match flow.screen() {
            Screen::MainMenu => scene.menu(
                config,
                "Snake",
                &["1. Start Game", "2. Scores", "3. Two Players", "4. Exit"],
            ),
            Screen::LevelSelect => scene.menu(
                config,
                "Select Level",
                &["1. Easy", "2. Medium", "3. Hard", "4. Back"],
            ),
            Screen::SinglePlayer(session) => scene.single_player(config, session),
            Screen::TwoPlayer(session) => scene.two_player(config, session),
            Screen::HighScores => {
                scene.label("High Scores", TITLE, config.screen_width / 2, config.screen_height / 4);
                for (idx, record) in flow.high_scores().iter().enumerate() {
                    scene.label(
                        format!(
                            "{}. {} ({}) - {}s",
                            idx + 1,
                            record.score,
                            record.difficulty,
                            record.whole_secs()
                        ),
                        ITEM,
                        config.screen_width / 2,
                        config.screen_height / 4 + 40 + idx as i32 * 30,
                    );
                }
                scene.press_any_key(config, config.screen_height - 40);
            }
            Screen::GameOver(record) => {
                scene.label("Game Over", TITLE, config.screen_width / 2, config.screen_height / 4);
                scene.label(
                    format!("Score: {}", record.score),
                    ITEM,
                    config.screen_width / 2,
                    config.screen_height / 2 - 40,
                );
                scene.press_any_key(config, config.screen_height / 2);
            }
            Screen::GameOverTwoPlayer {
                score_one,
                score_two,
            } => {
                let (x, y) = (config.screen_width / 2, config.screen_height / 2);
                scene.label("Game Over", TITLE, x, config.screen_height / 4);
                scene.label(format!("Player 1 Score: {}", score_one), ITEM, x, y);
                scene.label(format!("Player 2 Score: {}", score_two), ITEM, x, y + 40);
                scene.press_any_key(config, y + 80);
            }
        }

        scene
    }

    fn label(&mut self, text: impl Into<String>, size: u16, x: i32, y: i32) {
        self.labels.push(Label {
            text: text.into(),
            size,
            anchor: Position::new(x, y),
        });
    }

    fn press_any_key(&mut self, config: &GameConfig, y: i32) {
        self.label("Press any key to return to menu", ITEM, config.screen_width / 2, y);
    }

    fn menu(&mut self, config: &GameConfig, title: &str, items: &[&str]) {
        let x = config.screen_width / 2;
        self.label(title, TITLE, x, config.screen_height / 4);
        for (idx, item) in items.iter().enumerate() {
            self.label(*item, ITEM, x, config.screen_height / 2 + idx as i32 * 40);
        }
    }

    fn snake(&mut self, snake: &Snake, tint: Tint) {
        self.cells.extend(
            snake
                .body
                .iter()
                .map(|&position| CellRect { position, tint }),
        );
    }

    fn board(&mut self, food: Position, obstacles: &[Obstacle]) {
        self.cells.push(CellRect {
            position: food,
            tint: Tint::Food,
        });
        self.cells.extend(obstacles.iter().map(|obstacle| CellRect {
            position: obstacle.position,
            tint: Tint::Obstacle,
        }));
    }

    fn pause_banner(&mut self, config: &GameConfig, paused: bool) {
        if paused {
            self.label("Paused", BANNER, config.screen_width / 2, config.screen_height / 2);
        }
    }

    fn single_player(&mut self, config: &GameConfig, session: &SinglePlayerSession) {
        self.snake(&session.snake, Tint::SnakeOne);
        self.board(session.food.position, &session.obstacles);

        let x = config.screen_width / 2;
        self.label(format!("Score: {}", session.score), HUD, x, 10);
        self.label(format!("Lives: {}", session.lives), HUD, x, 30);
        self.label(format!("Time: {}", session.timer.format_time()), HUD, x, 50);
        self.pause_banner(config, session.is_paused());
    }

    fn two_player(&mut self, config: &GameConfig, session: &TwoPlayerSession) {
        self.snake(&session.snake_one, Tint::SnakeOne);
        self.snake(&session.snake_two, Tint::SnakeTwo);
        self.board(session.food.position, &session.obstacles);

        self.label(
            format!("Player 1 Score: {}", session.score_one),
            HUD,
            config.screen_width / 4,
            10,
        );
        self.label(
            format!("Player 2 Score: {}", session.score_two),
            HUD,
            3 * config.screen_width / 4,
            10,
        );
        self.pause_banner(config, session.is_paused());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Difficulty, Input};
    use crate::scores::{ScoreRecord, ScoreStore};
    use std::time::Instant;

    fn flow_with(store: ScoreStore) -> FlowController {
        FlowController::seeded(GameConfig::default(), store, 3)
    }

    fn texts(scene: &Scene) -> Vec<&str> {
        scene.labels.iter().map(|label| label.text.as_str()).collect()
    }

    #[test]
    fn test_main_menu_labels() {
        let scene = Scene::from_flow(&flow_with(ScoreStore::new("unused.json")));

        assert!(scene.cells.is_empty());
        assert_eq!(
            texts(&scene),
            vec!["Snake", "1. Start Game", "2. Scores", "3. Two Players", "4. Exit"]
        );
        assert_eq!(scene.labels[0].anchor, Position::new(320, 120));
        assert_eq!(scene.labels[4].anchor, Position::new(320, 360));
    }

    #[test]
    fn test_session_cells_and_hud() {
        let mut flow = flow_with(ScoreStore::new("unused.json"));
        let now = Instant::now();
        flow.handle_frame(&[Input::Choice(1)], now).unwrap();
        flow.handle_frame(&[Input::Choice(2)], now).unwrap();

        let scene = Scene::from_flow(&flow);

        let snake = scene.cells.iter().filter(|c| c.tint == Tint::SnakeOne).count();
        let food = scene.cells.iter().filter(|c| c.tint == Tint::Food).count();
        let obstacles = scene.cells.iter().filter(|c| c.tint == Tint::Obstacle).count();
        assert_eq!(snake, 1);
        assert_eq!(food, 1);
        assert_eq!(obstacles, 5);

        let labels = texts(&scene);
        assert!(labels.contains(&"Score: 0"));
        assert!(labels.contains(&"Lives: 3"));
        assert!(labels.contains(&"Time: 0s"));
        assert!(!labels.contains(&"Paused"));
    }

    #[test]
    fn test_pause_banner() {
        let mut flow = flow_with(ScoreStore::new("unused.json"));
        let now = Instant::now();
        flow.handle_frame(&[Input::Choice(3)], now).unwrap();
        flow.handle_frame(&[Input::Pause], now).unwrap();

        let scene = Scene::from_flow(&flow);
        let labels = texts(&scene);
        assert!(labels.contains(&"Paused"));
        assert!(labels.contains(&"Player 1 Score: 0"));
        assert!(labels.contains(&"Player 2 Score: 0"));
    }

    #[test]
    fn test_high_score_rows() {
        let mut store = ScoreStore::new("unused.json");
        store.push(ScoreRecord::new(20, Difficulty::Easy, 31.9));
        store.push(ScoreRecord::new(90, Difficulty::Hard, 64.2));
        let mut flow = flow_with(store);
        flow.handle_frame(&[Input::Choice(2)], Instant::now()).unwrap();

        let scene = Scene::from_flow(&flow);

        assert_eq!(
            texts(&scene),
            vec![
                "High Scores",
                "1. 90 (Hard) - 64s",
                "2. 20 (Easy) - 31s",
                "Press any key to return to menu",
            ]
        );
    }
}
