use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{Interval, MissedTickBehavior, interval};

use crate::flow::{Control, FlowController};
use crate::game::Input;
use crate::input::InputHandler;
use crate::render::{Renderer, Scene};

/// Period of one frame at `fps` frames per second
pub fn frame_period(fps: u32) -> Duration {
    Duration::from_secs(1) / fps.max(1)
}

/// Run terminal setup, calling `restore` if it fails part way
fn setup_or_restore<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    setup().map_err(|err| {
        restore();
        err
    })
}

fn enter_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Best-effort undo of raw mode and the alternate screen
fn restore_terminal_mode() {
    let mut stderr = stderr();
    if let Err(err) = execute!(stderr, LeaveAlternateScreen) {
        tracing::warn!(%err, "failed to leave alternate screen");
    }
    if let Err(err) = disable_raw_mode() {
        tracing::warn!(%err, "failed to disable raw mode");
    }
}

fn frame_timer(fps: u32) -> Interval {
    let mut timer = interval(frame_period(fps));
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

/// Interactive play in the terminal: one game tick per rendered frame
pub struct ArcadeMode {
    flow: FlowController,
    renderer: Renderer,
    input_handler: InputHandler,
    pending: Vec<Input>,
}

impl ArcadeMode {
    pub fn new(flow: FlowController) -> Self {
        let renderer = Renderer::new(flow.config());
        Self {
            flow,
            renderer,
            input_handler: InputHandler::new(),
            pending: Vec::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut terminal = setup_or_restore(enter_terminal, restore_terminal_mode)?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut fps = self.flow.frame_rate();
        let mut ticker = frame_timer(fps);

        loop {
            tokio::select! {
                // Collect key presses until the next frame
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.pending.push(Input::Quit),
                    }
                }

                // One frame: apply input, tick, draw
                _ = ticker.tick() => {
                    let inputs = std::mem::take(&mut self.pending);
                    if self.flow.handle_frame(&inputs, Instant::now())? == Control::Exit {
                        break;
                    }

                    let scene = Scene::from_flow(&self.flow);
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &scene);
                    }).context("Failed to draw frame")?;

                    let next_fps = self.flow.frame_rate();
                    if next_fps != fps {
                        tracing::debug!(fps = next_fps, "frame rate changed");
                        fps = next_fps;
                        ticker = frame_timer(fps);
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.pending.push(Input::Quit);
                }
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }
            self.pending.push(self.input_handler.handle_key_event(key));
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
