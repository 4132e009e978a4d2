use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};

use super::session::SessionHandle;
use crate::game::{GameConfig, GameEngine, GameState, GameStatus};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Palette, Renderer};

/// Keyboard-driven play in the terminal.
///
/// This loop only polls input and draws; the game itself runs on the
/// session's simulation task.
pub struct HumanMode {
    config: GameConfig,
    session: SessionHandle,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    session_live: bool,
    recorded_game_over: bool,
}

impl HumanMode {
    /// Start the first session. Needs a running tokio runtime.
    pub fn new(config: GameConfig, palette: Palette) -> Result<Self> {
        let session = SessionHandle::spawn(GameEngine::new(config.clone()))
            .context("Failed to start game session")?;

        Ok(Self {
            config,
            session,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(palette),
            input_handler: InputHandler::new(),
            should_quit: false,
            session_live: true,
            recorded_game_over: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

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
        self.draw(terminal)?;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event).await?,
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                    self.draw(terminal)?;
                }

                // A tick, pause or game over was published
                changed = self.session.snapshots().changed(), if self.session_live => {
                    if changed.is_err() {
                        // The simulation task is gone; a failure ends the program
                        self.session_live = false;
                        self.session.wait().await.context("Game session failed")?;
                    }
                    self.draw(terminal)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                self.session.cancel();
                break;
            }
        }

        Ok(())
    }

    async fn handle_event(&mut self, event: Event) -> Result<()> {
        let Event::Key(key) = event else {
            // Resizes and the like only need a redraw
            return Ok(());
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let over = self.session.snapshot().is_over();
        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) if !over => self.session.steer(direction),
            KeyAction::TogglePause if !over => self.session.toggle_pause().await,
            KeyAction::Restart if over => self.restart()?,
            KeyAction::Decline if over => self.should_quit = true,
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
            ignored => warn!("ignoring {:?} in current state", ignored),
        }

        Ok(())
    }

    /// Replace the ended session with a fresh one
    fn restart(&mut self) -> Result<()> {
        self.session.cancel();
        self.session = SessionHandle::spawn(GameEngine::new(self.config.clone()))
            .context("Failed to restart game session")?;
        self.metrics.on_game_start();
        self.session_live = true;
        self.recorded_game_over = false;
        info!("restarted session");
        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let state = self.session.snapshot();
        self.track_game_over(&state);
        if !state.is_over() {
            self.metrics.update();
        }

        terminal
            .draw(|frame| {
                self.renderer.render(frame, &state, &self.metrics);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn track_game_over(&mut self, state: &GameState) {
        if state.is_over() && !self.recorded_game_over {
            self.recorded_game_over = true;
            self.metrics
                .on_game_over(state.score(), state.status == GameStatus::Won);
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
