use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::palette::Palette;
use crate::game::{GameState, GameStatus, Position};
use crate::metrics::GameMetrics;

pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Redraw the whole screen from a completed-tick snapshot
    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        let board_area = centered_rect(
            (state.grid_width * 2 + 2) as u16,
            (state.grid_height + 2) as u16,
            chunks[1],
        );
        frame.render_widget(self.render_board(state), board_area);

        let screen = frame.area();
        match state.status {
            GameStatus::Paused => self.render_overlay(frame, screen, self.pause_lines()),
            GameStatus::Won | GameStatus::Lost => {
                self.render_overlay(frame, screen, self.game_over_lines(state))
            }
            GameStatus::Running => {}
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_board(&self, state: &GameState) -> Paragraph<'_> {
        let head = state.snail.head();
        let mut lines = Vec::with_capacity(state.grid_height);

        for y in 0..state.grid_height {
            let spans: Vec<Span> = (0..state.grid_width)
                .map(|x| {
                    let pos = Position::new(x as i32, y as i32);
                    if pos == head {
                        Span::styled("■ ", self.palette.snail_head)
                    } else if state.snail.occupies(pos) {
                        Span::styled("□ ", self.palette.snail_body)
                    } else if pos == state.food {
                        Span::styled("● ", self.palette.food)
                    } else {
                        Span::styled("· ", self.palette.empty)
                    }
                })
                .collect();

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(self.palette.wall)
                .title(" Snail "),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let stat = |label: &'static str, value: String| {
            [
                Span::styled(label, self.palette.label),
                Span::styled(value, self.palette.value),
                Span::raw("    "),
            ]
        };

        let first: Vec<Span> = [
            stat("Score: ", state.score().to_string()),
            stat("Length: ", state.snail.len().to_string()),
            stat("Delay: ", format!("{}ms", state.delay.as_millis())),
            stat("Time: ", metrics.format_time()),
        ]
        .into_iter()
        .flatten()
        .collect();

        let second: Vec<Span> = [
            stat("Games: ", metrics.games_played.to_string()),
            stat("Won: ", metrics.games_won.to_string()),
            stat("Best: ", metrics.best_score.to_string()),
        ]
        .into_iter()
        .flatten()
        .collect();

        Paragraph::new(vec![Line::from(first), Line::from(second)]).alignment(Alignment::Center)
    }

    fn pause_lines(&self) -> Vec<Line<'_>> {
        vec![
            Line::from(Span::styled("Paused", self.palette.value)),
            Line::from(vec![
                Span::raw("Press "),
                Span::styled("P", self.palette.key),
                Span::raw(" to resume"),
            ]),
        ]
    }

    fn game_over_lines(&self, state: &GameState) -> Vec<Line<'_>> {
        let headline = if state.status == GameStatus::Won {
            Span::styled("Game Over, you have WON!", self.palette.won)
        } else {
            Span::styled("Game Over!", self.palette.lost)
        };

        vec![
            Line::from(headline),
            Line::from(format!("You reached a score of {} points.", state.score())),
            Line::from(""),
            Line::from(vec![
                Span::raw("Play again? "),
                Span::styled("y", self.palette.key),
                Span::raw("/"),
                Span::styled("n", self.palette.key),
            ]),
        ]
    }

    fn render_overlay(&self, frame: &mut Frame, screen: Rect, lines: Vec<Line<'_>>) {
        let width = lines.iter().map(Line::width).max().unwrap_or(0) as u16 + 4;
        let height = lines.len() as u16 + 2;
        let area = centered_rect(width, height, screen);

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .style(self.palette.overlay)
                .block(Block::default().borders(Borders::ALL).border_style(self.palette.overlay)),
            area,
        );
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", self.palette.key),
            Span::raw(" or "),
            Span::styled("WASD", self.palette.key),
            Span::raw(" to move | "),
            Span::styled("P", self.palette.key),
            Span::raw(" to pause | "),
            Span::styled("Esc", self.palette.key),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

/// A `width` x `height` rectangle centred in `area`, shrunk to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Duration;

    use crate::game::{Direction, Snail};

    fn sample_state() -> GameState {
        let snail = Snail::new(Position::new(5, 5), Direction::East, 3);
        GameState::new(snail, Position::new(1, 1), 10, 10, Duration::from_millis(150))
    }

    fn draw(state: &GameState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let renderer = Renderer::default();
        let metrics = GameMetrics::new();
        terminal
            .draw(|frame| renderer.render(frame, state, &metrics))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 40, 20);
        assert_eq!(centered_rect(10, 4, area), Rect::new(15, 8, 10, 4));
        assert_eq!(centered_rect(80, 40, area), area);
    }

    #[test]
    fn test_render_running_board() {
        let screen = draw(&sample_state());

        assert!(screen.contains("Score: 0"));
        assert!(screen.contains("Delay: 150ms"));
        assert!(screen.contains('■'));
        assert!(screen.contains('●'));
        assert!(!screen.contains("Paused"));
    }

    #[test]
    fn test_render_pause_overlay() {
        let mut state = sample_state();
        state.toggle_pause();

        assert!(draw(&state).contains("Paused"));
    }

    #[test]
    fn test_render_game_over_overlay() {
        let mut state = sample_state();
        state.status = GameStatus::Lost;
        let screen = draw(&state);
        assert!(screen.contains("Game Over!"));
        assert!(screen.contains("Play again?"));

        state.status = GameStatus::Won;
        assert!(draw(&state).contains("you have WON!"));
    }
}
