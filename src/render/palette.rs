use ratatui::style::{Color, Modifier, Style};

/// Styles used to draw the board and its overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub wall: Style,
    pub snail_head: Style,
    pub snail_body: Style,
    pub food: Style,
    pub empty: Style,
    pub label: Style,
    pub value: Style,
    pub overlay: Style,
    pub won: Style,
    pub lost: Style,
    pub key: Style,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            wall: Style::default().fg(Color::Blue),
            snail_head: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            snail_body: Style::default().fg(Color::White),
            food: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            empty: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Yellow),
            value: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            overlay: Style::default().fg(Color::White).bg(Color::Black),
            won: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            lost: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            key: Style::default().fg(Color::Cyan),
        }
    }
}

impl Palette {
    /// Plain palette for terminals without color
    pub fn monochrome() -> Self {
        let plain = Style::default();
        let bold = plain.add_modifier(Modifier::BOLD);
        Self {
            wall: plain,
            snail_head: bold,
            snail_body: plain,
            food: bold,
            empty: plain.add_modifier(Modifier::DIM),
            label: plain,
            value: bold,
            overlay: plain.add_modifier(Modifier::REVERSED),
            won: bold,
            lost: bold,
            key: bold,
        }
    }
}
