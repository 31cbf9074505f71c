use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::scene::{Label, Scene, Tint};
use crate::game::{GameConfig, Position};

/// Terminal columns per grid cell, so cells come out roughly square
const CELL_COLUMNS: u16 = 2;

/// Draws a [`Scene`] into a ratatui frame.
///
/// The playfield is a bordered box of two-character cells. Labels are laid
/// over it at the cell that contains their anchor point.
pub struct Renderer {
    cell_size: i32,
    columns: u16,
    rows: u16,
}

impl Renderer {
    pub fn new(config: &GameConfig) -> Self {
        let grid = config.grid();
        Self {
            cell_size: grid.cell_size,
            columns: grid.columns() as u16,
            rows: grid.rows() as u16,
        }
    }

    pub fn render(&self, frame: &mut Frame, scene: &Scene) {
        let area = frame.area();
        let outer = self.playfield_rect(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::White))
            .title(" Snake ");
        let inner = block.inner(outer);

        frame.render_widget(self.render_grid(scene).block(block), outer);

        for label in &scene.labels {
            let rect = self.label_rect(inner, label);
            if rect.width > 0 && rect.height > 0 {
                frame.render_widget(self.render_label(label), rect);
            }
        }
    }

    /// Centre the bordered playfield, clipped to the terminal
    fn playfield_rect(&self, area: Rect) -> Rect {
        let width = self.columns * CELL_COLUMNS + 2;
        let height = self.rows + 2;
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        Rect::new(x, y, width, height).intersection(area)
    }

    fn tint_style(tint: Tint) -> Style {
        match tint {
            Tint::SnakeOne => Style::default().fg(Color::Green),
            Tint::SnakeTwo => Style::default().fg(Color::Blue),
            Tint::Food => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            Tint::Obstacle => Style::default().fg(Color::Gray),
        }
    }

    fn cell_of(&self, pos: Position) -> Option<(usize, usize)> {
        let col = pos.x / self.cell_size;
        let row = pos.y / self.cell_size;
        if pos.x < 0 || pos.y < 0 || col >= self.columns as i32 || row >= self.rows as i32 {
            return None;
        }
        Some((col as usize, row as usize))
    }

    fn render_grid(&self, scene: &Scene) -> Paragraph<'_> {
        let mut cells: Vec<Vec<Option<Tint>>> =
            vec![vec![None; self.columns as usize]; self.rows as usize];

        // Later commands paint over earlier ones, like a canvas.
        for cell in &scene.cells {
            if let Some((col, row)) = self.cell_of(cell.position) {
                cells[row][col] = Some(cell.tint);
            }
        }

        let lines: Vec<Line> = cells
            .into_iter()
            .map(|row| {
                Line::from(
                    row.into_iter()
                        .map(|cell| match cell {
                            Some(tint) => Span::styled("██", Self::tint_style(tint)),
                            None => Span::raw("  "),
                        })
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        Paragraph::new(lines)
    }

    /// Row of the anchor, horizontally centred on the anchor column
    fn label_rect(&self, inner: Rect, label: &Label) -> Rect {
        let row = (label.anchor.y / self.cell_size).max(0) as u16;
        let center = (label.anchor.x / self.cell_size).max(0) as u16 * CELL_COLUMNS;
        let width = (label.text.chars().count() as u16).min(inner.width);
        let x = inner.x + center.saturating_sub(width / 2);
        Rect::new(x, inner.y + row, width, 1).intersection(inner)
    }

    fn render_label<'a>(&self, label: &'a Label) -> Paragraph<'a> {
        let style = if label.size >= 40 {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        Paragraph::new(Line::from(Span::styled(label.text.as_str(), style)))
            .alignment(Alignment::Center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::scene::CellRect;
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_labels_are_drawn() {
        let config = GameConfig::default();
        let renderer = Renderer::new(&config);
        let scene = Scene {
            cells: vec![],
            labels: vec![Label {
                text: "Score: 40".to_string(),
                size: 20,
                anchor: Position::new(320, 10),
            }],
        };

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| renderer.render(frame, &scene)).unwrap();

        assert!(buffer_text(&terminal).contains("Score: 40"));
    }

    #[test]
    fn test_cells_are_drawn() {
        let config = GameConfig::default();
        let renderer = Renderer::new(&config);
        let scene = Scene {
            cells: vec![CellRect {
                position: Position::new(0, 0),
                tint: Tint::Food,
            }],
            labels: vec![],
        };

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| renderer.render(frame, &scene)).unwrap();

        assert!(buffer_text(&terminal).contains("██"));
    }

    #[test]
    fn test_small_terminal_does_not_panic() {
        let config = GameConfig::default();
        let renderer = Renderer::new(&config);
        let scene = Scene {
            cells: vec![CellRect {
                position: Position::new(620, 460),
                tint: Tint::SnakeOne,
            }],
            labels: vec![Label {
                text: "Press any key to return to menu".to_string(),
                size: 30,
                anchor: Position::new(320, 440),
            }],
        };

        let mut terminal = Terminal::new(TestBackend::new(20, 8)).unwrap();
        terminal.draw(|frame| renderer.render(frame, &scene)).unwrap();
    }
}
