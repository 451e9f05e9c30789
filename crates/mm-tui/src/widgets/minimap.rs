//! Minimap widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Widget};

use mm_core::GameState;
use mm_core::maze::Coord;

use crate::theme::Theme;

/// Top-down map of the current maze, scrolled to keep the player in view
pub struct MinimapWidget<'a> {
    state: &'a GameState,
    theme: &'a Theme,
}

impl<'a> MinimapWidget<'a> {
    pub fn new(state: &'a GameState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn cell_display(&self, at: Coord) -> (char, Style) {
        let state = self.state;

        if at == state.player.pos {
            return (
                state.player.facing.arrow(),
                Style::default().fg(self.theme.map_player).bold(),
            );
        }
        if state.layout.is_endpoint(at) {
            return ('*', Style::default().fg(self.theme.map_endpoint));
        }
        if state.layout.grid.is_wall(at) {
            ('#', Style::default().fg(self.theme.map_wall))
        } else {
            ('.', Style::default().fg(self.theme.map_path))
        }
    }
}

/// First visible index along one axis so that `pos` stays centered
pub fn scroll_offset(pos: usize, len: usize, window: usize) -> usize {
    if len <= window {
        return 0;
    }
    pos.saturating_sub(window / 2).min(len - window)
}

impl Widget for MinimapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Map")
            .border_style(Style::default().fg(self.theme.border));

        let inner = block.inner(area);
        block.render(area, buf);

        let side = self.state.layout.grid.side();
        let rows = side.min(inner.height as usize);
        let cols = side.min(inner.width as usize);
        let pos = self.state.player.pos;
        let row0 = scroll_offset(pos.row, side, rows);
        let col0 = scroll_offset(pos.col, side, cols);

        for y in 0..rows {
            for x in 0..cols {
                let (ch, style) = self.cell_display(Coord::new(row0 + y, col0 + x));
                if let Some(cell) =
                    buf.cell_mut(Position::new(inner.x + x as u16, inner.y + y as u16))
                {
                    cell.set_char(ch);
                    cell.set_style(style);
                }
            }
        }
    }
}
