//! Status line widget

use ratatui::prelude::*;
use ratatui::widgets::Widget;

use mm_core::GameState;

use crate::theme::Theme;

/// Widget for rendering the two status lines
pub struct StatusWidget<'a> {
    state: &'a GameState,
    wallset: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> StatusWidget<'a> {
    pub fn new(state: &'a GameState, wallset: Option<&'a str>, theme: &'a Theme) -> Self {
        Self {
            state,
            wallset,
            theme,
        }
    }

    /// Status text, one string per line
    pub fn lines(&self) -> [String; 2] {
        let s = self.state;
        let level = match s.target_levels() {
            Some(target) => format!("Level {}/{}", s.level, target),
            None => format!("Level {}", s.level),
        };
        let side = s.layout.grid.size();

        let line1 = format!(
            "{}  Score:{}  Misses:{}  Maze:{}x{}",
            level, s.score.correct, s.score.misses, side, side,
        );
        let line2 = format!(
            "Facing {} {}  View:{}  Seed:{}",
            s.player.facing.compass(),
            s.player.facing.arrow(),
            self.wallset.unwrap_or("unknown"),
            s.rng.seed(),
        );
        [line1, line2]
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [line1, line2] = self.lines();
        let style = Style::default().fg(self.theme.text);
        buf.set_stringn(area.x, area.y, &line1, area.width as usize, style);
        if area.height > 1 {
            buf.set_stringn(area.x, area.y + 1, &line2, area.width as usize, style);
        }
    }
}
