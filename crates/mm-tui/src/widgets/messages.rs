//! Message log widget

use ratatui::prelude::*;
use ratatui::widgets::Widget;

use crate::theme::Theme;

/// Shows the newest messages, most recent on the bottom line
pub struct MessagesWidget<'a> {
    messages: &'a [String],
    theme: &'a Theme,
}

impl<'a> MessagesWidget<'a> {
    pub fn new(messages: &'a [String], theme: &'a Theme) -> Self {
        Self { messages, theme }
    }
}

impl Widget for MessagesWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = area.height as usize;
        let start = self.messages.len().saturating_sub(rows);
        let count = self.messages.len() - start;

        for (i, msg) in self.messages[start..].iter().enumerate() {
            // older lines are dimmed
            let color = if i + 1 == count {
                self.theme.text
            } else {
                self.theme.text_dim
            };
            buf.set_stringn(
                area.x,
                area.y + i as u16,
                msg,
                area.width as usize,
                Style::default().fg(color),
            );
        }
    }
}
