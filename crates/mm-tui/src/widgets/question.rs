//! Question overlay widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

use mm_core::quiz::ActiveQuestion;

use crate::input::answer_label;
use crate::theme::Theme;

pub struct QuestionWidget<'a> {
    question: &'a ActiveQuestion,
    theme: &'a Theme,
}

impl<'a> QuestionWidget<'a> {
    pub fn new(question: &'a ActiveQuestion, theme: &'a Theme) -> Self {
        Self { question, theme }
    }
}

impl Widget for QuestionWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let mut lines = vec![
            Line::from(Span::styled(
                self.question.prompt.as_str(),
                Style::default().fg(self.theme.text).bold(),
            )),
            Line::from(""),
        ];
        for (i, choice) in self.question.choices.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {}) ", answer_label(i)),
                    Style::default().fg(self.theme.accent),
                ),
                Span::styled(choice.as_str(), Style::default().fg(self.theme.text)),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press the number of your answer",
            Style::default().fg(self.theme.text_dim),
        )));

        let block = Block::default()
            .title("Endpoint question")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_accent));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
