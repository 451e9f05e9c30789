//! Application state and main UI controller

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use mm_assets::WallSetRegistry;
use mm_core::action::Command;
use mm_core::{GameLoop, GameLoopResult, GameState};

use crate::input::{Keymap, answer_index};
use crate::theme::Theme;
use crate::widgets::{
    FirstPersonWidget, MessagesWidget, MinimapWidget, QuestionWidget, StatusWidget,
};

/// UI mode - what the app is currently displaying/waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Normal gameplay, including answering questions
    Normal,
    /// Showing help
    Help,
    /// Final level cleared
    Victory,
}

/// Main application state
pub struct App {
    /// Game loop controller
    game_loop: GameLoop,

    /// Wall-set lookup for the current view depth
    registry: WallSetRegistry,

    /// Should quit
    should_quit: bool,

    /// Current UI mode
    mode: UiMode,

    /// Minimap panel visible
    show_minimap: bool,

    /// User key bindings from the options file
    keymap: Keymap,

    /// Color theme (adapts to light/dark terminal background)
    theme: Theme,
}

impl App {
    /// Create a new application around a started game
    pub fn new(mut state: GameState, registry: WallSetRegistry, theme: Theme) -> Self {
        let (keymap, rejected) = Keymap::from_bindings(&state.options.keybindings);
        for binding in rejected {
            tracing::warn!(%binding, "ignoring key binding");
            state.message(format!("Ignoring key binding {binding}."));
        }
        let show_minimap = state.options.minimap;

        Self {
            game_loop: GameLoop::new(state),
            registry,
            should_quit: false,
            mode: UiMode::Normal,
            show_minimap,
            keymap,
            theme,
        }
    }

    /// Get game state
    pub fn state(&self) -> &GameState {
        self.game_loop.state()
    }

    /// Get mutable game state
    pub fn state_mut(&mut self) -> &mut GameState {
        self.game_loop.state_mut()
    }

    /// Check if should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn show_minimap(&self) -> bool {
        self.show_minimap
    }

    /// Label of the wall-set in front of the player
    pub fn wallset_label(&self) -> Option<&str> {
        self.registry
            .lookup(self.state().view())
            .map(|entry| entry.label.as_str())
    }

    /// Handle an input event, returning a command for the game loop if any
    pub fn handle_event(&mut self, event: Event) -> Option<Command> {
        let Event::Key(key) = event else {
            return None;
        };
        if key.kind == KeyEventKind::Release {
            return None;
        }

        match self.mode {
            UiMode::Normal => self.handle_normal_input(key),
            UiMode::Help => {
                self.handle_help_input(key);
                None
            }
            UiMode::Victory => {
                self.handle_victory_input(key);
                None
            }
        }
    }

    fn handle_normal_input(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Char('?') => {
                self.mode = UiMode::Help;
                return None;
            }
            KeyCode::Char('m') => {
                self.show_minimap = !self.show_minimap;
                return None;
            }
            _ => {}
        }

        // Answer keys shadow movement while a question is up
        if self.state().current_question().is_some()
            && let Some(choice) = answer_index(key)
        {
            return Some(Command::Answer(choice));
        }

        self.keymap.command_for(key)
    }

    fn handle_help_input(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('?')
        ) {
            self.mode = UiMode::Normal;
        }
    }

    fn handle_victory_input(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')
        ) {
            self.should_quit = true;
        }
    }

    /// Execute a command and update state
    pub fn execute(&mut self, command: Command) -> GameLoopResult {
        let result = self.game_loop.tick(command);

        match result {
            GameLoopResult::PlayerQuit => self.should_quit = true,
            GameLoopResult::PlayerWon => self.mode = UiMode::Victory,
            GameLoopResult::LevelComplete(level) => {
                tracing::debug!(level, "level complete");
            }
            GameLoopResult::Continue => {}
        }

        result
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        // Layout: view (and minimap) at top, status in middle, messages at bottom
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(10),   // View + border
                Constraint::Length(2), // Status lines
                Constraint::Length(3), // Messages
            ])
            .split(frame.area());

        let main = if self.show_minimap {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
                .split(chunks[0])
        } else {
            Layout::default()
                .constraints([Constraint::Percentage(100)])
                .split(chunks[0])
        };

        let state = self.game_loop.state();
        let code = state.view();
        let view = FirstPersonWidget::new(code, "MindMaze", &self.theme)
            .tint(self.registry.color(code));
        frame.render_widget(view, main[0]);

        if self.show_minimap {
            frame.render_widget(MinimapWidget::new(state, &self.theme), main[1]);
        }

        let status = StatusWidget::new(state, self.wallset_label(), &self.theme);
        frame.render_widget(status, chunks[1]);
        frame.render_widget(MessagesWidget::new(&state.messages, &self.theme), chunks[2]);

        if let Some(question) = state.current_question() {
            let area = centered_rect(60, 50, frame.area());
            frame.render_widget(QuestionWidget::new(question, &self.theme), area);
        }

        match self.mode {
            UiMode::Normal => {}
            UiMode::Help => self.render_help(frame),
            UiMode::Victory => self.render_victory(frame),
        }
    }

    /// Render help overlay
    fn render_help(&self, frame: &mut Frame) {
        let area = centered_rect(60, 70, frame.area());
        frame.render_widget(Clear, area);

        let help_text = r#"Movement:
  Up / w      Step forward
  Left / a    Turn left
  Right / d   Turn right
  Down / s    Turn around

At an endpoint:
  1-9 / a-i   Answer the question

Other:
  z    New maze for this level
  m    Toggle minimap
  ?    Help
  q    Quit

Press ESC or SPACE to close"#;

        let block = Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_accent));

        let paragraph = Paragraph::new(help_text)
            .block(block)
            .style(Style::default().fg(self.theme.text));

        frame.render_widget(paragraph, area);
    }

    /// Render the victory screen with the final score
    fn render_victory(&self, frame: &mut Frame) {
        let area = centered_rect(50, 40, frame.area());
        frame.render_widget(Clear, area);

        let state = self.game_loop.state();
        let lines = vec![
            Line::from(Span::styled(
                "You escaped the maze!",
                Style::default().fg(self.theme.good).bold(),
            )),
            Line::from(""),
            Line::from(format!("Levels cleared: {}", state.level)),
            Line::from(format!("Correct answers: {}", state.score.correct)),
            Line::from(format!("Misses: {}", state.score.misses)),
            Line::from(""),
            Line::from(Span::styled(
                "Press ENTER to leave",
                Style::default().fg(self.theme.text_dim),
            )),
        ];

        let block = Block::default()
            .title("Victory")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_victory));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
