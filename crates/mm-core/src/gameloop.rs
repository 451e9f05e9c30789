//! Game session: movement, endpoint questions and level progression

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::MAX_MESSAGES;
use crate::action::Command;
use crate::maze::{MazeGenerator, MazeLayout};
use crate::player::PlayerState;
use crate::quiz::{ActiveQuestion, QuestionBank};
use crate::rng::GameRng;
use crate::vision::VisibilityCode;
use crate::world::errors::{GameError, MazeError};
use crate::world::options::GameOptions;

/// Result of a game loop tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameLoopResult {
    /// Continue playing
    Continue,
    /// The given level was completed and the next one has been built
    LevelComplete(u32),
    /// Final level completed
    PlayerWon,
    /// Player quit
    PlayerQuit,
}

/// What the session is waiting for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Walking the maze
    Exploring,
    /// Standing on an endpoint with a question to answer
    Answering(ActiveQuestion),
    /// Won or quit; only `Quit` is still accepted
    Finished,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: u32,
    pub misses: u32,
}

/// Outcome of a single command, before it is turned into a loop result
enum ActionResult {
    Success,
    Ignored,
    Failed(&'static str),
    LevelComplete(u32),
    Won,
    Quit,
}

/// Main game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub options: GameOptions,

    /// Random number generator
    pub rng: GameRng,

    /// Current level, starting at 1
    pub level: u32,

    /// Maze of the current level
    pub layout: MazeLayout,

    pub player: PlayerState,

    pub score: Score,

    pub phase: Phase,

    questions: QuestionBank,

    /// Recent messages, oldest first
    pub messages: Vec<String>,
}

impl GameState {
    /// Start a game, loading the question file named by the options if any
    pub fn new(options: GameOptions, rng: GameRng) -> Result<Self, GameError> {
        let questions = match &options.questions {
            Some(path) => QuestionBank::load_from_file(Path::new(path))?,
            None => QuestionBank::builtin(),
        };
        Self::with_questions(options, rng, questions)
    }

    /// Start a game with an already loaded question bank
    pub fn with_questions(
        options: GameOptions,
        mut rng: GameRng,
        questions: QuestionBank,
    ) -> Result<Self, GameError> {
        options.validate()?;
        let layout = build_layout(&options, 1, &mut rng)?;
        let player = PlayerState::entering(&layout.grid, layout.start);

        let mut state = Self {
            options,
            rng,
            level: 1,
            layout,
            player,
            score: Score::default(),
            phase: Phase::Exploring,
            questions,
            messages: Vec::new(),
        };
        state.arrive();
        Ok(state)
    }

    /// Add a message, dropping the oldest past the limit
    pub fn message(&mut self, msg: impl Into<String>) {
        self.messages.push(msg.into());
        if self.messages.len() > MAX_MESSAGES {
            let excess = self.messages.len() - MAX_MESSAGES;
            self.messages.drain(..excess);
        }
    }

    pub fn last_message(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }

    /// What the player currently sees
    pub fn view(&self) -> VisibilityCode {
        self.player.view(&self.layout.grid, self.options.view)
    }

    pub fn current_question(&self) -> Option<&ActiveQuestion> {
        match &self.phase {
            Phase::Answering(question) => Some(question),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Levels needed to win, None when endless
    pub fn target_levels(&self) -> Option<u32> {
        (self.options.levels > 0).then_some(self.options.levels)
    }

    /// Build a fresh maze for `level` and place the player at its start
    pub fn enter_level(&mut self, level: u32) -> Result<(), MazeError> {
        let layout = build_layout(&self.options, level, &mut self.rng)?;
        info!(
            level,
            size = layout.grid.size(),
            start = %layout.start,
            endpoints = layout.endpoints.len(),
            "entering level"
        );
        self.level = level;
        self.player = PlayerState::entering(&layout.grid, layout.start);
        self.layout = layout;
        self.phase = Phase::Exploring;
        self.arrive();
        Ok(())
    }

    /// Switch to answering when the player stands on an endpoint
    fn arrive(&mut self) {
        if self.layout.is_endpoint(self.player.pos) {
            self.ask_question();
        }
    }

    fn ask_question(&mut self) {
        let question = self.questions.draw(&mut self.rng);
        debug!(prompt = %question.prompt, "asking question");
        self.phase = Phase::Answering(question);
    }
}

fn build_layout(
    options: &GameOptions,
    level: u32,
    rng: &mut GameRng,
) -> Result<MazeLayout, MazeError> {
    let layout = MazeGenerator::new(options.maze_size_for_level(level))?
        .with_braiding(options.braid_min, options.braid_max)
        .with_endpoints(options.endpoints)
        .generate(rng);
    Ok(layout)
}

/// The game loop
pub struct GameLoop {
    state: GameState,
}

impl GameLoop {
    /// Create a new game loop with the given state
    pub fn new(state: GameState) -> Self {
        Self { state }
    }

    /// Get reference to game state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Get mutable reference to game state
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Consume the game loop and return the owned game state
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Apply one player command
    pub fn tick(&mut self, command: Command) -> GameLoopResult {
        match self.execute_command(command) {
            ActionResult::Success | ActionResult::Ignored => GameLoopResult::Continue,
            ActionResult::Failed(msg) => {
                self.state.message(msg);
                GameLoopResult::Continue
            }
            ActionResult::LevelComplete(level) => GameLoopResult::LevelComplete(level),
            ActionResult::Won => GameLoopResult::PlayerWon,
            ActionResult::Quit => GameLoopResult::PlayerQuit,
        }
    }

    fn execute_command(&mut self, command: Command) -> ActionResult {
        if command == Command::Quit {
            self.state.phase = Phase::Finished;
            return ActionResult::Quit;
        }

        match self.state.phase {
            Phase::Finished => ActionResult::Ignored,
            Phase::Answering(_) => match command {
                Command::Answer(choice) => self.answer(choice),
                _ => ActionResult::Ignored,
            },
            Phase::Exploring => self.explore(command),
        }
    }

    fn explore(&mut self, command: Command) -> ActionResult {
        let state = &mut self.state;
        match command {
            Command::Forward => {
                if !state.player.move_forward(&state.layout.grid) {
                    return ActionResult::Failed("A wall blocks your way.");
                }
                if state.layout.is_endpoint(state.player.pos) {
                    state.message("You found an endpoint! Answer to continue.");
                    state.ask_question();
                }
                ActionResult::Success
            }
            Command::TurnLeft => {
                state.player.turn_left();
                ActionResult::Success
            }
            Command::TurnRight => {
                state.player.turn_right();
                ActionResult::Success
            }
            Command::TurnAround => {
                state.player.turn_around();
                ActionResult::Success
            }
            Command::Regenerate => {
                let level = state.level;
                match state.enter_level(level) {
                    Ok(()) => {
                        state.message("The maze shifts around you.");
                        ActionResult::Success
                    }
                    Err(err) => {
                        warn!(%err, "could not regenerate maze");
                        ActionResult::Failed("The maze refuses to change.")
                    }
                }
            }
            Command::Answer(_) | Command::Quit => ActionResult::Ignored,
        }
    }

    fn answer(&mut self, choice: usize) -> ActionResult {
        let state = &mut self.state;
        let Phase::Answering(question) = &state.phase else {
            return ActionResult::Ignored;
        };
        if choice >= question.choices.len() {
            return ActionResult::Ignored;
        }

        if !question.is_correct(choice) {
            debug!(choice, answer = question.answer, "wrong answer");
            state.score.misses += 1;
            state.message("Not quite. Here is another question.");
            state.ask_question();
            return ActionResult::Success;
        }

        state.score.correct += 1;
        let completed = state.level;
        if state.target_levels().is_some_and(|target| completed >= target) {
            info!(level = completed, score = state.score.correct, "game won");
            state.phase = Phase::Finished;
            state.message("Correct! You have escaped the last maze.");
            return ActionResult::Won;
        }

        match state.enter_level(completed + 1) {
            Ok(()) => {
                state.message(format!("Correct! Welcome to level {}.", completed + 1));
                ActionResult::LevelComplete(completed)
            }
            Err(err) => {
                warn!(%err, "could not build next level");
                ActionResult::Failed("The next maze could not be built.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Direction;
    use crate::maze::Coord;
    use crate::player::open_facing;
    use crate::quiz::Question;

    fn options() -> GameOptions {
        GameOptions {
            maze_size: 3,
            size_step: 2,
            levels: 2,
            ..GameOptions::default()
        }
    }

    fn new_game(options: GameOptions) -> GameLoop {
        GameLoop::new(GameState::new(options, GameRng::new(42)).unwrap())
    }

    /// Put the player next to the first endpoint, facing it
    fn stand_before_endpoint(game: &mut GameLoop) {
        let state = game.state_mut();
        let endpoint = state.layout.endpoints[0];
        let grid = &state.layout.grid;
        let dir = open_facing(grid, endpoint);
        let before = grid.neighbor(endpoint, dir).unwrap();
        state.player = PlayerState::new(before, dir.reverse());
        state.phase = Phase::Exploring;
    }

    fn reach_endpoint(game: &mut GameLoop) {
        stand_before_endpoint(game);
        assert_eq!(game.tick(Command::Forward), GameLoopResult::Continue);
        assert!(game.state().current_question().is_some());
    }

    fn correct_answer(game: &GameLoop) -> usize {
        game.state().current_question().unwrap().answer
    }

    fn wrong_answer(game: &GameLoop) -> usize {
        (correct_answer(game) + 1) % game.state().current_question().unwrap().choices.len()
    }

    #[test]
    fn test_new_game() {
        let game = new_game(options());
        let state = game.state();
        assert_eq!(state.level, 1);
        assert_eq!(state.layout.grid.size(), 3);
        assert_eq!(state.player.pos, state.layout.start);
        assert_eq!(state.phase, Phase::Exploring);
        assert_eq!(state.score, Score::default());
    }

    #[test]
    fn test_invalid_options_rejected() {
        let bad = GameOptions {
            maze_size: 0,
            ..GameOptions::default()
        };
        assert!(GameState::new(bad, GameRng::new(1)).is_err());
    }

    #[test]
    fn test_turning() {
        let mut game = new_game(options());
        let facing = game.state().player.facing;
        game.tick(Command::TurnLeft);
        assert_eq!(game.state().player.facing, facing.turn_left());
        game.tick(Command::TurnAround);
        assert_eq!(game.state().player.facing, facing.turn_right());
        game.tick(Command::TurnLeft);
        assert_eq!(game.state().player.facing, facing);
    }

    #[test]
    fn test_walk_into_wall() {
        let mut game = new_game(options());
        // the top-left cell always has the border above it
        let corner = Coord::new(1, 1);
        game.state_mut().player = PlayerState::new(corner, Direction::Up);
        game.state_mut().phase = Phase::Exploring;
        game.tick(Command::Forward);
        assert_eq!(game.state().player.pos, corner);
        assert_eq!(game.state().last_message(), Some("A wall blocks your way."));
    }

    #[test]
    fn test_reaching_endpoint_asks_question() {
        let mut game = new_game(options());
        reach_endpoint(&mut game);
        assert_eq!(game.state().player.pos, game.state().layout.endpoints[0]);
    }

    #[test]
    fn test_wrong_answer_counts_miss() {
        let mut game = new_game(options());
        reach_endpoint(&mut game);
        let choice = wrong_answer(&game);
        assert_eq!(game.tick(Command::Answer(choice)), GameLoopResult::Continue);
        assert_eq!(game.state().score.misses, 1);
        assert_eq!(game.state().score.correct, 0);
        assert_eq!(game.state().level, 1);
        assert!(game.state().current_question().is_some());
    }

    #[test]
    fn test_out_of_range_answer_ignored() {
        let mut game = new_game(options());
        reach_endpoint(&mut game);
        game.tick(Command::Answer(99));
        assert_eq!(game.state().score, Score::default());
    }

    #[test]
    fn test_commands_ignored_by_phase() {
        let mut game = new_game(options());
        let before = game.state().player;
        game.tick(Command::Answer(0));
        assert_eq!(game.state().score, Score::default());
        assert_eq!(game.state().player, before);

        reach_endpoint(&mut game);
        let at = game.state().player;
        game.tick(Command::TurnLeft);
        game.tick(Command::Forward);
        assert_eq!(game.state().player, at);
    }

    #[test]
    fn test_correct_answer_advances_level() {
        let mut game = new_game(options());
        reach_endpoint(&mut game);
        let choice = correct_answer(&game);
        assert_eq!(game.tick(Command::Answer(choice)), GameLoopResult::LevelComplete(1));
        let state = game.state();
        assert_eq!(state.level, 2);
        assert_eq!(state.score.correct, 1);
        assert_eq!(state.layout.grid.size(), 5);
        assert_eq!(state.player.pos, state.layout.start);
    }

    #[test]
    fn test_winning_final_level() {
        let mut game = new_game(options());
        reach_endpoint(&mut game);
        let choice = correct_answer(&game);
        assert_eq!(game.tick(Command::Answer(choice)), GameLoopResult::LevelComplete(1));
        reach_endpoint(&mut game);
        let choice = correct_answer(&game);
        assert_eq!(game.tick(Command::Answer(choice)), GameLoopResult::PlayerWon);
        assert!(game.state().is_finished());
        assert_eq!(game.tick(Command::Forward), GameLoopResult::Continue);
        assert_eq!(game.tick(Command::Quit), GameLoopResult::PlayerQuit);
    }

    #[test]
    fn test_endless_mode() {
        let mut game = new_game(GameOptions {
            levels: 0,
            max_maze_size: 5,
            ..options()
        });
        for level in 1..=4 {
            reach_endpoint(&mut game);
            let choice = correct_answer(&game);
            assert_eq!(game.tick(Command::Answer(choice)), GameLoopResult::LevelComplete(level));
        }
        assert_eq!(game.state().level, 5);
        assert_eq!(game.state().layout.grid.size(), 5);
    }

    #[test]
    fn test_regenerate_keeps_level() {
        let mut game = new_game(options());
        game.tick(Command::Regenerate);
        assert_eq!(game.state().level, 1);
        assert_eq!(game.state().layout.grid.size(), 3);
        assert_eq!(game.state().player.pos, game.state().layout.start);
        assert_eq!(game.state().last_message(), Some("The maze shifts around you."));
    }

    #[test]
    fn test_single_cell_maze_asks_immediately() {
        let game = new_game(GameOptions {
            maze_size: 1,
            size_step: 0,
            ..options()
        });
        assert_eq!(game.state().layout.start, game.state().layout.endpoints[0]);
        assert!(game.state().current_question().is_some());
    }

    #[test]
    fn test_custom_bank() {
        let bank = QuestionBank::new(vec![Question::new("only", &["x", "y"], 1)]).unwrap();
        let mut game = GameLoop::new(
            GameState::with_questions(options(), GameRng::new(3), bank).unwrap(),
        );
        reach_endpoint(&mut game);
        assert_eq!(game.state().current_question().unwrap().prompt, "only");
    }

    #[test]
    fn test_message_log_is_bounded() {
        let mut game = new_game(options());
        for i in 0..MAX_MESSAGES + 10 {
            game.state_mut().message(format!("msg {i}"));
        }
        assert_eq!(game.state().messages.len(), MAX_MESSAGES);
        assert_eq!(game.state().messages[0], "msg 10");
    }

    #[test]
    fn test_quit() {
        let mut game = new_game(options());
        assert_eq!(game.tick(Command::Quit), GameLoopResult::PlayerQuit);
        assert!(game.state().is_finished());
    }
}
