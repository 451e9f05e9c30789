//! MindMaze: a first-person maze with quiz checkpoints
//!
//! Main entry point for the game.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use strum::VariantNames;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use mm_assets::WallSetRegistry;
use mm_core::maze::MazeGenerator;
use mm_core::vision::ViewDepth;
use mm_core::world::GameOptions;
use mm_core::{GameLoopResult, GameRng, GameState};
use mm_tui::{App, Theme};

/// MindMaze in the terminal
#[derive(Parser, Debug)]
#[command(name = "mindmaze")]
#[command(author, version, about = "MindMaze - find the endpoints, answer the questions", long_about = None)]
struct Args {
    /// Logical maze size of the first level
    #[arg(short = 's', long = "size")]
    size: Option<usize>,

    /// Seed for a reproducible game
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// View depth (short or long)
    #[arg(long = "view")]
    view: Option<String>,

    /// Question bank (JSON)
    #[arg(short = 'q', long = "questions")]
    questions: Option<String>,

    /// Levels to win, 0 for endless
    #[arg(short = 'l', long = "levels")]
    levels: Option<u32>,

    /// Endpoints per level
    #[arg(short = 'e', long = "endpoints")]
    endpoints: Option<usize>,

    /// Options file (defaults to the platform config dir)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Wall-set mapping (JSON) replacing the built-in one
    #[arg(long = "wallsets")]
    wallsets: Option<PathBuf>,

    /// Log file; filter with MINDMAZE_LOG
    #[arg(long = "log")]
    log: Option<PathBuf>,

    /// Use colors for a light terminal background
    #[arg(long = "light")]
    light: bool,

    /// Print one maze and exit
    #[arg(long = "dump")]
    dump: bool,
}

fn main() -> io::Result<()> {
    // Parse command-line arguments before terminal setup
    let args = Args::parse();

    let log_path = args
        .log
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("mindmaze.log"));
    init_tracing(&log_path)?;

    let options = load_options(&args)?;
    let mut rng = args.seed.map(GameRng::new).unwrap_or_else(GameRng::from_entropy);
    info!(seed = rng.seed(), size = options.maze_size, view = %options.view, "starting");

    if args.dump {
        return dump_maze(&options, &mut rng);
    }

    let registry = match &args.wallsets {
        Some(path) => WallSetRegistry::load_from_file(path, options.view),
        None => WallSetRegistry::builtin(options.view),
    }
    .map_err(io::Error::other)?;

    let theme = if !options.color {
        Theme::monochrome()
    } else if args.light {
        Theme::light()
    } else {
        Theme::detect()
    };

    let state = GameState::new(options, rng).map_err(io::Error::other)?;
    let mut app = App::new(state, registry, theme);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    if let Err(err) = disable_raw_mode() {
        error!(?err, "failed to disable raw mode");
    }
    if let Err(err) = execute!(terminal.backend_mut(), LeaveAlternateScreen) {
        error!(?err, "failed to leave alternate screen");
    }
    terminal.show_cursor()?;

    let state = app.state();
    info!(
        level = state.level,
        correct = state.score.correct,
        misses = state.score.misses,
        "game over"
    );
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;

            if let Some(command) = app.handle_event(event) {
                match app.execute(command) {
                    GameLoopResult::PlayerQuit => break,
                    GameLoopResult::LevelComplete(level) => {
                        info!(level, "level cleared");
                    }
                    // Victory screen stays up until dismissed
                    GameLoopResult::PlayerWon | GameLoopResult::Continue => {}
                }
            }

            if app.should_quit() {
                break;
            }
        }
    }
    Ok(())
}

/// Send tracing output to a file; the terminal belongs to the UI
fn init_tracing(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_env("MINDMAZE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Options file first, then command-line overrides
fn load_options(args: &Args) -> io::Result<GameOptions> {
    let mut options = match &args.config {
        Some(path) => GameOptions::load_from_file(path).map_err(io::Error::other)?,
        None => match GameOptions::default_config_path().filter(|p| p.exists()) {
            Some(path) => GameOptions::load_from_file(&path).unwrap_or_else(|err| {
                warn!(%err, path = %path.display(), "ignoring options file");
                GameOptions::default()
            }),
            None => GameOptions::default(),
        },
    };

    if let Some(size) = args.size {
        options.maze_size = size;
        options.max_maze_size = options.max_maze_size.max(size);
    }
    if let Some(view) = &args.view {
        options.view = view.to_lowercase().parse().map_err(|_| {
            io::Error::other(format!(
                "unknown view depth '{view}', expected one of: {}",
                ViewDepth::VARIANTS.join(", ")
            ))
        })?;
    }
    if let Some(questions) = &args.questions {
        options.questions = Some(questions.clone());
    }
    if let Some(levels) = args.levels {
        options.levels = levels;
    }
    if let Some(endpoints) = args.endpoints {
        options.endpoints = endpoints;
    }

    options.validate().map_err(io::Error::other)?;
    Ok(options)
}

fn dump_maze(options: &GameOptions, rng: &mut GameRng) -> io::Result<()> {
    let layout = MazeGenerator::new(options.maze_size)
        .map_err(io::Error::other)?
        .with_braiding(options.braid_min, options.braid_max)
        .with_endpoints(options.endpoints)
        .generate(rng);

    print!("{}", layout.grid);
    println!("start: {}", layout.start);
    for endpoint in &layout.endpoints {
        println!("endpoint: {endpoint}");
    }
    println!("dead ends: {}", layout.dead_ends.len());
    println!("seed: {}", rng.seed());
    Ok(())
}
