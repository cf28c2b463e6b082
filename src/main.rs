//! VOXTRIS - falling blocks in three dimensions, in your terminal.

mod input;
mod settings;
mod ui;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use input::{Command, KeyBindings};
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::Settings;
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};
use voxtris::Game;

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Get the voxtris temp directory, creating it if needed
fn voxtris_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("voxtris");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    // Setup tracing to a per-session log file; the terminal belongs to the UI
    let log_dir = voxtris_temp_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "voxtris=debug".parse::<tracing_subscriber::filter::Directive>() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "VOXTRIS starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();
    // Write defaults on first run so there is a file to edit
    if Settings::settings_path().is_some_and(|path| !path.exists()) {
        if let Err(e) = settings.save() {
            tracing::warn!("Could not save default settings: {}", e);
        }
    }
    let mut game = match settings.gameplay.seed {
        Some(seed) => {
            tracing::info!("Using fixed seed {}", seed);
            Game::with_seed(seed)
        }
        None => Game::new(),
    };
    game.start();

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut game, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    if let Err(e) = &result {
        tracing::error!("Terminal error: {}", e);
    }

    let score = game.score();
    println!("\nThanks for playing VOXTRIS!");
    println!("Final Score: {}", score.points);
    println!("Level: {} | Lines: {}", score.level, score.lines);

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
    settings: &Settings,
) -> io::Result<()> {
    let keys = KeyBindings::from_settings(settings);
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| ui::render_game(frame, game, settings))?;

        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match keys.command_for(key) {
                        Some(Command::Quit) => {
                            tracing::info!("Quit requested");
                            return Ok(());
                        }
                        Some(Command::Game(action)) => game.process_action(action),
                        None => {}
                    }
                }
            }
        }

        // Gravity runs on wall-clock time between frames
        let now = Instant::now();
        game.advance(now.duration_since(last_frame));
        last_frame = now;
    }
}
