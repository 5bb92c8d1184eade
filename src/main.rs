//! Hat - a party word-guessing game for the terminal
//!
//! Explain, mime, then sum it up in one word.

mod app;
mod config;
mod device;
mod error;
mod game;
mod storage;
mod tui;
mod words;

use app::{App, Input};
use clap::Parser;
use config::{Args, TICK_RATE};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use device::{CuePlayer, KeepAwake, Muted, TerminalBell};
use game::Snapshot;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use storage::Storage;
use tracing_subscriber::EnvFilter;
use tui::Tui;

fn main() -> io::Result<()> {
    let args = Args::parse();
    let data_dir = args.data_dir.clone().or_else(|| Storage::data_dir().ok());
    init_logging(&args, data_dir.as_deref());

    let storage = match Storage::open(data_dir.as_deref()) {
        Ok(storage) => Some(storage),
        Err(e) => {
            tracing::warn!(error = %e, "storage unavailable, this game will not be saved");
            None
        }
    };

    let snapshot = match &storage {
        Some(storage) if args.fresh => {
            if let Err(e) = storage.clear_snapshot() {
                tracing::warn!(error = %e, "could not clear saved game");
            }
            Snapshot::default()
        }
        Some(storage) => storage.restore_snapshot(),
        None => Snapshot::default(),
    };

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let cues: Box<dyn CuePlayer> = if args.mute {
        Box::new(Muted)
    } else {
        Box::new(TerminalBell)
    };

    let mut app = App::new(snapshot, storage, rng, cues, args.game_config());
    let mut keep_awake = KeepAwake::new();
    keep_awake.request();

    let mut terminal = Tui::new()?;
    terminal.enter()?;
    tracing::info!(phase = app.snapshot().phase.name(), "hat started");

    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| tui::render(frame, &app))?;

        let timeout = TICK_RATE
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
                        app.quit();
                    } else if let Some(input) = map_key(key.code) {
                        app.on_input(input);
                    }
                }
                Event::FocusGained => keep_awake.request(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= TICK_RATE {
            app.tick(elapsed);
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    keep_awake.release();
    tracing::info!("hat stopped");
    // Terminal cleanup happens automatically via Tui::drop
    Ok(())
}

fn map_key(code: KeyCode) -> Option<Input> {
    let input = match code {
        KeyCode::Char(c) => Input::Char(c),
        KeyCode::Backspace => Input::Backspace,
        KeyCode::Delete => Input::Delete,
        KeyCode::Enter => Input::Enter,
        KeyCode::Up => Input::Up,
        KeyCode::Down => Input::Down,
        KeyCode::Left => Input::Left,
        KeyCode::Right => Input::Right,
        KeyCode::Tab | KeyCode::BackTab => Input::Tab,
        KeyCode::Esc => Input::Esc,
        _ => return None,
    };
    Some(input)
}

/// Log to `hat.log` in the data directory; the terminal belongs to the UI.
/// Without a writable log file, logging stays off.
fn init_logging(args: &Args, data_dir: Option<&Path>) {
    let Some(dir) = data_dir else {
        return;
    };
    if std::fs::create_dir_all(dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("hat.log"))
    else {
        return;
    };

    let filter = match &args.log_level {
        Some(level) => EnvFilter::try_new(level).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    }
    .unwrap_or_else(|| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}
