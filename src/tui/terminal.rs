//! The terminal the game is played on
//!
//! Hat owns the whole screen while running: raw mode, alternate screen,
//! hidden cursor and focus reporting (the keep-awake request is renewed
//! when the window regains focus). The screen is handed back on exit, on
//! drop and on panic, so a crash mid-turn never leaves the shell in raw mode.

use crossterm::{
    cursor,
    event::{DisableFocusChange, EnableFocusChange},
    queue,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout, Stdout, Write};
use std::panic;

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    active: bool,
}

impl Tui {
    pub fn new() -> io::Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(Self {
            terminal,
            active: false,
        })
    }

    /// Take over the screen and install a panic hook that gives it back.
    pub fn enter(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut out = stdout();
        queue!(out, EnterAlternateScreen, EnableFocusChange, cursor::Hide)?;
        out.flush()?;
        self.terminal.clear()?;
        self.active = true;

        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = restore();
            previous(info);
        }));
        Ok(())
    }

    /// Give the screen back. Safe to call more than once.
    pub fn exit(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        restore()
    }

    pub fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

fn restore() -> io::Result<()> {
    let mut out = stdout();
    queue!(out, cursor::Show, DisableFocusChange, LeaveAlternateScreen)?;
    out.flush()?;
    disable_raw_mode()
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            tracing::warn!(error = %e, "could not restore terminal");
        }
    }
}
