//! Terminal lifecycle for the TUI
//!
//! Raw mode and the alternate screen are entered together and left together.
//! Every exit path, including a failed setup step, goes through
//! `restore_terminal`.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use super::event::{Event, EventHandler};

type Backend = CrosstermBackend<Stdout>;

/// Leave the alternate screen, show the cursor and drop raw mode.
///
/// Best effort: errors are ignored so it can run from `Drop`.
fn restore_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    let _ = disable_raw_mode();
}

fn enter_terminal() -> Result<Terminal<Backend>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let setup = execute!(io::stdout(), EnterAlternateScreen, Hide)
        .context("Failed to enter alternate screen")
        .and_then(|_| {
            Terminal::new(CrosstermBackend::new(io::stdout()))
                .context("Failed to initialize terminal")
        });
    if setup.is_err() {
        restore_terminal();
    }
    setup
}

/// Owns the terminal and the input thread for the duration of a TUI run.
pub struct App {
    terminal: Terminal<Backend>,
    events: EventHandler,
}

impl App {
    /// Switch the terminal into TUI mode and start reading input.
    pub fn new(tick_rate: Duration) -> Result<Self> {
        let terminal = enter_terminal()?;
        Ok(Self {
            terminal,
            events: EventHandler::new(tick_rate),
        })
    }

    /// Block until the next input event or tick.
    pub fn next_event(&self) -> Result<Event> {
        self.events.next()
    }

    pub fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.events.stop();
        restore_terminal();
    }
}
