//! Event handling for TUI
//!
//! Reads terminal events on a separate thread and maps keys to labeler
//! actions.

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use crate::labels::Orientation;

/// Application events
#[derive(Debug, Clone)]
pub enum Event {
    /// Terminal was resized
    Resize(u16, u16),
    /// Key was pressed
    Key(KeyEvent),
    /// Tick event for periodic updates
    Tick,
}

/// What a keypress asks the labeler to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Label(Orientation),
    /// Retry writing the labels file after a failure
    RetrySave,
    Quit,
}

impl Action {
    /// Map a key to an action; unbound keys yield `None`.
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Self::Quit),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(Self::Label(Orientation::Portrait)),
            KeyCode::Char('l') | KeyCode::Char('L') => Some(Self::Label(Orientation::Landscape)),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(Self::RetrySave),
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Event handler that runs in a separate thread
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate.
    ///
    /// A `Tick` is sent whenever no terminal event arrives within `tick_rate`.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            while !thread_stop.load(Ordering::Relaxed) {
                let sent = match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) => tx.send(Event::Key(key)),
                        Ok(CrosstermEvent::Resize(width, height)) => {
                            tx.send(Event::Resize(width, height))
                        }
                        Ok(_) => Ok(()),
                        Err(_) => break,
                    },
                    Ok(false) => tx.send(Event::Tick),
                    Err(_) => break,
                };
                if sent.is_err() {
                    break;
                }
            }
        });

        Self {
            rx,
            stop,
            handle: Some(handle),
        }
    }

    /// Get the next event, blocking until one is available.
    pub fn next(&self) -> Result<Event> {
        self.rx
            .recv()
            .map_err(|e| anyhow::anyhow!("Event channel closed: {}", e))
    }

    /// Stop the reader thread and wait for it to release stdin.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.stop();
    }
}
