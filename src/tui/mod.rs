//! TUI (Text User Interface) module for orilabel
//!
//! Terminal UI components built on ratatui/crossterm.

pub mod app;
pub mod event;
pub mod label_app;
pub mod layout;
pub mod theme;
pub mod widgets;

pub use label_app::{run, LabelOutcome, LabelScreen};
pub use theme::{current_theme, Theme};
