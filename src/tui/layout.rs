//! Screen layout for the labeler
//!
//! Header (1 row), image area (flexible), status line (1 row), footer (1 row).

use ratatui::layout::{Constraint, Layout, Rect};

/// Split the screen into header / image / status / footer.
pub fn build_label_layout(area: Rect) -> [Rect; 4] {
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area)
}
