//! TUI widgets for orilabel

pub mod asset_view;

pub use asset_view::{fit_within, AssetView};
