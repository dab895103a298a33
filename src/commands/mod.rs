//! Command handlers for the orilabel CLI.
//!
//! Each submodule handles one CLI command or command group.
//! The dispatch itself stays in main.rs.

pub mod config;
pub mod label;
pub mod manifest;
pub mod scan;
