//! File output helpers shared by the label writer and the manifest builder.

pub mod json;

pub use json::{read_json, write_json, write_lines, FileError};
