//! Uncovered core library.
//!
//! This crate turns a Go-style coverage profile into a terminal listing of
//! the source lines that were never executed, with context around them.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Root discovery and effective configuration resolution.
//! - `profile`: Coverage profile parsing into blocks.
//! - `extract`: Per-file uncovered line extraction from blocks.
//! - `group`: Proximity grouping of uncovered lines.
//! - `render`: Human report with headers, context and highlighting.
//! - `source`: Source file lookup keyed by profile file name.
//! - `models`: Data models shared by the pipeline stages.
//! - `output`: Human/JSON printers and color handling.
//! - `error`: Library error type.
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod group;
pub mod models;
pub mod output;
pub mod profile;
pub mod render;
pub mod source;

pub use error::{Error, Result};
pub use extract::uncovered_lines;
pub use group::{group_lines, CONTEXT_LINES};
pub use models::{Block, FileUncovered, LineGroup, Mode, Profile, UncoveredLine};
pub use render::Renderer;
pub use source::{FsSource, SourceProvider};
