//! Shared data models for the extraction, grouping and output stages.

pub mod block;

pub use block::{Block, Mode, Profile};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// A single uncovered line and the column where uncovered code begins.
///
/// Column `0` means the whole line is uncovered.
pub struct UncoveredLine {
    pub line: u32,
    pub col: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// All uncovered lines of one source file, strictly increasing by line.
pub struct FileUncovered {
    #[serde(rename = "file")]
    pub file_name: String,
    pub lines: Vec<UncoveredLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A run of nearby uncovered lines displayed with one shared context window.
///
/// `start` and `end` bound the uncovered lines only, not the context.
pub struct LineGroup {
    pub start: u32,
    pub end: u32,
    #[serde(skip)]
    pub lines: Vec<UncoveredLine>,
}

impl LineGroup {
    pub fn contains(&self, line: u32) -> bool {
        self.lines
            .binary_search_by_key(&line, |l| l.line)
            .is_ok()
    }
}

#[derive(Serialize)]
/// Aggregated counts used by the JSON printer.
pub struct Summary {
    pub files: usize,
    pub lines: usize,
}
