//! Coverage profile schema: the counting mode and one record per block.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Counting mode declared on the first profile line.
pub enum Mode {
    Set,
    Count,
    Atomic,
}

impl FromStr for Mode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "set" => Ok(Mode::Set),
            "count" => Ok(Mode::Count),
            "atomic" => Ok(Mode::Atomic),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::Set => "set",
            Mode::Count => "count",
            Mode::Atomic => "atomic",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One contiguous source span and how many times it executed.
///
/// Positions are 1-indexed. `num_stmt` is carried through from the profile
/// but plays no part in line extraction.
pub struct Block {
    pub file_name: String,
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
    pub num_stmt: u32,
    pub count: u64,
}

impl Block {
    pub fn is_covered(&self) -> bool {
        self.count > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A parsed coverage profile.
pub struct Profile {
    pub mode: Mode,
    pub blocks: Vec<Block>,
}
