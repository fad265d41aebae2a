//! Coverage profile parser.
//!
//! The profile starts with a `mode: <set|count|atomic>` line followed by one
//! block per line:
//!
//! ```text
//! <file>:<startLine>.<startCol>,<endLine>.<endCol> <numStmt> <count>
//! ```
//!
//! File names may themselves contain `:`; the greedy file group makes the
//! split happen at the last position that leaves a well-formed span.
//!
//! Blocks describing the same span (as produced when profiles of several
//! packages are concatenated) are merged into one, combining their counts
//! according to the mode.

use crate::error::{Error, Result};
use crate::models::{Block, Mode, Profile};
use log::debug;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

const BLOCK_PATTERN: &str = r"^(.+):([0-9]+)\.([0-9]+),([0-9]+)\.([0-9]+) ([0-9]+) ([0-9]+)$";

fn block_regex() -> &'static Regex {
    static BLOCK_RE: OnceLock<Regex> = OnceLock::new();
    BLOCK_RE.get_or_init(|| Regex::new(BLOCK_PATTERN).expect("block regex failed to compile"))
}

/// Read and parse the profile at `path`.
pub fn read(path: &Path) -> Result<Profile> {
    let data = fs::read_to_string(path).map_err(|source| Error::Profile {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&data)
}

/// Parse profile text into its mode and merged block list.
pub fn parse(input: &str) -> Result<Profile> {
    let re = block_regex();
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end()))
        .filter(|(_, l)| !l.is_empty());

    let mode = match lines.next() {
        Some((no, first)) => parse_mode(first).ok_or_else(|| Error::Parse {
            line: no,
            content: first.to_string(),
        })?,
        None => {
            return Err(Error::Parse {
                line: 1,
                content: String::new(),
            })
        }
    };

    let mut blocks: Vec<Block> = Vec::new();
    // (file, start_line, start_col, end_line, end_col) -> index in `blocks`
    let mut seen: HashMap<(String, u32, u32, u32, u32), usize> = HashMap::new();
    let mut merged = 0usize;
    for (no, line) in lines {
        let block = parse_block(re, line).ok_or_else(|| Error::Parse {
            line: no,
            content: line.to_string(),
        })?;
        let key = (
            block.file_name.clone(),
            block.start_line,
            block.start_col,
            block.end_line,
            block.end_col,
        );
        match seen.get(&key) {
            Some(&idx) => {
                let prev = &mut blocks[idx];
                if prev.num_stmt != block.num_stmt {
                    return Err(Error::InconsistentBlock {
                        file: block.file_name,
                        start_line: block.start_line,
                        start_col: block.start_col,
                        line: no,
                    });
                }
                prev.count = merge_count(mode, prev.count, block.count);
                merged += 1;
            }
            None => {
                seen.insert(key, blocks.len());
                blocks.push(block);
            }
        }
    }
    debug!(
        "parsed profile: mode={} blocks={} merged={}",
        mode,
        blocks.len(),
        merged
    );
    Ok(Profile { mode, blocks })
}

fn parse_mode(line: &str) -> Option<Mode> {
    line.strip_prefix("mode:")?.trim().parse().ok()
}

fn parse_block(re: &Regex, line: &str) -> Option<Block> {
    let caps = re.captures(line)?;
    let num = |i: usize| caps.get(i)?.as_str().parse::<u32>().ok();
    Some(Block {
        file_name: caps.get(1)?.as_str().to_string(),
        start_line: num(2)?,
        start_col: num(3)?,
        end_line: num(4)?,
        end_col: num(5)?,
        num_stmt: num(6)?,
        count: caps.get(7)?.as_str().parse().ok()?,
    })
}

fn merge_count(mode: Mode, a: u64, b: u64) -> u64 {
    match mode {
        Mode::Set => u64::from(a > 0 || b > 0),
        Mode::Count | Mode::Atomic => a.saturating_add(b),
    }
}
