//! Uncovered line extraction.
//!
//! Expands every zero-count block into the lines it spans and reduces them to
//! one entry per `(file, line)`. When several blocks touch the same line the
//! smallest column wins, and continuation lines carry column `0`, so a line
//! that is uncovered from its start always reports `0`. The reduction is a
//! minimum, which makes the result independent of block order.

use crate::models::{Block, FileUncovered, UncoveredLine};
use log::debug;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Collect uncovered lines per file.
///
/// Files are returned sorted by name and lines sorted ascending. Files with
/// no uncovered lines do not appear.
pub fn uncovered_lines(blocks: &[Block]) -> Vec<FileUncovered> {
    let mut files: BTreeMap<&str, BTreeMap<u32, u32>> = BTreeMap::new();

    for block in blocks.iter().filter(|b| !b.is_covered()) {
        // An inverted span contributes nothing.
        if block.end_line < block.start_line {
            continue;
        }
        let table = files.entry(block.file_name.as_str()).or_default();
        for line in block.start_line..=block.end_line {
            let col = if line == block.start_line {
                block.start_col
            } else {
                0
            };
            match table.entry(line) {
                Entry::Vacant(e) => {
                    e.insert(col);
                }
                Entry::Occupied(mut e) => {
                    if col < *e.get() {
                        e.insert(col);
                    }
                }
            }
        }
    }

    let result: Vec<FileUncovered> = files
        .into_iter()
        .map(|(name, table)| FileUncovered {
            file_name: name.to_string(),
            lines: table
                .into_iter()
                .map(|(line, col)| UncoveredLine { line, col })
                .collect(),
        })
        .collect();
    debug!(
        "extracted {} uncovered lines across {} files",
        result.iter().map(|f| f.lines.len()).sum::<usize>(),
        result.len()
    );
    result
}
