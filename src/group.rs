//! Proximity grouping of uncovered lines.
//!
//! Two uncovered lines share a group when their context windows would touch
//! or overlap, i.e. when they are at most `2 * CONTEXT_LINES + 1` lines
//! apart. Chains of such lines collapse into a single group.

use crate::models::{LineGroup, UncoveredLine};

/// Number of context lines shown before and after each group.
pub const CONTEXT_LINES: u32 = 3;

const MERGE_THRESHOLD: u32 = 2 * CONTEXT_LINES + 1;

/// Partition sorted, deduplicated lines into display groups.
pub fn group_lines(lines: &[UncoveredLine]) -> Vec<LineGroup> {
    let mut groups: Vec<LineGroup> = Vec::new();
    let mut iter = lines.iter();
    let Some(first) = iter.next() else {
        return groups;
    };

    let mut current = LineGroup {
        start: first.line,
        end: first.line,
        lines: vec![*first],
    };
    for l in iter {
        if l.line <= current.end.saturating_add(MERGE_THRESHOLD) {
            current.end = l.line;
            current.lines.push(*l);
        } else {
            let next = LineGroup {
                start: l.line,
                end: l.line,
                lines: vec![*l],
            };
            groups.push(std::mem::replace(&mut current, next));
        }
    }
    groups.push(current);
    groups
}
