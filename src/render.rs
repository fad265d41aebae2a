//! Human report rendering.
//!
//! Each file is printed as a bold header with its uncovered/total line
//! counts, a `=` rule, then one block per line group showing the uncovered
//! lines with `CONTEXT_LINES` of context on either side:
//!
//! ```text
//! example/calculator.go (29 of 59 lines uncovered)
//! ================================================
//!       21 }
//!       22
//!       23 // Divide returns the quotient of two numbers
//! >     24 func (c *Calculator) Divide(a, b int) (int, error) {
//! ```
//!
//! Uncovered lines get a red `>` marker and a red line number. With color
//! off no escape codes are added, and source text is copied through as-is.
//!
//! A report is built fully in memory and only written once every file has
//! rendered, so an unreadable source leaves the sink untouched.

use crate::error::{Error, Result};
use crate::group::{group_lines, CONTEXT_LINES};
use crate::models::{FileUncovered, LineGroup};
use crate::source::SourceProvider;
use log::{debug, warn};
use owo_colors::OwoColorize;
use std::io::Write;

const MAX_RULE_WIDTH: usize = 80;

/// Renders uncovered lines with context, reading sources through `S`.
pub struct Renderer<'a, S: ?Sized> {
    source: &'a S,
    color: bool,
}

impl<'a, S: SourceProvider + ?Sized> Renderer<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            color: true,
        }
    }

    /// Enable or disable ANSI styling (on by default).
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Render every file and write the report to `w`.
    ///
    /// Nothing is written when any source file fails to read.
    pub fn render<W: Write>(&self, w: &mut W, files: &[FileUncovered]) -> Result<()> {
        let out = self.render_to_string(files)?;
        w.write_all(out.as_bytes())?;
        w.flush()?;
        Ok(())
    }

    /// Render every file into a string, separating files with a blank line.
    pub fn render_to_string(&self, files: &[FileUncovered]) -> Result<String> {
        let mut out = String::new();
        for (i, file) in files.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            self.render_file(&mut out, file)?;
        }
        Ok(out)
    }

    fn render_file(&self, out: &mut String, file: &FileUncovered) -> Result<()> {
        let bytes = self
            .source
            .read_source(&file.file_name)
            .map_err(|source| Error::Source {
                file: file.file_name.clone(),
                source,
            })?;
        let lines = split_lines(&bytes);

        out.push_str(&file_header(
            &file.file_name,
            file.lines.len(),
            lines.len(),
            self.color,
        ));

        // Lines beyond u32::MAX cannot be named by a profile anyway.
        let total = u32::try_from(lines.len()).unwrap_or(u32::MAX);
        if let Some(last) = file.lines.last() {
            if last.line > total {
                warn!(
                    "{}: uncovered lines past end of file ({} lines); profile may be stale",
                    file.file_name, total
                );
            }
        }

        let groups = group_lines(&file.lines);
        debug!("{}: {} groups", file.file_name, groups.len());
        let mut first = true;
        for group in &groups {
            let Some((start, end)) = visible_range(group, total) else {
                continue;
            };
            if !first {
                out.push('\n');
            }
            first = false;
            for num in start..=end {
                let content = &lines[(num - 1) as usize];
                out.push_str(&render_line(num, content, group.contains(num), self.color));
            }
        }
        Ok(())
    }
}

/// Header line (bold when `color`) plus a `=` rule capped at 80 columns.
///
/// The rule is one `=` per character of the header, so it lines up under
/// non-ASCII file names in a terminal.
pub fn file_header(file_name: &str, uncovered: usize, total: usize, color: bool) -> String {
    let header = format!("{} ({} of {} lines uncovered)", file_name, uncovered, total);
    let width = header.chars().count().min(MAX_RULE_WIDTH);
    let styled = if color {
        header.bold().to_string()
    } else {
        header
    };
    format!("{}\n{}\n", styled, "=".repeat(width))
}

/// Context window of a group clipped to `[1, total]`, or `None` when the
/// whole window lies past the end of the file.
pub fn visible_range(group: &LineGroup, total: u32) -> Option<(u32, u32)> {
    let start = group.start.saturating_sub(CONTEXT_LINES).max(1);
    let end = group.end.saturating_add(CONTEXT_LINES).min(total);
    (start <= end).then_some((start, end))
}

fn render_line(num: u32, content: &str, uncovered: bool, color: bool) -> String {
    let number = format!("{:>5}", num);
    match (uncovered, color) {
        (true, true) => format!("{}  {} {}\n", ">".red(), number.red(), content),
        (true, false) => format!(">  {} {}\n", number, content),
        (false, _) => format!("   {} {}\n", number, content),
    }
}

/// Split raw source bytes into lines, accepting `\n` and `\r\n`.
pub fn split_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_string)
        .collect()
}
