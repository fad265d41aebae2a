//! Output rendering for the uncovered report.
//!
//! Supports `human` (default) and `json` outputs. The human form is produced
//! by the renderer, styled only when color is enabled. The JSON form lists uncovered lines and groups per file plus a
//! top-level summary, without reading any source file.

use crate::error::Result;
use crate::group::group_lines;
use crate::models::{FileUncovered, Summary};
use crate::render::Renderer;
use crate::source::SourceProvider;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::io::{IsTerminal, Write};

/// Whether to emit ANSI styling.
pub fn use_colors(output: &str, color: &str) -> bool {
    if output == "json" {
        return false;
    }
    match color {
        "always" => true,
        "never" => false,
        _ => std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal(),
    }
}

/// Print the report in the requested format.
pub fn print_report<S, W>(
    w: &mut W,
    files: &[FileUncovered],
    source: &S,
    output: &str,
    color: bool,
) -> Result<()>
where
    S: SourceProvider + ?Sized,
    W: Write,
{
    match output {
        "json" => {
            let out = serde_json::to_string_pretty(&compose_report_json(files))
                .map_err(std::io::Error::from)?;
            writeln!(w, "{}", out)?;
        }
        _ => {
            let rendered = Renderer::new(source)
                .with_color(color)
                .render_to_string(files)?;
            w.write_all(rendered.as_bytes())?;
        }
    }
    w.flush()?;
    Ok(())
}

/// Compose report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(files: &[FileUncovered]) -> JsonVal {
    let items: Vec<_> = files
        .iter()
        .map(|f| {
            json!({
                "file": f.file_name,
                "lines": f.lines,
                "groups": group_lines(&f.lines),
            })
        })
        .collect();
    let summary = Summary {
        files: files.len(),
        lines: files.iter().map(|f| f.lines.len()).sum(),
    };
    json!({"files": items, "summary": summary})
}
