//! Console lines for both use cases.

use crate::pack::PackOutput;
use uisync_types::{FileOutcome, MarkerOutcome};

/// One console line per file. `Failed` lines belong on stderr; the rest on stdout.
pub fn render_file_outcome(outcome: &FileOutcome, directive: &str) -> String {
    let path = outcome.path.as_str();
    match outcome.outcome {
        MarkerOutcome::Added => format!("Added {directive} to: {path}"),
        MarkerOutcome::AlreadyPresent => format!("Skipping (already has {directive}): {path}"),
        MarkerOutcome::Missing => format!("Missing {directive}: {path}"),
        MarkerOutcome::Failed => format!(
            "Error processing {path}: {}",
            outcome.message.as_deref().unwrap_or("unknown error")
        ),
    }
}

pub fn render_pack_lines(out: &PackOutput) -> Vec<String> {
    let mut lines: Vec<String> = out
        .entries
        .iter()
        .map(|e| format!("Packed {}", e.name))
        .collect();
    let count = out.entries.len();
    if out.changed {
        lines.push(format!("Wrote {count} entries to {}", out.manifest_path));
    } else {
        lines.push(format!(
            "Manifest already up to date: {} ({count} entries)",
            out.manifest_path
        ));
    }
    lines
}
