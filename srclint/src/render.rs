//! Output rendering for CLI results.

use std::path::{Path, PathBuf};

use console::Style;
use serde::Serialize;
use srclintlib::{ScopeMetric, Violation};

/// JSON payload for `--output json`.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    files_scanned: usize,
    violations: &'a [Violation],
}

/// Convert a path to a relative path from the base directory.
fn make_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| path.to_string_lossy().to_string())
}

/// Render violations as a plain location-per-line listing with a summary.
pub fn render_violations(violations: &[Violation], files_scanned: usize, base: &Path) -> String {
    let location = Style::new().bold();
    let ok = Style::new().green().bold();
    let fail = Style::new().red().bold();

    let mut out = String::new();
    for violation in violations {
        out.push_str(&format!(
            "{}:{}  {}\n",
            location.apply_to(make_relative(&violation.file, base)),
            violation.line,
            violation.detail,
        ));
    }

    if violations.is_empty() {
        out.push_str(&format!(
            "{} ({files_scanned} files scanned)\n",
            ok.apply_to("no violations"),
        ));
    } else {
        let files: std::collections::BTreeSet<&PathBuf> =
            violations.iter().map(|v| &v.file).collect();
        out.push_str(&format!(
            "\n{} in {} files ({files_scanned} files scanned)\n",
            fail.apply_to(format!("{} violations", violations.len())),
            files.len(),
        ));
    }
    out
}

/// Render the `--list-functions` view: every record with span and own lines.
pub fn render_functions(listing: &[(PathBuf, Vec<ScopeMetric>)], base: &Path) -> String {
    let heading = Style::new().bold();

    let mut out = String::new();
    for (file, metrics) in listing {
        out.push_str(&format!("{}\n", heading.apply_to(make_relative(file, base))));
        if metrics.is_empty() {
            out.push_str("  (no functions found)\n");
            continue;
        }
        let name_width = metrics
            .iter()
            .map(|m| m.record.name.len())
            .max()
            .unwrap_or(0)
            .max(4);
        for metric in metrics {
            out.push_str(&format!(
                "  {:<name_width$}  {:>4}..{:<4}  {:>4} lines  {:>4} own\n",
                metric.record.name,
                metric.record.start_line,
                metric.record.end_line,
                metric.record.line_count,
                metric.own_lines,
            ));
        }
    }
    out
}

/// Render results as JSON.
pub fn render_json(violations: &[Violation], files_scanned: usize) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        files_scanned,
        violations,
    })
}
