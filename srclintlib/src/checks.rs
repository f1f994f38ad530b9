//! The check layer: policy over the scanner primitives.
//!
//! Each check is a thin rule that consumes [`FileScan`](crate::scan::FileScan)
//! output and emits [`Violation`]s. The scanner core below this module has no
//! notion of failure — a violation is a normal result with file and line
//! context, produced only here.
//!
//! Per-file checks are independent of each other and of other files; the one
//! cross-file concern, duplicate-name detection, goes through a caller-owned
//! [`NameIndex`] that is filled from completed per-file results.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::comments::DEFAULT_COMMENT_THRESHOLD;
use crate::error::SrclintError;
use crate::matcher::{find_aliases, find_destructuring, DeclaredName};
use crate::scan::FileScan;
use crate::Result;

/// Default own-line limit for the function-length check.
pub const DEFAULT_MAX_OWN_LINES: usize = 30;

/// A finding with file and line context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub file: PathBuf,
    /// 1-based line the finding anchors to.
    pub line: usize,
    pub detail: String,
}

/// The individual checks srclint can run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Check {
    /// Function own-line count over the limit.
    Length,
    /// The same name declared in more than one place.
    Duplicates,
    /// `const x = y;` re-binding a bare identifier.
    Aliases,
    /// Destructuring declarations.
    Destructuring,
    /// More countable inline comments than the threshold.
    Comments,
}

impl Check {
    /// Every check, in reporting order.
    pub fn all() -> &'static [Check] {
        &[
            Check::Length,
            Check::Duplicates,
            Check::Aliases,
            Check::Destructuring,
            Check::Comments,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Check::Length => "length",
            Check::Duplicates => "duplicates",
            Check::Aliases => "aliases",
            Check::Destructuring => "destructuring",
            Check::Comments => "comments",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Check {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "length" => Ok(Check::Length),
            "duplicates" => Ok(Check::Duplicates),
            "aliases" => Ok(Check::Aliases),
            "destructuring" => Ok(Check::Destructuring),
            "comments" => Ok(Check::Comments),
            other => Err(format!("unknown check: {other}")),
        }
    }
}

/// Thresholds and selection for a check run.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Own-line limit for the length check.
    pub max_own_lines: usize,
    /// Countable inline-comment threshold.
    pub max_inline_comments: usize,
    /// Which checks run; empty means all.
    pub checks: Vec<Check>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            max_own_lines: DEFAULT_MAX_OWN_LINES,
            max_inline_comments: DEFAULT_COMMENT_THRESHOLD,
            checks: Vec::new(),
        }
    }
}

impl CheckConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(&self, check: Check) -> bool {
        self.checks.is_empty() || self.checks.contains(&check)
    }
}

/// Everything learned from checking one file.
///
/// Declared names ride along so the caller can feed a [`NameIndex`] without
/// rescanning; the cross-file map belongs to the caller, not to this layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub file: PathBuf,
    pub violations: Vec<Violation>,
    pub names: Vec<DeclaredName>,
}

/// Flag functions whose own-line count exceeds the limit.
pub fn check_function_length(file: &Path, scan: &FileScan, max_own_lines: usize) -> Vec<Violation> {
    scan.metrics()
        .iter()
        .filter(|metric| metric.own_lines > max_own_lines)
        .map(|metric| Violation {
            file: file.to_path_buf(),
            line: metric.record.start_line,
            detail: format!(
                "function '{}' has {} own lines (limit {})",
                metric.record.name, metric.own_lines, max_own_lines
            ),
        })
        .collect()
}

/// Flag alias bindings (`const x = y;`).
pub fn check_aliases(file: &Path, scan: &FileScan) -> Vec<Violation> {
    find_aliases(scan.text())
        .into_iter()
        .map(|alias| Violation {
            file: file.to_path_buf(),
            line: alias.line,
            detail: format!("'{}' is an alias of '{}'", alias.alias, alias.target),
        })
        .collect()
}

/// Flag destructuring declarations.
pub fn check_destructuring(file: &Path, scan: &FileScan) -> Vec<Violation> {
    find_destructuring(scan.text())
        .into_iter()
        .map(|binding| Violation {
            file: file.to_path_buf(),
            line: binding.line,
            detail: format!("destructuring declaration '{}'", binding.pattern),
        })
        .collect()
}

/// Flag a file whose countable inline comments exceed the threshold.
pub fn check_excess_comments(file: &Path, scan: &FileScan, threshold: usize) -> Vec<Violation> {
    scan.excess_comments(threshold)
        .map(|excess| Violation {
            file: file.to_path_buf(),
            line: excess.line,
            detail: format!(
                "{} inline comments (limit {})",
                excess.count, threshold
            ),
        })
        .into_iter()
        .collect()
}

/// Run the configured per-file checks over one file's text.
///
/// Duplicate detection is cross-file and not run here; the report carries
/// the declared names for the caller's [`NameIndex`].
pub fn check_text(file: &Path, text: &str, config: &CheckConfig) -> FileReport {
    let scan = FileScan::new(text);
    let mut violations = Vec::new();

    if config.enabled(Check::Length) {
        violations.extend(check_function_length(file, &scan, config.max_own_lines));
    }
    if config.enabled(Check::Aliases) {
        violations.extend(check_aliases(file, &scan));
    }
    if config.enabled(Check::Destructuring) {
        violations.extend(check_destructuring(file, &scan));
    }
    if config.enabled(Check::Comments) {
        violations.extend(check_excess_comments(file, &scan, config.max_inline_comments));
    }

    let names = if config.enabled(Check::Duplicates) {
        scan.declared_names().to_vec()
    } else {
        Vec::new()
    };

    FileReport {
        file: file.to_path_buf(),
        violations,
        names,
    }
}

/// Read a file and run the configured checks over it.
pub fn check_file(path: &Path, config: &CheckConfig) -> Result<FileReport> {
    let text = fs::read_to_string(path).map_err(|e| SrclintError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(check_text(path, &text, config))
}

/// A declaration site, for the duplicate-name index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
}

/// Cross-file map of declared name to every location declaring it.
///
/// Owned by the coordinating caller and filled sequentially from completed
/// per-file reports — never shared mutably across scanning tasks.
#[derive(Debug, Default)]
pub struct NameIndex {
    names: BTreeMap<String, Vec<Location>>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one file's declared names.
    pub fn record(&mut self, file: &Path, names: &[DeclaredName]) {
        for declared in names {
            self.names
                .entry(declared.name.clone())
                .or_default()
                .push(Location {
                    file: file.to_path_buf(),
                    line: declared.line,
                });
        }
    }

    /// Names declared at more than one location, in name order.
    pub fn duplicates(&self) -> impl Iterator<Item = (&str, &[Location])> {
        self.names
            .iter()
            .filter(|(_, locations)| locations.len() > 1)
            .map(|(name, locations)| (name.as_str(), locations.as_slice()))
    }

    /// One violation per location of every duplicated name.
    pub fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        for (name, locations) in self.duplicates() {
            for location in locations {
                out.push(Violation {
                    file: location.file.clone(),
                    line: location.line,
                    detail: format!(
                        "'{name}' is declared in {} places",
                        locations.len()
                    ),
                });
            }
        }
        out
    }
}
