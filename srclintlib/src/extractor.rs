//! Function boundary extraction.
//!
//! The extractor streams a file's characters through the
//! [`StateTracker`](crate::state::StateTracker), keeps a single global
//! nesting-depth counter over `Normal`-state braces, and pairs declaration
//! lines recognized by the [matcher](crate::matcher) with the closing brace
//! that returns the depth to where their body opened. The result is a list of
//! [`FunctionRecord`]s with 1-based, inclusive line ranges.
//!
//! Malformed or truncated input never fails: unmatched closing braces are
//! ignored rather than underflowing the depth counter, and definitions still
//! pending at end of input are discarded.

use serde::{Deserialize, Serialize};

use crate::matcher::match_declaration;
use crate::state::{ScanState, StateTracker};

/// A finalized function found in a file. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub name: String,
    /// 1-based line of the declaration.
    pub start_line: usize,
    /// 1-based line of the closing brace, inclusive.
    pub end_line: usize,
    /// Total span: `end_line - start_line + 1`.
    pub line_count: usize,
}

impl FunctionRecord {
    fn new(name: String, start_line: usize, end_line: usize) -> Self {
        debug_assert!(end_line >= start_line);
        Self {
            name,
            start_line,
            end_line,
            line_count: end_line - start_line + 1,
        }
    }
}

/// A declaration the matcher has seen but whose body has not yet closed.
///
/// `opening_depth` stays unset until the first block-opening brace observed
/// after the match, then is fixed for the entry's lifetime.
#[derive(Debug)]
struct PendingDefinition {
    name: String,
    start_line: usize,
    opening_depth: Option<usize>,
}

/// Extract every function the heuristics can see from raw source text.
///
/// Never fails; malformed input yields a partial or empty list. Records are
/// returned sorted by start line, outer functions before the functions nested
/// within them.
pub fn extract_functions(text: &str) -> Vec<FunctionRecord> {
    let mut tracker = StateTracker::new();
    let mut depth: usize = 0;
    let mut pending: Vec<PendingDefinition> = Vec::new();
    let mut records: Vec<FunctionRecord> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        tracker.newline();

        // The matcher is consulted only for lines that begin in code.
        if tracker.state() == ScanState::Normal {
            if let Some(name) = match_declaration(line) {
                pending.push(PendingDefinition {
                    name,
                    start_line: line_no,
                    opening_depth: None,
                });
            }
        }

        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            if tracker.step(c, chars.peek().copied()) != ScanState::Normal {
                continue;
            }
            match c {
                '{' => {
                    depth += 1;
                    // Every pending definition without a body yet registers
                    // here, so declarations whose brace lands on a later
                    // line all bind to this depth.
                    for def in pending.iter_mut() {
                        if def.opening_depth.is_none() {
                            def.opening_depth = Some(depth);
                        }
                    }
                }
                // Unmatched closers at depth zero are ignored.
                '}' if depth > 0 => {
                    let closing = depth;
                    depth -= 1;
                    // Most-recently-pushed entry at this depth closes; one
                    // entry per delimiter. This is the tie-break for nested
                    // same-depth definitions.
                    if let Some(pos) = pending
                        .iter()
                        .rposition(|def| def.opening_depth == Some(closing))
                    {
                        let def = pending.remove(pos);
                        records.push(FunctionRecord::new(def.name, def.start_line, line_no));
                    }
                }
                _ => {}
            }
        }
    }

    // Entries still pending at end of input are dropped: the file is the
    // unit of truth and truncated sources must not crash the scan.
    records.sort_by(|a, b| (a.start_line, a.end_line).cmp(&(b.start_line, b.end_line)));
    records
}
