//! Own-line metrics over extracted function records.
//!
//! A function's raw span counts every line between its declaration and its
//! closing brace, which penalizes functions that merely contain nested
//! helpers. The metric used by the length check is the "own" line count:
//! the span minus the spans of records strictly nested inside it.

use serde::{Deserialize, Serialize};

use crate::extractor::FunctionRecord;

/// A [`FunctionRecord`] augmented with its own-line count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeMetric {
    pub record: FunctionRecord,
    /// Span minus the spans of all records strictly nested inside.
    pub own_lines: usize,
}

/// Whether `inner` is strictly nested inside `outer`.
///
/// The extractor only produces well-nested ranges, so strict containment on
/// both ends is the whole test; partial overlap cannot occur.
fn strictly_inside(inner: &FunctionRecord, outer: &FunctionRecord) -> bool {
    inner.start_line > outer.start_line && inner.end_line < outer.end_line
}

/// Compute own-line counts for a file's records.
///
/// Only maximal nested records are subtracted: a grandchild's span is already
/// inside its parent's, and subtracting it again would double count. This is
/// what keeps the own-line counts a partition of the file — summing every
/// record's own lines plus the lines outside all records gives the total.
///
/// Pure and order-preserving: the output metric at index `i` wraps the input
/// record at index `i`. Quadratic in the record count, which is fine at the
/// sizes single files reach.
pub fn compute_own_lines(records: &[FunctionRecord]) -> Vec<ScopeMetric> {
    records
        .iter()
        .map(|record| {
            let nested: usize = records
                .iter()
                .filter(|other| {
                    strictly_inside(other, record)
                        && !records.iter().any(|mid| {
                            strictly_inside(mid, record) && strictly_inside(other, mid)
                        })
                })
                .map(|other| other.line_count)
                .sum();
            ScopeMetric {
                record: record.clone(),
                own_lines: record.line_count.saturating_sub(nested),
            }
        })
        .collect()
}
