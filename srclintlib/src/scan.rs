//! Caller-owned, per-file scan cache.
//!
//! Several checks consume the same primitives — function records, scope
//! metrics, declared names, comment runs — for the same file. [`FileScan`]
//! wraps one file's text and computes each primitive at most once, on first
//! use. The cache is an explicit value owned by whoever drives the checks:
//! there is no process-wide state, so scanning many files from many threads
//! is safe by construction, one `FileScan` per file per task.

use std::cell::OnceCell;

use crate::comments::{count_excess_comments, extract_comment_runs, CommentRun, ExcessComments};
use crate::extractor::{extract_functions, FunctionRecord};
use crate::matcher::{extract_declared_names, DeclaredName};
use crate::metrics::{compute_own_lines, ScopeMetric};

/// Lazily computed scan results for a single file's text.
pub struct FileScan<'a> {
    text: &'a str,
    functions: OnceCell<Vec<FunctionRecord>>,
    metrics: OnceCell<Vec<ScopeMetric>>,
    names: OnceCell<Vec<DeclaredName>>,
    comments: OnceCell<Vec<CommentRun>>,
}

impl<'a> FileScan<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            functions: OnceCell::new(),
            metrics: OnceCell::new(),
            names: OnceCell::new(),
            comments: OnceCell::new(),
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Function records, extracted on first use.
    pub fn functions(&self) -> &[FunctionRecord] {
        self.functions.get_or_init(|| extract_functions(self.text))
    }

    /// Scope metrics over [`functions`](Self::functions).
    pub fn metrics(&self) -> &[ScopeMetric] {
        self.metrics.get_or_init(|| compute_own_lines(self.functions()))
    }

    /// Declared names in line order.
    pub fn declared_names(&self) -> &[DeclaredName] {
        self.names.get_or_init(|| extract_declared_names(self.text))
    }

    /// Classified comment runs.
    pub fn comment_runs(&self) -> &[CommentRun] {
        self.comments.get_or_init(|| extract_comment_runs(self.text))
    }

    /// Excess-comment count against `threshold`.
    ///
    /// Not cached: derived cheaply, and the threshold is an argument.
    pub fn excess_comments(&self, threshold: usize) -> Option<ExcessComments> {
        count_excess_comments(self.text, threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "\
// header\n\
function outer() {\n\
  const inner = () => {\n\
    x(); // note\n\
  };\n\
}\n";

    #[test]
    fn primitives_agree_with_direct_calls() {
        let scan = FileScan::new(TEXT);
        assert_eq!(scan.functions(), extract_functions(TEXT).as_slice());
        assert_eq!(scan.declared_names(), extract_declared_names(TEXT).as_slice());
        assert_eq!(scan.comment_runs(), extract_comment_runs(TEXT).as_slice());
    }

    #[test]
    fn repeated_access_returns_the_same_slice() {
        let scan = FileScan::new(TEXT);
        let first = scan.functions().as_ptr();
        let second = scan.functions().as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn metrics_wrap_functions_in_order() {
        let scan = FileScan::new(TEXT);
        let names: Vec<&str> = scan.metrics().iter().map(|m| m.record.name.as_str()).collect();
        let record_names: Vec<&str> = scan.functions().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, record_names);
    }
}
