//! Comment classification: header block, inline commentary, annotations.
//!
//! A file gets at most one **header** run — the comment block a file opens
//! with, after nothing but blank lines. Everything after it is **inline**
//! commentary, except **type-annotation** comments (JSDoc-style tags such as
//! `@param` and `@returns`), which document structure rather than narrate
//! code and are excluded from the countable total the comment-limit check
//! consumes.
//!
//! Classification is state-aware through the same
//! [`StateTracker`](crate::state::StateTracker) the rest of the scanner uses,
//! so comment markers inside strings never open a run.

use serde::{Deserialize, Serialize};

use crate::state::{ScanState, StateTracker};

/// Default countable-comment threshold for the excess-comment check.
pub const DEFAULT_COMMENT_THRESHOLD: usize = 5;

/// JSDoc-style tags that mark a comment as a type annotation.
const ANNOTATION_TAGS: &[&str] = &[
    "@param",
    "@returns",
    "@return",
    "@type",
    "@typedef",
    "@property",
    "@prop",
    "@callback",
];

/// How a comment run is classified.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentKind {
    /// The single leading comment block of the file.
    Header,
    /// Ordinary commentary; counts toward the excess-comment total.
    Inline,
    /// Structured documentation tags; excluded from the countable total.
    TypeAnnotation,
}

/// A contiguous run of comment lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRun {
    /// 1-based first line of the run.
    pub start_line: usize,
    /// 1-based last line of the run, inclusive.
    pub end_line: usize,
    pub kind: CommentKind,
}

/// The result of the excess-comment count when the threshold is exceeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcessComments {
    /// Line of the first countable comment beyond the threshold.
    pub line: usize,
    /// Total countable comments in the file.
    pub count: usize,
}

/// One comment as the lexer sees it: a `//` comment (one line) or a
/// `/* */` block (possibly many). Header merging happens afterwards.
#[derive(Debug)]
struct Segment {
    start_line: usize,
    end_line: usize,
    text: String,
}

impl Segment {
    fn is_annotation(&self) -> bool {
        ANNOTATION_TAGS.iter().any(|tag| self.text.contains(tag))
    }
}

/// Lexical comment segments plus a per-line record of whether any
/// non-comment, non-blank character appeared.
fn collect_segments(text: &str) -> (Vec<Segment>, Vec<bool>) {
    let mut tracker = StateTracker::new();
    let mut segments: Vec<Segment> = Vec::new();
    let mut current: Option<Segment> = None;
    let mut has_code: Vec<bool> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        tracker.newline();
        let mut code_here = false;

        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            let state = tracker.step(c, chars.peek().copied());
            if state.is_comment() {
                let seg = current.get_or_insert_with(|| Segment {
                    start_line: line_no,
                    end_line: line_no,
                    text: String::new(),
                });
                seg.end_line = line_no;
                seg.text.push(c);
            } else {
                if let Some(seg) = current.take() {
                    segments.push(seg);
                }
                if !c.is_whitespace() {
                    code_here = true;
                }
            }
        }

        // Line comments end with their line; block comments stay open.
        if tracker.state() == ScanState::InLineComment {
            if let Some(seg) = current.take() {
                segments.push(seg);
            }
        }
        has_code.push(code_here);
    }

    // An unterminated block comment still yields a run.
    if let Some(seg) = current.take() {
        segments.push(seg);
    }

    (segments, has_code)
}

/// Find the last line of the header block, if the file has one.
///
/// The header starts at the first non-blank line, which must be comment-only,
/// and extends through consecutive comment-only lines (blank lines inside a
/// still-open block comment included). The first code line — or a blank line
/// between two distinct comments — ends it.
fn header_end(segments: &[Segment], has_code: &[bool]) -> Option<usize> {
    let covered = |line: usize| {
        segments
            .iter()
            .any(|s| line >= s.start_line && line <= s.end_line)
    };
    let comment_only = |line: usize| covered(line) && !has_code[line - 1];

    let total = has_code.len();
    let first_content = (1..=total).find(|&l| has_code[l - 1] || covered(l))?;
    if !comment_only(first_content) {
        return None;
    }

    let mut end = first_content;
    while end + 1 <= total && comment_only(end + 1) {
        end += 1;
    }
    Some(end)
}

/// Classify every comment run in a file.
///
/// Never fails; the header run is first when present.
pub fn extract_comment_runs(text: &str) -> Vec<CommentRun> {
    let (segments, has_code) = collect_segments(text);
    let header_end = header_end(&segments, &has_code);

    let mut runs = Vec::new();
    if let (Some(end), Some(first)) = (header_end, segments.first()) {
        runs.push(CommentRun {
            start_line: first.start_line,
            end_line: end,
            kind: CommentKind::Header,
        });
    }

    for seg in &segments {
        if seg.start_line <= header_end.unwrap_or(0) {
            continue;
        }
        runs.push(CommentRun {
            start_line: seg.start_line,
            end_line: seg.end_line,
            kind: if seg.is_annotation() {
                CommentKind::TypeAnnotation
            } else {
                CommentKind::Inline
            },
        });
    }
    runs
}

/// Count countable inline comments against a threshold.
///
/// Returns `None` while the total stays at or under the threshold; otherwise
/// the first offending line and the full count.
pub fn count_excess_comments(text: &str, threshold: usize) -> Option<ExcessComments> {
    let inline: Vec<CommentRun> = extract_comment_runs(text)
        .into_iter()
        .filter(|run| run.kind == CommentKind::Inline)
        .collect();
    (inline.len() > threshold).then(|| ExcessComments {
        line: inline[threshold].start_line,
        count: inline.len(),
    })
}
