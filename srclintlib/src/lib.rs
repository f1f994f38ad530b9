//! # srclintlib
//!
//! A heuristic structural scanner for JavaScript sources, and the lint
//! checks built on top of it.
//!
//! ## Overview
//!
//! Unlike grammar-aware tooling, this library recovers function-level
//! structure (boundaries, nesting, names) and comment structure (header
//! block vs. inline commentary vs. type annotations) from raw text with a
//! line-oriented state machine. It deliberately does not parse: declarations
//! split across lines or computed names are missed, and the downstream
//! checks are tuned against exactly that profile.
//!
//! The pieces, bottom up:
//!
//! - **State tracking** ([`state`]): per-character string/comment context
//! - **Declaration matching** ([`matcher`]): named functions, bound
//!   callables, object properties, method shorthand
//! - **Boundary extraction** ([`extractor`]): brace-depth pairing of
//!   declarations with their closing lines
//! - **Scope metrics** ([`metrics`]): own-line counts net of nested helpers
//! - **Comment classification** ([`comments`]): header, inline, annotation
//! - **Checks** ([`checks`]): length, duplicate-name, alias, destructuring
//!   and comment-limit policies over the scanner output
//!
//! Scanning is pure: text in, records out, no I/O and no global state. Each
//! file scans independently, so callers may fan out across threads and merge
//! the per-file results afterwards.
//!
//! ## Example
//!
//! ```rust
//! use srclintlib::{compute_own_lines, extract_functions};
//!
//! let source = "function hello() {\n  log(\"hi\");\n}\n";
//!
//! let records = extract_functions(source);
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].name, "hello");
//! assert_eq!((records[0].start_line, records[0].end_line), (1, 3));
//!
//! let metrics = compute_own_lines(&records);
//! assert_eq!(metrics[0].own_lines, 3);
//! ```

pub mod checks;
pub mod comments;
pub mod error;
pub mod extractor;
pub mod filter;
pub mod matcher;
pub mod metrics;
pub mod scan;
pub mod state;

pub use checks::{
    check_file, check_text, Check, CheckConfig, FileReport, Location, NameIndex, Violation,
    DEFAULT_MAX_OWN_LINES,
};
pub use comments::{
    count_excess_comments, extract_comment_runs, CommentKind, CommentRun, ExcessComments,
    DEFAULT_COMMENT_THRESHOLD,
};
pub use error::SrclintError;
pub use extractor::{extract_functions, FunctionRecord};
pub use filter::{discover_files, FilterConfig};
pub use matcher::{extract_declared_names, match_declaration, DeclaredName};
pub use metrics::{compute_own_lines, ScopeMetric};
pub use scan::FileScan;
pub use state::{ScanState, StateTracker};

/// Result type for srclintlib operations
pub type Result<T> = std::result::Result<T, SrclintError>;
