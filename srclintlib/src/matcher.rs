//! Line-level recognition of function and method declarations.
//!
//! The matcher works on a single line of text and recognizes a small fixed
//! set of declaration idioms, extracting the declared name:
//!
//! - named functions: `function render(...)`, with optional `export`,
//!   `export default`, `async` and generator `*` prefixes
//! - variable-bound callables: `const render = function (...)`,
//!   `let render = async (...) => ...`
//! - object-literal properties: `render: function (...)`, `render: () => ...`
//! - object-method shorthand: `render(data) {`
//!
//! There is no lookahead beyond the current line: a declaration whose
//! parameter list spans several lines, or whose name is computed, is not
//! recognized. Downstream checks are tuned against that blind spot, so the
//! matcher must stay line-bound.
//!
//! The matcher itself is string- and comment-blind; callers consult it only
//! for lines that begin in [`ScanState::Normal`](crate::state::ScanState).

use serde::{Deserialize, Serialize};

use crate::state::{ScanState, StateTracker};

/// A name recognized by the declaration matcher, with the line it was seen on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredName {
    pub name: String,
    /// 1-based line number of the declaration line.
    pub line: usize,
}

/// A `const x = y;` style binding of one bare identifier to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasBinding {
    /// The newly bound name.
    pub alias: String,
    /// The identifier it re-binds.
    pub target: String,
    /// 1-based line number of the binding.
    pub line: usize,
}

/// A destructuring declaration (`const { a, b } = ...` or `let [x] = ...`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestructuredBinding {
    /// The pattern text, as written, up to the `=`.
    pub pattern: String,
    /// 1-based line number of the declaration.
    pub line: usize,
}

/// Control-flow and operator keywords that look like method shorthand.
const NON_NAMES: &[&str] = &[
    "if", "for", "while", "switch", "catch", "return", "function", "typeof", "new", "do", "else",
    "await", "yield", "in", "of", "delete", "void", "case",
];

/// Identifier-shaped literals that are never alias targets.
const LITERAL_IDENTS: &[&str] = &["true", "false", "null", "undefined", "this"];

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Split a leading identifier off `s`, returning `(ident, rest)`.
fn split_ident(s: &str) -> Option<(&str, &str)> {
    let mut chars = s.char_indices();
    match chars.next() {
        Some((_, c)) if is_ident_start(c) => {}
        _ => return None,
    }
    let end = chars
        .find(|(_, c)| !is_ident_char(*c))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    Some((&s[..end], &s[end..]))
}

/// Strip `keyword` plus at least one following space, at a word boundary.
fn strip_keyword<'a>(s: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(keyword)?;
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => Some(rest.trim_start()),
        _ => None,
    }
}

fn strip_any_keyword<'a>(s: &'a str, keywords: &[&str]) -> Option<&'a str> {
    keywords.iter().find_map(|k| strip_keyword(s, k))
}

/// Whether an expression (the text after `=` or `:`) looks callable on this line.
///
/// Heuristic: a `function` keyword or an arrow. The arrow test is a plain
/// substring search, so an arrow inside a string literal on the same line is
/// a known false positive.
fn is_callable_expr(expr: &str) -> bool {
    let expr = strip_keyword(expr, "async").unwrap_or(expr);
    expr == "function"
        || strip_keyword(expr, "function").is_some()
        || expr.starts_with("function*")
        || expr.starts_with("function(")
        || expr.contains("=>")
}

/// `[export] [default] [async] function [*] name (` forms.
fn named_function(line: &str) -> Option<String> {
    let line = strip_keyword(line, "export").unwrap_or(line);
    let line = strip_keyword(line, "default").unwrap_or(line);
    let line = strip_keyword(line, "async").unwrap_or(line);
    let rest = strip_keyword(line, "function").or_else(|| {
        // `function*name` / `function* name` — the star may bind tightly.
        line.strip_prefix("function")
            .and_then(|r| r.strip_prefix('*'))
            .map(str::trim_start)
    })?;
    let rest = rest.strip_prefix('*').map(str::trim_start).unwrap_or(rest);
    let (name, after) = split_ident(rest)?;
    after.trim_start().starts_with('(').then(|| name.to_string())
}

/// `[export] const|let|var name = <callable>` forms. The bound name wins
/// over any inner `function` expression name.
fn bound_callable(line: &str) -> Option<String> {
    let line = strip_keyword(line, "export").unwrap_or(line);
    let rest = strip_any_keyword(line, &["const", "let", "var"])?;
    let (name, after) = split_ident(rest)?;
    let after = after.trim_start().strip_prefix('=')?;
    // Reject `==`/`=>` — an equals here must be plain assignment.
    if after.starts_with('=') || after.starts_with('>') {
        return None;
    }
    is_callable_expr(after.trim_start()).then(|| name.to_string())
}

/// `name: function (...)` / `name: (...) => ...` object-literal properties.
fn property_callable(line: &str) -> Option<String> {
    let (name, after) = split_ident(line)?;
    if NON_NAMES.contains(&name) {
        return None;
    }
    let after = after.trim_start().strip_prefix(':')?;
    is_callable_expr(after.trim_start()).then(|| name.to_string())
}

/// `[async] [*] name(args) {` object-method shorthand.
///
/// The body brace must be the last non-whitespace character after the final
/// `)`, and the parameter list must not itself contain parentheses. Together
/// these keep plain call statements and nested callback arguments from
/// matching.
fn method_shorthand(line: &str) -> Option<String> {
    let line = strip_keyword(line, "async").unwrap_or(line);
    let line = line.strip_prefix('*').map(str::trim_start).unwrap_or(line);
    let (name, after) = split_ident(line)?;
    if NON_NAMES.contains(&name) {
        return None;
    }
    let open = after.trim_start().starts_with('(').then(|| after.find('('))??;
    let close = after.rfind(')')?;
    let params = after.get(open + 1..close)?;
    if params.contains('(') || params.contains(')') {
        return None;
    }
    (after[close + 1..].trim() == "{").then(|| name.to_string())
}

/// Attempt to match one declaration idiom on a line, returning the name.
///
/// The first matching idiom wins; the order is named function, variable
/// binding, object property, method shorthand.
pub fn match_declaration(line: &str) -> Option<String> {
    let trimmed = line.trim_start();
    named_function(trimmed)
        .or_else(|| bound_callable(trimmed))
        .or_else(|| property_callable(trimmed))
        .or_else(|| method_shorthand(trimmed))
}

/// Collect every declared name in a file, in line order.
///
/// State-aware: lines that begin inside a string or comment are skipped,
/// matching how the depth extractor consults the matcher.
pub fn extract_declared_names(text: &str) -> Vec<DeclaredName> {
    scan_lines(text, |line, line_no, out: &mut Vec<DeclaredName>| {
        if let Some(name) = match_declaration(line) {
            out.push(DeclaredName { name, line: line_no });
        }
    })
}

/// Collect `const x = y;` style alias bindings.
///
/// Only bare identifier targets count: any call, operator or literal on the
/// right-hand side disqualifies the line.
pub fn find_aliases(text: &str) -> Vec<AliasBinding> {
    scan_lines(text, |line, line_no, out: &mut Vec<AliasBinding>| {
        if let Some(binding) = match_alias(line, line_no) {
            out.push(binding);
        }
    })
}

fn match_alias(line: &str, line_no: usize) -> Option<AliasBinding> {
    let trimmed = line.trim_start();
    let trimmed = strip_keyword(trimmed, "export").unwrap_or(trimmed);
    let rest = strip_any_keyword(trimmed, &["const", "let", "var"])?;
    let (alias, after) = split_ident(rest)?;
    let after = after.trim_start().strip_prefix('=')?;
    if after.starts_with('=') || after.starts_with('>') {
        return None;
    }
    let (target, tail) = split_ident(after.trim_start())?;
    if LITERAL_IDENTS.contains(&target) || NON_NAMES.contains(&target) {
        return None;
    }
    let tail = tail.trim_end();
    (tail.is_empty() || tail == ";").then(|| AliasBinding {
        alias: alias.to_string(),
        target: target.to_string(),
        line: line_no,
    })
}

/// Collect destructuring declarations (`const { a } = ...`, `let [x] = ...`).
pub fn find_destructuring(text: &str) -> Vec<DestructuredBinding> {
    scan_lines(text, |line, line_no, out: &mut Vec<DestructuredBinding>| {
        if let Some(binding) = match_destructuring(line, line_no) {
            out.push(binding);
        }
    })
}

fn match_destructuring(line: &str, line_no: usize) -> Option<DestructuredBinding> {
    let trimmed = line.trim_start();
    let trimmed = strip_keyword(trimmed, "export").unwrap_or(trimmed);
    let rest = strip_any_keyword(trimmed, &["const", "let", "var"])?;
    if !rest.starts_with('{') && !rest.starts_with('[') {
        return None;
    }
    let pattern = match rest.find('=') {
        Some(eq) => rest[..eq].trim_end(),
        None => rest.trim_end(),
    };
    Some(DestructuredBinding {
        pattern: pattern.to_string(),
        line: line_no,
    })
}

/// Drive a per-line matcher over the file, line-state aware.
fn scan_lines<T>(text: &str, mut visit: impl FnMut(&str, usize, &mut Vec<T>)) -> Vec<T> {
    let mut tracker = StateTracker::new();
    let mut out = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        tracker.newline();
        if tracker.state() == ScanState::Normal {
            visit(line, idx + 1, &mut out);
        }
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            tracker.step(c, chars.peek().copied());
        }
    }
    out
}
