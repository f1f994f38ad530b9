//! Lexical state tracking for JavaScript source text.
//!
//! This module provides the per-character classifier underneath the whole
//! scanner: at any position it knows whether the cursor sits inside a quoted
//! string, a template (interpolated) string, a line comment, or a block
//! comment. The depth extractor and the comment classifier both drive a
//! [`StateTracker`] character by character and act only on characters the
//! tracker reports as [`ScanState::Normal`].
//!
//! The tracker is deliberately not a grammar-aware lexer. Regex literals are
//! not recognized, and the `${...}` sub-expressions of template strings are
//! not tracked separately: the whole template body, interpolations included,
//! is absorbed until the closing backtick. A stray backtick or brace inside a
//! template sub-expression can therefore desynchronize the outer scan. This
//! mirrors the heuristic the downstream checks are tuned against.

/// The lexical context assigned to a character position.
///
/// Exactly one state is active at any scan position. Transitions are only
/// honored when the current state is `Normal` or matches the state being
/// exited: a quote character inside a block comment never changes state, and
/// a comment marker inside a string never starts a comment.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// Plain code; block delimiters here are visible to the depth extractor.
    Normal,
    /// Inside a `'...'` string literal.
    InSingleQuoted,
    /// Inside a `"..."` string literal.
    InDoubleQuoted,
    /// Inside a template string. Interpolation braces are not tracked.
    InInterpolated,
    /// Inside a `//` comment; exits at end of line via [`StateTracker::newline`].
    InLineComment,
    /// Inside a `/* ... */` comment.
    InBlockComment,
}

impl ScanState {
    /// Whether a character in this state is part of a comment.
    pub fn is_comment(self) -> bool {
        matches!(self, ScanState::InLineComment | ScanState::InBlockComment)
    }

    /// Whether a character in this state is part of a string literal.
    pub fn is_string(self) -> bool {
        matches!(
            self,
            ScanState::InSingleQuoted | ScanState::InDoubleQuoted | ScanState::InInterpolated
        )
    }
}

/// Walks source text one character at a time and classifies each position.
///
/// Feed every character of a line through [`step`](Self::step) along with a
/// one-character lookahead, and call [`newline`](Self::newline) between lines.
/// `step` returns the state *in effect* for the character it was given: the
/// opening marker of a construct already belongs to that construct, and the
/// closing marker still does.
#[derive(Debug, Default)]
pub struct StateTracker {
    state: ScanState,
    // State to report for the second character of a two-character marker.
    pending: Option<ScanState>,
    // Set when the previous string character was an unconsumed backslash.
    escaped: bool,
}

impl Default for ScanState {
    fn default() -> Self {
        ScanState::Normal
    }
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The state the next character would be judged in.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Reset line-scoped state at a line boundary.
    ///
    /// Line comments end with their line; everything else carries over, so an
    /// unterminated string or block comment stays open into the next line
    /// (and, for malformed input, to end of file).
    pub fn newline(&mut self) {
        if self.state == ScanState::InLineComment {
            self.state = ScanState::Normal;
        }
        self.pending = None;
    }

    /// Advance over one character and return the state governing it.
    ///
    /// `next` is the following character on the same line, if any; it is only
    /// inspected, never consumed, except that two-character markers (`//`,
    /// `/*`, `*/`) claim their second character on the subsequent call.
    pub fn step(&mut self, curr: char, next: Option<char>) -> ScanState {
        if let Some(state) = self.pending.take() {
            return state;
        }

        match self.state {
            ScanState::Normal => match curr {
                '/' if next == Some('/') => self.open(ScanState::InLineComment),
                '/' if next == Some('*') => self.open(ScanState::InBlockComment),
                '\'' => self.enter_string(ScanState::InSingleQuoted),
                '"' => self.enter_string(ScanState::InDoubleQuoted),
                '`' => self.enter_string(ScanState::InInterpolated),
                _ => ScanState::Normal,
            },
            ScanState::InLineComment => ScanState::InLineComment,
            ScanState::InBlockComment => {
                if curr == '*' && next == Some('/') {
                    self.state = ScanState::Normal;
                    self.pending = Some(ScanState::InBlockComment);
                }
                ScanState::InBlockComment
            }
            ScanState::InSingleQuoted => self.string_char(curr, '\''),
            ScanState::InDoubleQuoted => self.string_char(curr, '"'),
            ScanState::InInterpolated => {
                // The delimiter toggles unconditionally; interpolation braces
                // and escapes are absorbed without further tracking.
                if curr == '`' {
                    self.state = ScanState::Normal;
                }
                ScanState::InInterpolated
            }
        }
    }

    fn open(&mut self, state: ScanState) -> ScanState {
        self.state = state;
        self.pending = Some(state);
        state
    }

    fn enter_string(&mut self, state: ScanState) -> ScanState {
        self.state = state;
        self.escaped = false;
        state
    }

    fn string_char(&mut self, curr: char, quote: char) -> ScanState {
        let state = self.state;
        if self.escaped {
            self.escaped = false;
        } else if curr == '\\' {
            self.escaped = true;
        } else if curr == quote {
            self.state = ScanState::Normal;
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run a single line through the tracker, returning each char's state.
    fn states(line: &str) -> Vec<(char, ScanState)> {
        let mut tracker = StateTracker::new();
        states_with(&mut tracker, line)
    }

    fn states_with(tracker: &mut StateTracker, line: &str) -> Vec<(char, ScanState)> {
        tracker.newline();
        let mut out = Vec::new();
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            out.push((c, tracker.step(c, chars.peek().copied())));
        }
        out
    }

    fn state_of(line: &str, ch: char) -> ScanState {
        states(line)
            .into_iter()
            .find(|(c, _)| *c == ch)
            .map(|(_, s)| s)
            .unwrap()
    }

    #[test]
    fn plain_code_is_normal() {
        for (_, state) in states("let x = 1;") {
            assert_eq!(state, ScanState::Normal);
        }
    }

    #[test]
    fn line_comment_masks_rest_of_line() {
        let states = states("x(); // open { here");
        assert_eq!(states[0].1, ScanState::Normal);
        assert_eq!(states.last().unwrap().1, ScanState::InLineComment);
        assert_eq!(
            states.iter().find(|(c, _)| *c == '{').unwrap().1,
            ScanState::InLineComment
        );
    }

    #[test]
    fn line_comment_ends_at_newline() {
        let mut tracker = StateTracker::new();
        states_with(&mut tracker, "// comment");
        assert_eq!(tracker.state(), ScanState::InLineComment);
        tracker.newline();
        assert_eq!(tracker.state(), ScanState::Normal);
    }

    #[test]
    fn block_comment_spans_lines() {
        let mut tracker = StateTracker::new();
        states_with(&mut tracker, "/* first");
        tracker.newline();
        assert_eq!(tracker.state(), ScanState::InBlockComment);
        let states = states_with(&mut tracker, "still { masked } */ x");
        assert_eq!(
            states.iter().find(|(c, _)| *c == '{').unwrap().1,
            ScanState::InBlockComment
        );
        assert_eq!(states.last().unwrap().1, ScanState::Normal);
    }

    #[test]
    fn block_close_marker_belongs_to_comment() {
        let states = states("/* x */ y");
        let slash = states
            .iter()
            .rev()
            .find(|(c, _)| *c == '/')
            .map(|(_, s)| *s)
            .unwrap();
        assert_eq!(slash, ScanState::InBlockComment);
        assert_eq!(states.last().unwrap().1, ScanState::Normal);
    }

    #[test]
    fn braces_in_strings_are_masked() {
        assert_eq!(state_of("x = \"{ not code }\";", '{'), ScanState::InDoubleQuoted);
        assert_eq!(state_of("x = '{';", '{'), ScanState::InSingleQuoted);
        assert_eq!(state_of("x = `a { b`;", '{'), ScanState::InInterpolated);
    }

    #[test]
    fn comment_markers_in_strings_do_not_open_comments() {
        let states = states("url = \"http://example.com\"; x");
        assert_eq!(states.last().unwrap().1, ScanState::Normal);
    }

    #[test]
    fn quotes_in_comments_do_not_open_strings() {
        let mut tracker = StateTracker::new();
        states_with(&mut tracker, "/* it's fine */");
        assert_eq!(tracker.state(), ScanState::Normal);
    }

    #[test]
    fn escaped_quote_stays_in_string() {
        let states = states(r#"x = "a\"b"; y"#);
        assert_eq!(states.last().unwrap().1, ScanState::Normal);
        // The char after the escaped quote is still inside the string.
        assert_eq!(states.iter().find(|(c, _)| *c == 'b').unwrap().1, ScanState::InDoubleQuoted);
    }

    #[test]
    fn escaped_backslash_then_quote_closes() {
        let states = states(r#"x = "a\\"; y"#);
        assert_eq!(states.last().unwrap().1, ScanState::Normal);
        assert_eq!(states.iter().find(|(c, _)| *c == 'y').unwrap().1, ScanState::Normal);
    }

    #[test]
    fn unterminated_string_stays_open() {
        let mut tracker = StateTracker::new();
        states_with(&mut tracker, "x = \"never closed");
        tracker.newline();
        assert_eq!(tracker.state(), ScanState::InDoubleQuoted);
    }

    #[test]
    fn template_delimiter_toggles() {
        let mut tracker = StateTracker::new();
        states_with(&mut tracker, "x = `multi");
        tracker.newline();
        assert_eq!(tracker.state(), ScanState::InInterpolated);
        states_with(&mut tracker, "line`;");
        assert_eq!(tracker.state(), ScanState::Normal);
    }

    #[test]
    fn interpolation_braces_are_absorbed() {
        // Known limitation: the ${ } pair is masked wholesale, not tracked.
        let states = states("x = `v ${a + b}`; z");
        for (c, state) in &states {
            if *c == '{' || *c == '}' {
                assert_eq!(*state, ScanState::InInterpolated);
            }
        }
        assert_eq!(states.last().unwrap().1, ScanState::Normal);
    }
}
