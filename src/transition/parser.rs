//! Transition expression parser.
//!
//! A transition takes one of three forms, picked by the delimiters present:
//!
//! - `a>b>c` walks down a path, each `>` going one level deeper
//! - `key#integer#notNull` attaches assertions to the value
//! - `key|alias` stores the value under another name
//!
//! The forms combine as `a>b>c#integer|depthVal`. Assertions and alias always
//! trail the last path segment. A transition without any delimiter is a single
//! key looked up among the root's direct children.
//!
//! Grammar problems that still leave a usable token (a second alias, an
//! unknown assertion) are collected instead of returned, so that every problem
//! in a batch of transitions can be reported at once.

use log::debug;

use super::assertion::Assertion;
use super::ast::Token;
use super::error::{MalformedTransition, SyntaxError, SyntaxErrors, TransitionError};
use crate::document::DataValue;

const PATH_DELIMITER: char = '>';
const ASSERTION_DELIMITER: char = '#';
const ALIAS_DELIMITER: char = '|';

/// Parser for transition expressions.
///
/// One parser is used per construction; it accumulates the syntax errors of
/// every expression it has seen.
#[derive(Debug, Default)]
pub struct Parser {
    syntax_errors: Vec<SyntaxError>,
}

impl Parser {
    /// Creates a parser with no collected errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a single transition into a token.
    ///
    /// Recoverable problems are recorded and the token is returned without
    /// the offending part.
    pub fn parse(&mut self, expression: &str) -> Token {
        let path = self.parse_path(expression);
        let assertions = self.parse_assertions(expression);
        let alias = self.parse_alias(expression);

        let token = Token {
            expression: expression.to_string(),
            path,
            assertions,
            alias,
        };
        debug!(
            "parsed transition '{}': path={:?} assertions={:?} alias={:?}",
            expression, token.path, token.assertions, token.alias
        );
        token
    }

    /// Parses a transition given as an arbitrary value.
    ///
    /// Anything other than a string is rejected immediately.
    pub fn parse_value(&mut self, transition: &DataValue) -> Result<Token, MalformedTransition> {
        match transition {
            DataValue::String(expression) => Ok(self.parse(expression)),
            DataValue::Null => Err(MalformedTransition::Null),
            value if value.is_scalar() => Err(MalformedTransition::Scalar(value.to_string())),
            _ => Err(MalformedTransition::Other),
        }
    }

    /// Syntax errors collected so far, in the order they were found.
    pub fn syntax_errors(&self) -> &[SyntaxError] {
        &self.syntax_errors
    }

    /// Consumes the parser, failing if any syntax error was collected.
    pub fn finish(self) -> Result<(), TransitionError> {
        if self.syntax_errors.is_empty() {
            Ok(())
        } else {
            Err(TransitionError::Syntax(SyntaxErrors(self.syntax_errors)))
        }
    }

    fn record(&mut self, expression: &str, message: impl Into<String>) {
        self.syntax_errors.push(SyntaxError::new(expression, message));
    }

    /// Path segments from the root down to, and including, the search key.
    fn parse_path(&mut self, expression: &str) -> Vec<String> {
        let path: Vec<String> = if expression.contains(PATH_DELIMITER) {
            let mut segments: Vec<&str> = expression.split(PATH_DELIMITER).collect();
            let last = segments.pop().unwrap_or_default();

            // Suffixes belong to the last segment only
            let mut path: Vec<String> = segments
                .into_iter()
                .filter(|segment| !has_suffix(segment))
                .map(str::to_string)
                .collect();
            path.push(search_key(last).to_string());
            path
        } else {
            vec![search_key(expression).to_string()]
        };

        if path.iter().any(String::is_empty) {
            self.record(expression, "empty path segment");
        }
        path
    }

    /// Assertions after each `#`, resolved and sorted by name.
    fn parse_assertions(&mut self, expression: &str) -> Vec<Assertion> {
        let mut names: Vec<&str> = expression.split(ASSERTION_DELIMITER).skip(1).collect();
        if let Some(last) = names.last_mut() {
            let current: &str = *last;
            if let Some((name, _alias)) = current.split_once(ALIAS_DELIMITER) {
                *last = name;
            }
        }

        // Execution order is the lexicographic order of names
        names.sort_unstable();
        names.dedup();

        let mut assertions = Vec::with_capacity(names.len());
        for name in names {
            if name.is_empty() {
                self.record(expression, "empty assertion name");
                continue;
            }
            match Assertion::lookup(name) {
                Some(assertion) if assertions.contains(&assertion) => {}
                Some(assertion) => assertions.push(assertion),
                None => self.record(expression, format!("unknown assertion '{}'", name)),
            }
        }
        assertions
    }

    fn parse_alias(&mut self, expression: &str) -> Option<String> {
        let parts: Vec<&str> = expression.split(ALIAS_DELIMITER).collect();
        match parts.as_slice() {
            [_] => None,
            [_, alias] if alias.is_empty() => {
                self.record(expression, "empty alias");
                None
            }
            [_, alias] => Some(alias.to_string()),
            _ => {
                self.record(expression, "only one alias permitted");
                None
            }
        }
    }
}

/// Parses one transition on its own, failing on any syntax error.
///
/// # Example
///
/// ```
/// use datatransit::transition::{parse_transition, Assertion};
///
/// let token = parse_transition("a>b>c#integer|depthVal").unwrap();
/// assert_eq!(token.path, vec!["a", "b", "c"]);
/// assert_eq!(token.assertions, vec![Assertion::Integer]);
/// assert_eq!(token.output_name(), "depthVal");
/// ```
pub fn parse_transition(expression: &str) -> Result<Token, TransitionError> {
    let mut parser = Parser::new();
    let token = parser.parse(expression);
    parser.finish()?;
    Ok(token)
}

fn has_suffix(segment: &str) -> bool {
    segment.contains([ASSERTION_DELIMITER, ALIAS_DELIMITER])
}

/// The part of a segment before any assertion or alias suffix.
fn search_key(segment: &str) -> &str {
    match segment.find([ASSERTION_DELIMITER, ALIAS_DELIMITER]) {
        Some(end) => &segment[..end],
        None => segment,
    }
}
