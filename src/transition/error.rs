//! Error types for transition parsing, matching and result access.

use std::fmt;

use thiserror::Error;

use super::assertion::Assertion;
use crate::document::DataValue;

/// A transition that was not given as a string.
///
/// Raised the moment the offending entry is parsed; nothing after it is looked at.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedTransition {
    #[error("invalid transition for value {0}. Every transition should be a string")]
    Scalar(String),
    #[error("invalid transition. Every transition should be a string. Null given")]
    Null,
    #[error("invalid transition. Every transition should be a string")]
    Other,
}

/// One recoverable grammar problem found while parsing a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub expression: String,
    pub message: String,
}

impl SyntaxError {
    pub fn new(expression: &str, message: impl Into<String>) -> Self {
        Self {
            expression: expression.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transition '{}': {}", self.expression, self.message)
    }
}

/// Every syntax error collected over one construction, reported together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrors(pub Vec<SyntaxError>);

impl SyntaxErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SyntaxError> {
        self.0.iter()
    }
}

impl fmt::Display for SyntaxErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid transition syntax:")?;
        for error in &self.0 {
            write!(f, "\n  - {}", error)?;
        }
        Ok(())
    }
}

/// A found value rejected by one of its token's assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct AssertionFailure {
    pub assertion: Assertion,
    pub search_key: String,
    pub value: DataValue,
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "assertion '{}' failed for '{}': got {} {}",
            self.assertion,
            self.search_key,
            self.value.type_name(),
            self.value
        )
    }
}

/// Errors that abort the construction of a `DataTransition`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransitionError {
    #[error("at least one transition is required")]
    EmptyTransitions,

    #[error("source data must be a non-empty object or array")]
    EmptySource,

    #[error(transparent)]
    Malformed(#[from] MalformedTransition),

    #[error("{0}")]
    Syntax(SyntaxErrors),

    #[error("{0}")]
    AssertionFailed(AssertionFailure),

    /// Walking finished without a single token resolving to a value.
    #[error("internal error: no transition resolved to a value")]
    NoMatches,
}

impl TransitionError {
    /// True for failures caused by the engine rather than its input.
    pub fn is_internal(&self) -> bool {
        matches!(self, TransitionError::NoMatches)
    }
}

impl From<AssertionFailure> for TransitionError {
    fn from(failure: AssertionFailure) -> Self {
        TransitionError::AssertionFailed(failure)
    }
}

/// Errors from reading or writing an already built result set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("no value extracted under '{0}'")]
    NotFound(String),

    #[error("'{0}' is not an extracted key; new keys cannot be added")]
    OutOfRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_messages() {
        assert_eq!(
            MalformedTransition::Scalar("6".to_string()).to_string(),
            "invalid transition for value 6. Every transition should be a string"
        );
        assert!(MalformedTransition::Null.to_string().ends_with("Null given"));
        assert_eq!(
            MalformedTransition::Other.to_string(),
            "invalid transition. Every transition should be a string"
        );
    }

    #[test]
    fn test_syntax_errors_are_listed_one_per_line() {
        let errors = SyntaxErrors(vec![
            SyntaxError::new("a|b|c", "only one alias permitted"),
            SyntaxError::new("x#nope", "unknown assertion 'nope'"),
        ]);
        let message = TransitionError::Syntax(errors).to_string();
        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "invalid transition syntax:");
        assert_eq!(lines[1], "  - transition 'a|b|c': only one alias permitted");
        assert_eq!(lines[2], "  - transition 'x#nope': unknown assertion 'nope'");
    }

    #[test]
    fn test_assertion_failure_message() {
        let failure = AssertionFailure {
            assertion: Assertion::String,
            search_key: "c".to_string(),
            value: DataValue::from(5),
        };
        assert_eq!(
            failure.to_string(),
            "assertion 'string' failed for 'c': got integer 5"
        );
    }

    #[test]
    fn test_only_no_matches_is_internal() {
        assert!(TransitionError::NoMatches.is_internal());
        assert!(!TransitionError::EmptySource.is_internal());
    }
}
