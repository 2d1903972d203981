//! Parses a batch of transitions and runs them against one source document.

use std::ops::Index;

use log::debug;

use super::ast::Token;
use super::error::TransitionError;
use super::matcher::match_tokens;
use super::parser::Parser;
use super::result::ResultSet;
use crate::document::DataValue;

/// The outcome of applying a list of transitions to a source document.
///
/// Construction runs the whole pipeline at once: parse every transition,
/// report all syntax errors together, walk the document for each token,
/// validate what was found and collect the results. Any failure means no
/// `DataTransition` is produced.
///
/// # Example
///
/// ```
/// use datatransit::document::parser::parse_json;
/// use datatransit::transition::DataTransition;
///
/// let source = parse_json(r#"{"id": 6, "name": "Foo", "extra": "ignored"}"#).unwrap();
/// let transition = DataTransition::new(["id#integer", "name|displayName"], &source).unwrap();
///
/// assert_eq!(transition.results().len(), 2);
/// assert_eq!(transition["displayName"].as_str(), Some("Foo"));
/// ```
#[derive(Debug, Clone)]
pub struct DataTransition {
    tokens: Vec<Token>,
    results: ResultSet,
}

impl DataTransition {
    /// Applies string transitions to `source`.
    pub fn new<I, S>(transitions: I, source: &DataValue) -> Result<Self, TransitionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parser = Parser::new();
        let tokens: Vec<Token> = transitions
            .into_iter()
            .map(|t| parser.parse(t.as_ref()))
            .collect();
        Self::build(tokens, parser, source)
    }

    /// Applies transitions given as loosely typed values, such as a list read
    /// from a JSON or YAML file.
    ///
    /// The first entry that is not a string aborts construction immediately.
    pub fn from_values(transitions: &[DataValue], source: &DataValue) -> Result<Self, TransitionError> {
        let mut parser = Parser::new();
        let mut tokens = Vec::with_capacity(transitions.len());
        for transition in transitions {
            tokens.push(parser.parse_value(transition)?);
        }
        Self::build(tokens, parser, source)
    }

    fn build(tokens: Vec<Token>, parser: Parser, source: &DataValue) -> Result<Self, TransitionError> {
        if tokens.is_empty() {
            return Err(TransitionError::EmptyTransitions);
        }
        if source.is_empty() {
            return Err(TransitionError::EmptySource);
        }
        parser.finish()?;

        let results = match_tokens(&tokens, source)?;
        debug!(
            "{} transitions produced {} values",
            tokens.len(),
            results.len()
        );
        Ok(Self { tokens, results })
    }

    /// Parsed tokens, in the order the transitions were given.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut ResultSet {
        &mut self.results
    }

    pub fn into_results(self) -> ResultSet {
        self.results
    }
}

impl Index<&str> for DataTransition {
    type Output = DataValue;

    /// # Panics
    ///
    /// Panics if no value was extracted under `key`; use
    /// `transition.results().get(key)` ([`ResultSet::get`]) for a fallible lookup.
    fn index(&self, key: &str) -> &DataValue {
        &self.results[key]
    }
}
