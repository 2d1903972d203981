//! Named checks that can be attached to a transition with `#name`.
//!
//! The set of checks is closed: every accepted name maps to one `Assertion`
//! variant through [`ASSERTIONS`]. Names are resolved while parsing, so an
//! unknown name is a syntax error and never reaches the tree walk.
//!
//! A token's assertions always run in lexicographic order of their names,
//! whatever order they were written in. With several failing checks the one
//! reported is therefore the alphabetically first, not the first written.

use std::fmt;

use uuid::Uuid;

use super::ast::Token;
use super::error::AssertionFailure;
use crate::document::{DataNumber, DataValue};

/// A single named check on an extracted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Assertion {
    Boolean,
    Float,
    Integer,
    IsArray,
    IsObject,
    NotEmpty,
    NotNull,
    Null,
    /// A number, or a string that parses as one
    Numeric,
    Positive,
    /// String, number or boolean
    Scalar,
    String,
    /// A string holding a UUID in any of the forms `uuid` accepts
    Uuid,
}

/// Lookup table from the name used in a transition to its check.
///
/// Some checks answer to more than one name (`int` and `integer`, for example).
pub const ASSERTIONS: &[(&str, Assertion)] = &[
    ("array", Assertion::IsArray),
    ("bool", Assertion::Boolean),
    ("boolean", Assertion::Boolean),
    ("float", Assertion::Float),
    ("int", Assertion::Integer),
    ("integer", Assertion::Integer),
    ("isArray", Assertion::IsArray),
    ("isObject", Assertion::IsObject),
    ("notEmpty", Assertion::NotEmpty),
    ("notNull", Assertion::NotNull),
    ("null", Assertion::Null),
    ("numeric", Assertion::Numeric),
    ("object", Assertion::IsObject),
    ("positive", Assertion::Positive),
    ("scalar", Assertion::Scalar),
    ("string", Assertion::String),
    ("uuid", Assertion::Uuid),
];

impl Assertion {
    /// Resolves an assertion by its transition name. Names are case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// use datatransit::transition::Assertion;
    ///
    /// assert_eq!(Assertion::lookup("integer"), Some(Assertion::Integer));
    /// assert_eq!(Assertion::lookup("Integer"), None);
    /// ```
    pub fn lookup(name: &str) -> Option<Assertion> {
        ASSERTIONS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, assertion)| *assertion)
    }

    /// The canonical name of this assertion, used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Assertion::Boolean => "boolean",
            Assertion::Float => "float",
            Assertion::Integer => "integer",
            Assertion::IsArray => "isArray",
            Assertion::IsObject => "isObject",
            Assertion::NotEmpty => "notEmpty",
            Assertion::NotNull => "notNull",
            Assertion::Null => "null",
            Assertion::Numeric => "numeric",
            Assertion::Positive => "positive",
            Assertion::Scalar => "scalar",
            Assertion::String => "string",
            Assertion::Uuid => "uuid",
        }
    }

    /// Runs the check against a value.
    pub fn check(&self, value: &DataValue) -> bool {
        match self {
            Assertion::Boolean => matches!(value, DataValue::Boolean(_)),
            Assertion::Float => matches!(value, DataValue::Number(DataNumber::Float(_))),
            Assertion::Integer => matches!(value, DataValue::Number(n) if n.is_integer()),
            Assertion::IsArray => value.is_array(),
            Assertion::IsObject => value.is_object(),
            Assertion::NotEmpty => match value {
                DataValue::Null => false,
                DataValue::String(s) => !s.is_empty(),
                DataValue::Object(_) | DataValue::Array(_) => !value.is_empty(),
                DataValue::Number(_) | DataValue::Boolean(_) => true,
            },
            Assertion::NotNull => !value.is_null(),
            Assertion::Null => value.is_null(),
            Assertion::Numeric => match value {
                DataValue::Number(_) => true,
                DataValue::String(s) => s.trim().parse::<f64>().is_ok(),
                _ => false,
            },
            Assertion::Positive => match value {
                DataValue::Number(n) => n.as_f64() > 0.0,
                _ => false,
            },
            Assertion::Scalar => value.is_scalar(),
            Assertion::String => matches!(value, DataValue::String(_)),
            Assertion::Uuid => value
                .as_str()
                .map(|s| Uuid::parse_str(s).is_ok())
                .unwrap_or(false),
        }
    }
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Runs every assertion of `token` against `value`, stopping at the first failure.
pub fn validate(value: &DataValue, token: &Token) -> Result<(), AssertionFailure> {
    match token.assertions.iter().find(|a| !a.check(value)) {
        Some(assertion) => Err(AssertionFailure {
            assertion: *assertion,
            search_key: token.search_key().to_string(),
            value: value.clone(),
        }),
        None => Ok(()),
    }
}
