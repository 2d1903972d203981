//! Transition language: parsing, matching, validation and results.
//!
//! A transition is a short expression naming a value inside a nested
//! document, optionally checking it and renaming it in the output.
//!
//! # Syntax
//!
//! - `key` - Direct child of the root
//! - `a>b>c` - Nested path, one level per `>`
//! - `key#integer#notNull` - Assertions on the found value
//! - `key|alias` - Store the value under `alias`
//!
//! # Examples
//!
//! ```text
//! // productAccount>productVersion>product>id#integer|productId
//! // platformLinkUuid#uuid
//! // name|displayName
//! ```

pub mod assertion;
pub mod ast;
pub mod command;
pub mod error;
pub mod matcher;
pub mod parser;
pub mod result;

pub use assertion::{Assertion, ASSERTIONS};
pub use ast::Token;
pub use command::DataTransition;
pub use error::{
    AccessError, AssertionFailure, MalformedTransition, SyntaxError, SyntaxErrors, TransitionError,
};
pub use parser::{parse_transition, Parser};
pub use result::ResultSet;
