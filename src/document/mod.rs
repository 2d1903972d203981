//! Source documents: the nested map/list/scalar values transitions read from.

pub mod node;
pub mod parser;

pub use node::{DataNumber, DataValue};
