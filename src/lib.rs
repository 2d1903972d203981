//! DataTransit - extract, validate and rename values from nested documents.
//!
//! A list of short transition expressions (`a>b>c#integer|depthVal`) is
//! parsed, resolved against a JSON/YAML-like document, checked, and flattened
//! into an ordered result set.

pub mod config;
pub mod document;
pub mod file;
pub mod transition;
